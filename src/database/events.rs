// ABOUTME: Event table operations: creation, slug lookup and listing
// ABOUTME: Events anchor EVENT-scoped configuration rows and public donation pages
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Event;

impl Database {
    /// Create a new event
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::ResourceAlreadyExists`] when the
    /// slug is taken, or a database error otherwise.
    pub async fn create_event(
        &self,
        slug: &str,
        name: &str,
        goal_amount: Option<i64>,
    ) -> AppResult<Event> {
        let event = Event {
            id: Uuid::new_v4(),
            slug: slug.to_owned(),
            name: name.to_owned(),
            goal_amount,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO events (id, slug, name, goal_amount, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            ",
        )
        .bind(event.id.to_string())
        .bind(&event.slug)
        .bind(&event.name)
        .bind(event.goal_amount)
        .bind(event.created_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                AppError::already_exists(format!("Event with slug '{slug}'"))
            } else {
                AppError::database(format!("Failed to create event: {e}"))
            }
        })?;

        Ok(event)
    }

    /// Look up an event by its public slug
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn event_by_slug(&self, slug: &str) -> AppResult<Option<Event>> {
        let row = sqlx::query(
            r"
            SELECT id, slug, name, goal_amount, created_at, updated_at
            FROM events
            WHERE slug = ?1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get event by slug: {e}")))?;

        row.map(|row| Self::event_from_row(&row)).transpose()
    }

    /// Look up an event by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn event_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        let row = sqlx::query(
            r"
            SELECT id, slug, name, goal_amount, created_at, updated_at
            FROM events
            WHERE id = ?1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get event by id: {e}")))?;

        row.map(|row| Self::event_from_row(&row)).transpose()
    }

    /// Look up an event by slug or by id string
    ///
    /// Route paths carry one identifier segment for every event operation;
    /// a selector that parses as a UUID is treated as an id, anything else
    /// as a slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_event(&self, selector: &str) -> AppResult<Option<Event>> {
        match Uuid::parse_str(selector) {
            Ok(id) => self.event_by_id(id).await,
            Err(_) => self.event_by_slug(selector).await,
        }
    }

    /// List all events, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        let rows = sqlx::query(
            r"
            SELECT id, slug, name, goal_amount, created_at, updated_at
            FROM events
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list events: {e}")))?;

        rows.iter().map(Self::event_from_row).collect()
    }

    /// Decode one event row
    fn event_from_row(row: &SqliteRow) -> AppResult<Event> {
        let id_str: String = row.get("id");
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| AppError::database(format!("Invalid event id '{id_str}': {e}")))?;

        Ok(Event {
            id,
            slug: row.get("slug"),
            name: row.get("name"),
            goal_amount: row.get("goal_amount"),
            created_at: super::event_configs::parse_timestamp(&row.get::<String, _>("created_at")),
            updated_at: super::event_configs::parse_timestamp(&row.get::<String, _>("updated_at")),
        })
    }
}
