// ABOUTME: HTTP endpoints for event creation, listing and lookup
// ABOUTME: Events anchor EVENT-scoped settings rows and public donation pages
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::errors::AppError;
use crate::models::Event;
use crate::server::ServerResources;

/// Request to create a new event
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// URL slug, unique across the platform
    pub slug: String,
    /// Display name
    pub name: String,
    /// Fundraising goal in minor currency units
    #[serde(default)]
    pub goal_amount: Option<i64>,
}

/// Event routes container
pub struct EventRoutes;

impl EventRoutes {
    /// Create all event routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/events", post(Self::create_event))
            .route("/api/events", get(Self::list_events))
            .route("/api/events/:id", get(Self::get_event))
            .with_state(resources)
    }

    /// Create a new event
    async fn create_event(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateEventRequest>,
    ) -> Result<(StatusCode, Json<Event>), AppError> {
        let slug = request.slug.trim();
        if slug.is_empty() {
            return Err(AppError::invalid_input("Event slug must not be empty"));
        }
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("Event name must not be empty"));
        }

        let event = resources
            .database
            .create_event(slug, name, request.goal_amount)
            .await?;
        info!(event_id = %event.id, slug = %event.slug, "Created event");

        Ok((StatusCode::CREATED, Json(event)))
    }

    /// List all events, newest first
    async fn list_events(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<Vec<Event>>, AppError> {
        Ok(Json(resources.database.list_events().await?))
    }

    /// Get one event by slug or id
    async fn get_event(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Json<Event>, AppError> {
        resources
            .database
            .find_event(&id)
            .await?
            .map(Json)
            .ok_or_else(|| AppError::not_found(format!("Event '{id}'")))
    }
}
