// ABOUTME: Database management over SQLite for events and configuration rows
// ABOUTME: Owns the connection pool and schema migrations run at connect time
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

//! # Database Management
//!
//! The persistence gateway of the platform: a single logical store holding
//! the `events` table and the `event_configs` table keyed by
//! `(scope, entity_id)`. All access goes through [`Database`] methods; the
//! settings engine never sees SQL.

mod event_configs;
mod events;

use sqlx::{Pool, Sqlite, SqlitePool};

use crate::errors::{AppError, AppResult};

/// Database manager for event and configuration storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_events().await?;
        self.migrate_event_configs().await?;
        Ok(())
    }

    /// Create the events table
    async fn migrate_events(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                goal_amount INTEGER,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create events table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_events_slug ON events(slug)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create events index: {e}")))?;

        Ok(())
    }

    /// Create the white-label configuration table
    ///
    /// The UNIQUE constraint on `(scope, entity_id)` together with the fixed
    /// GLOBAL sentinel enforces the single-GLOBAL-row invariant structurally.
    async fn migrate_event_configs(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS event_configs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                scope TEXT NOT NULL CHECK (scope IN ('GLOBAL', 'EVENT')),
                entity_id TEXT NOT NULL,
                organization TEXT,
                email TEXT,
                phone TEXT,
                address TEXT,
                website TEXT,
                logo TEXT,
                theme_variables TEXT,
                assets TEXT,
                communication TEXT,
                payment TEXT,
                form TEXT,
                locales TEXT,
                content TEXT,
                donation TEXT,
                theme TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (scope, entity_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create event_configs table: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) async fn create_test_db() -> AppResult<Database> {
        // Each in-memory connection gets its own isolated instance
        Database::new("sqlite::memory:").await
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = create_test_db().await.unwrap();
        db.migrate().await.unwrap();
    }
}
