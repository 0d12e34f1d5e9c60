// ABOUTME: HTTP endpoints for white-label settings at GLOBAL and EVENT scope
// ABOUTME: Thin axum handlers over SettingsService; all policy lives in the engine
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Json, Router,
};
use std::sync::Arc;

use crate::errors::AppError;
use crate::server::ServerResources;
use crate::settings::{EventSettings, SettingsPatch};

/// Settings routes container
pub struct SettingsRoutes;

impl SettingsRoutes {
    /// Create all settings routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/settings", get(Self::get_global_settings))
            .route("/api/settings", patch(Self::update_global_settings))
            .route(
                "/api/events/:id/settings",
                get(Self::get_event_settings),
            )
            .route(
                "/api/events/:id/settings",
                patch(Self::update_event_settings),
            )
            .route(
                "/api/events/:id/settings/reset",
                post(Self::reset_event_settings),
            )
            .with_state(resources)
    }

    /// Get the platform-wide GLOBAL settings
    async fn get_global_settings(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<EventSettings>, AppError> {
        Ok(Json(resources.settings.get_global_settings().await?))
    }

    /// Partially update the GLOBAL settings
    async fn update_global_settings(
        State(resources): State<Arc<ServerResources>>,
        Json(patch): Json<SettingsPatch>,
    ) -> Result<Json<EventSettings>, AppError> {
        Ok(Json(
            resources.settings.update_global_settings(&patch).await?,
        ))
    }

    /// Get one event's settings by slug or id
    async fn get_event_settings(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Json<EventSettings>, AppError> {
        resources
            .settings
            .get_event_settings(&id)
            .await?
            .map(Json)
            .ok_or_else(|| AppError::not_found(format!("Event '{id}'")))
    }

    /// Partially update one event's settings
    async fn update_event_settings(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(patch): Json<SettingsPatch>,
    ) -> Result<Json<EventSettings>, AppError> {
        Ok(Json(
            resources
                .settings
                .update_event_settings(&id, &patch)
                .await?,
        ))
    }

    /// Drop all overrides of one event, reverting it to GLOBAL inheritance
    async fn reset_event_settings(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Json<EventSettings>, AppError> {
        Ok(Json(resources.settings.reset_event_settings(&id).await?))
    }
}
