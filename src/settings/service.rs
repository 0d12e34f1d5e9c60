// ABOUTME: Orchestration facade for white-label settings reads and writes
// ABOUTME: Ties patch normalization and read resolution to the persistence gateway
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

use std::sync::Arc;

use tracing::{debug, info};

use super::patch::SettingsPatch;
use super::resolver::{resolve_event, resolve_global};
use super::types::EventSettings;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::ConfigScope;

/// Service facade for the settings engine
///
/// All route handlers go through this type; it owns the update pipeline
/// (normalize, persist, re-resolve) and the scope checks around it.
#[derive(Clone)]
pub struct SettingsService {
    database: Arc<Database>,
}

impl SettingsService {
    /// Create a new settings service over the shared database
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Resolve the platform-wide GLOBAL settings
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_global_settings(&self) -> AppResult<EventSettings> {
        let record = self.database.find_config(&ConfigScope::Global).await?;
        Ok(resolve_global(record.as_ref()))
    }

    /// Apply a partial update to the GLOBAL settings and return the new state
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn update_global_settings(&self, patch: &SettingsPatch) -> AppResult<EventSettings> {
        let write = patch.storage_write();
        if write.is_empty() {
            debug!("Global settings update touched no columns");
        } else {
            self.database
                .upsert_config(&ConfigScope::Global, &write)
                .await?;
            info!("Updated global settings");
        }
        self.get_global_settings().await
    }

    /// Resolve one event's settings by slug or id
    ///
    /// Returns `Ok(None)` for an unknown event so public routes can map it
    /// to their own not-found response.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_event_settings(&self, selector: &str) -> AppResult<Option<EventSettings>> {
        let Some(event) = self.database.find_event(selector).await? else {
            return Ok(None);
        };

        let record = self
            .database
            .find_config(&ConfigScope::Event(event.id))
            .await?;
        Ok(Some(resolve_event(&event, record.as_ref())))
    }

    /// Apply a partial update to one event's settings and return the new state
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::ResourceNotFound`] for an unknown
    /// event, or a database error.
    pub async fn update_event_settings(
        &self,
        selector: &str,
        patch: &SettingsPatch,
    ) -> AppResult<EventSettings> {
        let event = self
            .database
            .find_event(selector)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event '{selector}'")))?;

        let scope = ConfigScope::Event(event.id);
        let write = patch.storage_write();
        if write.is_empty() {
            debug!(event_id = %event.id, "Event settings update touched no columns");
        } else {
            self.database.upsert_config(&scope, &write).await?;
            info!(event_id = %event.id, slug = %event.slug, "Updated event settings");
        }

        let record = self.database.find_config(&scope).await?;
        Ok(resolve_event(&event, record.as_ref()))
    }

    /// Drop every override of one event, reverting it to GLOBAL inheritance
    ///
    /// Resetting an event that never had overrides is a no-op and succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::ResourceNotFound`] for an unknown
    /// event, or a database error.
    pub async fn reset_event_settings(&self, selector: &str) -> AppResult<EventSettings> {
        let event = self
            .database
            .find_event(selector)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event '{selector}'")))?;

        let scope = ConfigScope::Event(event.id);
        let touched = self.database.reset_config(&scope).await?;
        info!(event_id = %event.id, rows = touched, "Reset event settings");

        let record = self.database.find_config(&scope).await?;
        Ok(resolve_event(&event, record.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::create_test_db;
    use crate::errors::ErrorCode;
    use serde_json::json;

    async fn test_service() -> SettingsService {
        SettingsService::new(Arc::new(create_test_db().await.unwrap()))
    }

    fn patch(value: serde_json::Value) -> SettingsPatch {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_global_settings_round_trip() {
        let service = test_service().await;

        let before = service.get_global_settings().await.unwrap();
        assert!(!before.is_override);

        let after = service
            .update_global_settings(&patch(json!({
                "communication": { "legalName": "Helping Hands e.V.", "email": "info@hh.org" }
            })))
            .await
            .unwrap();

        assert!(after.is_override);
        assert_eq!(after.communication.legal_name, "Helping Hands e.V.");
        assert_eq!(after.communication.email, "info@hh.org");
    }

    #[tokio::test]
    async fn test_event_settings_stay_independent_of_global() {
        let service = test_service().await;
        service
            .update_global_settings(&patch(json!({
                "communication": { "legalName": "Global Org" }
            })))
            .await
            .unwrap();

        let event = service
            .database
            .create_event("gala", "Gala", None)
            .await
            .unwrap();

        // No server-side fallback: the event resolves empty, not to GLOBAL
        let settings = service.get_event_settings("gala").await.unwrap().unwrap();
        assert!(!settings.is_override);
        assert_eq!(settings.communication.legal_name, "");
        assert_eq!(settings.content.title, "");
        assert_eq!(settings.name, "Gala");
        let _ = event;
    }

    #[tokio::test]
    async fn test_update_event_settings_and_reset() {
        let service = test_service().await;
        let event = service
            .database
            .create_event("gala", "Gala", Some(100_000))
            .await
            .unwrap();

        let updated = service
            .update_event_settings(
                &event.id.to_string(),
                &patch(json!({
                    "theme": { "assets": { "logo": "https://x/logo.png" } },
                    "content": { "title": "Charity Gala" }
                })),
            )
            .await
            .unwrap();

        assert!(updated.is_override);
        assert_eq!(updated.theme.logo, "https://x/logo.png");
        assert_eq!(updated.content.title, "Charity Gala");
        // title synced into the organization leaf
        assert_eq!(updated.communication.legal_name, "Charity Gala");

        let reset = service.reset_event_settings("gala").await.unwrap();
        assert_eq!(reset.theme.logo, "");
        assert_eq!(reset.content.title, "");
        assert_eq!(reset.communication.legal_name, "");

        // idempotent
        service.reset_event_settings("gala").await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_event_selector_is_not_found() {
        let service = test_service().await;
        let missing = uuid::Uuid::new_v4().to_string();

        let err = service
            .update_event_settings(&missing, &SettingsPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);

        let err = service.reset_event_settings("missing").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
    }

    #[tokio::test]
    async fn test_unknown_slug_resolves_none() {
        let service = test_service().await;
        assert!(service.get_event_settings("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partial_update_preserves_untouched_sections() {
        let service = test_service().await;

        service
            .update_global_settings(&patch(json!({
                "communication": { "email": "info@hh.org" },
                "locales": { "default": "de-CH", "supported": ["de-CH"] }
            })))
            .await
            .unwrap();

        let after = service
            .update_global_settings(&patch(json!({
                "communication": { "phone": "+41 44 000 00 00" }
            })))
            .await
            .unwrap();

        assert_eq!(after.communication.email, "info@hh.org");
        assert_eq!(after.communication.phone, "+41 44 000 00 00");
        assert_eq!(after.locales.default_locale, "de-CH");
    }
}
