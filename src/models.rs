// ABOUTME: Core data models for the FundScope fundraising platform
// ABOUTME: Defines Event, ConfigScope and the persisted white-label configuration record
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

//! # Data Models
//!
//! Core data structures shared across the settings engine, persistence layer
//! and HTTP routes.
//!
//! ## Design Principles
//!
//! - **Typed scopes**: the GLOBAL/EVENT distinction is a sum type, not a
//!   magic string; the `"GLOBAL"` sentinel exists only at the storage boundary
//! - **Serializable**: all models support JSON serialization for the REST API
//! - **Nullable storage, populated runtime**: `ConfigRecord` mirrors the
//!   nullable database row; consumers only ever see the fully-populated
//!   [`crate::settings::EventSettings`] shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Entity id stored for the singleton GLOBAL configuration row
pub const GLOBAL_ENTITY_ID: &str = "GLOBAL";

/// A fundraising event (campaign) hosted on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event identifier
    pub id: Uuid,
    /// URL-safe unique slug used on public donation pages
    pub slug: String,
    /// Display name of the event
    pub name: String,
    /// Fundraising goal in minor currency units (cents), if set
    pub goal_amount: Option<i64>,
    /// When the event was created
    pub created_at: DateTime<Utc>,
    /// When the event was last modified
    pub updated_at: DateTime<Utc>,
}

/// Which tier a configuration record belongs to
///
/// Exactly one GLOBAL record exists (enforced by the `(scope, entity_id)`
/// uniqueness constraint together with the fixed [`GLOBAL_ENTITY_ID`]);
/// EVENT records exist at most once per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigScope {
    /// Platform-wide defaults, shared by every event without an override
    Global,
    /// Per-event white-label overrides
    Event(Uuid),
}

impl ConfigScope {
    /// Storage value for the `scope` column
    #[must_use]
    pub const fn scope_key(&self) -> &'static str {
        match self {
            Self::Global => "GLOBAL",
            Self::Event(_) => "EVENT",
        }
    }

    /// Storage value for the `entity_id` column
    #[must_use]
    pub fn entity_id(&self) -> String {
        match self {
            Self::Global => GLOBAL_ENTITY_ID.to_owned(),
            Self::Event(id) => id.to_string(),
        }
    }

    /// Reconstruct a scope from its storage columns
    ///
    /// # Errors
    ///
    /// Returns an error if the scope key is unknown or an EVENT row carries
    /// an entity id that is not a UUID.
    pub fn from_columns(scope: &str, entity_id: &str) -> AppResult<Self> {
        match scope {
            "GLOBAL" => Ok(Self::Global),
            "EVENT" => {
                let id = Uuid::parse_str(entity_id).map_err(|e| {
                    AppError::database(format!("Invalid event id '{entity_id}' in config row: {e}"))
                })?;
                Ok(Self::Event(id))
            }
            other => Err(AppError::database(format!(
                "Unknown config scope '{other}'"
            ))),
        }
    }

    /// Whether this is the platform-wide scope
    #[must_use]
    pub const fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}

impl std::fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "GLOBAL"),
            Self::Event(id) => write!(f, "EVENT:{id}"),
        }
    }
}

/// The persisted white-label configuration row
///
/// Every field is nullable: `None` means "no override at this scope". JSON
/// columns are stored as JSON text; an explicitly cleared JSON column is SQL
/// NULL, never an empty object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigRecord {
    /// Which tier this row configures
    #[serde(skip)]
    pub scope: ConfigScopeColumns,
    /// Organization / legal name shown on receipts and pages
    pub organization: Option<String>,
    /// Contact email address
    pub email: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Organization website URL
    pub website: Option<String>,
    /// Primary logo URL (legacy column, distinct from `assets."logo"`)
    pub logo: Option<String>,
    /// CSS variable overrides (`--primary-color` → value)
    pub theme_variables: Option<Value>,
    /// Named asset URLs (logo, background, favicon, ...)
    pub assets: Option<Value>,
    /// Mail sender block (sender name, reply-to, subject, footer)
    pub communication: Option<Value>,
    /// Payment configuration (provider, currency)
    pub payment: Option<Value>,
    /// Donation form per-field flags
    pub form: Option<Value>,
    /// Locale configuration (default + supported list)
    pub locales: Option<Value>,
    /// Page content blob (title, ...)
    pub content: Option<Value>,
    /// Newer nested donation blob (sharing, ...)
    pub donation: Option<Value>,
    /// Newer nested theme blob
    pub theme: Option<Value>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
    /// When the row was last modified
    pub updated_at: DateTime<Utc>,
}

/// Raw storage key of a configuration row, as read from the database
#[derive(Debug, Clone, Default)]
pub struct ConfigScopeColumns {
    /// `scope` column value (`"GLOBAL"` or `"EVENT"`)
    pub scope: String,
    /// `entity_id` column value
    pub entity_id: String,
}

impl ConfigRecord {
    /// Typed scope of this row
    ///
    /// # Errors
    ///
    /// Returns an error if the stored scope columns are malformed.
    pub fn config_scope(&self) -> AppResult<ConfigScope> {
        ConfigScope::from_columns(&self.scope.scope, &self.scope.entity_id)
    }
}
