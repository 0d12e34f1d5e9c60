// ABOUTME: Nested EventSettings shapes returned by every settings read
// ABOUTME: Always fully populated so consumers never need null checks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

//! Runtime settings shapes.
//!
//! These are the API-facing structures; they are produced by the resolver and
//! never persisted. Every path is present on every read: absent data appears
//! as `""`, `{}` or `[]`, so `settings.communication.legal_name` is always
//! safe to read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON object alias used for the flexible settings blobs
pub type JsonMap = serde_json::Map<String, Value>;

/// The complete settings shape for one scope (GLOBAL or one event)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSettings {
    /// Entity id: the event UUID, or `"GLOBAL"` for platform settings
    pub id: String,
    /// Event display name (empty for GLOBAL)
    pub name: String,
    /// Event slug, omitted for GLOBAL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Fundraising goal in cents, omitted for GLOBAL or unset goals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_amount: Option<i64>,
    /// Whether an override row exists at this scope
    pub is_override: bool,
    /// Contact and mail-sender branding
    pub communication: CommunicationSettings,
    /// Visual branding
    pub theme: ThemeSettings,
    /// Donation flow configuration
    pub donation: DonationSettings,
    /// Page content overrides
    pub content: ContentSettings,
    /// Locale configuration
    pub locales: LocaleSettings,
}

/// Contact details and mail-sender branding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationSettings {
    /// Organization / legal name (backed by the `organization` column)
    pub legal_name: String,
    /// Contact email address
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Postal address
    pub address: String,
    /// Organization website URL
    pub website: String,
    /// Mail sender display name
    pub sender_name: String,
    /// Mail reply-to address
    pub reply_to: String,
    /// Mail subject line
    pub subject: String,
    /// Mail footer text
    pub footer: String,
}

/// Visual branding: logo, named assets and CSS variables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    /// Primary logo URL (legacy field, kept distinct from `assets."logo"`)
    pub logo: String,
    /// Named asset URLs (logo, backgroundLive, favicon, ...)
    pub assets: JsonMap,
    /// CSS variable overrides
    pub variables: JsonMap,
    /// Remaining theme keys (headerStyle etc.), passed through as-is
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// Donation flow configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationSettings {
    /// Per-field enabled/required flags for the donation form
    pub form: JsonMap,
    /// Payment configuration (provider, currency)
    pub payment: JsonMap,
    /// Social sharing configuration
    pub sharing: JsonMap,
}

/// Page content overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSettings {
    /// Page title; deliberately NOT defaulted from the event name
    pub title: String,
    /// Remaining content keys, passed through as-is
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// Locale configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocaleSettings {
    /// Default locale code (e.g. `"de-CH"`)
    #[serde(rename = "default")]
    pub default_locale: String,
    /// Supported locale codes
    pub supported: Vec<String>,
}

impl EventSettings {
    /// All-empty settings for the GLOBAL scope
    #[must_use]
    pub fn empty_global() -> Self {
        Self {
            id: crate::models::GLOBAL_ENTITY_ID.to_owned(),
            ..Self::default()
        }
    }

    /// All-empty settings carrying an event's bare fields
    #[must_use]
    pub fn empty_for_event(event: &crate::models::Event) -> Self {
        Self {
            id: event.id.to_string(),
            name: event.name.clone(),
            slug: Some(event.slug.clone()),
            goal_amount: event.goal_amount,
            ..Self::default()
        }
    }
}
