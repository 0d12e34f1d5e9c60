// ABOUTME: White-label settings engine: two-tier GLOBAL/EVENT configuration
// ABOUTME: Write normalization, read resolution and the service facade over the store
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

//! # White-Label Settings Engine
//!
//! Events inherit the platform's GLOBAL branding unless an EVENT-scoped
//! override row exists. This module owns the two data transformations around
//! that store:
//!
//! - **Write normalization** ([`patch`]): a partial nested payload from the
//!   admin UI becomes a flat column write plan, with "empty means inherit"
//!   semantics applied per leaf
//! - **Read resolution** ([`resolver`]): a stored row (or its absence)
//!   becomes the fully-populated [`EventSettings`] shape consumers read
//!   without null checks
//!
//! GLOBAL and EVENT settings are never merged server-side; callers decide
//! how (and whether) to fall back.

/// Partial payloads, emptiness pruning and the flat write plan
pub mod patch;

/// Stored row to `EventSettings` mapping
pub mod resolver;

/// Orchestration facade over the persistence gateway
pub mod service;

/// The nested settings shapes served to consumers
pub mod types;

pub use patch::{
    clean_for_storage, prune_empty, ColumnWrite, ConfigWrite, FieldPatch, SettingsPatch, StoredJson,
};
pub use service::SettingsService;
pub use types::{
    CommunicationSettings, ContentSettings, DonationSettings, EventSettings, LocaleSettings,
    ThemeSettings,
};
