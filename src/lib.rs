// ABOUTME: Main library entry point for the FundScope fundraising platform server
// ABOUTME: Provides white-label settings management over GLOBAL and per-event scopes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

#![deny(unsafe_code)]

//! # FundScope Server
//!
//! A multi-tenant fundraising platform server centered on white-label
//! configuration: every event can carry its own branding, mail sender
//! identity, donation form setup and locales, inheriting the platform's
//! GLOBAL defaults wherever it does not override them.
//!
//! ## Architecture
//!
//! - **Settings**: the two-tier configuration engine (write normalization,
//!   read resolution, service facade)
//! - **Database**: the SQLite persistence gateway for events and
//!   `(scope, entity_id)` keyed configuration rows
//! - **Routes**: thin axum handlers over the service layer
//! - **Config**: environment-driven server configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fundscope_server::config::ServerConfig;
//! use fundscope_server::database::Database;
//! use fundscope_server::server::{HttpServer, ServerResources};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database.url.to_connection_string()).await?;
//!     let resources = Arc::new(ServerResources::new(database, config));
//!     HttpServer::new(resources).serve().await?;
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by binary crates (src/bin/) and integration tests
// (tests/). They must remain `pub` so external consumers can access them.

/// Environment-driven server configuration
pub mod config;

/// SQLite persistence gateway for events and configuration rows
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// `HTTP` routes for event creation and lookup
pub mod event_routes;

/// `HTTP` routes for health and readiness probes
pub mod health_routes;

/// Logging configuration and structured logging setup
pub mod logging;

/// Core domain types: events and configuration scopes
pub mod models;

/// `HTTP` server assembly and shared resources
pub mod server;

/// White-label settings engine
pub mod settings;

/// `HTTP` routes for GLOBAL and per-event settings
pub mod settings_routes;
