// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, service and router construction helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope
#![allow(dead_code)]

//! Shared test utilities for `fundscope_server`

use anyhow::Result;
use fundscope_server::{
    config::ServerConfig,
    database::Database,
    server::{HttpServer, ServerResources},
    settings::SettingsService,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Arc::new(Database::new("sqlite::memory:").await?);
    Ok(database)
}

/// Settings service over a fresh in-memory database
pub async fn create_test_settings_service() -> Result<(Arc<Database>, SettingsService)> {
    let database = create_test_database().await?;
    Ok((database.clone(), SettingsService::new(database)))
}

/// Test server configuration
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        log_level: fundscope_server::config::LogLevel::Info,
        environment: fundscope_server::config::Environment::Testing,
        database: fundscope_server::config::environment::DatabaseConfig {
            url: fundscope_server::config::DatabaseUrl::Memory,
        },
        cors_origins: vec!["*".to_owned()],
    }
}

/// Full application router over a fresh in-memory database
pub async fn create_test_router() -> Result<(Arc<ServerResources>, axum::Router)> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    let resources = Arc::new(ServerResources::new(database, test_config()));
    let router = HttpServer::new(resources.clone()).router();
    Ok((resources, router))
}
