// ABOUTME: HTTP server assembly: shared resources, router construction and serving
// ABOUTME: All route modules hang off one Arc<ServerResources> passed at startup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

//! # Server Assembly
//!
//! [`ServerResources`] bundles the shared state every route module needs;
//! handlers receive it through axum's `State` extractor. [`HttpServer`] builds
//! the full router and serves it until shutdown.

use std::sync::Arc;

use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::event_routes::EventRoutes;
use crate::health_routes::HealthRoutes;
use crate::settings::SettingsService;
use crate::settings_routes::SettingsRoutes;

/// Shared resources for all route handlers
pub struct ServerResources {
    /// Persistence gateway
    pub database: Arc<Database>,
    /// Settings engine facade
    pub settings: SettingsService,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle the shared server state
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let database = Arc::new(database);
        Self {
            settings: SettingsService::new(database.clone()),
            database,
            config,
        }
    }
}

/// The HTTP server
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a new server over the shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(HealthRoutes::routes(self.resources.clone()))
            .merge(SettingsRoutes::routes(self.resources.clone()))
            .merge(EventRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(self.cors_layer())
    }

    /// Serve until the process receives a shutdown signal
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails.
    pub async fn serve(&self) -> AppResult<()> {
        let addr = format!("0.0.0.0:{}", self.resources.config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        info!("HTTP server listening on http://{addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("HTTP server failed: {e}")))
    }

    /// CORS policy from the configured origins
    fn cors_layer(&self) -> CorsLayer {
        let origins = &self.resources.config.cors_origins;
        let allow_origin = if origins.iter().any(|o| o == "*") {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(
                origins
                    .iter()
                    .filter_map(|o| HeaderValue::from_str(o).ok()),
            )
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
    }
}

/// Resolve on SIGINT (and SIGTERM where available)
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut signal) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            signal.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
