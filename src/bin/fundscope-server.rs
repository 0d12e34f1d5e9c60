// ABOUTME: Server binary for the FundScope fundraising platform
// ABOUTME: Loads configuration, connects the database and serves the HTTP API
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

//! # FundScope Server Binary
//!
//! Starts the HTTP API serving white-label settings and event management.

use anyhow::Result;
use clap::Parser;
use fundscope_server::{
    config::ServerConfig,
    database::Database,
    logging,
    server::{HttpServer, ServerResources},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "fundscope-server")]
#[command(about = "FundScope - white-label fundraising platform server")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = &args.database_url {
        config.database.url = fundscope_server::config::DatabaseUrl::parse_url(url);
    }

    logging::init_from_env()?;

    info!("Starting FundScope server");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database initialized: {}", config.database.url);

    let resources = Arc::new(ServerResources::new(database, config));
    HttpServer::new(resources).serve().await?;

    info!("Server stopped");
    Ok(())
}
