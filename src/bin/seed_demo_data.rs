// ABOUTME: Seeds a development database with demo events and GLOBAL branding
// ABOUTME: Intended for local development and UI work against realistic data
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

//! # Demo Data Seeder
//!
//! Populates the configured database with a branded GLOBAL configuration,
//! a couple of events, and one event-level override. Safe to rerun: events
//! that already exist are skipped.

use anyhow::Result;
use clap::Parser;
use fundscope_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    errors::ErrorCode,
    logging,
    settings::{SettingsPatch, SettingsService},
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "seed-demo-data")]
#[command(about = "Seed the FundScope database with demo events and branding")]
pub struct Args {
    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = &args.database_url {
        config.database.url = DatabaseUrl::parse_url(url);
    }

    logging::init_from_env()?;
    info!("Seeding demo data into {}", config.database.url);

    let database = Arc::new(Database::new(&config.database.url.to_connection_string()).await?);
    let settings = SettingsService::new(database.clone());

    seed_global_branding(&settings).await?;
    let gala_id = seed_events(&database).await?;
    if let Some(event_id) = gala_id {
        seed_gala_override(&settings, event_id).await?;
    }

    info!("Demo data seeded");
    Ok(())
}

/// Brand the platform-wide defaults
async fn seed_global_branding(settings: &SettingsService) -> Result<()> {
    let patch: SettingsPatch = serde_json::from_value(json!({
        "communication": {
            "legalName": "Helping Hands Foundation",
            "email": "info@helpinghands.org",
            "phone": "+41 44 123 45 67",
            "address": "Seestrasse 1, 8001 Zurich",
            "website": "https://helpinghands.org",
            "senderName": "Helping Hands",
            "replyTo": "donations@helpinghands.org"
        },
        "theme": {
            "assets": { "logo": "https://cdn.helpinghands.org/logo.svg" },
            "variables": { "primaryColor": "#1a7f5a", "fontFamily": "Inter" }
        },
        "donation": {
            "payment": { "provider": "stripe", "currency": "CHF" },
            "form": { "phone": { "enabled": true, "required": false } }
        },
        "locales": { "default": "de-CH", "supported": ["de-CH", "fr-CH", "en-US"] }
    }))?;

    settings.update_global_settings(&patch).await?;
    info!("Seeded GLOBAL branding");
    Ok(())
}

/// Create the demo events, skipping any that already exist
async fn seed_events(database: &Database) -> Result<Option<uuid::Uuid>> {
    let events = [
        ("winter-gala", "Winter Gala", Some(500_000)),
        ("spring-run", "Spring Charity Run", Some(250_000)),
        ("yearly-appeal", "Yearly Appeal", None),
    ];

    let mut gala_id = None;
    for (slug, name, goal) in events {
        match database.create_event(slug, name, goal).await {
            Ok(event) => {
                info!(slug, "Created demo event");
                if slug == "winter-gala" {
                    gala_id = Some(event.id);
                }
            }
            Err(e) if e.code == ErrorCode::ResourceAlreadyExists => {
                info!(slug, "Demo event already exists, skipping");
                if slug == "winter-gala" {
                    gala_id = database.event_by_slug(slug).await?.map(|e| e.id);
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(gala_id)
}

/// Give the gala its own look
async fn seed_gala_override(settings: &SettingsService, event_id: uuid::Uuid) -> Result<()> {
    let patch: SettingsPatch = serde_json::from_value(json!({
        "content": { "title": "Winter Gala 2025", "subtitle": "An evening for a good cause" },
        "theme": {
            "assets": {
                "logo": "https://cdn.helpinghands.org/gala/logo.svg",
                "backgroundLive": "https://cdn.helpinghands.org/gala/stage.jpg"
            },
            "variables": { "primaryColor": "#8a1538" }
        }
    }))?;

    settings
        .update_event_settings(&event_id.to_string(), &patch)
        .await?;
    info!(%event_id, "Seeded gala override");
    Ok(())
}
