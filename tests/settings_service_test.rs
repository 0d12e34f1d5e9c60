// ABOUTME: Integration tests for the settings engine service layer
// ABOUTME: Exercises write normalization, inherit semantics and scope isolation end to end
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

mod common;

use common::create_test_settings_service;
use fundscope_server::errors::ErrorCode;
use fundscope_server::models::ConfigScope;
use fundscope_server::settings::SettingsPatch;
use serde_json::json;
use uuid::Uuid;

fn patch(value: serde_json::Value) -> SettingsPatch {
    serde_json::from_value(value).expect("patch payload must deserialize")
}

#[tokio::test]
async fn test_global_settings_full_round_trip() {
    let (_db, service) = create_test_settings_service().await.unwrap();

    let settings = service
        .update_global_settings(&patch(json!({
            "communication": {
                "legalName": "Helping Hands e.V.",
                "email": "info@hh.org",
                "senderName": "Helping Hands",
                "replyTo": "donate@hh.org"
            },
            "theme": {
                "assets": { "logo": "https://cdn.hh.org/logo.svg" },
                "variables": { "primaryColor": "#1a7f5a" }
            },
            "donation": {
                "payment": { "provider": "stripe", "currency": "CHF" },
                "sharing": { "twitter": true }
            },
            "locales": { "default": "de-CH", "supported": ["de-CH", "en-US"] }
        })))
        .await
        .unwrap();

    assert!(settings.is_override);
    assert_eq!(settings.id, "GLOBAL");
    assert_eq!(settings.communication.legal_name, "Helping Hands e.V.");
    assert_eq!(settings.communication.sender_name, "Helping Hands");
    assert_eq!(settings.theme.logo, "https://cdn.hh.org/logo.svg");
    assert_eq!(
        settings.theme.assets.get("logo").and_then(|v| v.as_str()),
        Some("https://cdn.hh.org/logo.svg")
    );
    assert_eq!(
        settings.donation.payment.get("currency").and_then(|v| v.as_str()),
        Some("CHF")
    );
    assert_eq!(settings.donation.sharing.get("twitter"), Some(&json!(true)));
    assert_eq!(settings.locales.default_locale, "de-CH");
    assert_eq!(settings.locales.supported, vec!["de-CH", "en-US"]);
}

#[tokio::test]
async fn test_partial_update_leaves_other_sections_alone() {
    let (_db, service) = create_test_settings_service().await.unwrap();

    service
        .update_global_settings(&patch(json!({
            "communication": { "email": "info@hh.org" },
            "theme": { "variables": { "primaryColor": "#1a7f5a" } }
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
    assert_eq!(
        after.theme.variables.get("primaryColor").and_then(|v| v.as_str()),
        Some("#1a7f5a")
    );
}

#[tokio::test]
async fn test_empty_values_clear_overrides() {
    let (db, service) = create_test_settings_service().await.unwrap();

    service
        .update_global_settings(&patch(json!({
            "communication": { "email": "info@hh.org" }
        })))
        .await
        .unwrap();

    let after = service
        .update_global_settings(&patch(json!({
            "communication": { "email": "" }
        })))
        .await
        .unwrap();
    assert_eq!(after.communication.email, "");

    // The column is NULL, not an empty string
    let record = db.find_config(&ConfigScope::Global).await.unwrap().unwrap();
    assert!(record.email.is_none());
}

#[tokio::test]
async fn test_legal_name_wins_over_title_sync() {
    let (_db, service) = create_test_settings_service().await.unwrap();

    let settings = service
        .update_global_settings(&patch(json!({
            "communication": { "legalName": "Strict Name" },
            "content": { "title": "Page Title" }
        })))
        .await
        .unwrap();

    assert_eq!(settings.communication.legal_name, "Strict Name");
    assert_eq!(settings.content.title, "Page Title");
}

#[tokio::test]
async fn test_title_syncs_into_organization_without_legal_name() {
    let (_db, service) = create_test_settings_service().await.unwrap();

    let settings = service
        .update_global_settings(&patch(json!({
            "content": { "title": "Page Title" }
        })))
        .await
        .unwrap();

    assert_eq!(settings.communication.legal_name, "Page Title");
    assert_eq!(settings.content.title, "Page Title");
}

#[tokio::test]
async fn test_event_never_inherits_global_on_read() {
    let (db, service) = create_test_settings_service().await.unwrap();

    service
        .update_global_settings(&patch(json!({
            "communication": { "legalName": "Global Org" },
            "theme": { "assets": { "logo": "https://cdn.hh.org/logo.svg" } }
        })))
        .await
        .unwrap();

    let event = db.create_event("gala", "Winter Gala", Some(500_000)).await.unwrap();

    let settings = service.get_event_settings("gala").await.unwrap().unwrap();
    assert!(!settings.is_override);
    assert_eq!(settings.name, "Winter Gala");
    assert_eq!(settings.goal_amount, Some(500_000));
    // no fallback to GLOBAL values and no title defaulting from the name
    assert_eq!(settings.communication.legal_name, "");
    assert_eq!(settings.theme.logo, "");
    assert_eq!(settings.content.title, "");
    let _ = event;
}

#[tokio::test]
async fn test_event_override_and_reset_cycle() {
    let (db, service) = create_test_settings_service().await.unwrap();
    let event = db.create_event("gala", "Gala", None).await.unwrap();

    let updated = service
        .update_event_settings(
            &event.id.to_string(),
            &patch(json!({
                "content": { "title": "Charity Gala", "subtitle": "Join us" },
                "theme": { "assets": { "logo": "https://cdn.hh.org/gala.svg" } }
            })),
        )
        .await
        .unwrap();

    assert!(updated.is_override);
    assert_eq!(updated.content.title, "Charity Gala");
    assert_eq!(
        updated.content.extra.get("subtitle").and_then(|v| v.as_str()),
        Some("Join us")
    );
    assert_eq!(updated.theme.logo, "https://cdn.hh.org/gala.svg");

    let reset = service.reset_event_settings("gala").await.unwrap();
    assert_eq!(reset.content.title, "");
    assert_eq!(reset.theme.logo, "");
    assert!(reset.content.extra.is_empty());

    // second reset is a harmless no-op
    let again = service.reset_event_settings("gala").await.unwrap();
    assert_eq!(again.content.title, "");
}

#[tokio::test]
async fn test_assets_logo_examples() {
    let (_db, service) = create_test_settings_service().await.unwrap();

    // set a logo plus an empty sibling key
    let settings = service
        .update_global_settings(&patch(json!({
            "theme": { "assets": { "logo": "https://x/logo.png", "backgroundLive": "" } }
        })))
        .await
        .unwrap();
    assert_eq!(settings.theme.logo, "https://x/logo.png");
    assert_eq!(settings.theme.assets.len(), 1);
    assert!(settings.theme.assets.contains_key("logo"));

    // clearing the logo clears both the blob entry and the legacy column
    let cleared = service
        .update_global_settings(&patch(json!({
            "theme": { "assets": { "logo": "" } }
        })))
        .await
        .unwrap();
    assert_eq!(cleared.theme.logo, "");
    assert!(cleared.theme.assets.is_empty());
}

#[tokio::test]
async fn test_theme_extra_keys_round_trip() {
    let (_db, service) = create_test_settings_service().await.unwrap();

    let settings = service
        .update_global_settings(&patch(json!({
            "theme": {
                "headerStyle": "banner",
                "assets": { "logo": "https://x/logo.png" }
            }
        })))
        .await
        .unwrap();

    assert_eq!(
        settings.theme.extra.get("headerStyle").and_then(|v| v.as_str()),
        Some("banner")
    );
    assert_eq!(settings.theme.logo, "https://x/logo.png");

    // survives a later update that touches a different section
    let after = service
        .update_global_settings(&patch(json!({
            "communication": { "email": "info@hh.org" }
        })))
        .await
        .unwrap();
    assert_eq!(
        after.theme.extra.get("headerStyle").and_then(|v| v.as_str()),
        Some("banner")
    );
}

#[tokio::test]
async fn test_unknown_event_operations_fail_cleanly() {
    let (_db, service) = create_test_settings_service().await.unwrap();

    assert!(service.get_event_settings("nope").await.unwrap().is_none());

    let err = service
        .update_event_settings(&Uuid::new_v4().to_string(), &SettingsPatch::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = service
        .reset_event_settings(&Uuid::new_v4().to_string())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_event_overrides_do_not_leak_into_global() {
    let (db, service) = create_test_settings_service().await.unwrap();
    let event = db.create_event("gala", "Gala", None).await.unwrap();

    service
        .update_event_settings(
            &event.id.to_string(),
            &patch(json!({ "communication": { "legalName": "Event Org" } })),
        )
        .await
        .unwrap();

    let global = service.get_global_settings().await.unwrap();
    assert!(!global.is_override);
    assert_eq!(global.communication.legal_name, "");
}
