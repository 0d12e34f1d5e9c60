// ABOUTME: Read resolution from stored configuration rows to EventSettings
// ABOUTME: Maps nullable columns 1:1 onto always-populated nested leaves, no cross-scope merge
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

//! Read-side resolution.
//!
//! A stored row (or its absence) becomes the nested [`EventSettings`] shape.
//! Every stored scalar maps to exactly one settings leaf; NULL reads as `""`
//! and a NULL JSON column as `{}`. GLOBAL is never merged into EVENT here —
//! each scope resolves independently and callers decide about fallback.

use serde_json::Value;

use super::types::{
    CommunicationSettings, ContentSettings, DonationSettings, EventSettings, JsonMap,
    LocaleSettings, ThemeSettings,
};
use crate::models::{ConfigRecord, Event};

/// Resolve the platform-wide settings
///
/// With no GLOBAL row provisioned yet, every leaf is empty; the structure is
/// still fully populated so UI and mail templates read it without null checks.
#[must_use]
pub fn resolve_global(record: Option<&ConfigRecord>) -> EventSettings {
    let mut settings = EventSettings::empty_global();
    if let Some(record) = record {
        settings.is_override = true;
        populate(&mut settings, record);
    }
    settings
}

/// Resolve one event's settings
///
/// Without an override row the event's bare fields (name, slug, goal) are
/// carried but every settings leaf stays empty — notably `content.title`
/// stays `""` rather than falling back to the event name.
#[must_use]
pub fn resolve_event(event: &Event, record: Option<&ConfigRecord>) -> EventSettings {
    let mut settings = EventSettings::empty_for_event(event);
    if let Some(record) = record {
        settings.is_override = true;
        populate(&mut settings, record);
    }
    settings
}

/// Map the stored columns onto the nested settings leaves
fn populate(settings: &mut EventSettings, record: &ConfigRecord) {
    let sender = object(record.communication.as_ref());

    settings.communication = CommunicationSettings {
        legal_name: text(record.organization.as_ref()),
        email: text(record.email.as_ref()),
        phone: text(record.phone.as_ref()),
        address: text(record.address.as_ref()),
        website: text(record.website.as_ref()),
        sender_name: entry_text(&sender, "senderName"),
        reply_to: entry_text(&sender, "replyTo"),
        subject: entry_text(&sender, "subject"),
        footer: entry_text(&sender, "footer"),
    };

    let mut theme_extra = object(record.theme.as_ref());
    for key in ["logo", "assets", "variables"] {
        theme_extra.remove(key);
    }
    settings.theme = ThemeSettings {
        logo: text(record.logo.as_ref()),
        assets: object(record.assets.as_ref()),
        variables: object(record.theme_variables.as_ref()),
        extra: theme_extra,
    };

    let donation_blob = object(record.donation.as_ref());
    settings.donation = DonationSettings {
        form: object(record.form.as_ref()),
        payment: object(record.payment.as_ref()),
        sharing: entry_object(&donation_blob, "sharing"),
    };

    let mut content = object(record.content.as_ref());
    settings.content = ContentSettings {
        title: content
            .remove("title")
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_default(),
        extra: content,
    };

    let locales = object(record.locales.as_ref());
    settings.locales = LocaleSettings {
        default_locale: entry_text(&locales, "default"),
        supported: locales
            .get("supported")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default(),
    };
}

/// NULL text column as empty string
fn text(column: Option<&String>) -> String {
    column.cloned().unwrap_or_default()
}

/// NULL or non-object JSON column as empty map
fn object(column: Option<&Value>) -> JsonMap {
    match column {
        Some(Value::Object(map)) => map.clone(),
        _ => JsonMap::new(),
    }
}

/// String entry of a JSON blob, empty when absent
fn entry_text(map: &JsonMap, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// Object entry of a JSON blob, empty when absent
fn entry_object(map: &JsonMap, key: &str) -> JsonMap {
    match map.get(key) {
        Some(Value::Object(inner)) => inner.clone(),
        _ => JsonMap::new(),
    }
}
