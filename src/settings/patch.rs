// ABOUTME: Write normalization for white-label settings updates
// ABOUTME: Turns partial nested payloads into flat column write plans with inherit semantics
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

//! Write-side normalization.
//!
//! An admin form submits an arbitrary subset of the nested settings shape.
//! Each leaf arrives in one of three states, modeled explicitly instead of
//! overloading `null`/`""`/missing keys:
//!
//! - **Unset** — the key was not in the payload; the stored value stays
//!   untouched (partial-update semantics)
//! - **Clear** — the key was `null` or empty; the stored value becomes NULL,
//!   meaning "no override here, inherit"
//! - **Set** — a concrete override
//!
//! JSON-blob sections run through [`prune_empty`] first; a section whose keys
//! all prune away clears the whole column ([`StoredJson::DbNull`]) rather
//! than storing an empty-but-present object.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::JsonMap;

/// Tri-state for one scalar leaf of an update payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Key absent from the payload; leave the stored value untouched
    #[default]
    Unset,
    /// Key explicitly `null`/empty; clear the override
    Clear,
    /// Concrete override value
    Set(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldPatch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Missing keys never reach this impl; `#[serde(default)]` yields Unset.
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => Self::Clear,
            Some(value) => Self::Set(value),
        })
    }
}

impl FieldPatch<String> {
    /// Column write for a text column, folding empty strings into Clear
    #[must_use]
    pub fn as_column_write(&self) -> ColumnWrite<String> {
        match self {
            Self::Unset => ColumnWrite::Skip,
            Self::Clear => ColumnWrite::Clear,
            Self::Set(s) if s.trim().is_empty() => ColumnWrite::Clear,
            Self::Set(s) => ColumnWrite::Set(s.clone()),
        }
    }
}

/// Tri-state write instruction for one storage column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnWrite<T> {
    /// Leave the stored value untouched
    #[default]
    Skip,
    /// Store NULL (explicit clear / inherit)
    Clear,
    /// Store this value
    Set(T),
}

impl<T: Clone> ColumnWrite<T> {
    /// Whether this write leaves the column untouched
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    /// Apply this write over the currently stored value
    #[must_use]
    pub fn apply(&self, current: Option<T>) -> Option<T> {
        match self {
            Self::Skip => current,
            Self::Clear => None,
            Self::Set(value) => Some(value.clone()),
        }
    }
}

impl ColumnWrite<JsonMap> {
    /// Apply this write over a stored JSON column value
    #[must_use]
    pub fn apply_json(&self, current: Option<Value>) -> Option<Value> {
        match self {
            Self::Skip => current,
            Self::Clear => None,
            Self::Set(map) => Some(Value::Object(map.clone())),
        }
    }
}

/// Result of normalizing a JSON-blob section for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredJson {
    /// Pruned object with at least one surviving key
    Value(JsonMap),
    /// Every key pruned away: clear the whole JSON column
    DbNull,
}

/// Recursively drop empty leaves from a JSON value
///
/// Removes keys whose value is `""` or `null` at any depth, and nested
/// objects that become empty after pruning. Numbers, booleans, non-empty
/// strings and arrays pass through untouched. Returns `None` when the value
/// itself prunes away. Idempotent.
#[must_use]
pub fn prune_empty(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Object(map) => {
            let pruned: JsonMap = map
                .iter()
                .filter_map(|(key, val)| prune_empty(val).map(|v| (key.clone(), v)))
                .collect();
            if pruned.is_empty() {
                None
            } else {
                Some(Value::Object(pruned))
            }
        }
        other => Some(other.clone()),
    }
}

/// Normalize a JSON-blob section for storage
///
/// The caller has already established that the section was present in the
/// payload; this function only decides between "store this pruned object"
/// and "clear the column". An input whose keys all prune away (including an
/// explicitly sent `{}`) yields [`StoredJson::DbNull`] so a later read treats
/// the block as absent rather than as an empty-but-present override.
#[must_use]
pub fn clean_for_storage(section: &JsonMap) -> StoredJson {
    match prune_empty(&Value::Object(section.clone())) {
        Some(Value::Object(pruned)) => StoredJson::Value(pruned),
        // prune_empty never turns an object into a non-object
        _ => StoredJson::DbNull,
    }
}

impl StoredJson {
    /// Convert into the column write it implies
    #[must_use]
    pub fn into_column_write(self) -> ColumnWrite<JsonMap> {
        match self {
            Self::Value(map) => ColumnWrite::Set(map),
            Self::DbNull => ColumnWrite::Clear,
        }
    }
}

/// Partial update payload for the communication section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationPatch {
    /// Organization / legal name; wins over `content.title` when both are set
    #[serde(default)]
    pub legal_name: FieldPatch<String>,
    /// Contact email address
    #[serde(default)]
    pub email: FieldPatch<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone: FieldPatch<String>,
    /// Postal address
    #[serde(default)]
    pub address: FieldPatch<String>,
    /// Organization website URL
    #[serde(default)]
    pub website: FieldPatch<String>,
    /// Mail sender display name
    #[serde(default)]
    pub sender_name: FieldPatch<String>,
    /// Mail reply-to address
    #[serde(default)]
    pub reply_to: FieldPatch<String>,
    /// Mail subject line
    #[serde(default)]
    pub subject: FieldPatch<String>,
    /// Mail footer text
    #[serde(default)]
    pub footer: FieldPatch<String>,
}

/// Partial update payload for the theme section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePatch {
    /// Named asset URLs; the `logo` entry additionally drives the legacy
    /// top-level logo column
    #[serde(default)]
    pub assets: Option<JsonMap>,
    /// CSS variable overrides
    #[serde(default)]
    pub variables: Option<JsonMap>,
    /// Remaining theme keys, stored in the nested theme blob
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// Partial update payload for the donation section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationPatch {
    /// Per-field enabled/required flags for the donation form
    #[serde(default)]
    pub form: Option<JsonMap>,
    /// Payment configuration (provider, currency)
    #[serde(default)]
    pub payment: Option<JsonMap>,
    /// Social sharing configuration
    #[serde(default)]
    pub sharing: Option<JsonMap>,
}

/// A partial, arbitrarily-nested settings update submitted by an admin
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    /// Contact and mail-sender branding
    #[serde(default)]
    pub communication: Option<CommunicationPatch>,
    /// Visual branding
    #[serde(default)]
    pub theme: Option<ThemePatch>,
    /// Donation flow configuration
    #[serde(default)]
    pub donation: Option<DonationPatch>,
    /// Page content overrides (free-form; `title` has the sync rule below)
    #[serde(default)]
    pub content: Option<JsonMap>,
    /// Locale configuration
    #[serde(default)]
    pub locales: Option<JsonMap>,
}

/// Flat write plan over the configuration row, one instruction per column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigWrite {
    pub organization: ColumnWrite<String>,
    pub email: ColumnWrite<String>,
    pub phone: ColumnWrite<String>,
    pub address: ColumnWrite<String>,
    pub website: ColumnWrite<String>,
    pub logo: ColumnWrite<String>,
    pub theme_variables: ColumnWrite<JsonMap>,
    pub assets: ColumnWrite<JsonMap>,
    pub communication: ColumnWrite<JsonMap>,
    pub payment: ColumnWrite<JsonMap>,
    pub form: ColumnWrite<JsonMap>,
    pub locales: ColumnWrite<JsonMap>,
    pub content: ColumnWrite<JsonMap>,
    pub donation: ColumnWrite<JsonMap>,
    pub theme: ColumnWrite<JsonMap>,
}

impl ConfigWrite {
    /// Whether every column is left untouched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.organization.is_skip()
            && self.email.is_skip()
            && self.phone.is_skip()
            && self.address.is_skip()
            && self.website.is_skip()
            && self.logo.is_skip()
            && self.theme_variables.is_skip()
            && self.assets.is_skip()
            && self.communication.is_skip()
            && self.payment.is_skip()
            && self.form.is_skip()
            && self.locales.is_skip()
            && self.content.is_skip()
            && self.donation.is_skip()
            && self.theme.is_skip()
    }
}

impl SettingsPatch {
    /// Translate this payload into the flat storage write plan
    ///
    /// This is the single entry point for write normalization; every rule
    /// below is covered by a test in this module or `tests/`:
    ///
    /// - untouched sections produce `Skip` for their columns
    /// - empty scalar leaves clear their column
    /// - `organization` is synchronized from `content.title` when no
    ///   non-empty `communication.legalName` is provided
    /// - `theme.assets.logo` drives the legacy top-level logo column
    /// - JSON sections that prune to nothing clear their column
    #[must_use]
    pub fn storage_write(&self) -> ConfigWrite {
        let mut write = ConfigWrite::default();

        if let Some(communication) = &self.communication {
            write.email = communication.email.as_column_write();
            write.phone = communication.phone.as_column_write();
            write.address = communication.address.as_column_write();
            write.website = communication.website.as_column_write();
            write.communication = Self::sender_block_write(communication);
        }

        write.organization = self.organization_write();

        if let Some(theme) = &self.theme {
            if let Some(assets) = &theme.assets {
                write.logo = Self::legacy_logo_write(assets);
                write.assets = clean_for_storage(assets).into_column_write();
            }
            if let Some(variables) = &theme.variables {
                write.theme_variables = clean_for_storage(variables).into_column_write();
            }
            if !theme.extra.is_empty() {
                write.theme = clean_for_storage(&theme.extra).into_column_write();
            }
        }

        if let Some(donation) = &self.donation {
            if let Some(form) = &donation.form {
                write.form = clean_for_storage(form).into_column_write();
            }
            if let Some(payment) = &donation.payment {
                write.payment = clean_for_storage(payment).into_column_write();
            }
            if let Some(sharing) = &donation.sharing {
                let mut blob = JsonMap::new();
                blob.insert("sharing".to_owned(), Value::Object(sharing.clone()));
                write.donation = clean_for_storage(&blob).into_column_write();
            }
        }

        if let Some(content) = &self.content {
            write.content = clean_for_storage(content).into_column_write();
        }

        if let Some(locales) = &self.locales {
            write.locales = clean_for_storage(locales).into_column_write();
        }

        write
    }

    /// Resolve the `organization` column from `legalName` and `content.title`
    ///
    /// An explicitly provided non-empty `legalName` always wins. When it is
    /// absent or empty, a non-empty `content.title` is synchronized into the
    /// column instead (receipts and mail templates read `organization`).
    fn organization_write(&self) -> ColumnWrite<String> {
        let legal_name = self
            .communication
            .as_ref()
            .map_or(ColumnWrite::Skip, |c| c.legal_name.as_column_write());

        let title = self
            .content
            .as_ref()
            .and_then(|content| content.get("title"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty());

        match (legal_name, title) {
            (ColumnWrite::Set(name), _) => ColumnWrite::Set(name),
            (ColumnWrite::Skip | ColumnWrite::Clear, Some(title)) => {
                ColumnWrite::Set(title.to_owned())
            }
            (other, None) => other,
        }
    }

    /// Build the mail-sender JSON blob write from the communication section
    ///
    /// The blob is written whole from the fields present in this payload;
    /// untouched sender fields leave the column untouched only when none of
    /// them appear at all.
    fn sender_block_write(communication: &CommunicationPatch) -> ColumnWrite<JsonMap> {
        let fields = [
            ("senderName", &communication.sender_name),
            ("replyTo", &communication.reply_to),
            ("subject", &communication.subject),
            ("footer", &communication.footer),
        ];

        let mut touched = false;
        let mut block = JsonMap::new();
        for (key, patch) in fields {
            match patch {
                FieldPatch::Unset => {}
                FieldPatch::Clear => touched = true,
                FieldPatch::Set(value) => {
                    touched = true;
                    block.insert(key.to_owned(), Value::String(value.clone()));
                }
            }
        }

        if touched {
            clean_for_storage(&block).into_column_write()
        } else {
            ColumnWrite::Skip
        }
    }

    /// Write for the legacy top-level logo column from `theme.assets`
    fn legacy_logo_write(assets: &JsonMap) -> ColumnWrite<String> {
        match assets.get("logo") {
            None => ColumnWrite::Skip,
            Some(Value::String(url)) if !url.trim().is_empty() => ColumnWrite::Set(url.clone()),
            // null, empty string or a non-string value: clear the legacy column
            Some(_) => ColumnWrite::Clear,
        }
    }
}
