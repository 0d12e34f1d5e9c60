// ABOUTME: Configuration row operations: find-first, upsert and reset
// ABOUTME: Implements the (scope, entity_id) keyed gateway the settings engine builds on
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{ConfigRecord, ConfigScope, ConfigScopeColumns};
use crate::settings::patch::ConfigWrite;

/// Column list shared by the read queries
const CONFIG_COLUMNS: &str = r"
    scope, entity_id, organization, email, phone, address, website, logo,
    theme_variables, assets, communication, payment, form, locales,
    content, donation, theme, created_at, updated_at
";

impl Database {
    /// Find the configuration row for a scope, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored JSON column
    /// does not parse.
    pub async fn find_config(&self, scope: &ConfigScope) -> AppResult<Option<ConfigRecord>> {
        let query = format!(
            "SELECT {CONFIG_COLUMNS} FROM event_configs WHERE scope = ?1 AND entity_id = ?2"
        );

        let row = sqlx::query(&query)
            .bind(scope.scope_key())
            .bind(scope.entity_id())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to get config for {scope}: {e}")))?;

        row.map(|row| Self::config_from_row(&row)).transpose()
    }

    /// Apply a write plan to the scope's configuration row, creating it on
    /// first write
    ///
    /// Untouched columns keep their stored value, cleared columns become
    /// NULL. The merge happens in process over the current row; the final
    /// INSERT .. ON CONFLICT is single-row atomic, so concurrent writers
    /// race with last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or a JSON value
    /// cannot be serialized.
    pub async fn upsert_config(&self, scope: &ConfigScope, write: &ConfigWrite) -> AppResult<()> {
        let current = self.find_config(scope).await?;
        let now = Utc::now();
        let created_at = current.as_ref().map_or(now, |c| c.created_at);

        let merged = Self::merge_write(scope, current, write, created_at, now);

        sqlx::query(
            r"
            INSERT INTO event_configs (
                scope, entity_id, organization, email, phone, address, website, logo,
                theme_variables, assets, communication, payment, form, locales,
                content, donation, theme, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
            ON CONFLICT (scope, entity_id) DO UPDATE SET
                organization = excluded.organization,
                email = excluded.email,
                phone = excluded.phone,
                address = excluded.address,
                website = excluded.website,
                logo = excluded.logo,
                theme_variables = excluded.theme_variables,
                assets = excluded.assets,
                communication = excluded.communication,
                payment = excluded.payment,
                form = excluded.form,
                locales = excluded.locales,
                content = excluded.content,
                donation = excluded.donation,
                theme = excluded.theme,
                updated_at = excluded.updated_at
            ",
        )
        .bind(scope.scope_key())
        .bind(scope.entity_id())
        .bind(&merged.organization)
        .bind(&merged.email)
        .bind(&merged.phone)
        .bind(&merged.address)
        .bind(&merged.website)
        .bind(&merged.logo)
        .bind(json_text(merged.theme_variables.as_ref())?)
        .bind(json_text(merged.assets.as_ref())?)
        .bind(json_text(merged.communication.as_ref())?)
        .bind(json_text(merged.payment.as_ref())?)
        .bind(json_text(merged.form.as_ref())?)
        .bind(json_text(merged.locales.as_ref())?)
        .bind(json_text(merged.content.as_ref())?)
        .bind(json_text(merged.donation.as_ref())?)
        .bind(json_text(merged.theme.as_ref())?)
        .bind(merged.created_at.to_rfc3339())
        .bind(merged.updated_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert config for {scope}: {e}")))?;

        Ok(())
    }

    /// Reset every overridable column of the scope's row to NULL
    ///
    /// The row survives; resetting a scope without a row (or twice) is a
    /// no-op. Returns the number of rows touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn reset_config(&self, scope: &ConfigScope) -> AppResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE event_configs SET
                organization = NULL,
                email = NULL,
                phone = NULL,
                address = NULL,
                website = NULL,
                logo = NULL,
                theme_variables = NULL,
                assets = NULL,
                communication = NULL,
                payment = NULL,
                form = NULL,
                locales = NULL,
                content = NULL,
                donation = NULL,
                theme = NULL,
                updated_at = ?1
            WHERE scope = ?2 AND entity_id = ?3
            ",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(scope.scope_key())
        .bind(scope.entity_id())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to reset config for {scope}: {e}")))?;

        Ok(result.rows_affected())
    }

    /// Fold a write plan over the current row into the full row to store
    fn merge_write(
        scope: &ConfigScope,
        current: Option<ConfigRecord>,
        write: &ConfigWrite,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> ConfigRecord {
        let base = current.unwrap_or_else(|| ConfigRecord {
            scope: ConfigScopeColumns {
                scope: scope.scope_key().to_owned(),
                entity_id: scope.entity_id(),
            },
            organization: None,
            email: None,
            phone: None,
            address: None,
            website: None,
            logo: None,
            theme_variables: None,
            assets: None,
            communication: None,
            payment: None,
            form: None,
            locales: None,
            content: None,
            donation: None,
            theme: None,
            created_at,
            updated_at,
        });

        ConfigRecord {
            organization: write.organization.apply(base.organization),
            email: write.email.apply(base.email),
            phone: write.phone.apply(base.phone),
            address: write.address.apply(base.address),
            website: write.website.apply(base.website),
            logo: write.logo.apply(base.logo),
            theme_variables: write.theme_variables.apply_json(base.theme_variables),
            assets: write.assets.apply_json(base.assets),
            communication: write.communication.apply_json(base.communication),
            payment: write.payment.apply_json(base.payment),
            form: write.form.apply_json(base.form),
            locales: write.locales.apply_json(base.locales),
            content: write.content.apply_json(base.content),
            donation: write.donation.apply_json(base.donation),
            theme: write.theme.apply_json(base.theme),
            created_at,
            updated_at,
            scope: base.scope,
        }
    }

    /// Decode one configuration row
    fn config_from_row(row: &SqliteRow) -> AppResult<ConfigRecord> {
        Ok(ConfigRecord {
            scope: ConfigScopeColumns {
                scope: row.get("scope"),
                entity_id: row.get("entity_id"),
            },
            organization: row.get("organization"),
            email: row.get("email"),
            phone: row.get("phone"),
            address: row.get("address"),
            website: row.get("website"),
            logo: row.get("logo"),
            theme_variables: json_column(row, "theme_variables")?,
            assets: json_column(row, "assets")?,
            communication: json_column(row, "communication")?,
            payment: json_column(row, "payment")?,
            form: json_column(row, "form")?,
            locales: json_column(row, "locales")?,
            content: json_column(row, "content")?,
            donation: json_column(row, "donation")?,
            theme: json_column(row, "theme")?,
            created_at: parse_timestamp(&row.get::<String, _>("created_at")),
            updated_at: parse_timestamp(&row.get::<String, _>("updated_at")),
        })
    }
}

/// Serialize a JSON column value for storage, NULL when absent
fn json_text(value: Option<&Value>) -> AppResult<Option<String>> {
    value
        .map(|v| {
            serde_json::to_string(v)
                .map_err(|e| AppError::serialization(format!("Failed to encode JSON column: {e}")))
        })
        .transpose()
}

/// Parse a stored JSON column, NULL as absent
fn json_column(row: &SqliteRow, name: &str) -> AppResult<Option<Value>> {
    let text: Option<String> = row.get(name);
    text.map(|t| {
        serde_json::from_str(&t).map_err(|e| {
            AppError::serialization(format!("Failed to decode JSON column '{name}': {e}"))
        })
    })
    .transpose()
}

/// Parse a stored RFC 3339 timestamp, falling back to now for legacy rows
pub(crate) fn parse_timestamp(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use crate::database::tests::create_test_db;
    use crate::models::ConfigScope;
    use crate::settings::patch::{ColumnWrite, ConfigWrite};
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_find_config_absent_is_none() {
        let db = create_test_db().await.unwrap();
        assert!(db.find_config(&ConfigScope::Global).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_creates_then_partially_updates() {
        let db = create_test_db().await.unwrap();

        let mut write = ConfigWrite::default();
        write.organization = ColumnWrite::Set("Helping Hands".to_owned());
        write.email = ColumnWrite::Set("info@helpinghands.org".to_owned());
        db.upsert_config(&ConfigScope::Global, &write).await.unwrap();

        // Second write touches only email; organization must survive
        let mut write = ConfigWrite::default();
        write.email = ColumnWrite::Set("hello@helpinghands.org".to_owned());
        db.upsert_config(&ConfigScope::Global, &write).await.unwrap();

        let record = db.find_config(&ConfigScope::Global).await.unwrap().unwrap();
        assert_eq!(record.organization.as_deref(), Some("Helping Hands"));
        assert_eq!(record.email.as_deref(), Some("hello@helpinghands.org"));
    }

    #[tokio::test]
    async fn test_clear_write_nulls_the_column() {
        let db = create_test_db().await.unwrap();

        let mut write = ConfigWrite::default();
        write.organization = ColumnWrite::Set("Helping Hands".to_owned());
        db.upsert_config(&ConfigScope::Global, &write).await.unwrap();

        let mut write = ConfigWrite::default();
        write.organization = ColumnWrite::Clear;
        db.upsert_config(&ConfigScope::Global, &write).await.unwrap();

        let record = db.find_config(&ConfigScope::Global).await.unwrap().unwrap();
        assert!(record.organization.is_none());
    }

    #[tokio::test]
    async fn test_json_columns_round_trip() {
        let db = create_test_db().await.unwrap();
        let scope = ConfigScope::Event(Uuid::new_v4());

        let mut write = ConfigWrite::default();
        let assets = json!({ "logo": "https://x/logo.png" });
        write.assets = ColumnWrite::Set(assets.as_object().unwrap().clone());
        db.upsert_config(&scope, &write).await.unwrap();

        let record = db.find_config(&scope).await.unwrap().unwrap();
        assert_eq!(record.assets, Some(assets));
    }

    #[tokio::test]
    async fn test_reset_nulls_everything_and_is_idempotent() {
        let db = create_test_db().await.unwrap();
        let scope = ConfigScope::Event(Uuid::new_v4());

        let mut write = ConfigWrite::default();
        write.organization = ColumnWrite::Set("Override Org".to_owned());
        write.logo = ColumnWrite::Set("https://x/logo.png".to_owned());
        db.upsert_config(&scope, &write).await.unwrap();

        assert_eq!(db.reset_config(&scope).await.unwrap(), 1);

        let record = db.find_config(&scope).await.unwrap().unwrap();
        assert!(record.organization.is_none());
        assert!(record.logo.is_none());

        // The row survives and resetting again touches it again harmlessly
        assert_eq!(db.reset_config(&scope).await.unwrap(), 1);

        // Unknown scope: nothing to touch
        assert_eq!(
            db.reset_config(&ConfigScope::Event(Uuid::new_v4())).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_global_row_is_singleton() {
        let db = create_test_db().await.unwrap();

        let mut write = ConfigWrite::default();
        write.organization = ColumnWrite::Set("First".to_owned());
        db.upsert_config(&ConfigScope::Global, &write).await.unwrap();

        let mut write = ConfigWrite::default();
        write.organization = ColumnWrite::Set("Second".to_owned());
        db.upsert_config(&ConfigScope::Global, &write).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM event_configs WHERE scope = 'GLOBAL'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
