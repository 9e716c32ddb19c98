//! Shop feature settings model.
//!
//! A single row of boolean toggles gating storefront features. Menu
//! resolution reads these through the settings service; while the row does
//! not exist yet (pre-install), every feature-flagged menu item stays
//! invisible.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Fixed primary key of the single settings row.
const SETTINGS_ROW_ID: i32 = 1;

/// Shop settings record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShopSettings {
    /// Whether stock levels are tracked per product.
    pub track_inventory: bool,

    /// Whether shipping options are offered at checkout.
    pub shipping_enabled: bool,

    /// Whether cash on delivery is offered at checkout.
    pub cod_enabled: bool,

    /// Whether the customer portal is available.
    pub portal_enabled: bool,

    /// When the settings were last updated.
    pub updated: DateTime<Utc>,
}

/// Input for updating shop settings; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateShopSettings {
    pub track_inventory: Option<bool>,
    pub shipping_enabled: Option<bool>,
    pub cod_enabled: Option<bool>,
    pub portal_enabled: Option<bool>,
}

impl ShopSettings {
    /// Get the settings row, or `None` if the shop is not configured yet.
    pub async fn get(pool: &PgPool) -> Result<Option<Self>> {
        let settings = sqlx::query_as::<_, ShopSettings>(
            r#"
            SELECT track_inventory, shipping_enabled, cod_enabled, portal_enabled, updated
            FROM shop_settings
            WHERE id = $1
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .fetch_optional(pool)
        .await
        .context("failed to fetch shop settings")?;

        Ok(settings)
    }

    /// Apply a partial update, creating the row with defaults first if none
    /// exists. All toggles default to off.
    pub async fn upsert(pool: &PgPool, input: UpdateShopSettings) -> Result<Self> {
        let current = Self::get(pool).await?;

        let track_inventory = input
            .track_inventory
            .unwrap_or_else(|| current.as_ref().is_some_and(|s| s.track_inventory));
        let shipping_enabled = input
            .shipping_enabled
            .unwrap_or_else(|| current.as_ref().is_some_and(|s| s.shipping_enabled));
        let cod_enabled = input
            .cod_enabled
            .unwrap_or_else(|| current.as_ref().is_some_and(|s| s.cod_enabled));
        let portal_enabled = input
            .portal_enabled
            .unwrap_or_else(|| current.as_ref().is_some_and(|s| s.portal_enabled));

        let settings = sqlx::query_as::<_, ShopSettings>(
            r#"
            INSERT INTO shop_settings (id, track_inventory, shipping_enabled, cod_enabled, portal_enabled, updated)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (id) DO UPDATE
            SET track_inventory = $2, shipping_enabled = $3, cod_enabled = $4,
                portal_enabled = $5, updated = NOW()
            RETURNING track_inventory, shipping_enabled, cod_enabled, portal_enabled, updated
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .bind(track_inventory)
        .bind(shipping_enabled)
        .bind(cod_enabled)
        .bind(portal_enabled)
        .fetch_one(pool)
        .await
        .context("failed to upsert shop settings")?;

        Ok(settings)
    }
}
