//! Database connection pool management.

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    Ok(pool)
}

/// Create the schema if it does not exist yet.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS menu_item (
            id UUID PRIMARY KEY,
            menu_name TEXT NOT NULL DEFAULT 'admin',
            label TEXT NOT NULL,
            route TEXT NOT NULL,
            icon TEXT,
            parent_id UUID,
            weight INTEGER NOT NULL DEFAULT 0,
            required_roles TEXT[] NOT NULL DEFAULT '{}',
            required_permissions TEXT[] NOT NULL DEFAULT '{}',
            feature_flag TEXT,
            created BIGINT NOT NULL,
            changed BIGINT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create menu_item table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS menu_item_menu_name_idx ON menu_item (menu_name)")
        .execute(pool)
        .await
        .context("failed to create menu_item index")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shop_settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            track_inventory BOOLEAN NOT NULL DEFAULT FALSE,
            shipping_enabled BOOLEAN NOT NULL DEFAULT FALSE,
            cod_enabled BOOLEAN NOT NULL DEFAULT FALSE,
            portal_enabled BOOLEAN NOT NULL DEFAULT FALSE,
            updated TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create shop_settings table")?;

    Ok(())
}

/// Check if the database connection is healthy.
pub async fn check_health(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}
