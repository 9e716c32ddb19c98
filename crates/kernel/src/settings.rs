//! Cached access to shop settings.
//!
//! Menu resolution consults the feature toggles on every request while the
//! row itself changes rarely, so reads go through a small TTL cache. Writes
//! invalidate immediately; other instances converge within the TTL.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use moka::sync::Cache;
use sqlx::PgPool;
use tracing::debug;

use crate::models::{ShopSettings, UpdateShopSettings};

/// How long a cached settings snapshot stays valid.
const SETTINGS_TTL_SECS: u64 = 60;

/// Cache key for the single settings row.
const SETTINGS_KEY: &str = "shop_settings";

/// Settings service with a TTL-based in-memory cache.
#[derive(Clone)]
pub struct SettingsService {
    inner: Arc<SettingsServiceInner>,
}

struct SettingsServiceInner {
    /// Cached snapshot; `Some(None)` caches the row's absence too.
    cache: Cache<&'static str, Option<ShopSettings>>,

    /// Database pool for cache misses.
    pool: PgPool,
}

impl SettingsService {
    /// Create a new settings service.
    pub fn new(pool: PgPool) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(SETTINGS_TTL_SECS))
            .build();

        Self {
            inner: Arc::new(SettingsServiceInner { cache, pool }),
        }
    }

    /// Current settings, or `None` while the shop is not configured yet.
    pub async fn get(&self) -> Result<Option<ShopSettings>> {
        if let Some(cached) = self.inner.cache.get(SETTINGS_KEY) {
            debug!("shop settings cache hit");
            return Ok(cached);
        }

        let settings = ShopSettings::get(&self.inner.pool).await?;
        self.inner.cache.insert(SETTINGS_KEY, settings.clone());

        Ok(settings)
    }

    /// Apply a partial update and drop the cached snapshot.
    pub async fn update(&self, input: UpdateShopSettings) -> Result<ShopSettings> {
        let settings = ShopSettings::upsert(&self.inner.pool, input).await?;
        self.inner.cache.invalidate(SETTINGS_KEY);

        Ok(settings)
    }
}
