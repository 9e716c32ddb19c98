//! Menu item model for navigational entries.
//!
//! Items are organized into named menus (e.g., "admin", "storefront"), may
//! have a parent for hierarchical structures, and carry the access
//! requirements (roles, permissions, feature flag) the resolver filters on.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Maximum parent-chain length accepted when validating a parent change.
const MAX_PARENT_DEPTH: usize = 64;

/// Menu item record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MenuItem {
    /// Unique identifier (UUIDv7).
    pub id: Uuid,

    /// Menu machine name (e.g., "admin", "storefront").
    pub menu_name: String,

    /// Display label.
    pub label: String,

    /// Link destination route.
    pub route: String,

    /// Optional icon name for rendering.
    pub icon: Option<String>,

    /// Optional parent item for hierarchy.
    pub parent_id: Option<Uuid>,

    /// Sort weight (lower = higher priority); ties keep insertion order.
    pub weight: i32,

    /// Roles that may see this item; empty means unrestricted. One match
    /// is enough.
    #[serde(default)]
    pub required_roles: Vec<String>,

    /// Permissions required to see this item; empty means unrestricted.
    /// All of them are required.
    #[serde(default)]
    pub required_permissions: Vec<String>,

    /// Optional feature flag key gating visibility on shop settings.
    pub feature_flag: Option<String>,

    /// Unix timestamp when created.
    pub created: i64,

    /// Unix timestamp when last changed.
    pub changed: i64,
}

/// Input for creating a menu item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuItem {
    pub menu_name: Option<String>,
    pub label: String,
    pub route: String,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
    pub weight: Option<i32>,
    pub required_roles: Option<Vec<String>>,
    pub required_permissions: Option<Vec<String>>,
    pub feature_flag: Option<String>,
}

/// Input for updating a menu item.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMenuItem {
    pub menu_name: Option<String>,
    pub label: Option<String>,
    pub route: Option<String>,
    pub icon: Option<Option<String>>,
    pub parent_id: Option<Option<Uuid>>,
    pub weight: Option<i32>,
    pub required_roles: Option<Vec<String>>,
    pub required_permissions: Option<Vec<String>>,
    pub feature_flag: Option<Option<String>>,
}

const MENU_ITEM_COLUMNS: &str = "id, menu_name, label, route, icon, parent_id, weight, \
     required_roles, required_permissions, feature_flag, created, changed";

impl MenuItem {
    /// Create a new menu item.
    pub async fn create(pool: &PgPool, input: CreateMenuItem) -> Result<Self> {
        let id = Uuid::now_v7();
        let now = chrono::Utc::now().timestamp();
        let menu_name = input.menu_name.unwrap_or_else(|| "admin".to_string());
        let weight = input.weight.unwrap_or(0);
        let required_roles = input.required_roles.unwrap_or_default();
        let required_permissions = input.required_permissions.unwrap_or_default();

        let item = sqlx::query_as::<_, MenuItem>(&format!(
            r#"
            INSERT INTO menu_item (id, menu_name, label, route, icon, parent_id, weight,
                                   required_roles, required_permissions, feature_flag, created, changed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {MENU_ITEM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&menu_name)
        .bind(&input.label)
        .bind(&input.route)
        .bind(&input.icon)
        .bind(input.parent_id)
        .bind(weight)
        .bind(&required_roles)
        .bind(&required_permissions)
        .bind(&input.feature_flag)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
        .context("failed to create menu item")?;

        Ok(item)
    }

    /// Find a menu item by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_item WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch menu item by id")?;

        Ok(item)
    }

    /// Find all items of a menu, ordered by weight.
    ///
    /// The resolver re-sorts siblings per tree level; the label tiebreak
    /// here just makes the snapshot order deterministic.
    pub async fn find_by_menu(pool: &PgPool, menu_name: &str) -> Result<Vec<Self>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            r#"
            SELECT {MENU_ITEM_COLUMNS}
            FROM menu_item
            WHERE menu_name = $1
            ORDER BY weight ASC, label ASC
            "#
        ))
        .bind(menu_name)
        .fetch_all(pool)
        .await
        .context("failed to fetch menu items by menu")?;

        Ok(items)
    }

    /// Update a menu item.
    ///
    /// Rejects a `parent_id` change that would nest the item under itself,
    /// directly or through its descendants.
    pub async fn update(pool: &PgPool, id: Uuid, input: UpdateMenuItem) -> Result<Option<Self>> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let now = chrono::Utc::now().timestamp();

        let parent_id = input.parent_id.unwrap_or(existing.parent_id);
        if let Some(new_parent) = parent_id {
            if new_parent == id || Self::has_ancestor(pool, new_parent, id).await? {
                bail!("menu item cannot be nested under itself");
            }
        }

        let menu_name = input.menu_name.unwrap_or(existing.menu_name);
        let label = input.label.unwrap_or(existing.label);
        let route = input.route.unwrap_or(existing.route);
        let icon = input.icon.unwrap_or(existing.icon);
        let weight = input.weight.unwrap_or(existing.weight);
        let required_roles = input.required_roles.unwrap_or(existing.required_roles);
        let required_permissions = input
            .required_permissions
            .unwrap_or(existing.required_permissions);
        let feature_flag = input.feature_flag.unwrap_or(existing.feature_flag);

        let updated = sqlx::query_as::<_, MenuItem>(&format!(
            r#"
            UPDATE menu_item
            SET menu_name = $1, label = $2, route = $3, icon = $4, parent_id = $5,
                weight = $6, required_roles = $7, required_permissions = $8,
                feature_flag = $9, changed = $10
            WHERE id = $11
            RETURNING {MENU_ITEM_COLUMNS}
            "#
        ))
        .bind(&menu_name)
        .bind(&label)
        .bind(&route)
        .bind(&icon)
        .bind(parent_id)
        .bind(weight)
        .bind(&required_roles)
        .bind(&required_permissions)
        .bind(&feature_flag)
        .bind(now)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to update menu item")?;

        Ok(updated)
    }

    /// Delete a menu item.
    ///
    /// Children keep their `parent_id`; the resolver routes the now-dangling
    /// reference to the root.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM menu_item WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete menu item")?;

        Ok(result.rows_affected() > 0)
    }

    /// List items of a menu with pagination.
    pub async fn list_by_menu(
        pool: &PgPool,
        menu_name: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            r#"
            SELECT {MENU_ITEM_COLUMNS}
            FROM menu_item
            WHERE menu_name = $1
            ORDER BY weight ASC, label ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(menu_name)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("failed to list menu items by menu")?;

        Ok(items)
    }

    /// Count items of a menu.
    pub async fn count_by_menu(pool: &PgPool, menu_name: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item WHERE menu_name = $1")
            .bind(menu_name)
            .fetch_one(pool)
            .await
            .context("failed to count menu items by menu")?;

        Ok(count)
    }

    /// Walk `start`'s parent chain looking for `target`.
    ///
    /// Used to reject parent assignments that would close a cycle. The walk
    /// is depth-bounded so existing bad data cannot loop it.
    async fn has_ancestor(pool: &PgPool, start: Uuid, target: Uuid) -> Result<bool> {
        let mut current = Some(start);
        let mut depth = 0;

        while let Some(id) = current {
            if id == target {
                return Ok(true);
            }
            depth += 1;
            if depth > MAX_PARENT_DEPTH {
                bail!("menu parent chain exceeds maximum depth");
            }
            current = sqlx::query_scalar::<_, Option<Uuid>>(
                "SELECT parent_id FROM menu_item WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to walk menu item parents")?
            .flatten();
        }

        Ok(false)
    }
}
