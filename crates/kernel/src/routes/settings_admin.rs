//! Admin routes for shop feature settings.
//!
//! Reads and partial updates of the feature toggles that gate
//! feature-flagged menu items. Requires the `settings:manage` permission.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::error::{AppError, AppResult};
use crate::models::{ShopSettings, UpdateShopSettings};
use crate::principal::Principal;
use crate::state::AppState;

/// Permission required to manage shop settings.
const MANAGE_PERMISSION: &str = "settings:manage";

/// Create the settings admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/settings", get(get_settings))
        .route("/api/settings", put(update_settings))
}

fn require_manage(headers: &HeaderMap) -> Result<(), AppError> {
    let principal = Principal::from_headers(headers);
    if principal.has_permission(MANAGE_PERMISSION) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Current settings; 404 while the shop is not configured yet.
async fn get_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ShopSettings>> {
    require_manage(&headers)?;

    let settings = state.settings().get().await?.ok_or(AppError::NotFound)?;

    Ok(Json(settings))
}

/// Apply a partial update, creating the settings row if needed.
async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<UpdateShopSettings>,
) -> AppResult<Json<ShopSettings>> {
    require_manage(&headers)?;

    let settings = state.settings().update(input).await?;

    Ok(Json(settings))
}
