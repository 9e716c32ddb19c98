//! Admin CRUD routes for menu items.
//!
//! All endpoints require the `menus:manage` permission (or the `*:*`
//! wildcard) on the request principal.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CreateMenuItem, MenuItem, UpdateMenuItem};
use crate::principal::Principal;
use crate::state::AppState;

/// Permission required to manage menu items.
const MANAGE_PERMISSION: &str = "menus:manage";

/// Create the menu admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/menu-items/{menu_name}", get(list_menu_items))
        .route("/api/menu-item", post(create_menu_item))
        .route("/api/menu-item/{id}", get(get_menu_item))
        .route("/api/menu-item/{id}", put(update_menu_item))
        .route("/api/menu-item/{id}", delete(delete_menu_item))
}

/// Pagination query parameters.
#[derive(Deserialize)]
struct Pagination {
    limit: Option<i64>,
    offset: Option<i64>,
}

/// Paginated menu item listing.
#[derive(Serialize)]
struct MenuItemList {
    items: Vec<MenuItem>,
    total: i64,
}

/// Require the manage permission, or reject with 403.
fn require_manage(headers: &HeaderMap) -> Result<(), AppError> {
    let principal = Principal::from_headers(headers);
    if principal.has_permission(MANAGE_PERMISSION) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

async fn list_menu_items(
    State(state): State<AppState>,
    Path(menu_name): Path<String>,
    Query(pagination): Query<Pagination>,
    headers: HeaderMap,
) -> AppResult<Json<MenuItemList>> {
    require_manage(&headers)?;

    let limit = pagination.limit.unwrap_or(50).clamp(1, 200);
    let offset = pagination.offset.unwrap_or(0).max(0);

    let items = MenuItem::list_by_menu(state.db(), &menu_name, limit, offset).await?;
    let total = MenuItem::count_by_menu(state.db(), &menu_name).await?;

    Ok(Json(MenuItemList { items, total }))
}

async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> AppResult<Json<MenuItem>> {
    require_manage(&headers)?;

    let item = MenuItem::find_by_id(state.db(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(item))
}

async fn create_menu_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateMenuItem>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    require_manage(&headers)?;

    let item = MenuItem::create(state.db(), input)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(input): Json<UpdateMenuItem>,
) -> AppResult<Json<MenuItem>> {
    require_manage(&headers)?;

    let item = MenuItem::update(state.db(), id, input)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .ok_or(AppError::NotFound)?;

    Ok(Json(item))
}

async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> AppResult<Json<serde_json::Value>> {
    require_manage(&headers)?;

    let deleted = MenuItem::delete(state.db(), id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
