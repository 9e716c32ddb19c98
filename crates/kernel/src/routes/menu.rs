//! Menu resolution route.
//!
//! Returns the menu tree the requesting principal is allowed to see,
//! filtered by roles, permissions, and shop feature flags.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppResult;
use crate::menu::{self, MenuNode};
use crate::models::MenuItem;
use crate::principal::Principal;
use crate::state::AppState;

/// Create the menu resolution router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/menu/{menu_name}", get(resolve_menu))
}

/// Resolve a named menu for the request principal.
async fn resolve_menu(
    State(state): State<AppState>,
    Path(menu_name): Path<String>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<MenuNode>>> {
    let principal = Principal::from_headers(&headers);

    let items = MenuItem::find_by_menu(state.db(), &menu_name).await?;
    let settings = state.settings().get().await?;

    let tree = menu::resolve(
        items,
        &principal.roles,
        &principal.permissions,
        settings.as_ref(),
    );

    Ok(Json(tree))
}
