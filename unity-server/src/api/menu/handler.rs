//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::ApiResponse;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub available: Option<bool>,
}

/// GET /api/v1/menu - list menu items with optional filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    let items = state.menu.list(query.category.as_deref(), query.available)?;
    let count = items.len();

    Ok(Json(ApiResponse::ok(items).with_counts(count, count)))
}

/// GET /api/v1/menu/:id - get a single menu item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let item = state.menu.get(&id)?;
    Ok(Json(ApiResponse::ok(item)))
}

/// POST /api/v1/menu - create a menu item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<MenuItem>>)> {
    let item = state.menu.create(payload)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            item,
            "Menu item created successfully",
        )),
    ))
}

/// PUT /api/v1/menu/:id - update a menu item
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let item = state.menu.update(&id, payload)?;

    Ok(Json(ApiResponse::ok_with_message(
        item,
        "Menu item updated successfully",
    )))
}

/// DELETE /api/v1/menu/:id - delete a menu item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !state.menu.delete(&id)? {
        return Err(crate::utils::AppError::not_found(format!(
            "Pizza with id {} not found",
            id
        )));
    }

    Ok(Json(ApiResponse::message_only(
        "Menu item deleted successfully",
    )))
}
