//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::ApiResponse;
use shared::models::{Order, OrderCreate, OrderStatus};

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    pub status: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

const VALID_STATUSES: [OrderStatus; 6] = [
    OrderStatus::Pending,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

/// Parse a status string, listing the accepted values on failure
fn parse_status(raw: &str) -> AppResult<OrderStatus> {
    VALID_STATUSES
        .iter()
        .copied()
        .find(|s| s.as_str().eq_ignore_ascii_case(raw))
        .ok_or_else(|| {
            let accepted: Vec<&str> = VALID_STATUSES.iter().map(|s| s.as_str()).collect();
            AppError::validation(format!(
                "Invalid status. Must be one of: {}",
                accepted.join(", ")
            ))
        })
}

/// POST /api/v1/orders - create an order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let order = state.orders.create(payload)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            order,
            "Order created successfully",
        )),
    ))
}

/// GET /api/v1/orders - list orders (filter, newest first, paginated)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderQuery>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let limit = query.limit.unwrap_or(50);
    let offset = query.offset.unwrap_or(0);

    let page = state.orders.list(status, limit, offset)?;
    let count = page.orders.len();

    Ok(Json(ApiResponse::ok(page.orders).with_counts(count, page.total)))
}

/// GET /api/v1/orders/:orderId - get an order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.orders.get(&order_id)?;
    Ok(Json(ApiResponse::ok(order)))
}

/// PATCH /api/v1/orders/:orderId/status - transition an order
pub async fn update_status(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let status = parse_status(&payload.status)?;
    let order = state.orders.update_status(&order_id, status)?;

    Ok(Json(ApiResponse::ok_with_message(
        order,
        "Order status updated successfully",
    )))
}

/// DELETE /api/v1/orders/:orderId - delete an order
pub async fn delete(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !state.orders.delete(&order_id)? {
        return Err(AppError::not_found(format!(
            "Order with id {} not found",
            order_id
        )));
    }

    Ok(Json(ApiResponse::message_only("Order deleted successfully")))
}
