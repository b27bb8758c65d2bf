//! Health API module

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::ServerState;
use shared::ApiResponse;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/v1/health", get(health))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthInfo {
    status: &'static str,
    environment: String,
    timestamp: DateTime<Utc>,
}

/// GET /api/v1/health - liveness probe
async fn health(State(state): State<ServerState>) -> Json<ApiResponse<HealthInfo>> {
    Json(ApiResponse::ok_with_message(
        HealthInfo {
            status: "ok",
            environment: state.config.environment.clone(),
            timestamp: Utc::now(),
        },
        "Unity order server is running",
    ))
}
