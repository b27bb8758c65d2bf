//! Admin API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::services::SeedOutcome;
use crate::utils::AppResult;
use shared::ApiResponse;

#[derive(Debug, Default, Deserialize)]
pub struct SeedRequest {
    #[serde(default)]
    pub force: bool,
}

/// POST /api/v1/admin/seed - seed initial data (no-op when already seeded,
/// unless `force` is set)
pub async fn seed(
    State(state): State<ServerState>,
    payload: Option<Json<SeedRequest>>,
) -> AppResult<Json<ApiResponse<SeedOutcome>>> {
    let force = payload.map(|Json(p)| p.force).unwrap_or(false);
    let outcome = state.seeder.seed(force)?;

    let message = if outcome.seeded {
        "Database seeded successfully"
    } else {
        "Database already seeded"
    };

    Ok(Json(ApiResponse::ok_with_message(outcome, message)))
}

/// POST /api/v1/admin/reseed - clear everything and reinstall the canonical
/// menu
pub async fn reseed(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<SeedOutcome>>> {
    let outcome = state.seeder.reseed()?;

    Ok(Json(ApiResponse::ok_with_message(
        outcome,
        "Database reseeded successfully",
    )))
}

/// POST /api/v1/admin/clear - empty all collections
pub async fn clear(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<()>>> {
    state.seeder.clear()?;
    Ok(Json(ApiResponse::message_only(
        "Database cleared successfully",
    )))
}
