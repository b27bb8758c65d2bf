//! Rewards API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::ApiResponse;
use shared::models::{BonusTier, MemberSummary, ProfileView, RedemptionResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub user_id: Option<String>,
    pub points: Option<i64>,
    pub reason: Option<String>,
}

/// Program parameters exposed to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramInfo {
    pub points_per_dollar: u32,
    pub bonus_tiers: Vec<BonusTier>,
    pub welcome_bonus: i64,
}

/// GET /api/v1/rewards/profile/:userId - a user's profile with recent
/// transactions
pub async fn profile(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ApiResponse<ProfileView>>> {
    let profile = state.rewards.profile(&user_id)?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// GET /api/v1/rewards/members - all members, summary view
pub async fn members(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<MemberSummary>>>> {
    let members = state.rewards.members()?;
    let count = members.len();

    Ok(Json(ApiResponse::ok(members).with_counts(count, count)))
}

/// GET /api/v1/rewards/info - program parameters
pub async fn info(State(state): State<ServerState>) -> Json<ApiResponse<ProgramInfo>> {
    let config = state.rewards.config();

    Json(ApiResponse::ok(ProgramInfo {
        points_per_dollar: config.points_per_dollar,
        bonus_tiers: config.bonus_tiers.clone(),
        welcome_bonus: config.welcome_bonus,
    }))
}

/// POST /api/v1/rewards/redeem - redeem points against a balance
pub async fn redeem(
    State(state): State<ServerState>,
    Json(payload): Json<RedeemRequest>,
) -> AppResult<Json<ApiResponse<RedemptionResult>>> {
    let (user_id, points, reason) = match (payload.user_id, payload.points, payload.reason) {
        (Some(u), Some(p), Some(r)) if !u.is_empty() && !r.is_empty() => (u, p, r),
        _ => {
            return Err(AppError::validation(
                "userId, points, and reason are required",
            ));
        }
    };

    let result = state.rewards.redeem(&user_id, points, &reason)?;

    Ok(Json(ApiResponse::ok_with_message(
        result,
        "Points redeemed successfully",
    )))
}
