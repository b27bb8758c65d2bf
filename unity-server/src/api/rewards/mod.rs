//! Rewards API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_scope;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/v1/rewards", rewards_routes(state))
}

fn rewards_routes(state: ServerState) -> Router<ServerState> {
    Router::new()
        .route(
            "/profile/{userId}",
            get(handler::profile).layer(middleware::from_fn_with_state(
                state.clone(),
                require_scope("pizza:read_points"),
            )),
        )
        .route(
            "/members",
            get(handler::members).layer(middleware::from_fn_with_state(
                state.clone(),
                require_scope("pizza:read_points"),
            )),
        )
        .route(
            "/info",
            get(handler::info).layer(middleware::from_fn_with_state(
                state.clone(),
                require_scope("pizza:read_points"),
            )),
        )
        .route(
            "/redeem",
            post(handler::redeem).layer(middleware::from_fn_with_state(
                state,
                require_scope("pizza:update_points"),
            )),
        )
}
