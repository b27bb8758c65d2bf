//! Admin API module - seeding utilities

mod handler;

use axum::{Router, middleware, routing::post};

use crate::auth::require_scope;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/v1/admin", admin_routes(state))
}

fn admin_routes(state: ServerState) -> Router<ServerState> {
    Router::new()
        .route("/seed", post(handler::seed))
        .route("/reseed", post(handler::reseed))
        .route("/clear", post(handler::clear))
        .layer(middleware::from_fn_with_state(
            state,
            require_scope("pizza:admin"),
        ))
}
