//! Menu API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_scope;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/v1/menu", menu_routes(state))
}

fn menu_routes(state: ServerState) -> Router<ServerState> {
    // Reads are public; every write carries its own scope
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route(
            "/",
            post(handler::create).layer(middleware::from_fn_with_state(
                state.clone(),
                require_scope("pizza:create_menu"),
            )),
        )
        .route(
            "/{id}",
            axum::routing::put(handler::update).layer(middleware::from_fn_with_state(
                state.clone(),
                require_scope("pizza:update_menu"),
            )),
        )
        .route(
            "/{id}",
            axum::routing::delete(handler::delete).layer(middleware::from_fn_with_state(
                state,
                require_scope("pizza:delete_menu"),
            )),
        )
}
