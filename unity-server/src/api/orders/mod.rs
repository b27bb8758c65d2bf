//! Order API module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::auth::require_scope;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/v1/orders", order_routes(state))
}

fn order_routes(state: ServerState) -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            post(handler::create).layer(middleware::from_fn_with_state(
                state.clone(),
                require_scope("pizza:create_order"),
            )),
        )
        .route(
            "/",
            get(handler::list).layer(middleware::from_fn_with_state(
                state.clone(),
                require_scope("pizza:read_order"),
            )),
        )
        .route(
            "/{orderId}",
            get(handler::get_by_id).layer(middleware::from_fn_with_state(
                state.clone(),
                require_scope("pizza:read_order"),
            )),
        )
        .route(
            "/{orderId}/status",
            patch(handler::update_status).layer(middleware::from_fn_with_state(
                state.clone(),
                require_scope("pizza:update_order"),
            )),
        )
        .route(
            "/{orderId}",
            delete(handler::delete).layer(middleware::from_fn_with_state(
                state,
                require_scope("pizza:delete_order"),
            )),
        )
}
