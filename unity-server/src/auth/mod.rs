//! Scope Enforcement Middleware
//!
//! Privileged routes (menu writes, order status changes, admin seeding)
//! declare the scope they require. Scopes arrive in the `x-auth-scopes`
//! header as a comma-separated list, stamped by the platform gateway that
//! terminates real authentication in front of this service.
//!
//! Enforcement is off by default (`ENFORCE_SCOPES=false`) so local
//! development and tests run without a gateway; when enabled, a missing or
//! insufficient header is a 403.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::ServerState;
use crate::utils::AppError;

/// Header carrying the caller's granted scopes
pub const SCOPES_HEADER: &str = "x-auth-scopes";

/// Scope check middleware - requires a specific scope
///
/// # Supported wildcards
///
/// - `"pizza:*"` matches every pizza-platform scope
/// - `"all"` matches every scope
///
/// # Usage
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/v1/menu", post(handler::create))
///     .layer(middleware::from_fn_with_state(state, require_scope("pizza:create_menu")));
/// ```
pub fn require_scope(
    scope: &'static str,
) -> impl Fn(
    State<ServerState>,
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |State(state): State<ServerState>, req: Request, next: Next| {
        Box::pin(async move {
            if !state.config.enforce_scopes {
                return Ok(next.run(req).await);
            }

            let granted = req
                .headers()
                .get(SCOPES_HEADER)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("");

            if !has_scope(granted, scope) {
                tracing::warn!(
                    required = scope,
                    uri = %req.uri(),
                    "Scope check failed"
                );
                return Err(AppError::forbidden(format!("Missing scope: {}", scope)));
            }

            Ok(next.run(req).await)
        })
    }
}

/// Match a required scope against a comma-separated grant list
fn has_scope(granted: &str, required: &str) -> bool {
    let prefix_wildcard = required
        .split_once(':')
        .map(|(resource, _)| format!("{}:*", resource));

    granted.split(',').map(str::trim).any(|g| {
        g == required || g == "all" || prefix_wildcard.as_deref() == Some(g)
    })
}

#[cfg(test)]
mod tests {
    use super::has_scope;

    #[test]
    fn test_exact_scope_match() {
        assert!(has_scope("pizza:create_menu", "pizza:create_menu"));
        assert!(has_scope("pizza:read_order, pizza:create_menu", "pizza:create_menu"));
        assert!(!has_scope("pizza:read_order", "pizza:create_menu"));
        assert!(!has_scope("", "pizza:create_menu"));
    }

    #[test]
    fn test_wildcard_scopes() {
        assert!(has_scope("pizza:*", "pizza:create_menu"));
        assert!(has_scope("all", "pizza:admin"));
        assert!(!has_scope("loyalty:*", "pizza:create_menu"));
    }
}
