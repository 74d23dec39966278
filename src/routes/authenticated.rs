use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Authenticated Router Module
///
/// Defines the routes accessible to any caller with a resolvable session,
/// regardless of role or subscription. Every handler here relies on the
/// `SessionUser` extractor, which rejects with 401 when the bearer token
/// does not resolve.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /me
        // The caller's current user record, including subscription state.
        .route("/me", get(handlers::get_me))
        // POST /logout
        // Destroys the session; the token is unresolvable afterwards.
        .route("/logout", post(handlers::logout))
}
