use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any
/// client. Besides the read-only listing surface, two session flows live
/// here on purpose: login (which creates sessions and so cannot require
/// one) and subscribe (whose contract is to silently no-op without a
/// session — behind the auth layer it would 401 instead).
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // POST /login
        // Mock sign-in: always succeeds, returns the bearer token and user record.
        .route("/login", post(handlers::login))
        // GET /internships?search=...&employment_type=...&location=...
        // Browse listing with AND-combined filters; seed order, no sort.
        .route("/internships", get(handlers::get_internships))
        // GET /internships/{id}
        // Single listing detail.
        .route("/internships/{id}", get(handlers::get_internship_details))
        // GET /subscription/plans
        // The three-tier pricing catalog.
        .route("/subscription/plans", get(handlers::get_plans))
        // POST /subscription/subscribe
        // Activates a plan on the caller's session; silent 204 no-op without one.
        .route("/subscription/subscribe", post(handlers::subscribe))
}
