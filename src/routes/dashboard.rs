use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Dashboard Router Module
///
/// The student dashboard group, nested under `/dashboard` and wrapped with
/// the `require_student` layer by `create_router`. A session with the wrong
/// role is redirected to `/` — without a preserved origin, matching the
/// observed behavior of the role checks.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        // GET /dashboard
        // Applications, saved internships, and computed progress counters.
        .route("/", get(handlers::get_dashboard))
}
