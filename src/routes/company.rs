use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, put},
};

/// Company Router Module
///
/// The applicant-tracking portal, nested under `/company` and wrapped with
/// the `require_company` layer by `create_router`. All mutations here are
/// in-memory only: statuses reset to their seeded values on restart.
pub fn company_routes() -> Router<AppState> {
    Router::new()
        // GET /company/overview
        // Headline numbers: live active-job count plus seeded totals.
        .route("/overview", get(handlers::get_company_overview))
        // GET /company/jobs
        // All postings with current (toggleable) statuses.
        .route("/jobs", get(handlers::get_jobs))
        // PUT /company/jobs/{id}/status
        // Flips a posting between Active and Inactive.
        .route("/jobs/{id}/status", put(handlers::toggle_job_status))
        // GET /company/applications?job=...
        // Applications, optionally narrowed to one posting's title.
        .route("/applications", get(handlers::get_company_applications))
        // PUT /company/applications/{id}/status
        // Moves an application to a new pipeline stage.
        .route(
            "/applications/{id}/status",
            put(handlers::set_application_status),
        )
}
