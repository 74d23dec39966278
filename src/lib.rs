use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod sessions;
pub mod store;

// Module for routing segregation (Public, Authenticated, and the three
// capability-guarded groups).
pub mod routes;
use auth::SessionUser; // The resolved session identity.
use routes::{authenticated, community, company, dashboard, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use config::AppConfig;
pub use sessions::{MemorySessions, SessionState};
pub use store::{MemoryStore, StoreState};

/// ApiDoc
///
/// This struct auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application. It aggregates all API paths and data schemas decorated with the
/// `#[utoipa::path]` and `#[derive(utoipa::ToSchema)]` macros.
/// The resulting JSON is served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    // List all public handler functions here for documentation generation.
    paths(
        handlers::login, handlers::logout, handlers::get_me, handlers::subscribe,
        handlers::get_plans, handlers::get_internships, handlers::get_internship_details,
        handlers::get_feed, handlers::get_hashtags, handlers::create_post,
        handlers::vote_post, handlers::get_company_overview, handlers::get_jobs,
        handlers::toggle_job_status, handlers::get_company_applications,
        handlers::set_application_status, handlers::get_dashboard
    ),
    // List all models (schemas) used in the request/response bodies.
    components(
        schemas(
            models::Session, models::User, models::Role, models::Subscription,
            models::SubscriptionStatus, models::Plan, models::LoginRequest,
            models::SubscribeRequest, models::PlanOffer, models::PlanFeature,
            models::Internship, models::Post, models::PostAuthor, models::AuthorKind,
            models::PostView, models::Vote, models::VoteRequest, models::CreatePostRequest,
            models::FeedSort, models::JobPosting, models::JobStatus,
            models::CompanyApplication, models::ApplicationStatus,
            models::UpdateApplicationStatusRequest, models::CompanyOverview,
            models::StudentApplication, models::StudentApplicationStatus,
            models::SavedInternship, models::DashboardSummary, models::StudentDashboard,
        )
    ),
    tags(
        (name = "optern-portal", description = "Optern Internship Marketplace API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Implements the **Unified State Pattern**. This is the single, thread-safe
/// container holding all essential application services and configuration,
/// shared across all incoming requests. Both stores are process-local:
/// restarting the server clears every session and every mutation.
#[derive(Clone)]
pub struct AppState {
    /// Data layer: internships, feed, portal records — all in memory.
    pub store: StoreState,
    /// Session layer: bearer-token keyed identities, in memory.
    pub sessions: SessionState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These implementations allow handlers and extractors to selectively pull
// components from the shared AppState.

impl FromRef<AppState> for StoreState {
    fn from_ref(app_state: &AppState) -> StoreState {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for SessionState {
    fn from_ref(app_state: &AppState) -> SessionState {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// session_middleware
///
/// Enforces session presence for the `authenticated_routes` group.
///
/// *Mechanism*: It attempts to extract `SessionUser` from the request. Since
/// `SessionUser` implements `FromRequestParts`, if the bearer token does not
/// resolve, the extractor immediately rejects the request with a 401 status,
/// preventing execution of the handler. If successful, the request proceeds.
async fn session_middleware(_session: SessionUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state.
///
/// Access tiers, outermost to innermost:
/// - public routes: no layer;
/// - authenticated routes: `session_middleware` (401 without a session);
/// - `/community`, `/dashboard`, `/company`: the respective capability
///   layer, which answers guard failures with a 303 redirect rather than an
///   error, preserving the requested location where the guard does.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public Routes: No middleware applied.
        .merge(public::public_routes())
        // Authenticated Routes: Protected by the `session_middleware`.
        .merge(
            authenticated::authenticated_routes()
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    session_middleware,
                )),
        )
        // Guarded groups: each nested router is wrapped with its capability
        // layer, the HTTP embodiment of the route guard.
        .nest(
            "/community",
            community::community_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_subscribed,
            )),
        )
        .nest(
            "/dashboard",
            dashboard::dashboard_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_student,
            )),
        )
        .nest(
            "/company",
            company::company_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_company,
            )),
        )
        // Apply the Unified State to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: wraps the request/response lifecycle in a
                // tracing span that carries the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: returns x-request-id to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Helper function used by `TraceLayer` to customize span creation. It
/// extracts the `x-request-id` header (if present) and includes it in the
/// structured logging metadata alongside the HTTP method and URI, so every
/// log line for a single request is correlated by a unique ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
