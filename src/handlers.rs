use crate::{
    AppState,
    auth::{MaybeSession, SessionUser},
    models::{
        AuthorKind, CompanyApplication, CompanyOverview, CreatePostRequest, FeedSort, Internship,
        JobPosting, LoginRequest, PlanOffer, PostAuthor, PostView, Role, Session,
        StudentDashboard, SubscribeRequest, UpdateApplicationStatusRequest, User, VoteRequest,
    },
    store,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

// --- Filter Structs ---

/// InternshipFilter
///
/// Accepted query parameters for the public internship listing endpoint
/// (GET /internships). All present predicates AND-combine.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct InternshipFilter {
    /// Case-insensitive substring match over title or company.
    pub search: Option<String>,
    /// Exact employment type, e.g. "Full-time".
    pub employment_type: Option<String>,
    /// Exact location match.
    pub location: Option<String>,
}

/// FeedQuery
///
/// Accepted query parameters for the community feed (GET /community/feed).
#[derive(Deserialize, utoipa::IntoParams)]
pub struct FeedQuery {
    /// Sort mode; defaults to `recent`.
    pub sort: Option<FeedSort>,
    /// Keep only posts carrying this hashtag (without the leading '#').
    pub tag: Option<String>,
}

/// ApplicationFilter
///
/// Accepted query parameters for the company applications list.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ApplicationFilter {
    /// Narrow to applications for this job posting.
    pub job: Option<Uuid>,
}

// --- Session Handlers ---

/// login
///
/// [Public Route] Creates a session for the supplied identity and returns the
/// bearer token alongside the user record.
///
/// *Note*: Authentication is mocked — the call cannot fail and the password is
/// discarded. Real credential verification is an explicit non-goal here and
/// must be added before any production use.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses((status = 200, description = "Session created", body = Session))
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Json<Session> {
    let session = state
        .sessions
        .login(payload.email, payload.password, payload.role)
        .await;
    Json(session)
}

/// logout
///
/// [Authenticated Route] Destroys the caller's session. The token becomes
/// unresolvable immediately; a retried logout is a 204 no-op.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 204, description = "Session cleared"))
)]
pub async fn logout(
    SessionUser(session): SessionUser,
    State(state): State<AppState>,
) -> StatusCode {
    state.sessions.logout(session.token).await;
    StatusCode::NO_CONTENT
}

/// get_me
///
/// [Authenticated Route] Returns the caller's current user record, including
/// subscription state.
#[utoipa::path(
    get,
    path = "/me",
    responses((status = 200, description = "Current user", body = User))
)]
pub async fn get_me(SessionUser(session): SessionUser) -> Json<User> {
    Json(session.user)
}

/// subscribe
///
/// [Public Route] Activates the given plan on the caller's session,
/// overwriting any prior plan.
///
/// *Contract*: No error is ever surfaced. Without a resolvable session the
/// call silently does nothing (204) — which is why this lives on the public
/// router instead of behind the authentication layer.
#[utoipa::path(
    post,
    path = "/subscription/subscribe",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscription activated", body = Session),
        (status = 204, description = "No session; nothing changed")
    )
)]
pub async fn subscribe(
    MaybeSession(session): MaybeSession,
    State(state): State<AppState>,
    Json(payload): Json<SubscribeRequest>,
) -> Response {
    let Some(session) = session else {
        return StatusCode::NO_CONTENT.into_response();
    };

    match state.sessions.subscribe(session.token, payload.plan).await {
        Some(updated) => Json(updated).into_response(),
        // The session vanished between extraction and update (logout race).
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// get_plans
///
/// [Public Route] The three-tier pricing catalog rendered by the
/// subscription page.
#[utoipa::path(
    get,
    path = "/subscription/plans",
    responses((status = 200, description = "Plan catalog", body = [PlanOffer]))
)]
pub async fn get_plans() -> Json<Vec<PlanOffer>> {
    Json(store::plan_catalog())
}

// --- Internship Listing Handlers ---

/// get_internships
///
/// [Public Route] Lists internships with search/type/location filters.
/// Result ordering is the seed order restricted to matches; no sort applies
/// in this view.
#[utoipa::path(
    get,
    path = "/internships",
    params(InternshipFilter),
    responses((status = 200, description = "Filtered listings", body = [Internship]))
)]
pub async fn get_internships(
    State(state): State<AppState>,
    Query(filter): Query<InternshipFilter>,
) -> Json<Vec<Internship>> {
    let internships = state
        .store
        .get_internships(filter.search, filter.employment_type, filter.location)
        .await;
    Json(internships)
}

/// get_internship_details
///
/// [Public Route] Retrieves a single listing by ID.
#[utoipa::path(
    get,
    path = "/internships/{id}",
    params(("id" = Uuid, Path, description = "Internship ID")),
    responses(
        (status = 200, description = "Found", body = Internship),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_internship_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Internship>, StatusCode> {
    match state.store.get_internship(id).await {
        Some(internship) => Ok(Json(internship)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

// --- Community Feed Handlers ---

/// get_feed
///
/// [Subscribed Route] The community feed, sorted and optionally narrowed to a
/// hashtag, with the caller's own vote attached to each post.
#[utoipa::path(
    get,
    path = "/community/feed",
    params(FeedQuery),
    responses((status = 200, description = "Feed", body = [PostView]))
)]
pub async fn get_feed(
    MaybeSession(session): MaybeSession,
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Json<Vec<PostView>> {
    let viewer = session.map(|s| s.user.id);
    let feed = state
        .store
        .get_feed(query.sort.unwrap_or_default(), query.tag, viewer)
        .await;
    Json(feed)
}

/// get_hashtags
///
/// [Subscribed Route] Distinct hashtags across all posts, for the
/// popular-topics rail.
#[utoipa::path(
    get,
    path = "/community/hashtags",
    responses((status = 200, description = "Hashtags", body = [String]))
)]
pub async fn get_hashtags(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.get_hashtags().await)
}

/// create_post
///
/// [Subscribed Route] Publishes a new post. Hashtags are extracted
/// server-side from the content; counters start at zero and the post leads
/// the feed until the next re-sort.
///
/// *Contract*: Without a session, or with blank content, the request is
/// silently ignored (204) — mirroring the check-and-return-early behavior of
/// the posting flow. No error is surfaced.
#[utoipa::path(
    post,
    path = "/community/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostView),
        (status = 204, description = "Ignored: no session or empty content")
    )
)]
pub async fn create_post(
    MaybeSession(session): MaybeSession,
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> Response {
    let Some(session) = session else {
        return StatusCode::NO_CONTENT.into_response();
    };
    if payload.content.trim().is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    let author = post_author_from(&session.user);
    let view = state.store.create_post(author, payload.content).await;
    (StatusCode::CREATED, Json(view)).into_response()
}

/// vote_post
///
/// [Subscribed Route] Toggles the caller's vote on a post.
///
/// *Invariant*: At most one vote per (post, viewer). The same vote again
/// clears it; the opposite vote swaps both counters in a single store
/// update. Unauthenticated votes are silently ignored (204).
#[utoipa::path(
    post,
    path = "/community/posts/{id}/vote",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Updated post", body = PostView),
        (status = 204, description = "Ignored: no session"),
        (status = 404, description = "Unknown post")
    )
)]
pub async fn vote_post(
    MaybeSession(session): MaybeSession,
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<VoteRequest>,
) -> Response {
    let Some(session) = session else {
        return StatusCode::NO_CONTENT.into_response();
    };

    match state
        .store
        .vote_post(post_id, session.user.id, payload.vote)
        .await
    {
        Some(view) => Json(view).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// post_author_from
///
/// Derives the embedded author record for an API-authored post: display name
/// is the email's local part, the avatar is a stable DiceBear render seeded
/// by the user id.
fn post_author_from(user: &User) -> PostAuthor {
    let name = user
        .email
        .split('@')
        .next()
        .unwrap_or(user.email.as_str())
        .to_string();
    PostAuthor {
        id: user.id,
        name,
        avatar_url: format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", user.id),
        verified_mentor: false,
        kind: match user.role {
            Role::Student => AuthorKind::Student,
            Role::Company => AuthorKind::Company,
        },
    }
}

// --- Company Portal Handlers ---

/// get_company_overview
///
/// [Company Route] Headline numbers for the portal overview tab. The active
/// count reflects live job statuses.
#[utoipa::path(
    get,
    path = "/company/overview",
    responses((status = 200, description = "Overview", body = CompanyOverview))
)]
pub async fn get_company_overview(State(state): State<AppState>) -> Json<CompanyOverview> {
    Json(state.store.get_company_overview().await)
}

/// get_jobs
///
/// [Company Route] All job postings with their current statuses.
#[utoipa::path(
    get,
    path = "/company/jobs",
    responses((status = 200, description = "Postings", body = [JobPosting]))
)]
pub async fn get_jobs(State(state): State<AppState>) -> Json<Vec<JobPosting>> {
    Json(state.store.get_jobs().await)
}

/// toggle_job_status
///
/// [Company Route] Flips a posting between Active and Inactive. The change is
/// in-memory only and resets on restart; there is no durable store behind it.
#[utoipa::path(
    put,
    path = "/company/jobs/{id}/status",
    params(("id" = Uuid, Path, description = "Job posting ID")),
    responses(
        (status = 200, description = "Updated posting", body = JobPosting),
        (status = 404, description = "Not Found")
    )
)]
pub async fn toggle_job_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobPosting>, StatusCode> {
    match state.store.toggle_job_status(id).await {
        Some(job) => Ok(Json(job)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// get_company_applications
///
/// [Company Route] Lists applications, optionally narrowed to one posting.
#[utoipa::path(
    get,
    path = "/company/applications",
    params(ApplicationFilter),
    responses((status = 200, description = "Applications", body = [CompanyApplication]))
)]
pub async fn get_company_applications(
    State(state): State<AppState>,
    Query(filter): Query<ApplicationFilter>,
) -> Json<Vec<CompanyApplication>> {
    Json(state.store.get_company_applications(filter.job).await)
}

/// set_application_status
///
/// [Company Route] Moves an application to a new pipeline stage. Like every
/// mutation here, the change lives only in process memory.
#[utoipa::path(
    put,
    path = "/company/applications/{id}/status",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationStatusRequest,
    responses(
        (status = 200, description = "Updated application", body = CompanyApplication),
        (status = 404, description = "Not Found")
    )
)]
pub async fn set_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusRequest>,
) -> Result<Json<CompanyApplication>, StatusCode> {
    match state.store.set_application_status(id, payload.status).await {
        Some(application) => Ok(Json(application)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

// --- Student Dashboard Handlers ---

/// get_dashboard
///
/// [Student Route] The full dashboard payload: applications, saved
/// internships, and the summary counters computed from both.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses((status = 200, description = "Dashboard", body = StudentDashboard))
)]
pub async fn get_dashboard(State(state): State<AppState>) -> Json<StudentDashboard> {
    Json(state.store.get_student_dashboard().await)
}
