use axum::{
    extract::{FromRef, FromRequestParts, OriginalUri, Request, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    AppState,
    guard::{self, Capability, GuardOutcome},
    models::Session,
    sessions::SessionState,
};

/// bearer_token
///
/// Pulls the bearer token out of the Authorization header. Tokens are opaque
/// v4 UUIDs issued at login; anything that does not parse is treated the same
/// as no header at all.
pub fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;
    let token = auth_header.strip_prefix("Bearer ")?;
    Uuid::parse_str(token).ok()
}

/// SessionUser
///
/// The resolved identity of an authenticated request. Implements Axum's
/// FromRequestParts trait, making it usable as a function argument in any
/// handler that requires a session. Extraction resolves the bearer token
/// against the in-memory session store; there is no signature to verify
/// because tokens are random and only meaningful to this process.
///
/// Rejection: Returns StatusCode::UNAUTHORIZED (401) on any failure.
#[derive(Debug, Clone)]
pub struct SessionUser(pub Session);

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    // Allows the extractor to pull the session store from the app state.
    SessionState: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionState::from_ref(state);

        let token = bearer_token(&parts.headers).ok_or(StatusCode::UNAUTHORIZED)?;

        let session = sessions
            .resolve(token)
            .await
            // A well-formed token that maps to nothing (logged out, or issued
            // before the last restart) is indistinguishable from no token.
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(SessionUser(session))
    }
}

/// MaybeSession
///
/// An infallible variant of the session extractor for the silent no-op flows:
/// subscribing, posting, and voting are simply ignored when no session is
/// presented, so their handlers must never reject on missing credentials.
#[derive(Debug, Clone, Default)]
pub struct MaybeSession(pub Option<Session>);

impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
    SessionState: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionState::from_ref(state);

        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(MaybeSession(None));
        };

        Ok(MaybeSession(sessions.resolve(token).await))
    }
}

// --- Capability Middlewares ---

/// enforce
///
/// Shared body of the three capability middlewares. Resolves the caller's
/// session, evaluates the route guard for the requested path, and either
/// forwards the request or answers with a redirect. The originally requested
/// location, when the guard preserves it, rides along as a `from` query
/// parameter so the login and subscription flows can navigate back.
async fn enforce(state: AppState, required: Capability, request: Request, next: Next) -> Response {
    let session = match bearer_token(request.headers()) {
        Some(token) => state.sessions.resolve(token).await,
        None => None,
    };

    // The guarded groups are nested routers, which strip their prefix from
    // the request URI. OriginalUri carries the externally visible path, which
    // is what the redirect's `from` must preserve.
    let location = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    match guard::evaluate(session.as_ref().map(|s| &s.user), required, &location) {
        GuardOutcome::Render => next.run(request).await,
        GuardOutcome::Redirect { to, from } => {
            tracing::debug!(required = ?required, to, "route guard redirect");
            let target = match from {
                Some(origin) => format!("{}?from={}", to, origin),
                None => to.to_string(),
            };
            (StatusCode::SEE_OTHER, [(header::LOCATION, target)]).into_response()
        }
    }
}

/// Route layer for the community feed group: requires an active pro or elite
/// subscription.
pub async fn require_subscribed(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(state, Capability::Subscribed, request, next).await
}

/// Route layer for the student dashboard group.
pub async fn require_student(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(state, Capability::Student, request, next).await
}

/// Route layer for the company portal group.
pub async fn require_company(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(state, Capability::Company, request, next).await
}
