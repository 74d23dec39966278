use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Community Router Module
///
/// The feed group, nested under `/community`. `create_router` wraps this
/// whole router with the `require_subscribed` layer, so reaching any handler
/// implies an active pro/elite subscription; callers that fail the guard are
/// redirected to `/subscription` with the requested location preserved.
///
/// The write handlers still re-check session presence themselves: their
/// contract is to silently ignore unauthenticated calls, and the layer's
/// redirect covers the page-level navigation case, not the API contract.
pub fn community_routes() -> Router<AppState> {
    Router::new()
        // GET /community/feed?sort=recent|trending|discussed&tag=...
        // Sorted, optionally tag-filtered feed with the caller's vote state.
        .route("/feed", get(handlers::get_feed))
        // GET /community/hashtags
        // Distinct hashtags across all posts, for the popular-topics rail.
        .route("/hashtags", get(handlers::get_hashtags))
        // POST /community/posts
        // Publishes a post; hashtags extracted server-side, counters zeroed.
        .route("/posts", post(handlers::create_post))
        // POST /community/posts/{id}/vote
        // Vote toggle: same vote clears, opposite vote swaps atomically.
        .route("/posts/{id}/vote", post(handlers::vote_post))
}
