use optern_portal::{
    AppConfig, AppState, MemorySessions, MemoryStore,
    models::{Plan, PostView, Role, Session, User},
};
use reqwest::{StatusCode, redirect};
use serde_json::json;
use std::sync::Arc;

// --- Test Setup ---

/// Spawns the full application on an ephemeral port, seeded with the demo
/// dataset, and returns its base URL.
async fn spawn_app() -> String {
    let state = AppState {
        store: Arc::new(MemoryStore::with_demo_data()),
        sessions: Arc::new(MemorySessions::new()),
        config: AppConfig::default(),
    };
    let app = optern_portal::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().expect("Failed to get local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

/// Redirects must stay observable: the guard answers with 303 and a Location
/// header, which the client must not follow.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to build client")
}

async fn login(base: &str, client: &reqwest::Client, email: &str, role: Role) -> Session {
    client
        .post(format!("{}/login", base))
        .json(&json!({ "email": email, "password": "pw", "role": role }))
        .send()
        .await
        .expect("Login request failed")
        .json()
        .await
        .expect("Login response was not a session")
}

fn location_of(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get("location")
        .expect("Missing Location header")
        .to_str()
        .expect("Location was not valid UTF-8")
}

// --- Public Surface ---

#[tokio::test]
async fn health_check_works() {
    let base = spawn_app().await;
    let response = client()
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn internship_search_narrows_the_listing() {
    let base = spawn_app().await;
    let listings: Vec<serde_json::Value> = client()
        .get(format!("{}/internships?search=data", base))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Bad listing payload");

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["title"], "Data Science Intern");
}

#[tokio::test]
async fn plan_catalog_is_served_unauthenticated() {
    let base = spawn_app().await;
    let plans: Vec<serde_json::Value> = client()
        .get(format!("{}/subscription/plans", base))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Bad catalog payload");

    assert_eq!(plans.len(), 3);
    assert_eq!(plans[1]["plan"], "pro");
    assert_eq!(plans[1]["popular"], true);
}

// --- Session Lifecycle ---

#[tokio::test]
async fn login_then_me_round_trips_the_identity() {
    let base = spawn_app().await;
    let client = client();
    let session = login(&base, &client, "alice@uni.edu", Role::Student).await;

    let me: User = client
        .get(format!("{}/me", base))
        .bearer_auth(session.token)
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Bad user payload");

    assert_eq!(me.email, "alice@uni.edu");
    assert_eq!(me.role, Role::Student);
}

#[tokio::test]
async fn me_without_a_token_is_401() {
    let base = spawn_app().await;
    let response = client()
        .get(format!("{}/me", base))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_invalidates_the_token() {
    let base = spawn_app().await;
    let client = client();
    let session = login(&base, &client, "alice@uni.edu", Role::Student).await;

    let logout = client
        .post(format!("{}/logout", base))
        .bearer_auth(session.token)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);

    let me = client
        .get(format!("{}/me", base))
        .bearer_auth(session.token)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

// --- Guard Redirects ---

#[tokio::test]
async fn anonymous_feed_request_redirects_to_login_with_origin() {
    let base = spawn_app().await;
    let response = client()
        .get(format!("{}/community/feed", base))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/login?from=/community/feed");
}

#[tokio::test]
async fn unsubscribed_feed_request_redirects_to_subscription() {
    let base = spawn_app().await;
    let client = client();
    let session = login(&base, &client, "alice@uni.edu", Role::Student).await;

    // A basic plan does not satisfy the subscribed capability.
    client
        .post(format!("{}/subscription/subscribe", base))
        .bearer_auth(session.token)
        .json(&json!({ "plan": "basic" }))
        .send()
        .await
        .expect("Request failed");

    let response = client
        .get(format!("{}/community/feed", base))
        .bearer_auth(session.token)
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/subscription?from=/community/feed");
}

#[tokio::test]
async fn role_mismatch_redirects_home_without_origin() {
    let base = spawn_app().await;
    let client = client();
    let session = login(&base, &client, "hr@techcorp.com", Role::Company).await;

    let response = client
        .get(format!("{}/dashboard", base))
        .bearer_auth(session.token)
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/");
}

#[tokio::test]
async fn company_portal_is_closed_to_students() {
    let base = spawn_app().await;
    let client = client();
    let session = login(&base, &client, "alice@uni.edu", Role::Student).await;

    let response = client
        .get(format!("{}/company/jobs", base))
        .bearer_auth(session.token)
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/");
}

// --- Subscription Flow ---

#[tokio::test]
async fn subscribing_to_pro_opens_the_community() {
    let base = spawn_app().await;
    let client = client();
    let session = login(&base, &client, "alice@uni.edu", Role::Student).await;

    let upgraded: Session = client
        .post(format!("{}/subscription/subscribe", base))
        .bearer_auth(session.token)
        .json(&json!({ "plan": "pro" }))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Bad session payload");
    assert_eq!(upgraded.user.subscription.unwrap().plan, Plan::Pro);

    let feed: Vec<PostView> = client
        .get(format!("{}/community/feed", base))
        .bearer_auth(session.token)
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Bad feed payload");
    assert_eq!(feed.len(), 2);
}

#[tokio::test]
async fn subscribe_without_a_session_is_silently_ignored() {
    let base = spawn_app().await;
    let response = client()
        .post(format!("{}/subscription/subscribe", base))
        .json(&json!({ "plan": "elite" }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// --- Community Flow ---

#[tokio::test]
async fn post_and_vote_round_trip() {
    let base = spawn_app().await;
    let client = client();
    let session = login(&base, &client, "alice@uni.edu", Role::Student).await;
    client
        .post(format!("{}/subscription/subscribe", base))
        .bearer_auth(session.token)
        .json(&json!({ "plan": "elite" }))
        .send()
        .await
        .expect("Request failed");

    let created: PostView = client
        .post(format!("{}/community/posts", base))
        .bearer_auth(session.token)
        .json(&json!({ "content": "Offer signed today! #CareerAdvice" }))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Bad post payload");
    assert_eq!(created.post.author.name, "alice");
    assert_eq!(created.post.hashtags, ["CareerAdvice"]);

    let voted: PostView = client
        .post(format!("{}/community/posts/{}/vote", base, created.post.id))
        .bearer_auth(session.token)
        .json(&json!({ "vote": "up" }))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Bad vote payload");
    assert_eq!(voted.post.upvotes, 1);

    // The same vote again toggles back to the baseline.
    let cleared: PostView = client
        .post(format!("{}/community/posts/{}/vote", base, created.post.id))
        .bearer_auth(session.token)
        .json(&json!({ "vote": "up" }))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Bad vote payload");
    assert_eq!(cleared.post.upvotes, 0);
    assert!(cleared.user_vote.is_none());
}

// --- Company Flow ---

#[tokio::test]
async fn company_manages_jobs_and_sees_the_overview_move() {
    let base = spawn_app().await;
    let client = client();
    let session = login(&base, &client, "hr@techcorp.com", Role::Company).await;

    let overview: serde_json::Value = client
        .get(format!("{}/company/overview", base))
        .bearer_auth(session.token)
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Bad overview payload");
    assert_eq!(overview["active_jobs"], 1);
    assert_eq!(overview["total_applications"], 77);

    let jobs: Vec<serde_json::Value> = client
        .get(format!("{}/company/jobs", base))
        .bearer_auth(session.token)
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Bad jobs payload");
    let inactive = jobs
        .iter()
        .find(|j| j["status"] == "inactive")
        .expect("Seed data has an inactive posting");

    let toggled: serde_json::Value = client
        .put(format!(
            "{}/company/jobs/{}/status",
            base,
            inactive["id"].as_str().unwrap()
        ))
        .bearer_auth(session.token)
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Bad toggle payload");
    assert_eq!(toggled["status"], "active");

    let after: serde_json::Value = client
        .get(format!("{}/company/overview", base))
        .bearer_auth(session.token)
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Bad overview payload");
    assert_eq!(after["active_jobs"], 2);
}
