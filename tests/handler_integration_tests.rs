use async_trait::async_trait;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use optern_portal::{
    AppState,
    auth::MaybeSession,
    config::AppConfig,
    handlers,
    models::{
        ApplicationStatus, CompanyApplication, CompanyOverview, CreatePostRequest, FeedSort,
        Internship, JobPosting, Plan, PostAuthor, PostView, Role, Session, StudentDashboard,
        SubscribeRequest, User, Vote, VoteRequest,
    },
    sessions::{MemorySessions, SessionState},
    store::Store,
};
use std::sync::Arc;
use uuid::Uuid;

// --- MOCK STORE IMPLEMENTATION ---

// Handlers rely on the Store trait, so we mock the trait implementation with
// pre-canned outputs and verify the handlers' status mapping around them.
#[derive(Default)]
struct MockStoreControl {
    internships_to_return: Vec<Internship>,
    internship_result: Option<Internship>,
    feed_to_return: Vec<PostView>,
    hashtags_to_return: Vec<String>,
    created_post: PostView,
    vote_result: Option<PostView>,
    overview_to_return: CompanyOverview,
    jobs_to_return: Vec<JobPosting>,
    toggle_result: Option<JobPosting>,
    applications_to_return: Vec<CompanyApplication>,
    set_application_result: Option<CompanyApplication>,
    dashboard_to_return: StudentDashboard,
}

#[async_trait]
impl Store for MockStoreControl {
    async fn get_internships(
        &self,
        _search: Option<String>,
        _employment_type: Option<String>,
        _location: Option<String>,
    ) -> Vec<Internship> {
        self.internships_to_return.clone()
    }
    async fn get_internship(&self, _id: Uuid) -> Option<Internship> {
        self.internship_result.clone()
    }
    async fn get_feed(
        &self,
        _sort: FeedSort,
        _tag: Option<String>,
        _viewer: Option<Uuid>,
    ) -> Vec<PostView> {
        self.feed_to_return.clone()
    }
    async fn get_hashtags(&self) -> Vec<String> {
        self.hashtags_to_return.clone()
    }
    async fn create_post(&self, _author: PostAuthor, _content: String) -> PostView {
        self.created_post.clone()
    }
    async fn vote_post(&self, _post_id: Uuid, _viewer: Uuid, _vote: Vote) -> Option<PostView> {
        self.vote_result.clone()
    }
    async fn get_company_overview(&self) -> CompanyOverview {
        self.overview_to_return.clone()
    }
    async fn get_jobs(&self) -> Vec<JobPosting> {
        self.jobs_to_return.clone()
    }
    async fn toggle_job_status(&self, _id: Uuid) -> Option<JobPosting> {
        self.toggle_result.clone()
    }
    async fn get_company_applications(&self, _job: Option<Uuid>) -> Vec<CompanyApplication> {
        self.applications_to_return.clone()
    }
    async fn set_application_status(
        &self,
        _id: Uuid,
        _status: ApplicationStatus,
    ) -> Option<CompanyApplication> {
        self.set_application_result.clone()
    }
    async fn get_student_dashboard(&self) -> StudentDashboard {
        self.dashboard_to_return.clone()
    }
}

fn state_with(mock: MockStoreControl) -> AppState {
    AppState {
        store: Arc::new(mock),
        sessions: Arc::new(MemorySessions::new()) as SessionState,
        config: AppConfig::default(),
    }
}

fn some_session() -> Session {
    Session {
        token: Uuid::new_v4(),
        user: User {
            id: Uuid::from_u128(1),
            email: "alice@uni.edu".to_string(),
            role: Role::Student,
            subscription: None,
        },
    }
}

// --- Silent No-Op Flows ---

#[tokio::test]
async fn subscribe_without_session_is_a_204_no_op() {
    let state = state_with(MockStoreControl::default());

    let response = handlers::subscribe(
        MaybeSession(None),
        State(state.clone()),
        Json(SubscribeRequest { plan: Plan::Pro }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn subscribe_with_live_session_returns_the_updated_session() {
    let state = state_with(MockStoreControl::default());
    // A session created through the real service, so the handler's update
    // lands somewhere observable.
    let session = state
        .sessions
        .login("bob@corp.com".to_string(), "pw".to_string(), Role::Company)
        .await;

    let response = handlers::subscribe(
        MaybeSession(Some(session.clone())),
        State(state.clone()),
        Json(SubscribeRequest { plan: Plan::Elite }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = state.sessions.resolve(session.token).await.unwrap();
    assert_eq!(stored.user.subscription.unwrap().plan, Plan::Elite);
}

#[tokio::test]
async fn unauthenticated_post_is_ignored() {
    let state = state_with(MockStoreControl::default());

    let response = handlers::create_post(
        MaybeSession(None),
        State(state),
        Json(CreatePostRequest {
            content: "hello #world".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn blank_post_content_is_ignored() {
    let state = state_with(MockStoreControl::default());

    let response = handlers::create_post(
        MaybeSession(Some(some_session())),
        State(state),
        Json(CreatePostRequest {
            content: "   \n\t ".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn authored_post_is_created() {
    let state = state_with(MockStoreControl::default());

    let response = handlers::create_post(
        MaybeSession(Some(some_session())),
        State(state),
        Json(CreatePostRequest {
            content: "first post #intro".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn unauthenticated_vote_is_ignored() {
    let mock = MockStoreControl {
        vote_result: Some(PostView::default()),
        ..Default::default()
    };
    let state = state_with(mock);

    let response = handlers::vote_post(
        MaybeSession(None),
        State(state),
        Path(Uuid::new_v4()),
        Json(VoteRequest { vote: Vote::Up }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// --- Status Mapping ---

#[tokio::test]
async fn voting_on_unknown_post_is_404() {
    let state = state_with(MockStoreControl::default());

    let response = handlers::vote_post(
        MaybeSession(Some(some_session())),
        State(state),
        Path(Uuid::new_v4()),
        Json(VoteRequest { vote: Vote::Down }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn vote_on_known_post_returns_the_view() {
    let mock = MockStoreControl {
        vote_result: Some(PostView::default()),
        ..Default::default()
    };
    let state = state_with(mock);

    let response = handlers::vote_post(
        MaybeSession(Some(some_session())),
        State(state),
        Path(Uuid::new_v4()),
        Json(VoteRequest { vote: Vote::Up }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_internship_is_404() {
    let state = state_with(MockStoreControl::default());

    let result =
        handlers::get_internship_details(State(state), Path(Uuid::new_v4())).await;
    assert_eq!(result.err(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn known_internship_is_returned() {
    let mock = MockStoreControl {
        internship_result: Some(Internship {
            title: "QA Intern".to_string(),
            ..Default::default()
        }),
        ..Default::default()
    };
    let state = state_with(mock);

    let result =
        handlers::get_internship_details(State(state), Path(Uuid::new_v4())).await;
    assert_eq!(result.unwrap().0.title, "QA Intern");
}

#[tokio::test]
async fn toggling_unknown_job_is_404() {
    let state = state_with(MockStoreControl::default());

    let result = handlers::toggle_job_status(State(state), Path(Uuid::new_v4())).await;
    assert_eq!(result.err(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn feed_query_defaults_to_recent() {
    let mock = MockStoreControl {
        feed_to_return: vec![PostView::default()],
        ..Default::default()
    };
    let state = state_with(mock);

    let Json(feed) = handlers::get_feed(
        MaybeSession(None),
        State(state),
        Query(handlers::FeedQuery {
            sort: None,
            tag: None,
        }),
    )
    .await;

    assert_eq!(feed.len(), 1);
}
