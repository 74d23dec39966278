use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Identity & Session Schemas ---

/// Role
///
/// The two account kinds the portal serves. Drives the role-gated route groups
/// (`/dashboard` requires Student, `/company` requires Company).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    #[default]
    Student,
    Company,
}

/// Plan
///
/// Subscription tiers. Only `pro` and `elite` satisfy the Subscribed capability;
/// `basic` buys community visibility on the pricing page but not feed access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Plan {
    #[default]
    Basic,
    Pro,
    Elite,
}

/// SubscriptionStatus
///
/// An expired subscription is kept on the user record but grants nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Expired,
}

/// Subscription
///
/// The user's current plan. Overwritten wholesale by each subscribe call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Subscription {
    pub plan: Plan,
    pub status: SubscriptionStatus,
}

/// User
///
/// The in-memory identity record carried by a session. There is no profile
/// table behind this; the record is fabricated at login and lives exactly as
/// long as the session that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub subscription: Option<Subscription>,
}

/// Session
///
/// A bearer token paired with the user it resolves to. Tokens are opaque v4
/// UUIDs held in process memory only, so every session dies with the process.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Session {
    pub token: Uuid,
    pub user: User,
}

/// LoginRequest
///
/// Input payload for POST /login. The password is accepted and discarded:
/// mock authentication is an explicit non-goal boundary of this service,
/// and a real deployment must add credential verification.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// SubscribeRequest
///
/// Input payload for POST /subscription/subscribe.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SubscribeRequest {
    pub plan: Plan,
}

// --- Internship Listing Schemas ---

/// Internship
///
/// A read-only listing record. The browse endpoint only ever narrows the view;
/// nothing mutates these after seeding.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Internship {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub employment_type: String,
    pub duration: String,
    pub description: String,
    pub logo_url: String,
}

// --- Community Feed Schemas ---

/// AuthorKind
///
/// Mirrors the badge rendered next to a post author in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AuthorKind {
    #[default]
    Student,
    Company,
    Mentor,
}

/// PostAuthor
///
/// Denormalized author info embedded in each post. Posts authored through the
/// API derive the display name from the session email's local part.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PostAuthor {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: String,
    pub verified_mentor: bool,
    pub kind: AuthorKind,
}

/// Post
///
/// A community feed entry. Counters are plain tallies; who voted is tracked
/// separately in the store's vote ledger so each viewer holds at most one
/// vote per post.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Post {
    pub id: Uuid,
    pub author: PostAuthor,
    pub content: String,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub hashtags: Vec<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    pub upvotes: i64,
    pub downvotes: i64,
    pub comments: i64,
    pub shares: i64,
}

/// Vote
///
/// The two vote directions a viewer can hold on a post.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema, Default,
)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Vote {
    #[default]
    Up,
    Down,
}

/// PostView
///
/// A post as seen by one viewer: the shared record plus that viewer's own
/// vote state. This is what the feed and vote endpoints return.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PostView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub post: Post,
    pub user_vote: Option<Vote>,
}

/// CreatePostRequest
///
/// Input payload for POST /community/posts. Hashtags are not supplied by the
/// client; the server extracts `#word` tokens from the content.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreatePostRequest {
    pub content: String,
}

/// VoteRequest
///
/// Input payload for POST /community/posts/{id}/vote.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct VoteRequest {
    pub vote: Vote,
}

/// FeedSort
///
/// Feed ordering modes. All three sort descending; ties keep the underlying
/// order because the store uses a stable sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FeedSort {
    #[default]
    Recent,
    Trending,
    Discussed,
}

// --- Company Portal Schemas ---

/// JobStatus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum JobStatus {
    #[default]
    Active,
    Inactive,
}

/// JobPosting
///
/// An internship posting as the owning company sees it. `status` is the only
/// mutable field; toggling it is in-memory and does not survive restart.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub applicants: i64,
    pub status: JobStatus,
    #[ts(type = "string")]
    pub posted_date: NaiveDate,
}

/// ApplicationStatus
///
/// Pipeline stages in the company's applicant tracking view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewing,
    Interviewed,
    Offered,
    Rejected,
}

/// CompanyApplication
///
/// A candidate's application as listed in the company portal.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CompanyApplication {
    pub id: Uuid,
    pub candidate_name: String,
    pub position: String,
    pub status: ApplicationStatus,
    #[ts(type = "string")]
    pub applied_date: NaiveDate,
    pub avatar_url: String,
    pub resume_url: String,
}

/// UpdateApplicationStatusRequest
///
/// Input payload for PUT /company/applications/{id}/status.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

/// CompanyOverview
///
/// Headline numbers for the portal's overview tab. `active_jobs` is computed
/// from live job statuses; the other two derive from the seeded records.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CompanyOverview {
    pub active_jobs: i64,
    pub total_applications: i64,
    pub candidates: i64,
}

// --- Student Dashboard Schemas ---

/// StudentApplicationStatus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum StudentApplicationStatus {
    #[default]
    Pending,
    Interviewing,
    Accepted,
    Rejected,
}

/// StudentApplication
///
/// One of the student's own applications, as shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct StudentApplication {
    pub id: Uuid,
    pub internship_title: String,
    pub company: String,
    pub status: StudentApplicationStatus,
    #[ts(type = "string")]
    pub applied_date: NaiveDate,
    pub logo_url: String,
}

/// SavedInternship
///
/// A bookmarked listing on the student dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SavedInternship {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub employment_type: String,
    pub logo_url: String,
}

/// DashboardSummary
///
/// Progress counters derived from the application and saved lists.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DashboardSummary {
    pub total_applications: i64,
    pub pending_review: i64,
    pub interviewing: i64,
    pub saved: i64,
}

/// StudentDashboard
///
/// Full payload for GET /dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct StudentDashboard {
    pub applications: Vec<StudentApplication>,
    pub saved_internships: Vec<SavedInternship>,
    pub summary: DashboardSummary,
}

// --- Subscription Catalog Schemas ---

/// PlanFeature
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PlanFeature {
    pub text: String,
    pub included: bool,
}

/// PlanOffer
///
/// One entry of the pricing page catalog. Prices are whole dollars.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PlanOffer {
    pub plan: Plan,
    pub name: String,
    pub monthly_price: i64,
    pub yearly_price: i64,
    pub description: String,
    pub features: Vec<PlanFeature>,
    pub popular: bool,
}
