use crate::models::{
    ApplicationStatus, AuthorKind, CompanyApplication, CompanyOverview, DashboardSummary, FeedSort,
    Internship, JobPosting, JobStatus, Plan, PlanFeature, PlanOffer, Post, PostAuthor, PostView,
    SavedInternship, StudentApplication, StudentApplicationStatus, StudentDashboard, Vote,
};
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Store Trait
///
/// Defines the abstract contract for all data access. This is the core of the
/// Repository Abstraction pattern, allowing the handlers to interact with the
/// data layer without knowing the concrete implementation (in-memory, mock).
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Store>`) safely shareable across Axum's asynchronous task
/// boundaries.
///
/// There is deliberately no durable backend behind this trait: every record
/// lives in process memory and resets on restart.
#[async_trait]
pub trait Store: Send + Sync {
    // --- Internship Listing ---
    // Browse listing with filters. All predicates AND-combine; `search` is a
    // case-insensitive substring match over title OR company. Result order is
    // the seed order restricted to matches (no sort).
    async fn get_internships(
        &self,
        search: Option<String>,
        employment_type: Option<String>,
        location: Option<String>,
    ) -> Vec<Internship>;
    async fn get_internship(&self, id: Uuid) -> Option<Internship>;

    // --- Community Feed ---
    // Sorted, optionally tag-filtered feed with the viewer's own vote state
    // attached to each post.
    async fn get_feed(&self, sort: FeedSort, tag: Option<String>, viewer: Option<Uuid>)
    -> Vec<PostView>;
    // Distinct hashtags across all posts, first-seen order.
    async fn get_hashtags(&self) -> Vec<String>;
    // Prepends a new post (most-recent-first) with zeroed counters.
    async fn create_post(&self, author: PostAuthor, content: String) -> PostView;
    // Vote toggle: same vote clears, opposite vote swaps, both counter
    // adjustments under a single write lock. At most one vote per
    // (post, viewer). Returns None for an unknown post.
    async fn vote_post(&self, post_id: Uuid, viewer: Uuid, vote: Vote) -> Option<PostView>;

    // --- Company Portal ---
    async fn get_company_overview(&self) -> CompanyOverview;
    async fn get_jobs(&self) -> Vec<JobPosting>;
    // Flips Active <-> Inactive. Returns None for an unknown posting.
    async fn toggle_job_status(&self, id: Uuid) -> Option<JobPosting>;
    // Optionally narrowed to applications whose position matches the job's title.
    async fn get_company_applications(&self, job: Option<Uuid>) -> Vec<CompanyApplication>;
    async fn set_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Option<CompanyApplication>;

    // --- Student Dashboard ---
    async fn get_student_dashboard(&self) -> StudentDashboard;
}

/// StoreState
///
/// The concrete type used to share the data layer across the application state.
pub type StoreState = Arc<dyn Store>;

// Tokens beginning with '#' followed by one or more word characters.
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("hashtag pattern is valid"));

/// extract_hashtags
///
/// Pulls hashtags out of free-text post content, stripping the leading `#`.
/// Order of appearance is preserved; duplicates are kept as written.
pub fn extract_hashtags(content: &str) -> Vec<String> {
    HASHTAG
        .captures_iter(content)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// FeedState
///
/// Posts plus the vote ledger, guarded together so a vote toggle adjusts the
/// counters and the ledger in one critical section.
#[derive(Default)]
struct FeedState {
    posts: Vec<Post>,
    // (post id, viewer id) -> the viewer's current vote. Absence means none.
    votes: HashMap<(Uuid, Uuid), Vote>,
}

impl FeedState {
    fn view(&self, post: &Post, viewer: Option<Uuid>) -> PostView {
        PostView {
            post: post.clone(),
            user_vote: viewer.and_then(|v| self.votes.get(&(post.id, v)).copied()),
        }
    }
}

/// MemoryStore
///
/// The concrete implementation of the `Store` trait. Listings and dashboard
/// records are immutable after seeding; the feed, job statuses, and
/// application statuses sit behind RwLocks because handlers mutate them.
pub struct MemoryStore {
    internships: Vec<Internship>,
    feed: RwLock<FeedState>,
    jobs: RwLock<Vec<JobPosting>>,
    applications: RwLock<Vec<CompanyApplication>>,
    student_applications: Vec<StudentApplication>,
    saved_internships: Vec<SavedInternship>,
}

impl MemoryStore {
    /// Creates an empty store. Used when demo seeding is disabled and by
    /// tests that want full control over the dataset.
    pub fn new() -> Self {
        Self {
            internships: Vec::new(),
            feed: RwLock::new(FeedState::default()),
            jobs: RwLock::new(Vec::new()),
            applications: RwLock::new(Vec::new()),
            student_applications: Vec::new(),
            saved_internships: Vec::new(),
        }
    }

    /// Creates a store pre-loaded with the demo dataset the portal ships with.
    pub fn with_demo_data() -> Self {
        Self {
            internships: seed_internships(),
            feed: RwLock::new(FeedState {
                posts: seed_posts(),
                votes: HashMap::new(),
            }),
            jobs: RwLock::new(seed_jobs()),
            applications: RwLock::new(seed_company_applications()),
            student_applications: seed_student_applications(),
            saved_internships: seed_saved_internships(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    /// get_internships
    ///
    /// All three predicates AND-combine. The search term matches
    /// case-insensitively as a substring of the title or the company name;
    /// type and location are exact matches. Seed order is preserved.
    async fn get_internships(
        &self,
        search: Option<String>,
        employment_type: Option<String>,
        location: Option<String>,
    ) -> Vec<Internship> {
        let needle = search.map(|s| s.to_lowercase());
        self.internships
            .iter()
            .filter(|i| {
                let matches_search = needle.as_ref().is_none_or(|n| {
                    i.title.to_lowercase().contains(n) || i.company.to_lowercase().contains(n)
                });
                let matches_type = employment_type
                    .as_ref()
                    .is_none_or(|t| i.employment_type == *t);
                let matches_location = location.as_ref().is_none_or(|l| i.location == *l);
                matches_search && matches_type && matches_location
            })
            .cloned()
            .collect()
    }

    async fn get_internship(&self, id: Uuid) -> Option<Internship> {
        self.internships.iter().find(|i| i.id == id).cloned()
    }

    /// get_feed
    ///
    /// Sorts a snapshot of the posts (descending by timestamp, net score, or
    /// comment count), then applies the optional hashtag filter. The sort is
    /// stable, so ties keep the storage order — which is most-recent-first
    /// because new posts are prepended.
    async fn get_feed(
        &self,
        sort: FeedSort,
        tag: Option<String>,
        viewer: Option<Uuid>,
    ) -> Vec<PostView> {
        let state = self.feed.read().await;
        let mut posts: Vec<&Post> = state.posts.iter().collect();

        match sort {
            FeedSort::Recent => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            FeedSort::Trending => {
                posts.sort_by_key(|p| std::cmp::Reverse(p.upvotes - p.downvotes))
            }
            FeedSort::Discussed => posts.sort_by_key(|p| std::cmp::Reverse(p.comments)),
        }

        posts
            .into_iter()
            .filter(|p| tag.as_ref().is_none_or(|t| p.hashtags.contains(t)))
            .map(|p| state.view(p, viewer))
            .collect()
    }

    /// get_hashtags
    ///
    /// Distinct hashtags across all posts, in first-seen storage order.
    async fn get_hashtags(&self) -> Vec<String> {
        let state = self.feed.read().await;
        let mut seen = HashSet::new();
        state
            .posts
            .iter()
            .flat_map(|p| p.hashtags.iter())
            .filter(|tag| seen.insert(tag.as_str()))
            .cloned()
            .collect()
    }

    /// create_post
    ///
    /// Extracts hashtags from the content, zeroes every counter, and inserts
    /// the post at the front of the backing list so it leads the feed until
    /// the next re-sort.
    async fn create_post(&self, author: PostAuthor, content: String) -> PostView {
        let post = Post {
            id: Uuid::new_v4(),
            author,
            hashtags: extract_hashtags(&content),
            content,
            image_url: None,
            link_url: None,
            created_at: Utc::now(),
            upvotes: 0,
            downvotes: 0,
            comments: 0,
            shares: 0,
        };

        let mut state = self.feed.write().await;
        state.posts.insert(0, post.clone());
        tracing::debug!(post_id = %post.id, "post created");
        state.view(&post, Some(post.author.id))
    }

    /// vote_post
    ///
    /// Toggle semantics under one write lock: any previous vote is backed out
    /// of the counters first; the new vote is then recorded unless it equals
    /// the previous one, in which case the viewer ends up with no vote. Both
    /// counters and the ledger change in the same critical section, so the
    /// one-vote-per-(post, viewer) invariant holds at every observable point.
    async fn vote_post(&self, post_id: Uuid, viewer: Uuid, vote: Vote) -> Option<PostView> {
        let mut state = self.feed.write().await;
        let FeedState { posts, votes } = &mut *state;
        let post = posts.iter_mut().find(|p| p.id == post_id)?;

        let key = (post_id, viewer);
        let previous = votes.get(&key).copied();

        match previous {
            Some(Vote::Up) => post.upvotes -= 1,
            Some(Vote::Down) => post.downvotes -= 1,
            None => {}
        }

        if previous == Some(vote) {
            votes.remove(&key);
        } else {
            match vote {
                Vote::Up => post.upvotes += 1,
                Vote::Down => post.downvotes += 1,
            }
            votes.insert(key, vote);
        }

        let view = PostView {
            post: post.clone(),
            user_vote: votes.get(&key).copied(),
        };
        Some(view)
    }

    /// get_company_overview
    ///
    /// Headline numbers for the overview tab. The active count reflects the
    /// live (toggleable) statuses; applications sum the per-posting counts;
    /// candidates counts distinct names across the application records.
    async fn get_company_overview(&self) -> CompanyOverview {
        let jobs = self.jobs.read().await;
        let applications = self.applications.read().await;

        let active_jobs = jobs.iter().filter(|j| j.status == JobStatus::Active).count() as i64;
        let total_applications = jobs.iter().map(|j| j.applicants).sum();
        let candidates = applications
            .iter()
            .map(|a| a.candidate_name.as_str())
            .collect::<HashSet<_>>()
            .len() as i64;

        CompanyOverview {
            active_jobs,
            total_applications,
            candidates,
        }
    }

    async fn get_jobs(&self) -> Vec<JobPosting> {
        self.jobs.read().await.clone()
    }

    /// toggle_job_status
    ///
    /// Flips the posting between Active and Inactive and returns the updated
    /// record. In-memory only; a restart restores the seeded statuses.
    async fn toggle_job_status(&self, id: Uuid) -> Option<JobPosting> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.iter_mut().find(|j| j.id == id)?;
        job.status = match job.status {
            JobStatus::Active => JobStatus::Inactive,
            JobStatus::Inactive => JobStatus::Active,
        };
        Some(job.clone())
    }

    /// get_company_applications
    ///
    /// With a job filter, keeps only applications whose position matches that
    /// posting's title. An unknown job id matches nothing.
    async fn get_company_applications(&self, job: Option<Uuid>) -> Vec<CompanyApplication> {
        let applications = self.applications.read().await;
        match job {
            None => applications.clone(),
            Some(job_id) => {
                let jobs = self.jobs.read().await;
                let Some(title) = jobs.iter().find(|j| j.id == job_id).map(|j| j.title.clone())
                else {
                    return Vec::new();
                };
                applications
                    .iter()
                    .filter(|a| a.position == title)
                    .cloned()
                    .collect()
            }
        }
    }

    async fn set_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Option<CompanyApplication> {
        let mut applications = self.applications.write().await;
        let application = applications.iter_mut().find(|a| a.id == id)?;
        application.status = status;
        Some(application.clone())
    }

    /// get_student_dashboard
    ///
    /// Assembles the dashboard payload with the summary counters computed
    /// from the two lists rather than stored.
    async fn get_student_dashboard(&self) -> StudentDashboard {
        let applications = self.student_applications.clone();
        let saved_internships = self.saved_internships.clone();

        let summary = DashboardSummary {
            total_applications: applications.len() as i64,
            pending_review: applications
                .iter()
                .filter(|a| a.status == StudentApplicationStatus::Pending)
                .count() as i64,
            interviewing: applications
                .iter()
                .filter(|a| a.status == StudentApplicationStatus::Interviewing)
                .count() as i64,
            saved: saved_internships.len() as i64,
        };

        StudentDashboard {
            applications,
            saved_internships,
            summary,
        }
    }
}

// --- Demo Dataset ---
//
// Fixed UUIDs keep the seed referenceable from tests and from the frontend
// fixtures. Dates mirror the original sample data.

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("seed date is valid")
}

fn seed_internships() -> Vec<Internship> {
    vec![
        Internship {
            id: Uuid::from_u128(0x101),
            title: "Software Engineering Intern".to_string(),
            company: "TechCorp".to_string(),
            location: "San Francisco, CA".to_string(),
            employment_type: "Full-time".to_string(),
            duration: "3 months".to_string(),
            description: "Join our engineering team to build scalable web applications using modern technologies.".to_string(),
            logo_url: "https://images.unsplash.com/photo-1549719386-74dfcbf7dbed?w=128&q=80".to_string(),
        },
        Internship {
            id: Uuid::from_u128(0x102),
            title: "Marketing Intern".to_string(),
            company: "GrowthLabs".to_string(),
            location: "New York, NY".to_string(),
            employment_type: "Part-time".to_string(),
            duration: "6 months".to_string(),
            description: "Help develop and execute digital marketing campaigns for high-growth startups.".to_string(),
            logo_url: "https://images.unsplash.com/photo-1551434678-e076c223a692?w=128&q=80".to_string(),
        },
        Internship {
            id: Uuid::from_u128(0x103),
            title: "Data Science Intern".to_string(),
            company: "AI Solutions".to_string(),
            location: "Remote".to_string(),
            employment_type: "Full-time".to_string(),
            duration: "4 months".to_string(),
            description: "Work on machine learning projects and help improve our AI algorithms.".to_string(),
            logo_url: "https://images.unsplash.com/photo-1568992687947-868a62a9f521?w=128&q=80".to_string(),
        },
    ]
}

fn seed_posts() -> Vec<Post> {
    vec![
        Post {
            id: Uuid::from_u128(0x201),
            author: PostAuthor {
                id: Uuid::from_u128(0x301),
                name: "Sarah Chen".to_string(),
                avatar_url: "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=256&q=80".to_string(),
                verified_mentor: true,
                kind: AuthorKind::Mentor,
            },
            content: "Just wrapped up another successful interview prep session! Here are my top tips for technical interviews: 1) Practice explaining your thought process, 2) Start with a simple solution before optimizing, 3) Ask clarifying questions. What strategies work for you?".to_string(),
            image_url: None,
            link_url: None,
            hashtags: vec!["InterviewTips".to_string(), "TechCareers".to_string()],
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
            upvotes: 42,
            downvotes: 2,
            comments: 15,
            shares: 8,
        },
        Post {
            id: Uuid::from_u128(0x202),
            author: PostAuthor {
                id: Uuid::from_u128(0x302),
                name: "TechCorp".to_string(),
                avatar_url: "https://images.unsplash.com/photo-1549719386-74dfcbf7dbed?w=128&q=80".to_string(),
                verified_mentor: false,
                kind: AuthorKind::Company,
            },
            content: "We're excited to announce our Summer 2024 internship program! Looking for passionate developers who want to work on cutting-edge projects. Pro tip: Show us your side projects in your application!".to_string(),
            image_url: Some("https://images.unsplash.com/photo-1515378791036-0648a3ef77b2?w=1470&q=80".to_string()),
            link_url: None,
            hashtags: vec![
                "Internships".to_string(),
                "TechJobs".to_string(),
                "CareerAdvice".to_string(),
            ],
            created_at: Utc.with_ymd_and_hms(2024, 3, 14, 15, 30, 0).unwrap(),
            upvotes: 156,
            downvotes: 0,
            comments: 45,
            shares: 23,
        },
    ]
}

fn seed_jobs() -> Vec<JobPosting> {
    vec![
        JobPosting {
            id: Uuid::from_u128(0x401),
            title: "Software Engineering Intern".to_string(),
            department: "Engineering".to_string(),
            location: "San Francisco, CA".to_string(),
            employment_type: "Full-time".to_string(),
            applicants: 45,
            status: JobStatus::Active,
            posted_date: date(2024, 3, 1),
        },
        JobPosting {
            id: Uuid::from_u128(0x402),
            title: "Marketing Intern".to_string(),
            department: "Marketing".to_string(),
            location: "Remote".to_string(),
            employment_type: "Part-time".to_string(),
            applicants: 32,
            status: JobStatus::Inactive,
            posted_date: date(2024, 3, 5),
        },
    ]
}

fn seed_company_applications() -> Vec<CompanyApplication> {
    vec![
        CompanyApplication {
            id: Uuid::from_u128(0x501),
            candidate_name: "Sarah Chen".to_string(),
            position: "Software Engineering Intern".to_string(),
            status: ApplicationStatus::Reviewing,
            applied_date: date(2024, 3, 15),
            avatar_url: "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=256&q=80"
                .to_string(),
            resume_url: "https://example.com/resume1.pdf".to_string(),
        },
        CompanyApplication {
            id: Uuid::from_u128(0x502),
            candidate_name: "Michael Rodriguez".to_string(),
            position: "Marketing Intern".to_string(),
            status: ApplicationStatus::Interviewed,
            applied_date: date(2024, 3, 10),
            avatar_url: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=256&q=80"
                .to_string(),
            resume_url: "https://example.com/resume2.pdf".to_string(),
        },
    ]
}

fn seed_student_applications() -> Vec<StudentApplication> {
    vec![
        StudentApplication {
            id: Uuid::from_u128(0x601),
            internship_title: "Software Engineering Intern".to_string(),
            company: "TechCorp".to_string(),
            status: StudentApplicationStatus::Interviewing,
            applied_date: date(2024, 3, 15),
            logo_url: "https://images.unsplash.com/photo-1549719386-74dfcbf7dbed?w=128&q=80"
                .to_string(),
        },
        StudentApplication {
            id: Uuid::from_u128(0x602),
            internship_title: "Marketing Intern".to_string(),
            company: "GrowthLabs".to_string(),
            status: StudentApplicationStatus::Pending,
            applied_date: date(2024, 3, 10),
            logo_url: "https://images.unsplash.com/photo-1551434678-e076c223a692?w=128&q=80"
                .to_string(),
        },
    ]
}

fn seed_saved_internships() -> Vec<SavedInternship> {
    vec![SavedInternship {
        id: Uuid::from_u128(0x103),
        title: "Data Science Intern".to_string(),
        company: "AI Solutions".to_string(),
        location: "Remote".to_string(),
        employment_type: "Full-time".to_string(),
        logo_url: "https://images.unsplash.com/photo-1568992687947-868a62a9f521?w=128&q=80"
            .to_string(),
    }]
}

/// plan_catalog
///
/// The static pricing-page catalog. Not behind the `Store` trait because it
/// never varies per request or per deployment.
pub fn plan_catalog() -> Vec<PlanOffer> {
    fn feature(text: &str, included: bool) -> PlanFeature {
        PlanFeature {
            text: text.to_string(),
            included,
        }
    }

    vec![
        PlanOffer {
            plan: Plan::Basic,
            name: "Community Access".to_string(),
            monthly_price: 9,
            yearly_price: 90,
            description: "Perfect for students starting their internship journey".to_string(),
            features: vec![
                feature("Access to Optern Community", true),
                feature("Post, comment, and engage", true),
                feature("Connect with fellow students", true),
                feature("Basic profile visibility", true),
                feature("Personal guidance", false),
                feature("Profile-based recommendations", false),
                feature("Premium community access", false),
                feature("1-on-1 mentorship", false),
            ],
            popular: false,
        },
        PlanOffer {
            plan: Plan::Pro,
            name: "Internship Guidance".to_string(),
            monthly_price: 29,
            yearly_price: 290,
            description: "For students serious about landing their dream internship".to_string(),
            features: vec![
                feature("Access to Optern Community", true),
                feature("Post, comment, and engage", true),
                feature("Connect with fellow students", true),
                feature("Enhanced profile visibility", true),
                feature("Personal guidance", true),
                feature("Profile-based recommendations", true),
                feature("Premium community access", false),
                feature("1-on-1 mentorship", false),
            ],
            popular: true,
        },
        PlanOffer {
            plan: Plan::Elite,
            name: "Premium Mentorship".to_string(),
            monthly_price: 99,
            yearly_price: 990,
            description: "Ultimate package for career success".to_string(),
            features: vec![
                feature("Access to Optern Community", true),
                feature("Post, comment, and engage", true),
                feature("Connect with fellow students", true),
                feature("Priority profile visibility", true),
                feature("Personal guidance", true),
                feature("Profile-based recommendations", true),
                feature("Premium community access", true),
                feature("1-on-1 mentorship", true),
            ],
            popular: false,
        },
    ]
}
