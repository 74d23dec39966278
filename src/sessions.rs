use crate::models::{Plan, Role, Session, Subscription, SubscriptionStatus, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// The synthetic identity every login resolves to. Authentication is mocked:
/// there is exactly one user id in the system, and the email/role attached to
/// it are whatever the most recent login supplied.
pub const DEMO_USER_ID: Uuid = Uuid::from_u128(1);

// 1. SessionService Contract
/// SessionService
///
/// Defines the abstract contract for session lifecycle operations. The trait
/// boundary lets handlers and the route-guard middleware share one session
/// source while tests substitute their own implementation.
///
/// There is no error channel on purpose: login cannot fail (no credential
/// verification exists in this system), and subscribe without a live session
/// is a silent no-op rather than an error.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Creates a session for the given identity. Always succeeds. The password
    /// is accepted and dropped; verifying it is explicitly out of scope.
    async fn login(&self, email: String, password: String, role: Role) -> Session;

    /// Resolves a bearer token to its session, if one exists.
    async fn resolve(&self, token: Uuid) -> Option<Session>;

    /// Removes the session for the token. Returns whether one existed.
    async fn logout(&self, token: Uuid) -> bool;

    /// Sets `subscription = {plan, active}` on the token's session,
    /// overwriting any prior plan. Returns the updated session, or `None`
    /// (with no state change) when the token resolves to nothing.
    async fn subscribe(&self, token: Uuid, plan: Plan) -> Option<Session>;
}

/// SessionState
///
/// The concrete type used to share session access across the application state.
pub type SessionState = Arc<dyn SessionService>;

// 2. The In-Memory Implementation
/// MemorySessions
///
/// Sessions keyed by bearer token in a process-local map. This is the whole
/// persistence story: a restart clears every session, matching the source
/// system where identity lived in one browser tab's memory.
#[derive(Default)]
pub struct MemorySessions {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl MemorySessions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionService for MemorySessions {
    async fn login(&self, email: String, _password: String, role: Role) -> Session {
        let session = Session {
            token: Uuid::new_v4(),
            user: User {
                id: DEMO_USER_ID,
                email,
                role,
                subscription: None,
            },
        };

        self.sessions
            .write()
            .await
            .insert(session.token, session.clone());

        tracing::debug!(role = ?role, "session created");
        session
    }

    async fn resolve(&self, token: Uuid) -> Option<Session> {
        self.sessions.read().await.get(&token).cloned()
    }

    async fn logout(&self, token: Uuid) -> bool {
        self.sessions.write().await.remove(&token).is_some()
    }

    async fn subscribe(&self, token: Uuid, plan: Plan) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&token)?;
        session.user.subscription = Some(Subscription {
            plan,
            status: SubscriptionStatus::Active,
        });
        Some(session.clone())
    }
}
