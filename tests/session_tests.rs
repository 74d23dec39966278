use optern_portal::models::{Plan, Role, SubscriptionStatus};
use optern_portal::sessions::{DEMO_USER_ID, MemorySessions, SessionService};
use uuid::Uuid;

#[tokio::test]
async fn login_always_succeeds_with_the_synthetic_identity() {
    let sessions = MemorySessions::new();
    let session = sessions
        .login("alice@uni.edu".to_string(), "hunter2".to_string(), Role::Student)
        .await;

    assert_eq!(session.user.id, DEMO_USER_ID);
    assert_eq!(session.user.email, "alice@uni.edu");
    assert_eq!(session.user.role, Role::Student);
    assert!(session.user.subscription.is_none());

    // The token resolves back to the same session.
    let resolved = sessions.resolve(session.token).await.unwrap();
    assert_eq!(resolved.user, session.user);
}

#[tokio::test]
async fn each_login_issues_a_distinct_token() {
    let sessions = MemorySessions::new();
    let a = sessions
        .login("a@x.com".to_string(), "pw".to_string(), Role::Student)
        .await;
    let b = sessions
        .login("b@x.com".to_string(), "pw".to_string(), Role::Company)
        .await;
    assert_ne!(a.token, b.token);
}

#[tokio::test]
async fn logout_clears_the_session() {
    let sessions = MemorySessions::new();
    let session = sessions
        .login("a@x.com".to_string(), "pw".to_string(), Role::Student)
        .await;

    assert!(sessions.logout(session.token).await);
    assert!(sessions.resolve(session.token).await.is_none());
    // A second logout for the same token is a no-op.
    assert!(!sessions.logout(session.token).await);
}

#[tokio::test]
async fn subscribe_without_a_session_changes_nothing() {
    let sessions = MemorySessions::new();
    let stray_token = Uuid::new_v4();

    assert!(sessions.subscribe(stray_token, Plan::Pro).await.is_none());
    // No session sprang into existence as a side effect.
    assert!(sessions.resolve(stray_token).await.is_none());
}

#[tokio::test]
async fn subscribe_overwrites_the_prior_plan() {
    let sessions = MemorySessions::new();
    let session = sessions
        .login("a@x.com".to_string(), "pw".to_string(), Role::Student)
        .await;

    let basic = sessions.subscribe(session.token, Plan::Basic).await.unwrap();
    let sub = basic.user.subscription.unwrap();
    assert_eq!(sub.plan, Plan::Basic);
    assert_eq!(sub.status, SubscriptionStatus::Active);

    let elite = sessions.subscribe(session.token, Plan::Elite).await.unwrap();
    assert_eq!(elite.user.subscription.unwrap().plan, Plan::Elite);

    // The stored session reflects the overwrite.
    let resolved = sessions.resolve(session.token).await.unwrap();
    assert_eq!(resolved.user.subscription.unwrap().plan, Plan::Elite);
}
