use crate::models::{Plan, SubscriptionStatus, User};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// Capability
///
/// The access tier a route group requires. `Student` and `Company` are exact
/// role matches; `Subscribed` is orthogonal to role and keys off the session's
/// subscription state instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Capability {
    Student,
    Company,
    Subscribed,
}

/// GuardOutcome
///
/// The decision for one request: let it through, or redirect it. `from` holds
/// the originally requested location so the login and subscription flows can
/// send the user back where they were headed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    Redirect {
        to: &'static str,
        from: Option<String>,
    },
}

/// evaluate
///
/// The route guard. A pure decision over (session, required capability,
/// requested location) with no side effects beyond the returned navigation.
///
/// Rules:
/// - No session: redirect to `/login`, preserving the requested location.
/// - `Subscribed`: requires an active subscription on the `pro` or `elite`
///   plan; otherwise redirect to `/subscription`, preserving the location.
/// - `Student` / `Company`: requires the session role to equal the capability
///   exactly; otherwise redirect to `/` *without* preserving the location.
///   The dropped origin on this branch matches the long-observed behavior of
///   the role checks and is intentionally left as-is.
pub fn evaluate(session: Option<&User>, required: Capability, location: &str) -> GuardOutcome {
    let Some(user) = session else {
        return GuardOutcome::Redirect {
            to: "/login",
            from: Some(location.to_string()),
        };
    };

    match required {
        Capability::Subscribed => {
            let valid = user.subscription.is_some_and(|sub| {
                sub.status == SubscriptionStatus::Active
                    && matches!(sub.plan, Plan::Pro | Plan::Elite)
            });
            if valid {
                GuardOutcome::Render
            } else {
                GuardOutcome::Redirect {
                    to: "/subscription",
                    from: Some(location.to_string()),
                }
            }
        }
        Capability::Student | Capability::Company => {
            let matches_role = matches!(
                (required, user.role),
                (Capability::Student, crate::models::Role::Student)
                    | (Capability::Company, crate::models::Role::Company)
            );
            if matches_role {
                GuardOutcome::Render
            } else {
                GuardOutcome::Redirect {
                    to: "/",
                    from: None,
                }
            }
        }
    }
}
