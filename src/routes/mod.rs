/// Router Module Index
///
/// Organizes the application's routing logic into capability-segregated
/// modules. Access control is applied explicitly at the module level (via
/// Axum route layers in `create_router`), so a route's access tier is
/// visible from which module declares it.
///
/// The modules map directly to the capability model: anonymous, session
/// required, and the three guarded tiers (`subscribed`, `student`,
/// `company`).

/// Routes accessible to all clients (anonymous or logged-in). Includes the
/// flows that must be reachable without a session: login and the
/// silently-no-op subscribe call.
pub mod public;

/// Routes requiring a resolvable session, with no capability beyond that
/// (profile, logout).
pub mod authenticated;

/// The community feed group. Wrapped by the `require_subscribed` layer:
/// an active `pro` or `elite` subscription, or a redirect to /subscription.
pub mod community;

/// The student dashboard group. Wrapped by the `require_student` layer.
pub mod dashboard;

/// The company portal group. Wrapped by the `require_company` layer.
pub mod company;
