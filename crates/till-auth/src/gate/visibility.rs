//! The visibility gate: content or fallback, decided from an access snapshot.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use till_entity::role::{Permission, Role};
use till_entity::session::Session;

use crate::session::AccessSnapshot;

/// What a gate requires before it shows its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Requirement {
    /// A specific permission.
    Permission(Permission),
    /// A permission given by its dotted name; unknown names are never met.
    Named(String),
    /// A role at or above this privilege level.
    MinimumRole(Role),
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permission(p) => write!(f, "permission {p}"),
            Self::Named(name) => write!(f, "permission {name}"),
            Self::MinimumRole(role) => write!(f, "role {role} or above"),
        }
    }
}

/// Why a gate rendered its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentReason {
    /// Demo bypass; not an authorization result.
    Bypass,
    /// Role resolution still in flight; shown to avoid flicker.
    Loading,
    /// The requirement is met.
    Granted,
}

/// The outcome of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "render", content = "reason", rename_all = "snake_case")]
pub enum GateDecision {
    /// Render the content branch.
    Content(ContentReason),
    /// Render the fallback branch.
    Fallback,
}

impl GateDecision {
    /// Whether the content branch is rendered.
    pub fn shows_content(&self) -> bool {
        matches!(self, Self::Content(_))
    }
}

/// Wraps restricted UI. The decision is cosmetic: the backend still
/// authorizes whatever the content triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityGate {
    requirement: Requirement,
}

impl VisibilityGate {
    /// A gate with an explicit requirement.
    pub fn new(requirement: Requirement) -> Self {
        Self { requirement }
    }

    /// Gate on a permission.
    pub fn permission(permission: Permission) -> Self {
        Self::new(Requirement::Permission(permission))
    }

    /// Gate on a permission name as written in views.
    pub fn named(name: &str) -> Self {
        match name.parse::<Permission>() {
            Ok(permission) => Self::permission(permission),
            Err(_) => Self::new(Requirement::Named(name.to_string())),
        }
    }

    /// Gate on a minimum role.
    pub fn minimum_role(role: Role) -> Self {
        Self::new(Requirement::MinimumRole(role))
    }

    /// Admins only.
    pub fn admin_only() -> Self {
        Self::minimum_role(Role::Admin)
    }

    /// Managers and admins.
    pub fn manager_or_above() -> Self {
        Self::minimum_role(Role::Manager)
    }

    /// Cashier-level roles and above.
    pub fn cashier_or_above() -> Self {
        Self::minimum_role(Role::Cashier)
    }

    /// The requirement this gate checks.
    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// Decide which branch to render.
    pub fn decide(&self, snapshot: &AccessSnapshot) -> GateDecision {
        if let Some(Session::Demo(demo)) = snapshot.session() {
            debug!(
                target: "till::access::bypass",
                label = demo.label(),
                requirement = %self.requirement,
                "Demo bypass: rendering gated content"
            );
            return GateDecision::Content(ContentReason::Bypass);
        }

        if snapshot.is_loading() {
            return GateDecision::Content(ContentReason::Loading);
        }

        if self.is_met(snapshot) {
            GateDecision::Content(ContentReason::Granted)
        } else {
            GateDecision::Fallback
        }
    }

    /// Render `content` or `fallback` according to [`Self::decide`].
    pub fn render<T>(
        &self,
        snapshot: &AccessSnapshot,
        content: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.decide(snapshot).shows_content() {
            content()
        } else {
            fallback()
        }
    }

    /// Render `content`, or nothing when the gate falls back.
    pub fn render_or_hide<T>(
        &self,
        snapshot: &AccessSnapshot,
        content: impl FnOnce() -> T,
    ) -> Option<T> {
        self.render(snapshot, || Some(content()), || None)
    }

    fn is_met(&self, snapshot: &AccessSnapshot) -> bool {
        match &self.requirement {
            Requirement::Permission(permission) => snapshot.has(*permission),
            Requirement::Named(name) => snapshot.has_permission(name),
            Requirement::MinimumRole(role) => snapshot.meets(*role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use till_core::config::AccessConfig;
    use till_entity::session::{AccessState, DemoSession, RoleOrigin, UserSession};
    use uuid::Uuid;

    use crate::rbac::PermissionEvaluator;

    fn snapshot(state: AccessState) -> AccessSnapshot {
        AccessSnapshot::new(state, &PermissionEvaluator::new())
    }

    fn user(role: Role) -> AccessSnapshot {
        snapshot(AccessState::Ready(Session::User(UserSession {
            user_id: Uuid::new_v4(),
            role,
            origin: RoleOrigin::Primary,
            resolved_at: Utc::now(),
        })))
    }

    fn demo() -> AccessSnapshot {
        let config = AccessConfig {
            demo_mode: true,
            ..AccessConfig::default()
        };
        let demo = DemoSession::from_config(&config).unwrap();
        snapshot(AccessState::Ready(Session::Demo(demo)))
    }

    #[test]
    fn test_cashier_gets_fallback_for_worker_steps() {
        let gate = VisibilityGate::named("worker.steps.update");
        assert_eq!(gate.decide(&user(Role::Cashier)), GateDecision::Fallback);
        assert_eq!(gate.render(&user(Role::Cashier), || "edit", || "locked"), "locked");
    }

    #[test]
    fn test_admin_gets_content_for_any_permission() {
        for permission in Permission::ALL {
            let gate = VisibilityGate::permission(permission);
            assert_eq!(
                gate.decide(&user(Role::Admin)),
                GateDecision::Content(ContentReason::Granted)
            );
        }
    }

    #[test]
    fn test_loading_shows_content() {
        let gate = VisibilityGate::admin_only();
        assert_eq!(
            gate.decide(&snapshot(AccessState::Resolving)),
            GateDecision::Content(ContentReason::Loading)
        );
    }

    #[test]
    fn test_bypass_shows_content_and_is_distinguishable() {
        let gate = VisibilityGate::named("zzz.unknown");
        assert_eq!(gate.decide(&demo()), GateDecision::Content(ContentReason::Bypass));
    }

    #[test]
    fn test_anonymous_gets_fallback() {
        let gate = VisibilityGate::cashier_or_above();
        let anon = snapshot(AccessState::Ready(Session::Anonymous));
        assert_eq!(gate.render_or_hide(&anon, || "till"), None);
    }

    #[test]
    fn test_role_thresholds() {
        assert!(VisibilityGate::manager_or_above().decide(&user(Role::Manager)).shows_content());
        assert!(!VisibilityGate::manager_or_above().decide(&user(Role::Sales)).shows_content());
        assert!(VisibilityGate::cashier_or_above().decide(&user(Role::Auditor)).shows_content());
        assert!(
            !VisibilityGate::cashier_or_above()
                .decide(&user(Role::ProductionWorker))
                .shows_content()
        );
        assert!(!VisibilityGate::admin_only().decide(&user(Role::Manager)).shows_content());
    }

    #[test]
    fn test_unknown_name_never_granted() {
        let gate = VisibilityGate::named("sales.teleport");
        assert_eq!(
            gate.requirement(),
            &Requirement::Named("sales.teleport".to_string())
        );
        assert_eq!(gate.decide(&user(Role::Admin)), GateDecision::Fallback);
    }
}
