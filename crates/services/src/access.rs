use careflow_core::access::{AccessDecision, check_roles};
use careflow_core::model::{Role, UserSession};

/// Capability check gating a view to a set of roles. No side effects.
pub trait AccessChecker: Send + Sync {
    fn check(&self, session: Option<&UserSession>, required: &[Role]) -> AccessDecision;
}

/// Grants access when the session holds one of the required roles.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAccess;

impl AccessChecker for RoleAccess {
    fn check(&self, session: Option<&UserSession>, required: &[Role]) -> AccessDecision {
        check_roles(session, required)
    }
}

/// Denies every request; used to exercise silent denial.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl AccessChecker for DenyAll {
    fn check(&self, _session: Option<&UserSession>, _required: &[Role]) -> AccessDecision {
        AccessDecision::Unauthorized
    }
}
