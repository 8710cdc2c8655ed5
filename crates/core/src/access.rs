use crate::model::{Role, UserSession};

/// Outcome of a role check. Callers render nothing on `Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Authorized,
    Unauthorized,
}

impl AccessDecision {
    #[must_use]
    pub fn is_authorized(self) -> bool {
        matches!(self, AccessDecision::Authorized)
    }
}

/// Authorize when a session exists and holds at least one of `required`.
#[must_use]
pub fn check_roles(session: Option<&UserSession>, required: &[Role]) -> AccessDecision {
    match session {
        Some(session) if required.iter().any(|role| session.has_role(*role)) => {
            AccessDecision::Authorized
        }
        _ => AccessDecision::Unauthorized,
    }
}
