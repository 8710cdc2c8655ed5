use crate::model::ExecutionId;

/// Route path for a single execution.
#[must_use]
pub fn execution_path(id: ExecutionId) -> String {
    format!("/flow-execution/{id}")
}

/// Route path for the patient's execution history.
pub const MY_FLOWS_PATH: &str = "/my-flows";

/// Decides when the dashboard should auto-redirect to an eligible execution.
///
/// Decisions are keyed on the execution id, so a poll that returns a fresh copy of
/// the same execution does not redirect again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectTracker {
    last: Option<ExecutionId>,
}

impl RedirectTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id to navigate to, or `None` when no redirect should fire.
    ///
    /// Nothing is decided while `loading` is true.
    pub fn evaluate(&mut self, loading: bool, eligible: Option<ExecutionId>) -> Option<ExecutionId> {
        if loading {
            return None;
        }

        match eligible {
            Some(id) if self.last == Some(id) => None,
            Some(id) => {
                self.last = Some(id);
                Some(id)
            }
            None => {
                self.last = None;
                None
            }
        }
    }
}
