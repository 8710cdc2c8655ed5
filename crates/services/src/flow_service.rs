use std::sync::Arc;

use careflow_core::Clock;
use careflow_core::dashboard::{DashboardState, derive_dashboard, is_available_to_continue};
use careflow_core::model::{ExecutionId, FlowExecution, UserSession};
use chrono::{DateTime, Utc};

use crate::error::SourceError;
use crate::sources::ExecutionSource;

/// Reads the signed-in patient's executions from an `ExecutionSource`.
#[derive(Clone)]
pub struct PatientFlowService {
    clock: Clock,
    source: Arc<dyn ExecutionSource>,
}

impl PatientFlowService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn ExecutionSource>) -> Self {
        Self { clock, source }
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Fetch the current snapshot of executions for `session`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NoSession` without a session, or whatever the source reports.
    pub async fn fetch(
        &self,
        session: Option<&UserSession>,
    ) -> Result<Vec<FlowExecution>, SourceError> {
        let session = session.ok_or(SourceError::NoSession)?;
        let user_id = session.user_id();

        match self.source.list_for_patient(user_id).await {
            Ok(executions) => {
                tracing::debug!(%user_id, count = executions.len(), "fetched flow executions");
                Ok(executions)
            }
            Err(err) => {
                tracing::warn!(%user_id, error = %err, "failed to fetch flow executions");
                Err(err)
            }
        }
    }

    /// Fetch a single execution by id from the patient's snapshot.
    ///
    /// # Errors
    ///
    /// Propagates fetch failures; a missing id is `Ok(None)`.
    pub async fn get(
        &self,
        session: Option<&UserSession>,
        id: ExecutionId,
    ) -> Result<Option<FlowExecution>, SourceError> {
        let executions = self.fetch(session).await?;
        Ok(executions.into_iter().find(|execution| execution.id() == id))
    }

    /// Derive the dashboard state for a snapshot, logging each eligibility check.
    #[must_use]
    pub fn dashboard_state(&self, executions: Option<&[FlowExecution]>) -> DashboardState {
        let now = self.now();
        for execution in executions.unwrap_or_default() {
            tracing::debug!(
                execution_id = %execution.id(),
                status = execution.status().as_wire(),
                has_current_step = execution.has_current_step(),
                next_step_available_at = ?execution.next_step_available_at(),
                eligible = is_available_to_continue(execution, now),
                "checked execution"
            );
        }
        derive_dashboard(executions, now)
    }
}
