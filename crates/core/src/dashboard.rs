//! Pure derivation from an execution snapshot to what the patient dashboard shows.

use chrono::{DateTime, Utc};

use crate::model::{ExecutionStatus, FlowExecution, clamp_progress};

/// Whether the patient can resume this execution right now.
///
/// All of the following must hold:
/// - status is in progress,
/// - a structured current step is present,
/// - status is not completed,
/// - no availability timestamp in the future.
#[must_use]
pub fn is_available_to_continue(execution: &FlowExecution, now: DateTime<Utc>) -> bool {
    let in_progress = *execution.status() == ExecutionStatus::InProgress;
    let not_completed = *execution.status() != ExecutionStatus::Completed;

    in_progress && execution.has_current_step() && not_completed && !execution.is_delayed(now)
}

/// First execution, in provider order, that the patient can resume.
#[must_use]
pub fn find_available(executions: &[FlowExecution], now: DateTime<Utc>) -> Option<&FlowExecution> {
    executions
        .iter()
        .find(|execution| is_available_to_continue(execution, now))
}

/// The eligible execution together with its display-ready progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveForm {
    pub execution: FlowExecution,
    pub progress_percent: u8,
}

impl ActiveForm {
    #[must_use]
    pub fn new(execution: FlowExecution) -> Self {
        let progress_percent = clamp_progress(execution.progress());
        Self {
            execution,
            progress_percent,
        }
    }
}

/// The three mutually exclusive dashboard states.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    NoForms,
    InProgress(ActiveForm),
    AllCompleted,
}

impl DashboardState {
    #[must_use]
    pub fn active_form(&self) -> Option<&ActiveForm> {
        match self {
            DashboardState::InProgress(form) => Some(form),
            DashboardState::NoForms | DashboardState::AllCompleted => None,
        }
    }
}

/// Select the dashboard state for the latest snapshot.
///
/// `None` means the provider has nothing (yet); it renders the same as an empty list.
#[must_use]
pub fn derive_dashboard(
    executions: Option<&[FlowExecution]>,
    now: DateTime<Utc>,
) -> DashboardState {
    let Some(executions) = executions.filter(|list| !list.is_empty()) else {
        return DashboardState::NoForms;
    };

    match find_available(executions, now) {
        Some(execution) => DashboardState::InProgress(ActiveForm::new(execution.clone())),
        None => DashboardState::AllCompleted,
    }
}
