use careflow_core::model::{ExecutionId, FlowExecution, clamp_progress};
use chrono::{DateTime, Utc};

use crate::vm::dashboard_vm::steps_label;
use crate::vm::time_fmt::format_datetime;

/// Row in the patient's execution history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionRowVm {
    pub id: ExecutionId,
    pub flow_name: String,
    pub status_label: &'static str,
    pub progress_percent: u8,
}

impl From<&FlowExecution> for ExecutionRowVm {
    fn from(execution: &FlowExecution) -> Self {
        Self {
            id: execution.id(),
            flow_name: execution.flow_name().to_owned(),
            status_label: execution.status().label(),
            progress_percent: clamp_progress(execution.progress()),
        }
    }
}

#[must_use]
pub fn map_execution_rows(executions: &[FlowExecution]) -> Vec<ExecutionRowVm> {
    executions.iter().map(ExecutionRowVm::from).collect()
}

/// Detail page model for a single execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionDetailVm {
    pub flow_name: String,
    pub status_label: &'static str,
    pub progress_percent: u8,
    pub steps_label: String,
    /// Set while the delay gate holds the next step back.
    pub available_at_str: Option<String>,
}

#[must_use]
pub fn map_execution_detail(execution: &FlowExecution, now: DateTime<Utc>) -> ExecutionDetailVm {
    let available_at_str = execution
        .next_step_available_at()
        .filter(|_| execution.is_delayed(now))
        .map(format_datetime);

    ExecutionDetailVm {
        flow_name: execution.flow_name().to_owned(),
        status_label: execution.status().label(),
        progress_percent: clamp_progress(execution.progress()),
        steps_label: steps_label(execution.completed_steps(), execution.total_steps()),
        available_at_str,
    }
}
