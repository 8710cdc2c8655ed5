use careflow_core::dashboard::{ActiveForm, DashboardState};
use careflow_core::model::{ExecutionId, UserSession};

/// UI-ready model for the patient dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub greeting: String,
    pub card: DashboardCardVm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardCardVm {
    NoForms,
    InProgress(ActiveFormVm),
    AllCompleted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveFormVm {
    pub execution_id: ExecutionId,
    pub flow_name: String,
    pub progress_percent: u8,
    pub status_label: &'static str,
    pub steps_label: String,
}

impl ActiveFormVm {
    /// Inline width for the progress bar.
    #[must_use]
    pub fn bar_style(&self) -> String {
        format!("width: {}%", self.progress_percent)
    }
}

impl From<&ActiveForm> for ActiveFormVm {
    fn from(form: &ActiveForm) -> Self {
        let execution = &form.execution;
        Self {
            execution_id: execution.id(),
            flow_name: execution.flow_name().to_owned(),
            progress_percent: form.progress_percent,
            status_label: execution.status().label(),
            steps_label: steps_label(execution.completed_steps(), execution.total_steps()),
        }
    }
}

#[must_use]
pub fn steps_label(completed: u32, total: u32) -> String {
    format!("{completed} of {total} steps")
}

#[must_use]
pub fn greeting(session: Option<&UserSession>) -> String {
    match session.map(UserSession::first_name) {
        Some(name) if !name.is_empty() => format!("Hello, {name}!"),
        _ => "Hello!".to_owned(),
    }
}

#[must_use]
pub fn map_dashboard(session: Option<&UserSession>, state: &DashboardState) -> DashboardVm {
    let card = match state {
        DashboardState::NoForms => DashboardCardVm::NoForms,
        DashboardState::InProgress(form) => DashboardCardVm::InProgress(ActiveFormVm::from(form)),
        DashboardState::AllCompleted => DashboardCardVm::AllCompleted,
    };
    DashboardVm {
        greeting: greeting(session),
        card,
    }
}
