use std::sync::Arc;
use std::time::Duration;

use careflow_core::model::UserSession;
use services::{AccessChecker, DASHBOARD_POLL_INTERVAL, PatientFlowService};

/// What the composition root must provide for the portal views.
pub trait UiApp: Send + Sync {
    fn session(&self) -> Option<UserSession>;
    fn access(&self) -> Arc<dyn AccessChecker>;
    fn flows(&self) -> Arc<PatientFlowService>;

    fn poll_interval(&self) -> Duration {
        DASHBOARD_POLL_INTERVAL
    }
}

#[derive(Clone)]
pub struct AppContext {
    session: Option<UserSession>,
    access: Arc<dyn AccessChecker>,
    flows: Arc<PatientFlowService>,
    poll_interval: Duration,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            access: app.access(),
            flows: app.flows(),
            poll_interval: app.poll_interval(),
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<UserSession> {
        self.session.clone()
    }

    #[must_use]
    pub fn access(&self) -> Arc<dyn AccessChecker> {
        Arc::clone(&self.access)
    }

    #[must_use]
    pub fn flows(&self) -> Arc<PatientFlowService> {
        Arc::clone(&self.flows)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
