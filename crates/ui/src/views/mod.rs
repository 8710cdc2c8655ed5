mod dashboard;
mod flow_execution;
mod my_flows;
mod state;

#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use flow_execution::FlowExecutionView;
pub use my_flows::MyFlowsView;
pub use state::{ViewError, ViewState, is_loading, view_state_from_resource};
