mod dashboard_vm;
mod execution_vm;
mod time_fmt;

pub use dashboard_vm::{ActiveFormVm, DashboardCardVm, DashboardVm, greeting, map_dashboard};
pub use execution_vm::{
    ExecutionDetailVm, ExecutionRowVm, map_execution_detail, map_execution_rows,
};
