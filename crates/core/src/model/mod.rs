mod execution;
mod ids;
mod session;

pub use execution::{ExecutionStatus, FlowExecution, clamp_progress};
pub use ids::{ExecutionId, ParseIdError, UserId};
pub use session::{Role, UnknownRole, UserSession};
