mod fixture;
mod http;
mod memory;

use async_trait::async_trait;
use careflow_core::model::{FlowExecution, UserId};

use crate::error::SourceError;

pub use fixture::FixtureExecutionSource;
pub use http::{HttpExecutionSource, HttpSourceConfig};
pub use memory::InMemoryExecutionSource;

/// Provider contract for a patient's workflow executions.
///
/// Implementations return executions in the provider's own order; callers must not
/// re-sort them.
#[async_trait]
pub trait ExecutionSource: Send + Sync {
    /// Fetch every execution assigned to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the backing store cannot be reached or decoded.
    async fn list_for_patient(&self, user_id: UserId) -> Result<Vec<FlowExecution>, SourceError>;
}
