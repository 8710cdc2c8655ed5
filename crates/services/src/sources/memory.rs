use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use careflow_core::model::{FlowExecution, UserId};

use super::ExecutionSource;
use crate::error::SourceError;

/// In-memory execution source for tests and prototyping.
///
/// Every patient sees the same list. Clones share state, so a test can mutate the
/// list between polls.
#[derive(Clone, Default)]
pub struct InMemoryExecutionSource {
    executions: Arc<Mutex<Vec<FlowExecution>>>,
    fail_next: Arc<Mutex<bool>>,
    fetches: Arc<AtomicUsize>,
}

impl InMemoryExecutionSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_executions(executions: Vec<FlowExecution>) -> Self {
        let source = Self::new();
        source.replace(executions);
        source
    }

    pub fn replace(&self, executions: Vec<FlowExecution>) {
        let mut guard = self
            .executions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = executions;
    }

    /// Make the next fetch fail once with `SourceError::Disabled`.
    pub fn fail_next(&self) {
        let mut guard = self
            .fail_next
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = true;
    }

    /// Number of `list_for_patient` calls so far, failed ones included.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExecutionSource for InMemoryExecutionSource {
    async fn list_for_patient(&self, _user_id: UserId) -> Result<Vec<FlowExecution>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        {
            let mut fail = self
                .fail_next
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if std::mem::take(&mut *fail) {
                return Err(SourceError::Disabled);
            }
        }

        let guard = self
            .executions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.clone())
    }
}
