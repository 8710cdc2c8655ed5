use std::path::{Path, PathBuf};

use async_trait::async_trait;
use careflow_core::model::{FlowExecution, UserId};

use super::ExecutionSource;
use crate::error::SourceError;

/// Reads executions from a JSON file on every fetch.
///
/// The file holds a JSON array of executions. Editing it while the app runs is
/// picked up on the next poll.
#[derive(Clone, Debug)]
pub struct FixtureExecutionSource {
    path: PathBuf,
}

impl FixtureExecutionSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ExecutionSource for FixtureExecutionSource {
    async fn list_for_patient(&self, _user_id: UserId) -> Result<Vec<FlowExecution>, SourceError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Fixture {
                path: self.path.clone(),
                source,
            })?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&raw)?)
    }
}
