//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by execution sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("execution source is not configured")]
    Disabled,
    #[error("no signed-in user")]
    NoSession,
    #[error("execution source returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to read fixture {path}: {source}")]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid execution payload: {0}")]
    Decode(#[from] serde_json::Error),
}
