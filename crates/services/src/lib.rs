#![forbid(unsafe_code)]

pub mod access;
pub mod error;
pub mod flow_service;
pub mod poll;
pub mod sources;

pub use careflow_core::Clock;

pub use access::{AccessChecker, DenyAll, RoleAccess};
pub use error::SourceError;
pub use flow_service::PatientFlowService;
pub use poll::{DASHBOARD_POLL_INTERVAL, poll_every};
pub use sources::{
    ExecutionSource, FixtureExecutionSource, HttpExecutionSource, HttpSourceConfig,
    InMemoryExecutionSource,
};
