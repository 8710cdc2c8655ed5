use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::ExecutionId;

/// Lifecycle status of a workflow execution as reported by the provider.
///
/// Only `InProgress` and `Completed` drive dashboard decisions; anything the
/// provider adds later round-trips through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExecutionStatus {
    InProgress,
    Completed,
    Paused,
    Other(String),
}

impl ExecutionStatus {
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::InProgress => "em-andamento",
            Self::Completed => "concluido",
            Self::Paused => "pausado",
            Self::Other(raw) => raw,
        }
    }

    /// Short label for the status pill on execution cards.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Paused | Self::Other(_) => "Paused",
        }
    }
}

impl From<String> for ExecutionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "em-andamento" | "in-progress" => Self::InProgress,
            "concluido" | "completed" => Self::Completed,
            "pausado" | "paused" => Self::Paused,
            _ => Self::Other(raw),
        }
    }
}

impl From<ExecutionStatus> for String {
    fn from(status: ExecutionStatus) -> Self {
        match status {
            ExecutionStatus::Other(raw) => raw,
            known => known.as_wire().to_owned(),
        }
    }
}

/// One run of a multi-step form assigned to a patient.
///
/// Owned by the execution provider; the portal only reads snapshots of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowExecution {
    id: ExecutionId,
    #[serde(default)]
    flow_name: String,
    status: ExecutionStatus,
    #[serde(default)]
    current_step: Option<Value>,
    #[serde(default)]
    next_step_available_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "progresso")]
    progress: f64,
    #[serde(default)]
    completed_steps: u32,
    #[serde(default)]
    total_steps: u32,
}

impl FlowExecution {
    #[must_use]
    pub fn new(id: ExecutionId, flow_name: impl Into<String>, status: ExecutionStatus) -> Self {
        Self {
            id,
            flow_name: flow_name.into(),
            status,
            current_step: None,
            next_step_available_at: None,
            progress: 0.0,
            completed_steps: 0,
            total_steps: 0,
        }
    }

    #[must_use]
    pub fn with_current_step(mut self, step: Value) -> Self {
        self.current_step = Some(step);
        self
    }

    #[must_use]
    pub fn with_next_step_available_at(mut self, at: DateTime<Utc>) -> Self {
        self.next_step_available_at = Some(at);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn with_steps(mut self, completed: u32, total: u32) -> Self {
        self.completed_steps = completed;
        self.total_steps = total;
        self
    }

    #[must_use]
    pub fn id(&self) -> ExecutionId {
        self.id
    }

    #[must_use]
    pub fn flow_name(&self) -> &str {
        &self.flow_name
    }

    #[must_use]
    pub fn status(&self) -> &ExecutionStatus {
        &self.status
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&Value> {
        self.current_step.as_ref()
    }

    /// True when the current step is a structured value (object or array).
    ///
    /// The step's content is never inspected.
    #[must_use]
    pub fn has_current_step(&self) -> bool {
        matches!(self.current_step, Some(Value::Object(_) | Value::Array(_)))
    }

    #[must_use]
    pub fn next_step_available_at(&self) -> Option<DateTime<Utc>> {
        self.next_step_available_at
    }

    /// True while a future-dated availability timestamp holds the next step back.
    #[must_use]
    pub fn is_delayed(&self, now: DateTime<Utc>) -> bool {
        self.next_step_available_at.is_some_and(|at| at > now)
    }

    /// Raw progress as reported; not guaranteed to lie in `[0, 100]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn completed_steps(&self) -> u32 {
        self.completed_steps
    }

    #[must_use]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }
}

/// Clamp a raw progress value into a displayable whole percentage.
#[must_use]
pub fn clamp_progress(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = raw.clamp(0.0, 100.0).round() as u8;
    clamped
}
