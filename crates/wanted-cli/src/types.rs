//! Result types shown to the user.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// How a fan-out operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// No errors at all.
    Completed,
    /// Finished, but some items failed.
    Degraded,
    /// Stopped by a fatal error.
    Aborted,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Completed => "completed",
            Outcome::Degraded => "degraded",
            Outcome::Aborted => "aborted",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportedError {
    pub message: String,
    pub recoverable: bool,
}

/// Everything an operation's error stream produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationReport {
    pub operation: String,
    pub target: String,
    pub outcome: Outcome,
    pub errors: Vec<ReportedError>,
    pub finished_at: DateTime<Utc>,
}

impl OperationReport {
    pub fn new(operation: &str, target: &str, errors: Vec<ReportedError>) -> Self {
        let outcome = if errors.iter().any(|e| !e.recoverable) {
            Outcome::Aborted
        } else if errors.is_empty() {
            Outcome::Completed
        } else {
            Outcome::Degraded
        };

        Self {
            operation: operation.to_string(),
            target: target.to_string(),
            outcome,
            errors,
            finished_at: Utc::now(),
        }
    }
}
