//! Job definitions and run identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A job definition from the registry.
///
/// Definitions are maintained externally (a configuration table) and are
/// read-only to the orchestrator. `job_id` defines execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDefinition {
    /// Unique identifier; batches execute in ascending order of this key.
    pub job_id: i32,
    /// Display label, not used for control flow.
    pub job_name: String,
    /// Opaque shell command handed to the executor.
    pub command: String,
    /// Only active definitions are eligible for execution.
    pub active: bool,
}

/// Identifier for one attempt of a job.
///
/// A UUIDv4 with the hyphens stripped, matching the run identifiers the
/// warehouse tables already hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a new unique run identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for RunId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of a job run as recorded in the execution log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// The attempt has been logged and its command is executing.
    Running,
    /// The command exited zero.
    Succeeded,
    /// The command exited non-zero (or could not be started).
    Failed,
    /// A previously failed run superseded by a resume; transient, the
    /// retry overwrites it with a terminal status once it completes.
    Restarted,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Succeeded | RunStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Running => "Running",
            RunStatus::Succeeded => "Succeeded",
            RunStatus::Failed => "Failed",
            RunStatus::Restarted => "Restarted",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Running" => Ok(RunStatus::Running),
            "Succeeded" => Ok(RunStatus::Succeeded),
            "Failed" => Ok(RunStatus::Failed),
            "Restarted" => Ok(RunStatus::Restarted),
            other => Err(format!("unknown run status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn run_id_has_no_hyphens() {
        let id = RunId::new();
        assert_eq!(id.as_str().len(), 32);
        assert!(!id.as_str().contains('-'));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            RunStatus::Running,
            RunStatus::Succeeded,
            RunStatus::Failed,
            RunStatus::Restarted,
        ] {
            assert_eq!(RunStatus::from_str(status.as_str()), Ok(status));
        }
        assert!(RunStatus::from_str("Queued").is_err());
    }

    #[test]
    fn only_succeeded_and_failed_are_terminal() {
        assert!(RunStatus::Succeeded.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        assert!(!RunStatus::Restarted.is_terminal());
    }
}
