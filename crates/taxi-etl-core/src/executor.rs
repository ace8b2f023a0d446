//! Executor trait and job outcome types.
//!
//! Executors run one job's command to completion and classify the result.
//! The orchestrator only ever sees a [`JobOutcome`]; how the command is
//! actually invoked (shell, fake, container) is behind this seam.

use async_trait::async_trait;

use crate::job::JobDefinition;

/// Outcome of executing one job's command.
///
/// Exit status is the only signal consulted: a command that cannot be
/// started at all reports `Failed`, not a distinct error kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The command exited zero.
    Succeeded,
    /// The command exited non-zero or could not be invoked.
    Failed {
        /// Message identifying which command failed, recorded in the
        /// execution log.
        message: String,
    },
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Succeeded)
    }
}

/// Trait for job executors.
#[async_trait]
pub trait JobExecutor: Send + Sync {
    /// Execute the job's command, blocking until it terminates.
    async fn execute(&self, job: &JobDefinition) -> JobOutcome;
}
