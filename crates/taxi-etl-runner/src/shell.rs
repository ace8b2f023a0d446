//! Shell job executor.
//!
//! Runs each job's command through `sh -c` and classifies the outcome by
//! exit code alone. The child inherits stdout/stderr; the orchestrator
//! does not capture its output.

use std::time::Duration;

use async_trait::async_trait;
use taxi_etl_core::{JobDefinition, JobExecutor, JobOutcome};
use tokio::process::Command;
use tracing::info;

/// Executes job commands as child shell processes.
#[derive(Debug, Default)]
pub struct ShellExecutor {
    /// Upper bound on a single job's wall-clock time. `None` means wait
    /// forever, which matches the original batch behavior.
    timeout: Option<Duration>,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Bound each job's execution time. A job that exceeds the bound is
    /// killed and reported as failed.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

#[async_trait]
impl JobExecutor for ShellExecutor {
    async fn execute(&self, job: &JobDefinition) -> JobOutcome {
        info!(job_id = job.job_id, command = %job.command, "Executing job command");

        let mut child = match Command::new("sh").arg("-c").arg(&job.command).spawn() {
            Ok(child) => child,
            // A command that cannot be started is a job failure, not a
            // distinct error kind: exit status is the only signal.
            Err(e) => {
                return JobOutcome::Failed {
                    message: format!("{} failed: {e}", job.command),
                };
            }
        };

        let status = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    let _ = child.kill().await;
                    return JobOutcome::Failed {
                        message: format!("{} failed: timed out after {limit:?}", job.command),
                    };
                }
            },
            None => child.wait().await,
        };

        match status {
            Ok(status) if status.success() => JobOutcome::Succeeded,
            Ok(_) => JobOutcome::Failed {
                message: format!("{} failed", job.command),
            },
            Err(e) => JobOutcome::Failed {
                message: format!("{} failed: {e}", job.command),
            },
        }
    }
}
