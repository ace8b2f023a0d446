//! Batch orchestrator - executes registry jobs in ascending job_id order.

use std::sync::Arc;

use chrono::Utc;
use taxi_etl_core::{Error, JobDefinition, JobExecutor, JobOutcome, Result, RunId, RunStatus};
use taxi_etl_db::{DbError, ExecutionLog, JobRegistry};
use tracing::{error, info, warn};

/// How a batch is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Run every active job from the top of the registry.
    New,
    /// Re-run starting at the most recently failed job, reusing its run
    /// identifier.
    Restart,
}

/// One attempted job run, as seen by the caller.
#[derive(Debug, Clone)]
pub struct JobRunReport {
    pub job_id: i32,
    pub job_name: String,
    pub run_id: RunId,
    pub status: RunStatus,
}

/// Result of a batch execution.
#[derive(Debug)]
pub struct BatchOutcome {
    /// False when the batch hard-halted on a job failure.
    pub completed: bool,
    /// Runs attempted, in execution order.
    pub runs: Vec<JobRunReport>,
}

/// Orchestrates one batch over the job registry.
///
/// Jobs execute strictly one at a time; each job is assumed to depend on
/// every job before it having succeeded, so the first failure halts the
/// batch with later jobs unattempted.
pub struct Orchestrator {
    registry: Arc<dyn JobRegistry>,
    log: Arc<dyn ExecutionLog>,
    executor: Arc<dyn JobExecutor>,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<dyn JobRegistry>,
        log: Arc<dyn ExecutionLog>,
        executor: Arc<dyn JobExecutor>,
    ) -> Self {
        Self {
            registry,
            log,
            executor,
        }
    }

    /// Execute one batch in the given mode.
    pub async fn run(&self, mode: RunMode) -> Result<BatchOutcome> {
        match mode {
            RunMode::New => self.run_new().await,
            RunMode::Restart => self.run_restart().await,
        }
    }

    async fn run_new(&self) -> Result<BatchOutcome> {
        let jobs = self.registry.list_active().await.map_err(data_access)?;
        info!(jobs = jobs.len(), "Starting fresh batch");

        let mut runs = Vec::new();
        for job in &jobs {
            let run_id = RunId::new();
            self.log
                .insert_running(job.job_id, &run_id, Utc::now())
                .await
                .map_err(data_access)?;

            if self.execute_one(job, run_id, &mut runs).await? {
                return Ok(BatchOutcome {
                    completed: false,
                    runs,
                });
            }
        }

        info!(runs = runs.len(), "Batch completed");
        Ok(BatchOutcome {
            completed: true,
            runs,
        })
    }

    async fn run_restart(&self) -> Result<BatchOutcome> {
        let failed = self
            .log
            .last_failed()
            .await
            .map_err(data_access)?
            .ok_or(Error::NoFailedRun)?;
        info!(
            job_id = failed.job_id,
            job_run_id = %failed.job_run_id,
            "Resuming from last failed job"
        );

        let jobs = self
            .registry
            .list_active_from(failed.job_id)
            .await
            .map_err(data_access)?;

        let mut runs = Vec::new();
        for job in &jobs {
            let run_id = if job.job_id == failed.job_id {
                // The retry supersedes the failed attempt in place: same
                // run row, error cleared, marked Restarted until the
                // command completes and the normal terminal update lands.
                let run_id = RunId::from(failed.job_run_id.clone());
                self.log
                    .mark_restarted(job.job_id, &run_id, Utc::now())
                    .await
                    .map_err(data_access)?;
                run_id
            } else {
                let run_id = RunId::new();
                self.log
                    .insert_running(job.job_id, &run_id, Utc::now())
                    .await
                    .map_err(data_access)?;
                run_id
            };

            if self.execute_one(job, run_id, &mut runs).await? {
                return Ok(BatchOutcome {
                    completed: false,
                    runs,
                });
            }
        }

        info!(runs = runs.len(), "Resumed batch completed");
        Ok(BatchOutcome {
            completed: true,
            runs,
        })
    }

    /// Run one job and record its terminal status. Returns true when the
    /// batch must halt.
    async fn execute_one(
        &self,
        job: &JobDefinition,
        run_id: RunId,
        runs: &mut Vec<JobRunReport>,
    ) -> Result<bool> {
        match self.executor.execute(job).await {
            JobOutcome::Succeeded => {
                self.log
                    .mark_succeeded(job.job_id, &run_id, Utc::now())
                    .await
                    .map_err(data_access)?;
                info!(job_id = job.job_id, job_name = %job.job_name, "Job succeeded");
                runs.push(JobRunReport {
                    job_id: job.job_id,
                    job_name: job.job_name.clone(),
                    run_id,
                    status: RunStatus::Succeeded,
                });
                Ok(false)
            }
            JobOutcome::Failed { message } => {
                self.log
                    .mark_failed(job.job_id, &run_id, &message, Utc::now())
                    .await
                    .map_err(data_access)?;
                error!(job_id = job.job_id, job_name = %job.job_name, %message, "Job failed");
                warn!("Halting batch; remaining jobs will not be attempted");
                runs.push(JobRunReport {
                    job_id: job.job_id,
                    job_name: job.job_name.clone(),
                    run_id,
                    status: RunStatus::Failed,
                });
                Ok(true)
            }
        }
    }
}

fn data_access(e: DbError) -> Error {
    error!(error = %e, "Data access failed");
    Error::DataAccess(e.to_string())
}
