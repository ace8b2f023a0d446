//! Execution log repository.
//!
//! One row per job-run attempt, keyed by `(job_id, job_run_id)`. Rows are
//! inserted as `Running` and updated in place to a terminal status; this
//! subsystem never deletes them. Timestamps are supplied by the caller so
//! the log reflects the orchestrator's clock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use taxi_etl_core::{RunId, RunStatus};

use crate::DbResult;

/// The resume point: the most recently failed run.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FailedRun {
    pub job_id: i32,
    pub job_run_id: String,
}

#[async_trait]
pub trait ExecutionLog: Send + Sync {
    /// Insert a new `Running` row for an attempt that is about to
    /// execute. `start_time` and `last_updated_time` are set to `now`;
    /// `end_time` and `error_message` start NULL.
    async fn insert_running(&self, job_id: i32, run_id: &RunId, now: DateTime<Utc>)
    -> DbResult<()>;

    /// Mark an attempt `Succeeded`, setting its end time.
    async fn mark_succeeded(&self, job_id: i32, run_id: &RunId, now: DateTime<Utc>)
    -> DbResult<()>;

    /// Mark an attempt `Failed` with an error message. The end time is
    /// left untouched.
    async fn mark_failed(
        &self,
        job_id: i32,
        run_id: &RunId,
        error_message: &str,
        now: DateTime<Utc>,
    ) -> DbResult<()>;

    /// Mark a previously failed attempt `Restarted`, clearing its error
    /// message. Applied to the existing row at the start of a resume.
    async fn mark_restarted(&self, job_id: i32, run_id: &RunId, now: DateTime<Utc>)
    -> DbResult<()>;

    /// The single most-recently-updated `Failed` row, if any.
    async fn last_failed(&self) -> DbResult<Option<FailedRun>>;
}

/// PostgreSQL implementation of ExecutionLog.
pub struct PgExecutionLog {
    pool: PgPool,
}

impl PgExecutionLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExecutionLog for PgExecutionLog {
    async fn insert_running(
        &self,
        job_id: i32,
        run_id: &RunId,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO etl_job_runs (job_id, job_run_id, start_time, end_time, status, error_message, last_updated_time)
            VALUES ($1, $2, $3, NULL, $4, NULL, $3)
            "#,
        )
        .bind(job_id)
        .bind(run_id.as_str())
        .bind(now)
        .bind(RunStatus::Running.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_succeeded(
        &self,
        job_id: i32,
        run_id: &RunId,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE etl_job_runs
            SET end_time = $3, status = $4, last_updated_time = $3
            WHERE job_id = $1 AND job_run_id = $2
            "#,
        )
        .bind(job_id)
        .bind(run_id.as_str())
        .bind(now)
        .bind(RunStatus::Succeeded.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_failed(
        &self,
        job_id: i32,
        run_id: &RunId,
        error_message: &str,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE etl_job_runs
            SET status = $3, error_message = $4, last_updated_time = $5
            WHERE job_id = $1 AND job_run_id = $2
            "#,
        )
        .bind(job_id)
        .bind(run_id.as_str())
        .bind(RunStatus::Failed.as_str())
        .bind(error_message)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_restarted(
        &self,
        job_id: i32,
        run_id: &RunId,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE etl_job_runs
            SET end_time = $3, status = $4, error_message = NULL, last_updated_time = $3
            WHERE job_id = $1 AND job_run_id = $2
            "#,
        )
        .bind(job_id)
        .bind(run_id.as_str())
        .bind(now)
        .bind(RunStatus::Restarted.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn last_failed(&self) -> DbResult<Option<FailedRun>> {
        let row = sqlx::query_as::<_, FailedRun>(
            r#"
            SELECT job_id, job_run_id FROM etl_job_runs
            WHERE status = $1
            ORDER BY last_updated_time DESC
            LIMIT 1
            "#,
        )
        .bind(RunStatus::Failed.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
