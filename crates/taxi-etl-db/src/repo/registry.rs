//! Job registry repository.
//!
//! The registry is maintained by operators; this subsystem only reads it.

use async_trait::async_trait;
use sqlx::PgPool;
use taxi_etl_core::JobDefinition;

use crate::DbResult;

/// Row shape of the `etl_jobs` registry table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct JobRow {
    job_id: i32,
    job_name: String,
    job_command: String,
    active_flag: bool,
}

impl From<JobRow> for JobDefinition {
    fn from(row: JobRow) -> Self {
        JobDefinition {
            job_id: row.job_id,
            job_name: row.job_name,
            command: row.job_command,
            active: row.active_flag,
        }
    }
}

#[async_trait]
pub trait JobRegistry: Send + Sync {
    /// All active job definitions, ordered by ascending `job_id`.
    async fn list_active(&self) -> DbResult<Vec<JobDefinition>>;

    /// Active definitions with `job_id >= from`, ordered ascending.
    /// Used by resume mode: the failed job and everything after it.
    async fn list_active_from(&self, from: i32) -> DbResult<Vec<JobDefinition>>;
}

/// PostgreSQL implementation of JobRegistry.
pub struct PgJobRegistry {
    pool: PgPool,
}

impl PgJobRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRegistry for PgJobRegistry {
    async fn list_active(&self) -> DbResult<Vec<JobDefinition>> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT job_id, job_name, job_command, active_flag FROM etl_jobs \
             WHERE active_flag = TRUE ORDER BY job_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(JobDefinition::from).collect())
    }

    async fn list_active_from(&self, from: i32) -> DbResult<Vec<JobDefinition>> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT job_id, job_name, job_command, active_flag FROM etl_jobs \
             WHERE active_flag = TRUE AND job_id >= $1 ORDER BY job_id ASC",
        )
        .bind(from)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(JobDefinition::from).collect())
    }
}
