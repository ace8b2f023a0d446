//! Error types for the ETL orchestrator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Restart mode was requested but the execution log holds no
    /// `Failed` row to resume from.
    #[error("no failed run to restart from")]
    NoFailedRun,

    /// The job registry or execution log was unreachable or rejected an
    /// operation. Not retried; surfaces to the caller.
    #[error("data access failed: {0}")]
    DataAccess(String),
}

pub type Result<T> = std::result::Result<T, Error>;
