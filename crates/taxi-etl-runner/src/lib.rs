//! Batch orchestration for the taxi-dispatch ETL pipeline.
//!
//! Drives the job registry through the shell executor in strict `job_id`
//! order, recording every attempt in the execution log. The batch
//! hard-halts on the first failure; operators resume with restart mode.

pub mod orchestrator;
pub mod shell;

pub use orchestrator::{BatchOutcome, JobRunReport, Orchestrator, RunMode};
pub use shell::ShellExecutor;
