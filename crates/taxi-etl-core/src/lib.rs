//! Core domain types and traits for the taxi-dispatch ETL orchestrator.
//!
//! This crate contains:
//! - Job definitions and run identifiers
//! - The run-status state machine
//! - The executor trait (the seam between orchestration and job execution)

pub mod error;
pub mod executor;
pub mod job;

pub use error::{Error, Result};
pub use executor::{JobExecutor, JobOutcome};
pub use job::{JobDefinition, RunId, RunStatus};
