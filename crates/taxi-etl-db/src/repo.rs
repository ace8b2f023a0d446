//! Repository traits and implementations.

pub mod execution_log;
pub mod registry;

pub use execution_log::{ExecutionLog, FailedRun, PgExecutionLog};
pub use registry::{JobRegistry, PgJobRegistry};
