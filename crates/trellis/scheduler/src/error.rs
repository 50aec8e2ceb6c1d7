//! Scheduler error types

use thiserror::Error;
use trellis_types::WorkflowId;

/// Scheduler errors
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Workflow already enrolled: {0}")]
    AlreadyEnrolled(WorkflowId),

    #[error("Workflow not enrolled: {0}")]
    NotEnrolled(WorkflowId),

    #[error("Recurrence interval must be positive")]
    InvalidInterval,
}

/// Result type for scheduler operations
pub type Result<T> = std::result::Result<T, ScheduleError>;
