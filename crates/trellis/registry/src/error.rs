//! Registry error types

use thiserror::Error;
use trellis_types::WorkflowId;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Workflow record not found: {0}")]
    RecordNotFound(WorkflowId),

    #[error("Workflow record already exists: {0}")]
    RecordAlreadyExists(WorkflowId),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
