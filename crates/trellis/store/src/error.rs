//! Store error types

use thiserror::Error;
use trellis_types::{AccountAddress, ContractName, PublicPath, StoragePath};

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing storage authority for account {0}")]
    MissingAuthority(AccountAddress),

    #[error("Storage path already occupied: {0}")]
    PathOccupied(StoragePath),

    #[error("No resource at storage path: {0}")]
    ResourceMissing(StoragePath),

    #[error("Capability already published at {0}")]
    CapabilityOccupied(PublicPath),

    #[error("No capability published at {0}")]
    CapabilityMissing(PublicPath),

    #[error("Contract already installed: {0}")]
    ContractExists(ContractName),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
