//! Deployment error taxonomy
//!
//! Every variant is fatal to the unit of work that raised it: nothing
//! staged by the failed run is ever applied, so callers may retry the
//! identical invocation. Soft conditions (existing vault, existing
//! manager, declined scheduling) are not errors and never appear here.

use thiserror::Error;
use trellis_registry::RegistryError;
use trellis_scheduler::ScheduleError;
use trellis_store::StoreError;
use trellis_types::{AccountAddress, ContractName, PathError, StoragePath};

/// Errors that abort a deployment run
#[derive(Debug, Error)]
pub enum DeployError {
    // --- Malformed input ---
    #[error("Malformed input: {0}")]
    Path(#[from] PathError),

    #[error("Unknown asset type: {0}")]
    UnknownAssetType(String),

    #[error("Asset type identifier required for non-native asset: {0}")]
    MissingAssetType(String),

    // --- Conflicts ---
    #[error("Contract already installed on {account}: {name}")]
    ContractAlreadyInstalled {
        account: AccountAddress,
        name: ContractName,
    },

    #[error("No manager resource on account {0}")]
    ManagerMissing(AccountAddress),

    #[error("Vault missing at {0} after provisioning")]
    VaultMissing(StoragePath),

    // --- Collaborator failures ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

/// Result type for deployment operations
pub type Result<T> = std::result::Result<T, DeployError>;
