//! Trellis Provision - Atomic per-account workflow deployment
//!
//! The deployment orchestrator provisions everything a new workflow
//! needs on its account in one unit of work:
//!
//! ```text
//! Start -> ManagerReady -> ContractInstalled -> VaultsReady
//!       -> Registered -> Scheduled | Unscheduled -> Done
//! ```
//!
//! Either the run reaches `Done` and every effect is applied, or it
//! aborts and no effect of the run is observable afterwards. Re-running
//! an aborted or interrupted deployment is safe: manager bootstrap and
//! vault provisioning are idempotent, and the only hard conflict is an
//! already-installed contract name.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod bootstrap;
pub mod error;
pub mod installer;
pub mod orchestrator;
pub mod vaults;

// Re-exports
pub use error::{DeployError, Result};
pub use orchestrator::{
    DeployMode, DeployOrchestrator, DeployPhase, DeployRequest, OrchestratorConfig,
};
pub use vaults::{AssetCatalog, VaultProvisioner, VaultSetup};
