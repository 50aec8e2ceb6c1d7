//! Trellis Types - Core types for per-account workflow provisioning
//!
//! Trellis provisions a user's on-chain resources for a new workflow in a
//! single atomic unit of work: manager bootstrap, contract install, vault
//! provisioning, registry record, optional schedule enrollment.
//!
//! ## Key Concepts
//!
//! - **AccountAddress**: the provisioning scope; every account owns one
//!   resource store
//! - **StoragePath / PublicPath**: validated logical addresses for owned
//!   resources and published capabilities
//! - **WorkflowRecord**: the registry entry correlating an installed
//!   contract with metadata and a unique identifier
//! - **ScheduleEnrollment**: optional recurring-execution registration

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod ids;
pub mod path;
pub mod record;
pub mod schedule;

// Re-export main types
pub use ids::{AccountAddress, ContractName, WorkflowId};
pub use path::{PathError, PublicPath, StoragePath, MANAGER_PUBLIC_ID, MANAGER_STORAGE_ID};
pub use record::{WorkflowAttributes, WorkflowRecord};
pub use schedule::ScheduleEnrollment;
