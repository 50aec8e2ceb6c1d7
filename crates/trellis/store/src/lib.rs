//! Trellis Store - Per-account resource storage with atomic units of work
//!
//! Every account owns one keyed store of resources (vaults, a manager),
//! a directory of published capabilities, and a table of installed
//! contracts. All mutation happens through a [`UnitOfWork`]: mutations
//! are staged against an overlay and applied in order by `commit()`, or
//! discarded wholesale when the unit is dropped. While a unit is in
//! flight it holds its account's lock, so no other operation on the same
//! account can interleave.
//!
//! ## Invariants
//!
//! - A storage path holds at most one resource; presence is the sole
//!   existence signal.
//! - Publishing at an occupied public path requires unpublishing first.
//! - A contract name installs at most once per account.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod account;
pub mod capability;
pub mod contract;
pub mod error;
pub mod resource;
pub mod unit;

// Re-exports
pub use account::{AccountAccess, AccountHandle, AccountStore};
pub use capability::{Capability, CapabilityAccess, CapabilityTarget};
pub use contract::InstalledContract;
pub use error::{Result, StoreError};
pub use resource::{Manager, Resource, ResourceKind, Vault};
pub use unit::{ManagerRef, UnitOfWork};
