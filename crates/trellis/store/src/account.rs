//! Account handles and the account store

use crate::capability::Capability;
use crate::contract::InstalledContract;
use crate::error::{Result, StoreError};
use crate::resource::{Resource, ResourceKind};
use crate::unit::UnitOfWork;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use trellis_types::{AccountAddress, ContractName, PublicPath, StoragePath, WorkflowId};

/// What a handle is allowed to do with the account's storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountAccess {
    /// Full storage-mutation authority
    Owner,
    /// Read-only; cannot open a unit of work
    Observer,
}

/// A caller's handle on one account.
#[derive(Clone, Debug)]
pub struct AccountHandle {
    address: AccountAddress,
    access: AccountAccess,
}

impl AccountHandle {
    /// Handle with full storage-mutation authority.
    pub fn owner(address: AccountAddress) -> Self {
        Self {
            address,
            access: AccountAccess::Owner,
        }
    }

    /// Read-only handle; opening a unit of work with it fails.
    pub fn observer(address: AccountAddress) -> Self {
        Self {
            address,
            access: AccountAccess::Observer,
        }
    }

    pub fn address(&self) -> &AccountAddress {
        &self.address
    }

    pub fn can_mutate(&self) -> bool {
        self.access == AccountAccess::Owner
    }
}

/// One account's persistent state.
#[derive(Debug, Default)]
pub(crate) struct AccountState {
    pub(crate) resources: HashMap<StoragePath, Resource>,
    pub(crate) published: HashMap<PublicPath, Capability>,
    pub(crate) contracts: HashMap<ContractName, InstalledContract>,
}

/// Keyed storage for all accounts.
///
/// Account state materializes lazily on first use. Each account's state
/// sits behind its own lock; a [`UnitOfWork`] holds that lock for its
/// whole lifetime, so units against the same account serialize.
#[derive(Default)]
pub struct AccountStore {
    accounts: DashMap<AccountAddress, Arc<Mutex<AccountState>>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a unit of work against one account.
    ///
    /// Requires storage-mutation authority on the handle. Blocks while
    /// another unit for the same account is in flight.
    pub fn begin(&self, handle: &AccountHandle) -> Result<UnitOfWork> {
        if !handle.can_mutate() {
            return Err(StoreError::MissingAuthority(handle.address().clone()));
        }
        let cell = self.state_cell(handle.address());
        let guard = cell.lock_arc();
        Ok(UnitOfWork::new(handle.address().clone(), guard))
    }

    fn state_cell(&self, address: &AccountAddress) -> Arc<Mutex<AccountState>> {
        let entry = self.accounts.entry(address.clone()).or_default();
        Arc::clone(entry.value())
    }

    // --- Read accessors ---
    //
    // Each takes the account lock briefly and therefore blocks while a
    // unit of work for the same account is in flight.

    /// Kind of the resource stored at a path, if any.
    pub fn resource_kind(&self, address: &AccountAddress, path: &StoragePath) -> Option<ResourceKind> {
        self.with_state(address, |state| state.resources.get(path).map(Resource::kind))
            .flatten()
    }

    /// Whether any resource exists at a path.
    pub fn resource_exists(&self, address: &AccountAddress, path: &StoragePath) -> bool {
        self.resource_kind(address, path).is_some()
    }

    /// Whether the account's manager resource exists.
    pub fn manager_exists(&self, address: &AccountAddress) -> bool {
        self.resource_kind(address, &StoragePath::manager()) == Some(ResourceKind::Manager)
    }

    /// Workflow ids recorded by the account's manager.
    pub fn manager_workflows(&self, address: &AccountAddress) -> Vec<WorkflowId> {
        self.with_state(address, |state| {
            match state.resources.get(&StoragePath::manager()) {
                Some(Resource::Manager(manager)) => manager.workflows().to_vec(),
                _ => Vec::new(),
            }
        })
        .unwrap_or_default()
    }

    /// The capability published at a public path, if any.
    pub fn published_capability(
        &self,
        address: &AccountAddress,
        path: &PublicPath,
    ) -> Option<Capability> {
        self.with_state(address, |state| state.published.get(path).cloned())
            .flatten()
    }

    /// Number of capabilities the account has published.
    pub fn published_count(&self, address: &AccountAddress) -> usize {
        self.with_state(address, |state| state.published.len())
            .unwrap_or(0)
    }

    /// Number of resources the account owns.
    pub fn resource_count(&self, address: &AccountAddress) -> usize {
        self.with_state(address, |state| state.resources.len())
            .unwrap_or(0)
    }

    /// The contract installed under a name, if any.
    pub fn contract(
        &self,
        address: &AccountAddress,
        name: &ContractName,
    ) -> Option<InstalledContract> {
        self.with_state(address, |state| state.contracts.get(name).cloned())
            .flatten()
    }

    fn with_state<T>(
        &self,
        address: &AccountAddress,
        f: impl FnOnce(&AccountState) -> T,
    ) -> Option<T> {
        let cell = self.accounts.get(address)?.value().clone();
        let state = cell.lock();
        Some(f(&state))
    }
}
