//! Atomic units of work
//!
//! A unit stages every mutation into a transaction log validated against
//! an overlay (staged operations shadow the locked base state). `commit`
//! applies the log in order and cannot fail; dropping the unit instead
//! discards the whole log. The unit owns its account's lock from `begin`
//! to commit/drop, so nothing interleaves with it.

use crate::account::AccountState;
use crate::capability::Capability;
use crate::contract::InstalledContract;
use crate::error::{Result, StoreError};
use crate::resource::{Resource, ResourceKind};
use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::RawMutex;
use tracing::debug;
use trellis_types::{AccountAddress, ContractName, PublicPath, StoragePath, WorkflowId};

/// A reference to an account's manager resource, valid for the duration
/// of the unit of work that produced it.
#[derive(Clone, Debug)]
pub struct ManagerRef {
    account: AccountAddress,
    path: StoragePath,
}

impl ManagerRef {
    pub fn account(&self) -> &AccountAddress {
        &self.account
    }

    pub fn path(&self) -> &StoragePath {
        &self.path
    }
}

enum StagedOp {
    SaveResource {
        path: StoragePath,
        resource: Resource,
    },
    Publish {
        path: PublicPath,
        capability: Capability,
    },
    Unpublish {
        path: PublicPath,
    },
    InstallContract {
        contract: InstalledContract,
    },
    RecordWorkflow {
        id: WorkflowId,
    },
}

/// An open transaction against one account's state.
pub struct UnitOfWork {
    account: AccountAddress,
    guard: ArcMutexGuard<RawMutex, AccountState>,
    ops: Vec<StagedOp>,
    committed: bool,
}

impl UnitOfWork {
    pub(crate) fn new(
        account: AccountAddress,
        guard: ArcMutexGuard<RawMutex, AccountState>,
    ) -> Self {
        Self {
            account,
            guard,
            ops: Vec::new(),
            committed: false,
        }
    }

    pub fn account(&self) -> &AccountAddress {
        &self.account
    }

    // --- Overlay reads: staged operations shadow the base state ---

    /// Kind of the resource at a path, staged or already stored.
    pub fn resource_kind(&self, path: &StoragePath) -> Option<ResourceKind> {
        for op in self.ops.iter().rev() {
            if let StagedOp::SaveResource { path: staged, resource } = op {
                if staged == path {
                    return Some(resource.kind());
                }
            }
        }
        self.guard.resources.get(path).map(Resource::kind)
    }

    /// Whether any resource exists at a path.
    pub fn resource_exists(&self, path: &StoragePath) -> bool {
        self.resource_kind(path).is_some()
    }

    /// The capability currently visible at a public path.
    pub fn capability_at(&self, path: &PublicPath) -> Option<&Capability> {
        for op in self.ops.iter().rev() {
            match op {
                StagedOp::Publish { path: staged, capability } if staged == path => {
                    return Some(capability);
                }
                StagedOp::Unpublish { path: staged } if staged == path => return None,
                _ => {}
            }
        }
        self.guard.published.get(path)
    }

    /// Whether a contract is installed under a name, staged or stored.
    pub fn contract_installed(&self, name: &ContractName) -> bool {
        self.ops.iter().any(|op| {
            matches!(op, StagedOp::InstallContract { contract } if &contract.name == name)
        }) || self.guard.contracts.contains_key(name)
    }

    /// A reference to the manager resource, if one exists.
    pub fn manager_ref(&self) -> Result<ManagerRef> {
        let path = StoragePath::manager();
        match self.resource_kind(&path) {
            Some(ResourceKind::Manager) => Ok(ManagerRef {
                account: self.account.clone(),
                path,
            }),
            _ => Err(StoreError::ResourceMissing(path)),
        }
    }

    // --- Staged mutations ---

    /// Stage saving a resource at a path. The path must be vacant.
    pub fn save_resource(&mut self, path: StoragePath, resource: Resource) -> Result<()> {
        if self.resource_exists(&path) {
            return Err(StoreError::PathOccupied(path));
        }
        self.ops.push(StagedOp::SaveResource { path, resource });
        Ok(())
    }

    /// Stage publishing a capability. The public path must be vacant;
    /// republication requires an explicit unpublish first.
    pub fn publish(&mut self, path: PublicPath, capability: Capability) -> Result<()> {
        if self.capability_at(&path).is_some() {
            return Err(StoreError::CapabilityOccupied(path));
        }
        self.ops.push(StagedOp::Publish { path, capability });
        Ok(())
    }

    /// Stage removing the capability at a public path.
    pub fn unpublish(&mut self, path: &PublicPath) -> Result<()> {
        if self.capability_at(path).is_none() {
            return Err(StoreError::CapabilityMissing(path.clone()));
        }
        self.ops.push(StagedOp::Unpublish { path: path.clone() });
        Ok(())
    }

    /// Stage installing a contract. The name must not already be taken.
    pub fn install_contract(&mut self, contract: InstalledContract) -> Result<()> {
        if self.contract_installed(&contract.name) {
            return Err(StoreError::ContractExists(contract.name.clone()));
        }
        self.ops.push(StagedOp::InstallContract { contract });
        Ok(())
    }

    /// Stage recording a workflow id in the manager's registry.
    pub fn record_workflow(&mut self, id: WorkflowId) -> Result<()> {
        self.manager_ref()?;
        self.ops.push(StagedOp::RecordWorkflow { id });
        Ok(())
    }

    /// Apply every staged operation, in order.
    ///
    /// Infallible: all validation happened at staging time, and the unit
    /// has held the account lock since `begin`.
    pub fn commit(mut self) {
        let ops = std::mem::take(&mut self.ops);
        let count = ops.len();
        for op in ops {
            match op {
                StagedOp::SaveResource { path, resource } => {
                    self.guard.resources.insert(path, resource);
                }
                StagedOp::Publish { path, capability } => {
                    self.guard.published.insert(path, capability);
                }
                StagedOp::Unpublish { path } => {
                    self.guard.published.remove(&path);
                }
                StagedOp::InstallContract { contract } => {
                    self.guard.contracts.insert(contract.name.clone(), contract);
                }
                StagedOp::RecordWorkflow { id } => {
                    if let Some(Resource::Manager(manager)) =
                        self.guard.resources.get_mut(&StoragePath::manager())
                    {
                        manager.record(id);
                    }
                }
            }
        }
        self.committed = true;
        debug!(account = %self.account, applied = count, "unit of work committed");
    }
}

impl std::fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitOfWork")
            .field("account", &self.account)
            .field("staged", &self.ops.len())
            .field("committed", &self.committed)
            .finish_non_exhaustive()
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        if !self.committed && !self.ops.is_empty() {
            debug!(
                account = %self.account,
                staged = self.ops.len(),
                "unit of work discarded; staged effects dropped"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountHandle, AccountStore};
    use crate::capability::{CapabilityAccess, CapabilityTarget};
    use crate::resource::{Manager, Vault};
    use trellis_types::AccountAddress;

    fn store_and_unit() -> (AccountStore, AccountHandle) {
        let store = AccountStore::new();
        let handle = AccountHandle::owner(AccountAddress::new("0x01"));
        (store, handle)
    }

    fn vault_path() -> StoragePath {
        StoragePath::parse("flowTokenVault").unwrap()
    }

    #[test]
    fn staged_save_shadows_base_state() {
        let (store, handle) = store_and_unit();
        let mut unit = store.begin(&handle).unwrap();
        assert!(!unit.resource_exists(&vault_path()));
        unit.save_resource(vault_path(), Resource::Vault(Vault::empty("FLOW")))
            .unwrap();
        assert!(unit.resource_exists(&vault_path()));
    }

    #[test]
    fn double_save_at_one_path_is_rejected() {
        let (store, handle) = store_and_unit();
        let mut unit = store.begin(&handle).unwrap();
        unit.save_resource(vault_path(), Resource::Vault(Vault::empty("FLOW")))
            .unwrap();
        let err = unit
            .save_resource(vault_path(), Resource::Vault(Vault::empty("FLOW")))
            .unwrap_err();
        assert!(matches!(err, StoreError::PathOccupied(_)));
    }

    #[test]
    fn publish_requires_vacant_path() {
        let (store, handle) = store_and_unit();
        let mut unit = store.begin(&handle).unwrap();
        let public = PublicPath::parse("flowReceiver").unwrap();
        let cap = Capability::issue(vault_path(), CapabilityTarget::Vault, CapabilityAccess::Public);
        unit.publish(public.clone(), cap.clone()).unwrap();
        let err = unit.publish(public.clone(), cap).unwrap_err();
        assert!(matches!(err, StoreError::CapabilityOccupied(_)));
    }

    #[test]
    fn unpublish_then_publish_replaces() {
        let (store, handle) = store_and_unit();
        let public = PublicPath::parse("flowReceiver").unwrap();

        let mut unit = store.begin(&handle).unwrap();
        let first =
            Capability::issue(vault_path(), CapabilityTarget::Vault, CapabilityAccess::Public);
        let first_id = first.id;
        unit.publish(public.clone(), first).unwrap();
        unit.commit();

        let mut unit = store.begin(&handle).unwrap();
        unit.unpublish(&public).unwrap();
        let second =
            Capability::issue(vault_path(), CapabilityTarget::Vault, CapabilityAccess::Public);
        let second_id = second.id;
        unit.publish(public.clone(), second).unwrap();
        unit.commit();

        let published = store
            .published_capability(handle.address(), &public)
            .unwrap();
        assert_eq!(published.id, second_id);
        assert_ne!(published.id, first_id);
        assert_eq!(store.published_count(handle.address()), 1);
    }

    #[test]
    fn unpublish_of_vacant_path_is_an_error() {
        let (store, handle) = store_and_unit();
        let mut unit = store.begin(&handle).unwrap();
        let public = PublicPath::parse("flowReceiver").unwrap();
        let err = unit.unpublish(&public).unwrap_err();
        assert!(matches!(err, StoreError::CapabilityMissing(_)));
    }

    #[test]
    fn contract_installs_once() {
        let (store, handle) = store_and_unit();
        let name = ContractName::new("WF1");

        let mut unit = store.begin(&handle).unwrap();
        unit.install_contract(InstalledContract::new(name.clone(), b"code".as_slice()))
            .unwrap();
        unit.commit();

        let mut unit = store.begin(&handle).unwrap();
        let err = unit
            .install_contract(InstalledContract::new(name.clone(), b"other".as_slice()))
            .unwrap_err();
        assert!(matches!(err, StoreError::ContractExists(_)));
        drop(unit);

        // first installation untouched
        let installed = store.contract(handle.address(), &name).unwrap();
        assert_eq!(installed.code, b"code");
    }

    #[test]
    fn staged_contract_is_visible_within_the_unit() {
        let (store, handle) = store_and_unit();
        let name = ContractName::new("WF1");
        let mut unit = store.begin(&handle).unwrap();
        unit.install_contract(InstalledContract::new(name.clone(), b"code".as_slice()))
            .unwrap();
        assert!(unit.contract_installed(&name));
    }

    #[test]
    fn record_workflow_requires_a_manager() {
        let (store, handle) = store_and_unit();
        let mut unit = store.begin(&handle).unwrap();
        let err = unit.record_workflow(WorkflowId(1)).unwrap_err();
        assert!(matches!(err, StoreError::ResourceMissing(_)));

        unit.save_resource(StoragePath::manager(), Resource::Manager(Manager::new()))
            .unwrap();
        unit.record_workflow(WorkflowId(1)).unwrap();
        unit.commit();

        assert_eq!(store.manager_workflows(handle.address()), vec![WorkflowId(1)]);
    }
}
