//! Manager bootstrap
//!
//! Every workflow operation on an account requires the per-account
//! manager resource. Bootstrap is idempotent: the first call creates the
//! manager and publishes its public capability, every later call finds
//! it in place and touches nothing.

use crate::error::{DeployError, Result};
use tracing::{debug, info};
use trellis_store::{
    Capability, CapabilityAccess, CapabilityTarget, Manager, ManagerRef, Resource, UnitOfWork,
};
use trellis_types::{PublicPath, StoragePath};

/// Ensure the account's manager resource exists, creating it on first
/// use, and return a reference usable by later steps of the same unit.
pub fn ensure_manager(unit: &mut UnitOfWork) -> Result<ManagerRef> {
    let storage = StoragePath::manager();

    if unit.resource_exists(&storage) {
        debug!(account = %unit.account(), "manager already initialized");
    } else {
        unit.save_resource(storage.clone(), Resource::Manager(Manager::new()))?;
        let capability =
            Capability::issue(storage, CapabilityTarget::Manager, CapabilityAccess::Public);
        unit.publish(PublicPath::manager(), capability)?;
        info!(account = %unit.account(), "manager initialized");
    }

    unit.manager_ref()
        .map_err(|_| DeployError::ManagerMissing(unit.account().clone()))
}
