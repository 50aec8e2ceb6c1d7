//! Owned resources
//!
//! Resources are non-`Clone` by design: a vault or manager is an owned
//! value that is moved into the store and lives at exactly one storage
//! path, never aliased by value.

use serde::Serialize;
use trellis_types::WorkflowId;

/// An owned balance of one asset type.
#[derive(Debug, Serialize)]
pub struct Vault {
    asset: String,
    balance: u64,
}

impl Vault {
    /// Construct an empty vault for an asset.
    pub fn empty(asset: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            balance: 0,
        }
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }
}

/// Per-account singleton tracking owned workflow instances.
#[derive(Debug, Default, Serialize)]
pub struct Manager {
    workflows: Vec<WorkflowId>,
}

impl Manager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workflows(&self) -> &[WorkflowId] {
        &self.workflows
    }

    pub(crate) fn record(&mut self, id: WorkflowId) {
        self.workflows.push(id);
    }
}

/// A resource instance stored at one storage path.
#[derive(Debug, Serialize)]
pub enum Resource {
    Vault(Vault),
    Manager(Manager),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Vault(_) => ResourceKind::Vault,
            Resource::Manager(_) => ResourceKind::Manager,
        }
    }
}

/// Discriminant of a stored resource, for read-only inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ResourceKind {
    Vault,
    Manager,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vault_has_zero_balance() {
        let vault = Vault::empty("FLOW");
        assert_eq!(vault.asset(), "FLOW");
        assert_eq!(vault.balance(), 0);
    }

    #[test]
    fn manager_starts_with_no_workflows() {
        let mut manager = Manager::new();
        assert!(manager.workflows().is_empty());
        manager.record(WorkflowId(3));
        assert_eq!(manager.workflows(), &[WorkflowId(3)]);
    }
}
