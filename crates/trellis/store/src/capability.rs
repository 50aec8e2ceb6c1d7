//! Published capabilities
//!
//! A capability is a typed, access-scoped reference to a stored
//! resource. It lives in the account's published directory, keyed by
//! public path, distinct from the owning store itself.

use serde::{Deserialize, Serialize};
use trellis_types::StoragePath;
use uuid::Uuid;

/// Access level a capability grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapabilityAccess {
    /// Read-only access (e.g. balance queries, deposits)
    Public,
    /// Privileged access (e.g. withdrawals)
    Provider,
}

/// What kind of resource the capability borrows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapabilityTarget {
    Vault,
    Manager,
}

/// A published reference to a resource.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Capability {
    /// Issuance identifier
    pub id: Uuid,

    /// Storage path of the resource the capability points at
    pub target: StoragePath,

    /// Kind of resource borrowed
    pub borrows: CapabilityTarget,

    /// Access level granted
    pub access: CapabilityAccess,

    /// When the capability was issued
    pub issued_at: chrono::DateTime<chrono::Utc>,
}

impl Capability {
    /// Issue a fresh capability for a stored resource.
    pub fn issue(target: StoragePath, borrows: CapabilityTarget, access: CapabilityAccess) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            borrows,
            access,
            issued_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issuance_ids_are_distinct() {
        let path = StoragePath::parse("flowTokenVault").unwrap();
        let a = Capability::issue(path.clone(), CapabilityTarget::Vault, CapabilityAccess::Public);
        let b = Capability::issue(path, CapabilityTarget::Vault, CapabilityAccess::Public);
        assert_ne!(a.id, b.id);
    }
}
