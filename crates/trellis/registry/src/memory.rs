//! In-memory workflow registry

use crate::error::{RegistryError, Result};
use crate::workflow::{Reservation, WorkflowRegistry};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;
use trellis_types::{AccountAddress, WorkflowAttributes, WorkflowId, WorkflowRecord};

/// In-memory workflow registry.
///
/// The identifier counter is a single atomic shared by every account;
/// `fetch_add` is what serializes assignment.
pub struct InMemoryWorkflowRegistry {
    records: DashMap<WorkflowId, WorkflowRecord>,
    next_id: AtomicU64,
}

impl InMemoryWorkflowRegistry {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of committed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for InMemoryWorkflowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowRegistry for InMemoryWorkflowRegistry {
    fn reserve(&self, attrs: WorkflowAttributes) -> Result<Reservation> {
        let id = WorkflowId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = WorkflowRecord::from_attributes(id, attrs);
        debug!(workflow = %id, "workflow identifier reserved");
        Ok(Reservation::new(id, record))
    }

    fn commit(&self, reservation: Reservation) -> Result<WorkflowId> {
        let id = reservation.id();
        if self.records.contains_key(&id) {
            return Err(RegistryError::RecordAlreadyExists(id));
        }
        self.records.insert(id, reservation.into_record());
        debug!(workflow = %id, "workflow record committed");
        Ok(id)
    }

    fn get(&self, id: WorkflowId) -> Option<WorkflowRecord> {
        self.records.get(&id).map(|r| r.clone())
    }

    fn contains(&self, id: WorkflowId) -> bool {
        self.records.contains_key(&id)
    }

    fn list_for_account(&self, account: &AccountAddress) -> Vec<WorkflowRecord> {
        self.records
            .iter()
            .filter(|r| &r.creator == account)
            .map(|r| r.value().clone())
            .collect()
    }

    fn list_public(&self) -> Vec<WorkflowRecord> {
        self.records
            .iter()
            .filter(|r| r.listed)
            .map(|r| r.value().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn attrs(creator: &str, listed: bool) -> WorkflowAttributes {
        WorkflowAttributes {
            name: "wf".into(),
            category: "test".into(),
            description: String::new(),
            content_ref: "bafy".into(),
            listed,
            creator: AccountAddress::new(creator),
            contract_name: trellis_types::ContractName::new("WF1"),
            metadata: serde_json::Value::Null,
            schedulable: false,
            parent: None,
            capabilities: Default::default(),
            price: None,
            image_ref: None,
            default_config: None,
        }
    }

    #[test]
    fn register_assigns_and_publishes() {
        let registry = InMemoryWorkflowRegistry::new();
        let id = registry.register(attrs("0x01", true)).unwrap();
        assert!(registry.contains(id));
        assert_eq!(registry.get(id).unwrap().creator, AccountAddress::new("0x01"));
    }

    #[test]
    fn dropped_reservation_leaves_no_record() {
        let registry = InMemoryWorkflowRegistry::new();
        let reservation = registry.reserve(attrs("0x01", true)).unwrap();
        let burned = reservation.id();
        drop(reservation);
        assert!(!registry.contains(burned));
        assert!(registry.is_empty());

        // the burned identifier is never reused
        let next = registry.register(attrs("0x01", true)).unwrap();
        assert_ne!(next, burned);
    }

    #[test]
    fn listing_flag_filters_public_list() {
        let registry = InMemoryWorkflowRegistry::new();
        registry.register(attrs("0x01", true)).unwrap();
        registry.register(attrs("0x01", false)).unwrap();
        assert_eq!(registry.list_public().len(), 1);
        assert_eq!(registry.list_for_account(&AccountAddress::new("0x01")).len(), 2);
    }

    #[test]
    fn concurrent_registrations_get_distinct_ids() {
        let registry = Arc::new(InMemoryWorkflowRegistry::new());
        let mut handles = Vec::new();
        for t in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                let mut ids = Vec::new();
                for _ in 0..50 {
                    ids.push(registry.register(attrs(&format!("0x{t:02}"), false)).unwrap());
                }
                ids
            }));
        }
        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "identifier {id} assigned twice");
            }
        }
        assert_eq!(seen.len(), 400);
        assert_eq!(registry.len(), 400);
    }

    proptest! {
        // Interleaving reserves, commits and drops never yields a
        // duplicate identifier or a record for a dropped reservation.
        #[test]
        fn property_reservation_lifecycle(commit_mask in proptest::collection::vec(any::<bool>(), 1..40)) {
            let registry = InMemoryWorkflowRegistry::new();
            let mut committed = HashSet::new();
            let mut burned = HashSet::new();

            for commit in commit_mask {
                let reservation = registry.reserve(attrs("0x01", false)).unwrap();
                let id = reservation.id();
                prop_assert!(!committed.contains(&id));
                prop_assert!(!burned.contains(&id));
                if commit {
                    registry.commit(reservation).unwrap();
                    committed.insert(id);
                } else {
                    drop(reservation);
                    burned.insert(id);
                }
            }

            prop_assert_eq!(registry.len(), committed.len());
            for id in &burned {
                prop_assert!(!registry.contains(*id));
            }
        }
    }
}
