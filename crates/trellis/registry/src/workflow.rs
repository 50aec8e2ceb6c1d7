//! Workflow registry trait

use crate::error::Result;
use trellis_types::{AccountAddress, WorkflowAttributes, WorkflowId, WorkflowRecord};

/// A reserved registration: the identifier is assigned, the record is
/// minted, but nothing is visible in the registry until `commit`.
///
/// Dropping a reservation burns its identifier and leaves no record.
#[derive(Debug)]
pub struct Reservation {
    id: WorkflowId,
    record: WorkflowRecord,
}

impl Reservation {
    pub fn new(id: WorkflowId, record: WorkflowRecord) -> Self {
        Self { id, record }
    }

    /// The identifier this reservation will commit under.
    pub fn id(&self) -> WorkflowId {
        self.id
    }

    /// The record as it will appear once committed.
    pub fn record(&self) -> &WorkflowRecord {
        &self.record
    }

    pub(crate) fn into_record(self) -> WorkflowRecord {
        self.record
    }
}

/// The shared workflow registry.
///
/// Identifier assignment is serialized by the registry's own internal
/// atomicity; two concurrent registrations never receive the same
/// identifier. Callers consume the returned identifier and must not
/// assume values are predictable or sequential.
pub trait WorkflowRegistry: Send + Sync {
    /// Assign an identifier and mint the record without publishing it.
    fn reserve(&self, attrs: WorkflowAttributes) -> Result<Reservation>;

    /// Publish a previously reserved record and return its identifier.
    fn commit(&self, reservation: Reservation) -> Result<WorkflowId>;

    /// One-call registration for callers outside an atomic unit.
    fn register(&self, attrs: WorkflowAttributes) -> Result<WorkflowId> {
        self.commit(self.reserve(attrs)?)
    }

    /// Fetch a record by identifier.
    fn get(&self, id: WorkflowId) -> Option<WorkflowRecord>;

    /// Whether a record exists for an identifier.
    fn contains(&self, id: WorkflowId) -> bool;

    /// All records owned by an account.
    fn list_for_account(&self, account: &AccountAddress) -> Vec<WorkflowRecord>;

    /// All records whose listing flag is set.
    fn list_public(&self) -> Vec<WorkflowRecord>;
}
