//! Trellis Scheduler - Recurring-execution enrollment boundary
//!
//! Workflows that are schedulable and were deployed with an interval get
//! an enrollment here; everything else is triggered manually. The
//! in-memory implementation is suitable for development and testing;
//! persistent backends implement the same trait.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod error;
pub mod memory;

use trellis_types::{AccountAddress, ScheduleEnrollment, WorkflowId};

// Re-exports
pub use error::{Result, ScheduleError};
pub use memory::InMemoryScheduler;

/// The scheduler boundary.
pub trait Scheduler: Send + Sync {
    /// Enroll a workflow for recurring execution.
    ///
    /// The interval must be positive; a workflow can hold at most one
    /// enrollment.
    fn enroll(
        &self,
        workflow: WorkflowId,
        interval_secs: u64,
        account: &AccountAddress,
    ) -> Result<ScheduleEnrollment>;

    /// The enrollment for a workflow, if any.
    fn enrollment(&self, workflow: WorkflowId) -> Option<ScheduleEnrollment>;

    /// Remove a workflow's enrollment.
    fn cancel(&self, workflow: WorkflowId) -> Result<()>;

    /// All current enrollments.
    fn list(&self) -> Vec<ScheduleEnrollment>;
}
