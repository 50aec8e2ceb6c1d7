//! Recurring-execution enrollment record

use crate::ids::{AccountAddress, WorkflowId};
use serde::{Deserialize, Serialize};

/// A workflow's enrollment for recurring execution.
///
/// At most one exists per workflow, created at deployment time iff the
/// caller supplied an interval and the workflow's metadata declares it
/// schedulable. Workflows without one must be triggered manually.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduleEnrollment {
    /// Workflow this enrollment belongs to
    pub workflow: WorkflowId,

    /// Recurrence interval in seconds
    pub interval_secs: u64,

    /// Account the workflow runs against
    pub account: AccountAddress,

    /// When the enrollment was created
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
