//! In-memory scheduler

use crate::error::{Result, ScheduleError};
use crate::Scheduler;
use dashmap::DashMap;
use tracing::info;
use trellis_types::{AccountAddress, ScheduleEnrollment, WorkflowId};

/// In-memory scheduler keyed by workflow identifier.
#[derive(Default)]
pub struct InMemoryScheduler {
    enrollments: DashMap<WorkflowId, ScheduleEnrollment>,
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for InMemoryScheduler {
    fn enroll(
        &self,
        workflow: WorkflowId,
        interval_secs: u64,
        account: &AccountAddress,
    ) -> Result<ScheduleEnrollment> {
        if interval_secs == 0 {
            return Err(ScheduleError::InvalidInterval);
        }
        if self.enrollments.contains_key(&workflow) {
            return Err(ScheduleError::AlreadyEnrolled(workflow));
        }
        let enrollment = ScheduleEnrollment {
            workflow,
            interval_secs,
            account: account.clone(),
            enrolled_at: chrono::Utc::now(),
        };
        self.enrollments.insert(workflow, enrollment.clone());
        info!(workflow = %workflow, interval_secs, "workflow enrolled for recurring execution");
        Ok(enrollment)
    }

    fn enrollment(&self, workflow: WorkflowId) -> Option<ScheduleEnrollment> {
        self.enrollments.get(&workflow).map(|e| e.clone())
    }

    fn cancel(&self, workflow: WorkflowId) -> Result<()> {
        self.enrollments
            .remove(&workflow)
            .map(|_| ())
            .ok_or(ScheduleError::NotEnrolled(workflow))
    }

    fn list(&self) -> Vec<ScheduleEnrollment> {
        self.enrollments.iter().map(|e| e.value().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> AccountAddress {
        AccountAddress::new("0x01")
    }

    #[test]
    fn enroll_and_fetch() {
        let scheduler = InMemoryScheduler::new();
        let enrollment = scheduler.enroll(WorkflowId(1), 86_400, &addr()).unwrap();
        assert_eq!(enrollment.interval_secs, 86_400);
        assert_eq!(
            scheduler.enrollment(WorkflowId(1)).unwrap().interval_secs,
            86_400
        );
    }

    #[test]
    fn zero_interval_is_rejected() {
        let scheduler = InMemoryScheduler::new();
        let err = scheduler.enroll(WorkflowId(1), 0, &addr()).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInterval));
        assert!(scheduler.list().is_empty());
    }

    #[test]
    fn one_enrollment_per_workflow() {
        let scheduler = InMemoryScheduler::new();
        scheduler.enroll(WorkflowId(1), 60, &addr()).unwrap();
        let err = scheduler.enroll(WorkflowId(1), 120, &addr()).unwrap_err();
        assert!(matches!(err, ScheduleError::AlreadyEnrolled(_)));
        // original enrollment untouched
        assert_eq!(scheduler.enrollment(WorkflowId(1)).unwrap().interval_secs, 60);
    }

    #[test]
    fn cancel_removes_enrollment() {
        let scheduler = InMemoryScheduler::new();
        scheduler.enroll(WorkflowId(1), 60, &addr()).unwrap();
        scheduler.cancel(WorkflowId(1)).unwrap();
        assert!(scheduler.enrollment(WorkflowId(1)).is_none());
        let err = scheduler.cancel(WorkflowId(1)).unwrap_err();
        assert!(matches!(err, ScheduleError::NotEnrolled(_)));
    }
}
