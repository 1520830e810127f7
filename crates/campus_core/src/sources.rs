//! crates/campus_core/src/sources.rs
//!
//! Adapts the faculty and HoD service clients to the generic `DataSource`
//! port, one source per page that lists a collection and offers a form.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Achievement, Assignment, GatePassRequest, LeaveRequest, Student, Submission};
use crate::ports::{DataSource, FacultyService, HodService, PortResult};
use crate::validate::{AchievementDraft, AssignmentDraft, Decision, DecisionDraft, GradeDraft};

/// Assignments list with the "create assignment" form.
pub struct AssignmentsSource {
    service: Arc<dyn FacultyService>,
}

impl AssignmentsSource {
    pub fn new(service: Arc<dyn FacultyService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl DataSource for AssignmentsSource {
    type Item = Assignment;
    type Draft = AssignmentDraft;

    async fn fetch(&self) -> PortResult<Vec<Assignment>> {
        self.service.get_assignments().await
    }

    async fn submit(&self, draft: &AssignmentDraft) -> PortResult<()> {
        self.service.create_assignment(draft).await.map(drop)
    }
}

/// The assignments list behind the edit form of one assignment.
pub struct AssignmentEditSource {
    service: Arc<dyn FacultyService>,
    assignment_id: String,
}

impl AssignmentEditSource {
    pub fn new(service: Arc<dyn FacultyService>, assignment_id: impl Into<String>) -> Self {
        Self {
            service,
            assignment_id: assignment_id.into(),
        }
    }
}

#[async_trait]
impl DataSource for AssignmentEditSource {
    type Item = Assignment;
    type Draft = AssignmentDraft;

    async fn fetch(&self) -> PortResult<Vec<Assignment>> {
        self.service.get_assignments().await
    }

    async fn submit(&self, draft: &AssignmentDraft) -> PortResult<()> {
        self.service
            .update_assignment(&self.assignment_id, draft)
            .await
            .map(drop)
    }
}

/// Student achievements with the upload form.
pub struct AchievementsSource {
    service: Arc<dyn FacultyService>,
}

impl AchievementsSource {
    pub fn new(service: Arc<dyn FacultyService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl DataSource for AchievementsSource {
    type Item = Achievement;
    type Draft = AchievementDraft;

    async fn fetch(&self) -> PortResult<Vec<Achievement>> {
        self.service.get_achievements().await
    }

    async fn submit(&self, draft: &AchievementDraft) -> PortResult<()> {
        self.service.create_achievement(draft).await.map(drop)
    }
}

/// Submissions for one assignment; submitting grades a single row.
pub struct SubmissionsSource {
    service: Arc<dyn FacultyService>,
    assignment_id: String,
}

impl SubmissionsSource {
    pub fn new(service: Arc<dyn FacultyService>, assignment_id: impl Into<String>) -> Self {
        Self {
            service,
            assignment_id: assignment_id.into(),
        }
    }
}

#[async_trait]
impl DataSource for SubmissionsSource {
    type Item = Submission;
    type Draft = GradeDraft;

    async fn fetch(&self) -> PortResult<Vec<Submission>> {
        self.service
            .get_assignment_submissions(&self.assignment_id)
            .await
    }

    async fn submit(&self, draft: &GradeDraft) -> PortResult<()> {
        match draft.grade() {
            Some(grade) => self.service.grade_submission(&draft.submission_id, &grade).await,
            None => Ok(()),
        }
    }
}

/// The student roster of one class, read only.
pub struct RosterSource {
    service: Arc<dyn FacultyService>,
    class: Option<String>,
}

impl RosterSource {
    pub fn new(service: Arc<dyn FacultyService>, class: Option<String>) -> Self {
        Self { service, class }
    }
}

#[async_trait]
impl DataSource for RosterSource {
    type Item = Student;
    type Draft = ();

    async fn fetch(&self) -> PortResult<Vec<Student>> {
        self.service.get_students(self.class.as_deref()).await
    }

    async fn submit(&self, _draft: &()) -> PortResult<()> {
        Ok(())
    }
}

//=========================================================================================
// HoD Approval Queues
//=========================================================================================

/// Faculty leave requests; submitting approves or rejects one of them.
pub struct LeaveRequestsSource {
    service: Arc<dyn HodService>,
}

impl LeaveRequestsSource {
    pub fn new(service: Arc<dyn HodService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl DataSource for LeaveRequestsSource {
    type Item = LeaveRequest;
    type Draft = DecisionDraft;

    async fn fetch(&self) -> PortResult<Vec<LeaveRequest>> {
        self.service.get_leaves().await
    }

    async fn submit(&self, draft: &DecisionDraft) -> PortResult<()> {
        match draft.decision {
            Decision::Approve => {
                self.service
                    .approve_leave(&draft.request_id, &draft.remarks)
                    .await
            }
            Decision::Reject => self.service.reject_leave(&draft.request_id, &draft.remarks).await,
        }
    }
}

/// Student gate-pass requests; submitting approves or rejects one of them.
pub struct GatePassesSource {
    service: Arc<dyn HodService>,
}

impl GatePassesSource {
    pub fn new(service: Arc<dyn HodService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl DataSource for GatePassesSource {
    type Item = GatePassRequest;
    type Draft = DecisionDraft;

    async fn fetch(&self) -> PortResult<Vec<GatePassRequest>> {
        self.service.get_gate_passes().await
    }

    async fn submit(&self, draft: &DecisionDraft) -> PortResult<()> {
        match draft.decision {
            Decision::Approve => {
                self.service
                    .approve_gate_pass(&draft.request_id, &draft.remarks)
                    .await
            }
            Decision::Reject => {
                self.service
                    .reject_gate_pass(&draft.request_id, &draft.remarks)
                    .await
            }
        }
    }
}
