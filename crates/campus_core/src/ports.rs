//! crates/campus_core/src/ports.rs
//!
//! Defines the service contracts (traits) the view layer depends on.
//! These traits form the boundary of the hexagonal architecture, so the
//! view lifecycle never knows whether data comes from the campus REST
//! backend, an in-memory demo backend or a static dataset.

use async_trait::async_trait;

use crate::domain::{
    Achievement, Assignment, AttendanceMark, AttendanceSession, DashboardStats, ExamCatalog,
    FacultyProfile, GatePassRequest, Grade, LeaveRequest, MarksSheet, NewAttendanceSession,
    PayrollOverview, SessionCatalog, Student, Submission, TimetableSlot,
};
use crate::settings::SettingsKey;
use crate::validate::{AchievementDraft, AssignmentDraft, ProfileDraft};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// The taxonomy is deliberately flat: the view layer shows the same generic
/// message for every variant and only logs the detail.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The faculty service client: one async call per REST endpoint used by the
/// faculty dashboards. Every call is a single attempt with no retry.
#[async_trait]
pub trait FacultyService: Send + Sync {
    // --- Dashboard & Timetable ---
    async fn get_dashboard(&self) -> PortResult<DashboardStats>;

    async fn get_timetable(&self) -> PortResult<Vec<TimetableSlot>>;

    // --- Assignments ---
    async fn get_assignments(&self) -> PortResult<Vec<Assignment>>;

    async fn create_assignment(&self, draft: &AssignmentDraft) -> PortResult<Assignment>;

    async fn update_assignment(
        &self,
        assignment_id: &str,
        draft: &AssignmentDraft,
    ) -> PortResult<Assignment>;

    async fn get_assignment_submissions(&self, assignment_id: &str)
        -> PortResult<Vec<Submission>>;

    async fn grade_submission(&self, submission_id: &str, grade: &Grade) -> PortResult<()>;

    // --- Attendance ---
    async fn get_sessions(&self) -> PortResult<SessionCatalog>;

    async fn create_session(&self, session: &NewAttendanceSession)
        -> PortResult<AttendanceSession>;

    async fn mark_attendance(&self, session_id: &str, marks: &[AttendanceMark]) -> PortResult<()>;

    // --- Exams & Marks ---
    async fn get_exams(&self) -> PortResult<ExamCatalog>;

    async fn enter_marks(&self, exam_id: &str, sheet: &MarksSheet) -> PortResult<()>;

    // --- Students & Achievements ---
    async fn get_students(&self, class: Option<&str>) -> PortResult<Vec<Student>>;

    async fn get_achievements(&self) -> PortResult<Vec<Achievement>>;

    async fn create_achievement(&self, draft: &AchievementDraft) -> PortResult<Achievement>;

    // --- Profile & Payroll ---
    async fn get_profile(&self) -> PortResult<FacultyProfile>;

    async fn update_profile(&self, draft: &ProfileDraft) -> PortResult<FacultyProfile>;

    async fn get_payroll(&self) -> PortResult<PayrollOverview>;
}

/// The head-of-department client for the approval queues. Approving takes
/// optional remarks; rejecting takes the reason shown to the applicant.
#[async_trait]
pub trait HodService: Send + Sync {
    // --- Faculty Leave ---
    async fn get_leaves(&self) -> PortResult<Vec<LeaveRequest>>;

    async fn approve_leave(&self, leave_id: &str, remarks: &str) -> PortResult<()>;

    async fn reject_leave(&self, leave_id: &str, reason: &str) -> PortResult<()>;

    // --- Student Gate Passes ---
    async fn get_gate_passes(&self) -> PortResult<Vec<GatePassRequest>>;

    async fn approve_gate_pass(&self, pass_id: &str, remarks: &str) -> PortResult<()>;

    async fn reject_gate_pass(&self, pass_id: &str, reason: &str) -> PortResult<()>;
}

/// A source of one entity collection plus the single mutation a page offers
/// for it. This is the seam the generic view lifecycle is written against.
#[async_trait]
pub trait DataSource: Send + Sync {
    type Item: Clone + Send + Sync;
    type Draft: Send + Sync;

    /// Fetches the full collection in one call.
    async fn fetch(&self) -> PortResult<Vec<Self::Item>>;

    /// Sends one draft to the mutation endpoint.
    async fn submit(&self, draft: &Self::Draft) -> PortResult<()>;
}

/// Shared sources (e.g. a dataset held in application state) drive a
/// controller through their `Arc`.
#[async_trait]
impl<S: DataSource + ?Sized> DataSource for std::sync::Arc<S> {
    type Item = S::Item;
    type Draft = S::Draft;

    async fn fetch(&self) -> PortResult<Vec<Self::Item>> {
        (**self).fetch().await
    }

    async fn submit(&self, draft: &Self::Draft) -> PortResult<()> {
        (**self).submit(draft).await
    }
}

/// Persistence for the admin preference blobs, one JSON document per key.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self, key: SettingsKey) -> PortResult<Option<serde_json::Value>>;

    async fn save(&self, key: SettingsKey, value: &serde_json::Value) -> PortResult<()>;
}
