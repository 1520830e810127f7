//! Shared fixtures for the handler tests.

use crate::adapters::{CampusDatasets, DemoFacultyAdapter, DemoHodAdapter, FileSettingsStore};
use crate::web::state::AppState;
use async_trait::async_trait;
use campus_core::domain::{
    Achievement, Assignment, AttendanceMark, AttendanceSession, DashboardStats, ExamCatalog,
    FacultyProfile, Grade, MarksSheet, NewAttendanceSession, PayrollOverview, SessionCatalog,
    Student, Submission, TimetableSlot,
};
use campus_core::ports::{FacultyService, PortResult};
use campus_core::validate::{AchievementDraft, AssignmentDraft, ProfileDraft};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// A demo-mode state whose settings live in a fresh temporary directory.
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn demo_state() -> (Arc<AppState>, TempDir) {
    let (state, _, dir) = recording_state();
    (state, dir)
}

/// Like `demo_state`, but the faculty backend records every call it receives.
pub fn recording_state() -> (Arc<AppState>, Arc<RecordingFaculty>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let faculty = Arc::new(RecordingFaculty::new(DemoFacultyAdapter::seeded().unwrap()));
    let state = AppState {
        faculty: faculty.clone(),
        hod: Arc::new(DemoHodAdapter::seeded().unwrap()),
        settings: Arc::new(FileSettingsStore::new(dir.path())),
        campus: CampusDatasets::seeded().unwrap(),
    };
    (Arc::new(state), faculty, dir)
}

/// Delegates to the demo backend and logs the name of each port call.
pub struct RecordingFaculty {
    inner: DemoFacultyAdapter,
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingFaculty {
    pub fn new(inner: DemoFacultyAdapter) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| **c == name).count()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }
}

#[async_trait]
impl FacultyService for RecordingFaculty {
    async fn get_dashboard(&self) -> PortResult<DashboardStats> {
        self.record("get_dashboard");
        self.inner.get_dashboard().await
    }

    async fn get_timetable(&self) -> PortResult<Vec<TimetableSlot>> {
        self.record("get_timetable");
        self.inner.get_timetable().await
    }

    async fn get_assignments(&self) -> PortResult<Vec<Assignment>> {
        self.record("get_assignments");
        self.inner.get_assignments().await
    }

    async fn create_assignment(&self, draft: &AssignmentDraft) -> PortResult<Assignment> {
        self.record("create_assignment");
        self.inner.create_assignment(draft).await
    }

    async fn update_assignment(
        &self,
        assignment_id: &str,
        draft: &AssignmentDraft,
    ) -> PortResult<Assignment> {
        self.record("update_assignment");
        self.inner.update_assignment(assignment_id, draft).await
    }

    async fn get_assignment_submissions(
        &self,
        assignment_id: &str,
    ) -> PortResult<Vec<Submission>> {
        self.record("get_assignment_submissions");
        self.inner.get_assignment_submissions(assignment_id).await
    }

    async fn grade_submission(&self, submission_id: &str, grade: &Grade) -> PortResult<()> {
        self.record("grade_submission");
        self.inner.grade_submission(submission_id, grade).await
    }

    async fn get_sessions(&self) -> PortResult<SessionCatalog> {
        self.record("get_sessions");
        self.inner.get_sessions().await
    }

    async fn create_session(
        &self,
        session: &NewAttendanceSession,
    ) -> PortResult<AttendanceSession> {
        self.record("create_session");
        self.inner.create_session(session).await
    }

    async fn mark_attendance(&self, session_id: &str, marks: &[AttendanceMark]) -> PortResult<()> {
        self.record("mark_attendance");
        self.inner.mark_attendance(session_id, marks).await
    }

    async fn get_exams(&self) -> PortResult<ExamCatalog> {
        self.record("get_exams");
        self.inner.get_exams().await
    }

    async fn enter_marks(&self, exam_id: &str, sheet: &MarksSheet) -> PortResult<()> {
        self.record("enter_marks");
        self.inner.enter_marks(exam_id, sheet).await
    }

    async fn get_students(&self, class: Option<&str>) -> PortResult<Vec<Student>> {
        self.record("get_students");
        self.inner.get_students(class).await
    }

    async fn get_achievements(&self) -> PortResult<Vec<Achievement>> {
        self.record("get_achievements");
        self.inner.get_achievements().await
    }

    async fn create_achievement(&self, draft: &AchievementDraft) -> PortResult<Achievement> {
        self.record("create_achievement");
        self.inner.create_achievement(draft).await
    }

    async fn get_profile(&self) -> PortResult<FacultyProfile> {
        self.record("get_profile");
        self.inner.get_profile().await
    }

    async fn update_profile(&self, draft: &ProfileDraft) -> PortResult<FacultyProfile> {
        self.record("update_profile");
        self.inner.update_profile(draft).await
    }

    async fn get_payroll(&self) -> PortResult<PayrollOverview> {
        self.record("get_payroll");
        self.inner.get_payroll().await
    }
}
