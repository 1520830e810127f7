//! services/portal/src/adapters/demo.rs
//!
//! An in-memory implementation of the `FacultyService` port seeded from the
//! bundled fixtures. It is used when no campus backend is configured, and it
//! applies mutations to its own state so the pages behave end to end.

use async_trait::async_trait;
use campus_core::aggregate::pending_evaluations;
use campus_core::domain::{
    Achievement, AchievementCategory, Assignment, AssignmentStatus, AttendanceMark,
    AttendanceSession, DashboardStats, ExamCatalog, FacultyProfile, Grade, MarksSheet,
    NewAttendanceSession, PayrollOverview, SessionCatalog, Student, Submission, TimetableSlot,
};
use campus_core::ports::{FacultyService, PortError, PortResult};
use campus_core::validate::{AchievementDraft, AssignmentDraft, ProfileDraft};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

const FACULTY_FIXTURE: &str = include_str!("../../fixtures/faculty.json");

//=========================================================================================
// In-Memory State
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DemoState {
    profile: FacultyProfile,
    dashboard: DashboardStats,
    timetable: Vec<TimetableSlot>,
    assignments: Vec<Assignment>,
    #[serde(default)]
    submissions: HashMap<String, Vec<Submission>>,
    sessions: SessionCatalog,
    exams: ExamCatalog,
    students: BTreeMap<String, Vec<Student>>,
    achievements: Vec<Achievement>,
    payroll: PayrollOverview,
    #[serde(skip)]
    opened_sessions: Vec<AttendanceSession>,
    #[serde(skip)]
    attendance: HashMap<String, Vec<AttendanceMark>>,
    #[serde(skip)]
    marks: HashMap<String, MarksSheet>,
}

impl DemoState {
    fn class_size(&self, class: &str) -> u32 {
        self.students
            .get(class)
            .map(|s| s.len() as u32)
            .unwrap_or_default()
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A demo backend that implements the `FacultyService` port in memory.
pub struct DemoFacultyAdapter {
    state: RwLock<DemoState>,
}

impl DemoFacultyAdapter {
    /// Creates an adapter seeded with the bundled faculty fixture.
    pub fn seeded() -> PortResult<Self> {
        Self::from_json(FACULTY_FIXTURE)
    }

    /// Creates an adapter from a fixture document.
    pub fn from_json(json: &str) -> PortResult<Self> {
        let state: DemoState = serde_json::from_str(json)
            .map_err(|e| PortError::Unexpected(format!("Invalid demo fixture: {}", e)))?;
        info!(
            "Demo backend seeded with {} assignments and {} achievements",
            state.assignments.len(),
            state.achievements.len()
        );
        Ok(Self {
            state: RwLock::new(state),
        })
    }

    /// The attendance recorded for one session, in submission order.
    pub async fn attendance_for(&self, session_id: &str) -> Vec<AttendanceMark> {
        self.state
            .read()
            .await
            .attendance
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// The last marks sheet entered for one exam.
    pub async fn marks_for(&self, exam_id: &str) -> Option<MarksSheet> {
        self.state.read().await.marks.get(exam_id).cloned()
    }
}

fn parse_category(raw: &str) -> PortResult<AchievementCategory> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| PortError::Unexpected(format!("Unknown achievement category: {}", raw)))
}

//=========================================================================================
// `FacultyService` Trait Implementation
//=========================================================================================

#[async_trait]
impl FacultyService for DemoFacultyAdapter {
    /// Pending evaluations are derived from the live assignment counts so the
    /// tile follows grading done through this adapter.
    async fn get_dashboard(&self) -> PortResult<DashboardStats> {
        let state = self.state.read().await;
        let pending: u32 = pending_evaluations(&state.assignments)
            .iter()
            .map(|p| p.pending_count)
            .sum();
        Ok(DashboardStats {
            pending_evaluations: pending,
            ..state.dashboard.clone()
        })
    }

    async fn get_timetable(&self) -> PortResult<Vec<TimetableSlot>> {
        Ok(self.state.read().await.timetable.clone())
    }

    async fn get_assignments(&self) -> PortResult<Vec<Assignment>> {
        Ok(self.state.read().await.assignments.clone())
    }

    async fn create_assignment(&self, draft: &AssignmentDraft) -> PortResult<Assignment> {
        let mut state = self.state.write().await;
        let assignment = Assignment {
            id: Uuid::new_v4().to_string(),
            title: draft.title.clone(),
            subject: draft.subject.clone(),
            subject_code: None,
            class: draft.class.clone(),
            description: Some(draft.description.clone()).filter(|d| !d.is_empty()),
            due_date: draft.due_date.clone(),
            max_marks: draft.max_marks,
            submitted_count: 0,
            evaluated_count: 0,
            total_students: state.class_size(&draft.class),
            status: AssignmentStatus::Active,
            created_date: Some(chrono::Utc::now().date_naive().to_string()),
        };
        state.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn update_assignment(
        &self,
        assignment_id: &str,
        draft: &AssignmentDraft,
    ) -> PortResult<Assignment> {
        let mut state = self.state.write().await;
        let assignment = state
            .assignments
            .iter_mut()
            .find(|a| a.id == assignment_id)
            .ok_or_else(|| PortError::NotFound(format!("Assignment {} not found", assignment_id)))?;

        assignment.title = draft.title.clone();
        assignment.subject = draft.subject.clone();
        assignment.class = draft.class.clone();
        assignment.description = Some(draft.description.clone()).filter(|d| !d.is_empty());
        assignment.due_date = draft.due_date.clone();
        assignment.max_marks = draft.max_marks;
        Ok(assignment.clone())
    }

    async fn get_assignment_submissions(
        &self,
        assignment_id: &str,
    ) -> PortResult<Vec<Submission>> {
        let state = self.state.read().await;
        if !state.assignments.iter().any(|a| a.id == assignment_id) {
            return Err(PortError::NotFound(format!(
                "Assignment {} not found",
                assignment_id
            )));
        }
        Ok(state
            .submissions
            .get(assignment_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn grade_submission(&self, submission_id: &str, grade: &Grade) -> PortResult<()> {
        let mut state = self.state.write().await;
        let (assignment_id, newly_graded) = state
            .submissions
            .iter_mut()
            .find_map(|(assignment_id, subs)| {
                subs.iter_mut()
                    .find(|s| s.id == submission_id)
                    .map(|s| {
                        let newly_graded = s.marks.is_none();
                        s.marks = Some(grade.marks);
                        (assignment_id.clone(), newly_graded)
                    })
            })
            .ok_or_else(|| PortError::NotFound(format!("Submission {} not found", submission_id)))?;

        if newly_graded {
            if let Some(a) = state.assignments.iter_mut().find(|a| a.id == assignment_id) {
                a.evaluated_count += 1;
            }
        }
        Ok(())
    }

    async fn get_sessions(&self) -> PortResult<SessionCatalog> {
        Ok(self.state.read().await.sessions.clone())
    }

    async fn create_session(
        &self,
        session: &NewAttendanceSession,
    ) -> PortResult<AttendanceSession> {
        let mut state = self.state.write().await;
        let created = AttendanceSession {
            id: Uuid::new_v4().to_string(),
            date: session.date.to_string(),
            class: session.class.clone(),
            subject: session.subject.clone(),
            session_type: session.session_type.clone(),
            students_present: session.students_present,
        };
        state.opened_sessions.push(created.clone());
        Ok(created)
    }

    async fn mark_attendance(&self, session_id: &str, marks: &[AttendanceMark]) -> PortResult<()> {
        let mut state = self.state.write().await;
        if !state.opened_sessions.iter().any(|s| s.id == session_id) {
            return Err(PortError::NotFound(format!("Session {} not found", session_id)));
        }
        state
            .attendance
            .insert(session_id.to_string(), marks.to_vec());
        Ok(())
    }

    async fn get_exams(&self) -> PortResult<ExamCatalog> {
        Ok(self.state.read().await.exams.clone())
    }

    async fn enter_marks(&self, exam_id: &str, sheet: &MarksSheet) -> PortResult<()> {
        self.state
            .write()
            .await
            .marks
            .insert(exam_id.to_string(), sheet.clone());
        Ok(())
    }

    async fn get_students(&self, class: Option<&str>) -> PortResult<Vec<Student>> {
        let state = self.state.read().await;
        Ok(match class {
            Some(class) => state.students.get(class).cloned().unwrap_or_default(),
            None => state.students.values().flatten().cloned().collect(),
        })
    }

    async fn get_achievements(&self) -> PortResult<Vec<Achievement>> {
        Ok(self.state.read().await.achievements.clone())
    }

    async fn create_achievement(&self, draft: &AchievementDraft) -> PortResult<Achievement> {
        let category = parse_category(&draft.category)?;
        let achievement = Achievement {
            id: Some(Uuid::new_v4().to_string()),
            student_name: draft.student_name.clone(),
            roll_no: draft.roll_no.clone(),
            category,
            title: draft.title.clone(),
            description: draft.description.clone(),
            date: draft.date.clone(),
            certificate_url: draft.certificate_url.clone(),
        };
        self.state
            .write()
            .await
            .achievements
            .push(achievement.clone());
        Ok(achievement)
    }

    async fn get_profile(&self) -> PortResult<FacultyProfile> {
        Ok(self.state.read().await.profile.clone())
    }

    async fn update_profile(&self, draft: &ProfileDraft) -> PortResult<FacultyProfile> {
        let mut state = self.state.write().await;
        let profile = &mut state.profile;
        profile.name = draft.name.clone();
        profile.email = draft.email.clone();
        profile.phone = draft.phone.clone();
        if !draft.department.is_empty() {
            profile.department = draft.department.clone();
        }
        if !draft.designation.is_empty() {
            profile.designation = draft.designation.clone();
        }
        if draft.qualification.is_some() {
            profile.qualification = draft.qualification.clone();
        }
        Ok(profile.clone())
    }

    async fn get_payroll(&self) -> PortResult<PayrollOverview> {
        Ok(self.state.read().await.payroll.clone())
    }
}
