//! services/portal/src/web/faculty.rs
//!
//! Handlers for the faculty dashboard pages. List pages go through the shared
//! view lifecycle; the form-only pages (attendance, marks, profile) call the
//! faculty service directly after gating their draft.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use campus_core::aggregate::{
    achievement_tally, attendance_summary, dashboard_tiles, marks_percentage, payroll_totals,
    pending_evaluations, timetable_mix, AchievementTally, AttendanceSummary, PayrollTotals,
    PendingEvaluation, Tile, TimetableMix,
};
use campus_core::batch::{run_batch, BatchOutcome};
use campus_core::domain::{
    Achievement, Assignment, AttendanceSession, DashboardStats, ExamCatalog, FacultyProfile,
    MarksSheet, PayrollOverview, SessionCatalog, Student, Submission, TimetableSlot,
};
use campus_core::settings::{load_or_default, AcademicSettings, SettingsKey};
use campus_core::sources::{
    AchievementsSource, AssignmentEditSource, AssignmentsSource, RosterSource, SubmissionsSource,
};
use campus_core::validate::{
    graded_rows, AchievementDraft, AssignmentDraft, AttendanceDraft, Draft, GradeDraft,
    MarksDraft, ProfileDraft,
};
use campus_core::view::{ViewController, ViewError, ViewSnapshot};
use campus_core::ViewFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use super::state::AppState;
use super::{failure, render_view, status_for, submit_view, Failure};

const NO_ASSIGNMENTS: &str = "No assignments found";
const NO_SUBMISSIONS: &str = "No submissions found";
const NO_STUDENTS: &str = "No students found for this class";
const NO_ACHIEVEMENTS: &str = "No achievements found";

type Page<T> = (StatusCode, Json<ViewSnapshot<T>>);

//=========================================================================================
// Response Payloads
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub tiles: Vec<Tile>,
    pub pending_evaluations: Vec<PendingEvaluation>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradingReport {
    #[serde(flatten)]
    pub outcome: BatchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The submissions page re-fetched after the batch; absent when no grade landed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<ViewSnapshot<Submission>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecorded {
    pub session: AttendanceSession,
    pub summary: AttendanceSummary,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarksEntered {
    #[serde(flatten)]
    pub sheet: MarksSheet,
    /// Roll number to percentage of the maximum, one decimal.
    pub percentages: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AchievementsView {
    #[serde(flatten)]
    pub page: ViewSnapshot<Achievement>,
    pub tally: AchievementTally,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollView {
    #[serde(flatten)]
    pub overview: PayrollOverview,
    pub totals: PayrollTotals,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimetableView {
    pub slots: Vec<TimetableSlot>,
    pub mix: TimetableMix,
}

/// Query for the roster page: an optional class plus the usual filter.
#[derive(Debug, Default, Deserialize)]
pub struct RosterQuery {
    pub class: Option<String>,
    #[serde(flatten)]
    pub filter: ViewFilter,
}

//=========================================================================================
// Dashboard
//=========================================================================================

/// Overview tiles plus the assignments still waiting for evaluation.
#[utoipa::path(
    get,
    path = "/views/faculty/dashboard",
    responses(
        (status = 200, description = "Dashboard tiles and pending evaluations", body = DashboardView),
        (status = 502, description = "The campus backend call failed")
    )
)]
pub async fn dashboard_view(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardView>, Failure> {
    let (stats, assignments) = futures::try_join!(
        state.faculty.get_dashboard(),
        state.faculty.get_assignments()
    )
    .map_err(failure)?;

    Ok(Json(DashboardView {
        tiles: dashboard_tiles(&stats),
        pending_evaluations: pending_evaluations(&assignments),
        stats,
    }))
}

//=========================================================================================
// Assignments & Grading
//=========================================================================================

#[utoipa::path(
    get,
    path = "/views/faculty/assignments",
    params(
        ("q" = Option<String>, Query, description = "Search by title, subject or class"),
        ("category" = Option<String>, Query, description = "Assignment status, or `all`")
    ),
    responses(
        (status = 200, description = "The assignments page", body = ViewSnapshot<Assignment>),
        (status = 502, description = "Page rendered with its error slot filled")
    )
)]
pub async fn assignments_view(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ViewFilter>,
) -> Page<Assignment> {
    let source = AssignmentsSource::new(state.faculty.clone());
    render_view(ViewController::new(source, NO_ASSIGNMENTS), &filter).await
}

#[utoipa::path(
    post,
    path = "/views/faculty/assignments",
    request_body(content_type = "application/json", description = "The assignment draft."),
    responses(
        (status = 201, description = "Assignment created; the reloaded page is returned", body = ViewSnapshot<Assignment>),
        (status = 422, description = "A required field is blank")
    )
)]
pub async fn create_assignment(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<AssignmentDraft>,
) -> Page<Assignment> {
    let source = AssignmentsSource::new(state.faculty.clone());
    submit_view(
        ViewController::new(source, NO_ASSIGNMENTS),
        &draft,
        StatusCode::CREATED,
    )
    .await
}

#[utoipa::path(
    put,
    path = "/views/faculty/assignments/{id}",
    params(("id" = String, Path, description = "The assignment id")),
    request_body(content_type = "application/json", description = "The edited assignment."),
    responses(
        (status = 200, description = "Assignment saved; the reloaded page is returned", body = ViewSnapshot<Assignment>),
        (status = 404, description = "No such assignment"),
        (status = 422, description = "A required field is blank")
    )
)]
pub async fn update_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(draft): Json<AssignmentDraft>,
) -> Page<Assignment> {
    let source = AssignmentEditSource::new(state.faculty.clone(), id);
    submit_view(
        ViewController::new(source, NO_ASSIGNMENTS),
        &draft,
        StatusCode::OK,
    )
    .await
}

#[utoipa::path(
    get,
    path = "/views/faculty/assignments/{id}/submissions",
    params(
        ("id" = String, Path, description = "The assignment id"),
        ("q" = Option<String>, Query, description = "Search by student name or roll number")
    ),
    responses((status = 200, description = "The submissions of one assignment", body = ViewSnapshot<Submission>))
)]
pub async fn submissions_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(filter): Query<ViewFilter>,
) -> Page<Submission> {
    let source = SubmissionsSource::new(state.faculty.clone(), id);
    render_view(ViewController::new(source, NO_SUBMISSIONS), &filter).await
}

/// Grades every row that carries marks in one concurrent batch. Rows that
/// succeed stay graded even when others fail, and the submissions are
/// re-fetched once whenever at least one grade landed.
#[utoipa::path(
    post,
    path = "/views/faculty/assignments/{id}/grades",
    params(("id" = String, Path, description = "The assignment id")),
    request_body(content_type = "application/json", description = "One row per submission."),
    responses(
        (status = 200, description = "Every grade was saved", body = GradingReport),
        (status = 422, description = "No row carries marks, or a marked row has no submission id"),
        (status = 502, description = "Some grades failed; counts are reported")
    )
)]
pub async fn grade_submissions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(rows): Json<Vec<GradeDraft>>,
) -> Result<(StatusCode, Json<GradingReport>), Failure> {
    let graded = graded_rows(&rows).map_err(failure)?;
    let faculty = &state.faculty;
    let outcome = run_batch(
        graded
            .iter()
            .map(|(submission_id, grade)| faculty.grade_submission(submission_id, grade)),
    )
    .await;

    let (reload_status, page) = if outcome.succeeded > 0 {
        let source = SubmissionsSource::new(state.faculty.clone(), id.clone());
        let mut controller = ViewController::new(source, NO_SUBMISSIONS);
        let status = match controller.load().await {
            Ok(()) => StatusCode::OK,
            Err(e) => status_for(&e),
        };
        (status, Some(controller.render(&ViewFilter::all())))
    } else {
        (StatusCode::OK, None)
    };

    if outcome.is_complete() {
        info!("Graded {} submissions for assignment {}", outcome.succeeded, id);
        return Ok((
            reload_status,
            Json(GradingReport {
                outcome,
                error: None,
                page,
            }),
        ));
    }

    let err = ViewError::PartialBatch {
        failed: outcome.failed,
        total: outcome.total(),
    };
    warn!("Grading assignment {}: {}", id, err);
    Ok((
        status_for(&err),
        Json(GradingReport {
            outcome,
            error: Some(err.user_message()),
            page,
        }),
    ))
}

//=========================================================================================
// Attendance & Roster
//=========================================================================================

#[utoipa::path(
    get,
    path = "/views/faculty/attendance",
    responses((status = 200, description = "Classes and subjects to take attendance for", body = SessionCatalog))
)]
pub async fn attendance_catalog(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionCatalog>, Failure> {
    Ok(Json(state.faculty.get_sessions().await.map_err(failure)?))
}

#[utoipa::path(
    get,
    path = "/views/faculty/students",
    params(
        ("class" = Option<String>, Query, description = "Restrict to one class"),
        ("q" = Option<String>, Query, description = "Search by name or roll number")
    ),
    responses((status = 200, description = "The class roster", body = ViewSnapshot<Student>))
)]
pub async fn roster_view(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RosterQuery>,
) -> Page<Student> {
    let source = RosterSource::new(state.faculty.clone(), query.class);
    render_view(ViewController::new(source, NO_STUDENTS), &query.filter).await
}

/// Opens a session for the class, then sends the marks against it. The
/// summary band follows the institution's minimum attendance setting.
#[utoipa::path(
    post,
    path = "/views/faculty/attendance",
    request_body(content_type = "application/json", description = "Date, class, subject and marks."),
    responses(
        (status = 201, description = "Session created and attendance recorded", body = AttendanceRecorded),
        (status = 422, description = "Class or subject is blank, or nobody was marked")
    )
)]
pub async fn record_attendance(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<AttendanceDraft>,
) -> Result<(StatusCode, Json<AttendanceRecorded>), Failure> {
    draft.validate().map_err(failure)?;
    let academic: AcademicSettings =
        load_or_default(state.settings.as_ref(), SettingsKey::Academic)
            .await
            .map_err(failure)?;

    let class_size = state
        .faculty
        .get_students(Some(draft.class.as_str()))
        .await
        .map_err(failure)?
        .len() as u32;
    let session = state
        .faculty
        .create_session(&draft.session(class_size))
        .await
        .map_err(failure)?;
    state
        .faculty
        .mark_attendance(&session.id, &draft.marks())
        .await
        .map_err(failure)?;

    info!("Recorded attendance for {} in session {}", draft.class, session.id);
    Ok((
        StatusCode::CREATED,
        Json(AttendanceRecorded {
            summary: attendance_summary(&draft.marks, academic.minimum_attendance),
            session,
        }),
    ))
}

//=========================================================================================
// Marks
//=========================================================================================

#[utoipa::path(
    get,
    path = "/views/faculty/exams",
    responses((status = 200, description = "Classes, subjects and evaluation types", body = ExamCatalog))
)]
pub async fn exam_catalog(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExamCatalog>, Failure> {
    Ok(Json(state.faculty.get_exams().await.map_err(failure)?))
}

/// The maximum marks come from the evaluation type, never from the client.
/// The catalog is only fetched once the draft's own fields are complete.
#[utoipa::path(
    post,
    path = "/views/faculty/marks",
    request_body(content_type = "application/json", description = "Marks keyed by roll number."),
    responses(
        (status = 201, description = "Marks saved", body = MarksEntered),
        (status = 422, description = "Blank fields, no marks, or marks out of range")
    )
)]
pub async fn enter_marks(
    State(state): State<Arc<AppState>>,
    Json(mut draft): Json<MarksDraft>,
) -> Result<(StatusCode, Json<MarksEntered>), Failure> {
    draft.validate().map_err(failure)?;
    let catalog = state.faculty.get_exams().await.map_err(failure)?;
    draft.max_marks = catalog.max_marks_for(&draft.evaluation_type);
    draft.check_range().map_err(failure)?;

    let sheet = draft.to_sheet();
    state
        .faculty
        .enter_marks(&draft.evaluation_type, &sheet)
        .await
        .map_err(failure)?;

    let percentages = sheet
        .marks
        .iter()
        .filter_map(|entry| {
            marks_percentage(entry.marks, sheet.max_marks).map(|p| (entry.roll_no.clone(), p))
        })
        .collect();
    Ok((StatusCode::CREATED, Json(MarksEntered { sheet, percentages })))
}

//=========================================================================================
// Achievements
//=========================================================================================

#[utoipa::path(
    get,
    path = "/views/faculty/achievements",
    params(
        ("q" = Option<String>, Query, description = "Search by student, roll number or title"),
        ("category" = Option<String>, Query, description = "Achievement category, or `all`")
    ),
    responses((status = 200, description = "The achievements page with category counts", body = AchievementsView))
)]
pub async fn achievements_view(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ViewFilter>,
) -> (StatusCode, Json<AchievementsView>) {
    let mut controller = ViewController::new(
        AchievementsSource::new(state.faculty.clone()),
        NO_ACHIEVEMENTS,
    );
    let status = match controller.load().await {
        Ok(()) => StatusCode::OK,
        Err(e) => status_for(&e),
    };
    // The tiles count the whole dataset, not the filtered rows.
    let tally = achievement_tally(controller.dataset());
    (
        status,
        Json(AchievementsView {
            page: controller.render(&filter),
            tally,
        }),
    )
}

#[utoipa::path(
    post,
    path = "/views/faculty/achievements",
    request_body(content_type = "application/json", description = "The achievement draft."),
    responses(
        (status = 201, description = "Achievement recorded; the reloaded page is returned", body = ViewSnapshot<Achievement>),
        (status = 422, description = "A required field is blank")
    )
)]
pub async fn create_achievement(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<AchievementDraft>,
) -> Page<Achievement> {
    let source = AchievementsSource::new(state.faculty.clone());
    submit_view(
        ViewController::new(source, NO_ACHIEVEMENTS),
        &draft,
        StatusCode::CREATED,
    )
    .await
}

//=========================================================================================
// Profile, Payroll & Timetable
//=========================================================================================

#[utoipa::path(
    get,
    path = "/views/faculty/profile",
    responses((status = 200, description = "The faculty profile", body = FacultyProfile))
)]
pub async fn profile_view(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FacultyProfile>, Failure> {
    Ok(Json(state.faculty.get_profile().await.map_err(failure)?))
}

#[utoipa::path(
    put,
    path = "/views/faculty/profile",
    request_body(content_type = "application/json", description = "The edited profile."),
    responses(
        (status = 200, description = "The profile as re-fetched after saving", body = FacultyProfile),
        (status = 422, description = "Name or email is blank")
    )
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ProfileDraft>,
) -> Result<Json<FacultyProfile>, Failure> {
    draft.validate().map_err(failure)?;
    state.faculty.update_profile(&draft).await.map_err(failure)?;
    info!("Profile saved, reloading");
    Ok(Json(state.faculty.get_profile().await.map_err(failure)?))
}

#[utoipa::path(
    get,
    path = "/views/faculty/payroll",
    responses((status = 200, description = "Current slip, history and year-to-date totals", body = PayrollView))
)]
pub async fn payroll_view(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PayrollView>, Failure> {
    let overview = state.faculty.get_payroll().await.map_err(failure)?;
    Ok(Json(PayrollView {
        totals: payroll_totals(&overview),
        overview,
    }))
}

#[utoipa::path(
    get,
    path = "/views/faculty/timetable",
    responses((status = 200, description = "Weekly slots and the theory/lab/tutorial mix", body = TimetableView))
)]
pub async fn timetable_view(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimetableView>, Failure> {
    let slots = state.faculty.get_timetable().await.map_err(failure)?;
    Ok(Json(TimetableView {
        mix: timetable_mix(&slots),
        slots,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::testing::{demo_state, recording_state};
    use campus_core::domain::{AttendanceStatus, SubmissionStatus};
    use campus_core::ports::SettingsStore;
    use campus_core::view::ViewBody;

    fn rows<T: Clone>(body: &ViewBody<T>) -> Vec<T> {
        match body {
            ViewBody::Table { rows } => rows.clone(),
            ViewBody::Empty { .. } => Vec::new(),
        }
    }

    #[tokio::test]
    async fn dashboard_lists_only_assignments_with_pending_work() {
        let (state, _dir) = demo_state();
        let Json(view) = dashboard_view(State(state)).await.unwrap();
        assert_eq!(view.tiles.len(), 4);
        assert_eq!(view.pending_evaluations.len(), 2);
        assert_eq!(view.pending_evaluations[0].pending_count, 25);
        assert_eq!(view.stats.pending_evaluations, 53);
    }

    #[tokio::test]
    async fn assignments_filter_by_status_and_query() {
        let (state, _dir) = demo_state();
        let filter = ViewFilter::all().with_category("active").with_query("database");
        let (status, Json(page)) = assignments_view(State(state), Query(filter)).await;
        assert_eq!(status, StatusCode::OK);
        let found = rows(&page.body);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");
    }

    #[tokio::test]
    async fn blank_assignment_draft_is_rejected_before_sending() {
        let (state, _dir) = demo_state();
        let draft = AssignmentDraft {
            title: "Graph Algorithms".to_string(),
            ..Default::default()
        };
        let (status, Json(page)) = create_assignment(State(state.clone()), Json(draft)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(page.modal_open);
        assert!(page.error.unwrap().contains("subject"));
        assert_eq!(state.faculty.get_assignments().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn created_assignment_appears_in_the_reloaded_page() {
        let (state, _dir) = demo_state();
        let draft = AssignmentDraft {
            title: "Graph Algorithms".to_string(),
            subject: "Data Structures".to_string(),
            class: "CSE-3A".to_string(),
            due_date: "2025-12-10".to_string(),
            max_marks: 20,
            ..Default::default()
        };
        let (status, Json(page)) = create_assignment(State(state), Json(draft)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(!page.modal_open);
        let found = rows(&page.body);
        assert_eq!(found.len(), 4);
        assert_eq!(found[3].total_students, 4);
    }

    #[tokio::test]
    async fn grading_skips_blank_rows_and_reports_counts() {
        let (state, _dir) = demo_state();
        let rows = vec![
            GradeDraft {
                submission_id: "sub-1-1".to_string(),
                marks: Some(17.0),
                feedback: Some("Clean traversal code".to_string()),
            },
            GradeDraft {
                submission_id: "sub-1-2".to_string(),
                marks: None,
                feedback: None,
            },
            GradeDraft {
                submission_id: "ghost".to_string(),
                marks: Some(10.0),
                feedback: None,
            },
        ];
        let (status, Json(report)) =
            grade_submissions(State(state.clone()), Path("1".to_string()), Json(rows))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(report.outcome.succeeded, 1);
        assert_eq!(report.outcome.failed, 1);

        let subs = state.faculty.get_assignment_submissions("1").await.unwrap();
        assert_eq!(subs[0].marks, Some(17.0));
        assert_eq!(subs[1].status, SubmissionStatus::Late);
        assert_eq!(subs[1].marks, None);
    }

    #[tokio::test]
    async fn submissions_of_unknown_assignment_render_not_found() {
        let (state, _dir) = demo_state();
        let (status, Json(page)) =
            submissions_view(State(state), Path("404".to_string()), Query(ViewFilter::all()))
                .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(page.error.is_some());
        assert!(matches!(page.body, ViewBody::Empty { .. }));
    }

    #[tokio::test]
    async fn attendance_opens_a_session_sized_to_the_class() {
        let (state, _dir) = demo_state();
        let mut marks = BTreeMap::new();
        marks.insert("CS21B1001".to_string(), AttendanceStatus::Present);
        marks.insert("CS21B1002".to_string(), AttendanceStatus::Late);
        marks.insert("CS21B1003".to_string(), AttendanceStatus::Absent);
        let draft = AttendanceDraft {
            marks,
            ..AttendanceDraft::new(
                chrono::NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
                "CSE-3A",
                "Data Structures",
            )
        };

        let (status, Json(recorded)) = record_attendance(State(state), Json(draft))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(recorded.session.students_present, 4);
        assert_eq!(recorded.summary.present, 1);
        assert_eq!(recorded.summary.late, 1);
        assert_eq!(recorded.summary.absent, 1);
    }

    #[tokio::test]
    async fn empty_attendance_is_rejected() {
        let (state, _dir) = demo_state();
        let draft = AttendanceDraft::new(
            chrono::NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            "CSE-3A",
            "Data Structures",
        );
        let (status, _) = record_attendance(State(state), Json(draft))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn marks_are_bounded_by_the_evaluation_type() {
        let (state, _dir) = demo_state();
        let mut marks = BTreeMap::new();
        marks.insert("CS21B1001".to_string(), 35.0);
        let draft = MarksDraft {
            class: "CSE-3A".to_string(),
            subject: "Data Structures".to_string(),
            evaluation_type: "mid1".to_string(),
            // The client cannot raise the ceiling.
            max_marks: 100,
            marks,
        };
        let (status, message) = enter_marks(State(state.clone()), Json(draft.clone()))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(message.contains("between 0 and 30"));

        let draft = MarksDraft {
            evaluation_type: "internal".to_string(),
            ..draft
        };
        let (status, Json(entered)) = enter_marks(State(state), Json(draft)).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(entered.sheet.max_marks, 40);
        assert_eq!(entered.percentages["CS21B1001"], 87.5);
    }

    #[tokio::test]
    async fn achievement_tally_ignores_the_filter() {
        let (state, _dir) = demo_state();
        let filter = ViewFilter::all().with_category("Sports");
        let (_, Json(view)) = achievements_view(State(state), Query(filter)).await;
        assert_eq!(view.tally.total, 3);
        assert_eq!(rows(&view.page.body).len(), 1);
    }

    #[tokio::test]
    async fn profile_update_requires_name_and_email() {
        let (state, _dir) = demo_state();
        let draft = ProfileDraft {
            name: "Dr. Rajesh Kumar".to_string(),
            ..Default::default()
        };
        assert!(update_profile(State(state.clone()), Json(draft.clone()))
            .await
            .is_err());

        let draft = ProfileDraft {
            email: "r.kumar@cocampus.edu".to_string(),
            phone: "+91 9000000000".to_string(),
            ..draft
        };
        let Json(profile) = update_profile(State(state), Json(draft)).await.unwrap();
        assert_eq!(profile.email, "r.kumar@cocampus.edu");
        assert_eq!(profile.department, "Computer Science");
    }

    #[tokio::test]
    async fn payroll_and_timetable_carry_their_aggregates() {
        let (state, _dir) = demo_state();
        let Json(payroll) = payroll_view(State(state.clone())).await.unwrap();
        assert_eq!(payroll.totals.current_deductions, 15000.0);
        assert_eq!(payroll.totals.paid_months, 3);

        let Json(timetable) = timetable_view(State(state)).await.unwrap();
        assert_eq!(timetable.slots.len(), 4);
        assert_eq!(timetable.mix.theory, 2);
    }

    fn edited_assignment() -> AssignmentDraft {
        AssignmentDraft {
            title: "Binary Search Trees (revised)".to_string(),
            subject: "Data Structures".to_string(),
            class: "CSE-3A".to_string(),
            due_date: "2025-12-12".to_string(),
            max_marks: 25,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn assignment_edits_return_the_reloaded_page() {
        let (state, faculty, _dir) = recording_state();
        let (status, Json(page)) = update_assignment(
            State(state),
            Path("1".to_string()),
            Json(edited_assignment()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(!page.modal_open);
        assert_eq!(faculty.calls(), ["update_assignment", "get_assignments"]);
        let found = rows(&page.body);
        assert_eq!(found[0].title, "Binary Search Trees (revised)");
        assert_eq!(found[0].max_marks, 25);
    }

    #[tokio::test]
    async fn assignment_edits_are_gated_and_report_unknown_ids() {
        let (state, faculty, _dir) = recording_state();
        let blank = AssignmentDraft {
            class: String::new(),
            ..edited_assignment()
        };
        let (status, Json(page)) =
            update_assignment(State(state.clone()), Path("1".to_string()), Json(blank)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(page.error.unwrap().contains("class"));
        assert!(faculty.calls().is_empty());

        let (status, _) = update_assignment(
            State(state),
            Path("99".to_string()),
            Json(edited_assignment()),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(faculty.calls(), ["update_assignment"]);
    }

    #[tokio::test]
    async fn marked_rows_without_an_id_never_reach_the_backend() {
        let (state, faculty, _dir) = recording_state();
        let drafts = vec![
            GradeDraft {
                submission_id: "sub-1-1".to_string(),
                marks: Some(17.0),
                feedback: None,
            },
            GradeDraft {
                submission_id: String::new(),
                marks: Some(12.0),
                feedback: None,
            },
        ];
        let (status, message) =
            grade_submissions(State(state), Path("1".to_string()), Json(drafts))
                .await
                .unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(message.contains("submissionId"));
        assert!(faculty.calls().is_empty());
    }

    #[tokio::test]
    async fn a_complete_grading_batch_reloads_the_submissions_once() {
        let (state, faculty, _dir) = recording_state();
        let drafts = vec![
            GradeDraft {
                submission_id: "sub-1-1".to_string(),
                marks: Some(17.0),
                feedback: None,
            },
            GradeDraft {
                submission_id: "sub-1-2".to_string(),
                marks: Some(14.0),
                feedback: Some("Submitted late".to_string()),
            },
        ];
        let (status, Json(report)) =
            grade_submissions(State(state), Path("1".to_string()), Json(drafts))
                .await
                .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(report.outcome.succeeded, 2);
        assert_eq!(faculty.count("grade_submission"), 2);
        assert_eq!(faculty.count("get_assignment_submissions"), 1);
        let page = report.page.expect("reloaded submissions");
        let graded = rows(&page.body);
        assert_eq!(graded[0].marks, Some(17.0));
        assert_eq!(graded[1].marks, Some(14.0));
    }

    #[tokio::test]
    async fn a_batch_where_nothing_landed_is_not_reloaded() {
        let (state, faculty, _dir) = recording_state();
        let drafts = vec![GradeDraft {
            submission_id: "ghost".to_string(),
            marks: Some(10.0),
            feedback: None,
        }];
        let (status, Json(report)) =
            grade_submissions(State(state), Path("1".to_string()), Json(drafts))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(report.page.is_none());
        assert_eq!(faculty.count("get_assignment_submissions"), 0);
    }

    #[tokio::test]
    async fn incomplete_marks_fail_before_the_catalog_is_fetched() {
        let (state, faculty, _dir) = recording_state();
        let mut marks = BTreeMap::new();
        marks.insert("CS21B1001".to_string(), 12.0);
        let draft = MarksDraft {
            class: String::new(),
            subject: String::new(),
            evaluation_type: String::new(),
            max_marks: 100,
            marks,
        };
        let (status, message) = enter_marks(State(state.clone()), Json(draft.clone()))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(message.contains("evaluationType"));

        let empty = MarksDraft {
            class: "CSE-3A".to_string(),
            subject: "Data Structures".to_string(),
            evaluation_type: "mid1".to_string(),
            marks: BTreeMap::new(),
            ..draft
        };
        let (status, _) = enter_marks(State(state), Json(empty)).await.unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(faculty.calls().is_empty());
    }

    #[tokio::test]
    async fn profile_saves_are_followed_by_one_reload() {
        let (state, faculty, _dir) = recording_state();
        let draft = ProfileDraft {
            name: "Dr. Rajesh Kumar".to_string(),
            email: "rajesh.kumar@cocampus.edu".to_string(),
            designation: "Professor".to_string(),
            ..Default::default()
        };
        let Json(profile) = update_profile(State(state), Json(draft)).await.unwrap();
        assert_eq!(faculty.calls(), ["update_profile", "get_profile"]);
        assert_eq!(profile.designation, "Professor");
    }

    #[tokio::test]
    async fn attendance_bands_follow_the_academic_settings() {
        let (state, _dir) = demo_state();
        let mut academic = SettingsKey::Academic.default_value();
        academic["minimumAttendance"] = serde_json::json!(60);
        state
            .settings
            .save(SettingsKey::Academic, &academic)
            .await
            .unwrap();

        let mut marks = BTreeMap::new();
        marks.insert("CS21B1001".to_string(), AttendanceStatus::Present);
        marks.insert("CS21B1002".to_string(), AttendanceStatus::Late);
        marks.insert("CS21B1003".to_string(), AttendanceStatus::Absent);
        let draft = AttendanceDraft {
            marks,
            ..AttendanceDraft::new(
                chrono::NaiveDate::from_ymd_opt(2025, 11, 21).unwrap(),
                "CSE-3A",
                "Data Structures",
            )
        };
        let (_, Json(recorded)) = record_attendance(State(state), Json(draft)).await.unwrap();
        assert_eq!(recorded.summary.percentage, 66.7);
        assert_eq!(recorded.summary.band, campus_core::aggregate::AttendanceBand::Good);
    }
}
