//! services/portal/src/web/docs.rs
//!
//! The master definition for the OpenAPI specification.

use campus_core::aggregate::{AttendanceSummary, RequestTally};
use campus_core::batch::BatchOutcome;
use campus_core::domain::{
    Achievement, Assignment, ClubMember, GatePassRequest, LeaveRequest, RequestStatus, Submission,
    TimetableSlot,
};
use campus_core::validate::Decision;
use utoipa::OpenApi;

use super::faculty::{
    AchievementsView, AttendanceRecorded, DashboardView, GradingReport, MarksEntered,
    PayrollView, TimetableView,
};
use super::hod::DecisionBody;
use super::{campus, faculty, hod, settings};

#[derive(OpenApi)]
#[openapi(
    paths(
        faculty::dashboard_view,
        faculty::assignments_view,
        faculty::create_assignment,
        faculty::update_assignment,
        faculty::submissions_view,
        faculty::grade_submissions,
        faculty::attendance_catalog,
        faculty::roster_view,
        faculty::record_attendance,
        faculty::exam_catalog,
        faculty::enter_marks,
        faculty::achievements_view,
        faculty::create_achievement,
        faculty::profile_view,
        faculty::update_profile,
        faculty::payroll_view,
        faculty::timetable_view,
        hod::leaves_view,
        hod::decide_leave,
        hod::gate_passes_view,
        hod::decide_gate_pass,
        campus::club_members_view,
        campus::add_club_member,
        campus::certificates_view,
        settings::all_settings,
        settings::get_settings,
        settings::save_settings,
    ),
    components(schemas(
        DashboardView,
        GradingReport,
        AttendanceRecorded,
        MarksEntered,
        AchievementsView,
        PayrollView,
        TimetableView,
        DecisionBody,
        Decision,
        RequestTally,
        RequestStatus,
        BatchOutcome,
        AttendanceSummary,
        Assignment,
        Submission,
        Achievement,
        TimetableSlot,
        ClubMember,
        LeaveRequest,
        GatePassRequest,
    )),
    tags(
        (name = "Campus Portal API", description = "Page views and form submissions for the campus dashboards.")
    )
)]
pub struct ApiDoc;
