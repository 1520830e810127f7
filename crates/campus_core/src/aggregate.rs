//! crates/campus_core/src/aggregate.rs
//!
//! Counting and summing over fetched collections for the dashboard tiles.

use serde::Serialize;

use crate::domain::{
    Achievement, AchievementCategory, Assignment, AssignmentStatus, AttendanceSheet,
    AttendanceStatus, ClassKind, DashboardStats, PayrollOverview, PayrollStatus, RequestStatus,
    TimetableSlot,
};

/// One headline tile on a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Tile {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub title: &'static str,
    pub value: u32,
}

pub fn dashboard_tiles(stats: &DashboardStats) -> Vec<Tile> {
    vec![
        Tile { title: "Classes Today", value: stats.classes_today },
        Tile { title: "Pending Evaluations", value: stats.pending_evaluations },
        Tile { title: "Leave Balance", value: stats.leave_balance },
        Tile { title: "Students Taught", value: stats.students_taught },
    ]
}

//=========================================================================================
// Assignments
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PendingEvaluation {
    pub assignment_id: String,
    pub title: String,
    pub class: String,
    pub submitted_count: u32,
    pub evaluated_count: u32,
    pub pending_count: u32,
}

/// Active assignments that still have submissions waiting to be graded.
pub fn pending_evaluations(assignments: &[Assignment]) -> Vec<PendingEvaluation> {
    assignments
        .iter()
        .filter(|a| a.status == AssignmentStatus::Active)
        .filter_map(|a| {
            let pending_count = a.submitted_count.saturating_sub(a.evaluated_count);
            (pending_count > 0).then(|| PendingEvaluation {
                assignment_id: a.id.clone(),
                title: a.title.clone(),
                class: a.class.clone(),
                submitted_count: a.submitted_count,
                evaluated_count: a.evaluated_count,
                pending_count,
            })
        })
        .collect()
}

//=========================================================================================
// Achievements
//=========================================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AchievementTally {
    pub total: usize,
    pub technical: usize,
    pub sports_and_cultural: usize,
    pub academic: usize,
}

pub fn achievement_tally(achievements: &[Achievement]) -> AchievementTally {
    achievements
        .iter()
        .fold(AchievementTally::default(), |mut tally, a| {
            tally.total += 1;
            match a.category {
                AchievementCategory::Technical => tally.technical += 1,
                AchievementCategory::Sports | AchievementCategory::Cultural => {
                    tally.sports_and_cultural += 1
                }
                AchievementCategory::Academic => tally.academic += 1,
                AchievementCategory::Other => {}
            }
            tally
        })
}

//=========================================================================================
// Attendance
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AttendanceBand {
    Good,
    Warning,
    Critical,
}

impl AttendanceBand {
    /// At or above the institution's minimum is good; up to ten points
    /// below it is a warning.
    pub fn for_percentage(percentage: f64, minimum: u32) -> Self {
        let minimum = f64::from(minimum);
        if percentage >= minimum {
            Self::Good
        } else if percentage >= minimum - 10.0 {
            Self::Warning
        } else {
            Self::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    /// Students marked present or late, as a share of the sheet.
    pub percentage: f64,
    pub band: AttendanceBand,
}

pub fn attendance_summary(sheet: &AttendanceSheet, minimum_attendance: u32) -> AttendanceSummary {
    let count = |status: AttendanceStatus| sheet.values().filter(|s| **s == status).count();
    let present = count(AttendanceStatus::Present);
    let absent = count(AttendanceStatus::Absent);
    let late = count(AttendanceStatus::Late);
    let total = sheet.len();

    let percentage = if total == 0 {
        0.0
    } else {
        round_one_decimal((present + late) as f64 / total as f64 * 100.0)
    };

    AttendanceSummary {
        total,
        present,
        absent,
        late,
        percentage,
        band: AttendanceBand::for_percentage(percentage, minimum_attendance),
    }
}

//=========================================================================================
// Marks
//=========================================================================================

/// Percentage of `max_marks`, to one decimal place. `None` when `max_marks` is zero.
pub fn marks_percentage(marks: f64, max_marks: u32) -> Option<f64> {
    (max_marks > 0).then(|| round_one_decimal(marks / f64::from(max_marks) * 100.0))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

//=========================================================================================
// Payroll
//=========================================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PayrollTotals {
    /// Sum of the current month's deductions.
    pub current_deductions: f64,
    /// Gross minus deductions for the current month, for comparison with the reported net.
    pub computed_net: f64,
    pub ytd_gross: f64,
    pub ytd_net: f64,
    pub paid_months: usize,
    pub pending_months: usize,
}

pub fn payroll_totals(overview: &PayrollOverview) -> PayrollTotals {
    let mut totals = PayrollTotals::default();

    if let Some(current) = &overview.current_month {
        totals.current_deductions = current.deductions.total();
        totals.computed_net = current.gross_salary - totals.current_deductions;
    }

    for month in &overview.salary_history {
        totals.ytd_gross += month.gross_salary;
        totals.ytd_net += month.net_salary;
        match month.status {
            PayrollStatus::Paid => totals.paid_months += 1,
            PayrollStatus::Pending => totals.pending_months += 1,
        }
    }
    totals
}

//=========================================================================================
// Timetable
//=========================================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimetableMix {
    pub theory: usize,
    pub lab: usize,
    pub tutorial: usize,
}

pub fn timetable_mix(slots: &[TimetableSlot]) -> TimetableMix {
    slots.iter().fold(TimetableMix::default(), |mut mix, slot| {
        match slot.kind {
            ClassKind::Theory => mix.theory += 1,
            ClassKind::Lab => mix.lab += 1,
            ClassKind::Tutorial => mix.tutorial += 1,
        }
        mix
    })
}

//=========================================================================================
// Approval Requests
//=========================================================================================

/// The count tiles above the leave and gate-pass approval tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RequestTally {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

pub fn request_tally(statuses: impl IntoIterator<Item = RequestStatus>) -> RequestTally {
    statuses
        .into_iter()
        .fold(RequestTally::default(), |mut tally, status| {
            tally.total += 1;
            match status {
                RequestStatus::Pending => tally.pending += 1,
                RequestStatus::Approved => tally.approved += 1,
                RequestStatus::Rejected => tally.rejected += 1,
            }
            tally
        })
}
