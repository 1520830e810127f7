//! crates/campus_core/src/domain.rs
//!
//! Defines the data transfer shapes exchanged with the campus REST backend.
//! The backend owns these entities; the portal only reads, filters and
//! forwards them, so no invariants are enforced here beyond field types.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

//=========================================================================================
// Identifier Handling
//=========================================================================================

/// Backend identifiers arrive either as Mongo-style strings (`_id`) or as plain
/// numbers from the mock datasets. Both are normalised to `String`.
fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid identifier: {other}"))),
    }
}

fn flexible_id_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("invalid identifier: {other}"))),
    }
}

//=========================================================================================
// Assignments & Submissions
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Active,
    Completed,
    Expired,
    Pending,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Expired => "expired",
            Self::Pending => "pending",
        }
    }
}

/// An assignment created by a faculty member for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(alias = "_id", deserialize_with = "flexible_id")]
    pub id: String,
    pub title: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_code: Option<String>,
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: String,
    pub max_marks: u32,
    #[serde(default)]
    pub submitted_count: u32,
    #[serde(default)]
    pub evaluated_count: u32,
    #[serde(default)]
    pub total_students: u32,
    pub status: AssignmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    OnTime,
    Late,
    NotSubmitted,
    Excused,
    Resubmitted,
}

/// One student's submission against an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(alias = "_id", deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(alias = "rollNo", alias = "rollNumber")]
    pub student_roll: String,
    pub student_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_date: Option<String>,
    pub status: SubmissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

//=========================================================================================
// Attendance
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

/// Attendance marks for a single session, keyed by roll number.
pub type AttendanceSheet = BTreeMap<String, AttendanceStatus>;

/// A single row of the attendance payload posted to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMark {
    pub roll_no: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSession {
    #[serde(alias = "_id", deserialize_with = "flexible_id")]
    pub id: String,
    pub date: String,
    pub class: String,
    pub subject: String,
    #[serde(default)]
    pub session_type: String,
    #[serde(default)]
    pub students_present: u32,
}

/// Payload for creating a new attendance session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewAttendanceSession {
    pub date: NaiveDate,
    pub class: String,
    pub subject: String,
    pub session_type: String,
    pub students_present: u32,
}

/// The classes and subjects a faculty member may open sessions for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SessionCatalog {
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
}

//=========================================================================================
// Students, Exams & Marks
//=========================================================================================

/// A student row. Endpoints disagree on field names, so the aliases below
/// collapse `rollNumber`/`rollNo` and `studentName`/`name` into one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "flexible_id_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(alias = "rollNumber")]
    pub roll_no: String,
    #[serde(alias = "studentName")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EvaluationType {
    pub value: String,
    pub label: String,
    pub max_marks: u32,
}

impl EvaluationType {
    fn new(value: &str, label: &str, max_marks: u32) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            max_marks,
        }
    }

    /// The evaluation types offered when the backend does not send its own.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("mid1", "Mid-1 Exam", 30),
            Self::new("mid2", "Mid-2 Exam", 30),
            Self::new("internal", "Internal Assessment", 40),
            Self::new("assignment", "Assignment", 20),
            Self::new("lab", "Lab Evaluation", 50),
        ]
    }
}

/// Out-of-range evaluation lookups fall back to this maximum.
pub const DEFAULT_MAX_MARKS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExamCatalog {
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default = "EvaluationType::defaults")]
    pub evaluation_types: Vec<EvaluationType>,
}

impl Default for ExamCatalog {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
            subjects: Vec::new(),
            evaluation_types: EvaluationType::defaults(),
        }
    }
}

impl ExamCatalog {
    /// Looks up the maximum marks for an evaluation type, defaulting to 100.
    pub fn max_marks_for(&self, evaluation_type: &str) -> u32 {
        self.evaluation_types
            .iter()
            .find(|e| e.value == evaluation_type)
            .map(|e| e.max_marks)
            .unwrap_or(DEFAULT_MAX_MARKS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MarkEntry {
    pub roll_no: String,
    pub marks: f64,
}

/// The marks payload posted for one class, subject and evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MarksSheet {
    pub class: String,
    pub subject: String,
    pub evaluation_type: String,
    pub max_marks: u32,
    pub marks: Vec<MarkEntry>,
}

/// Grade posted for a single submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub marks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

//=========================================================================================
// Achievements
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AchievementCategory {
    Technical,
    Sports,
    Cultural,
    Academic,
    Other,
}

impl AchievementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Sports => "Sports",
            Self::Cultural => "Cultural",
            Self::Academic => "Academic",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "flexible_id_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub student_name: String,
    #[serde(alias = "rollNumber")]
    pub roll_no: String,
    pub category: AchievementCategory,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(default, alias = "certificate", skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<String>,
}

//=========================================================================================
// Payroll
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    Paid,
    Pending,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Deductions {
    #[serde(default)]
    pub pf: f64,
    #[serde(default)]
    pub professional_tax: f64,
    #[serde(default)]
    pub tds: f64,
    #[serde(default)]
    pub insurance: f64,
}

impl Deductions {
    pub fn total(&self) -> f64 {
        self.pf + self.professional_tax + self.tds + self.insurance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PayrollMonth {
    pub month: String,
    pub gross_salary: f64,
    #[serde(default)]
    pub deductions: Deductions,
    pub net_salary: f64,
    pub status: PayrollStatus,
    #[serde(default, alias = "payslipUrl", skip_serializing_if = "Option::is_none")]
    pub slip_url: Option<String>,
}

/// The payroll page payload: the current month plus the salary history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PayrollOverview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_month: Option<PayrollMonth>,
    #[serde(default, alias = "payslips")]
    pub salary_history: Vec<PayrollMonth>,
}

//=========================================================================================
// Timetable, Profile & Dashboard
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ClassKind {
    Theory,
    Lab,
    Tutorial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TimetableSlot {
    pub day: String,
    pub time: String,
    pub subject: String,
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(rename = "type")]
    pub kind: ClassKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FacultyProfile {
    pub name: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
}

/// Headline numbers for the faculty dashboard tiles. Missing values count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub classes_today: u32,
    pub pending_evaluations: u32,
    pub leave_balance: u32,
    pub students_taught: u32,
}

//=========================================================================================
// HoD Approvals
//=========================================================================================

/// Where a leave or gate-pass request stands. Only pending requests can be decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A faculty member's leave application, decided by the head of department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(alias = "_id", deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
    #[serde(alias = "userName")]
    pub faculty_name: String,
    pub leave_type: String,
    #[serde(alias = "startDate")]
    pub from_date: String,
    #[serde(alias = "endDate")]
    pub to_date: String,
    #[serde(default, alias = "totalDays")]
    pub days: u32,
    #[serde(default)]
    pub reason: String,
    /// Who covers the classes while the applicant is away.
    #[serde(default, alias = "handoverTo", skip_serializing_if = "Option::is_none")]
    pub substitute_arranged: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<String>,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// A student's request to leave campus during college hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GatePassRequest {
    #[serde(alias = "_id", deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub student_name: String,
    #[serde(default)]
    pub class: String,
    #[serde(alias = "rollNumber")]
    pub roll_no: String,
    #[serde(default)]
    pub reason: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<String>,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

//=========================================================================================
// Static Datasets
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ClubMember {
    /// Assigned on insert; drafts arrive without one.
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(alias = "rollNo")]
    pub roll_number: String,
    pub department: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub year: String,
    pub email: String,
    #[serde(default = "default_member_status")]
    pub status: String,
}

fn default_member_status() -> String {
    "active".to_string()
}

/// A student's request for an official certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    pub id: u32,
    #[serde(rename = "type")]
    pub certificate_type: String,
    pub purpose: String,
    pub copies: u32,
    pub priority: String,
    pub status: String,
    pub request_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
}
