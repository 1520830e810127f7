//! crates/campus_core/src/validate.rs
//!
//! Client-side draft validation. These checks are advisory: they only keep
//! obviously incomplete forms from reaching the backend, which remains the
//! authority on what it accepts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{
    AttendanceMark, AttendanceSheet, ClubMember, Grade, MarkEntry, MarksSheet, NewAttendanceSession,
    DEFAULT_MAX_MARKS,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in the required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Please enter {0} for at least one student")]
    NothingMarked(&'static str),
    #[error("Marks for {roll_no} must be between 0 and {max}, got {value}")]
    OutOfRange { roll_no: String, value: f64, max: u32 },
}

/// A form draft that can be gated before it is sent anywhere.
pub trait Draft {
    /// The `(field, value)` pairs that must not be blank.
    fn required_fields(&self) -> Vec<(&'static str, &str)>;

    /// Runs the required-field gate plus any draft-specific checks.
    fn validate(&self) -> Result<(), ValidationError> {
        check_required(self.required_fields())
    }
}

/// Fails with every blank field name, in declaration order.
pub fn check_required(fields: Vec<(&'static str, &str)>) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

//=========================================================================================
// Assignment
//=========================================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentDraft {
    pub title: String,
    pub subject: String,
    pub class: String,
    pub description: String,
    pub due_date: String,
    pub max_marks: u32,
}

impl Draft for AssignmentDraft {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("title", self.title.as_str()),
            ("subject", self.subject.as_str()),
            ("class", self.class.as_str()),
            ("dueDate", self.due_date.as_str()),
        ]
    }
}

//=========================================================================================
// Achievement
//=========================================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AchievementDraft {
    pub student_name: String,
    pub roll_no: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<String>,
}

impl Draft for AchievementDraft {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("studentName", self.student_name.as_str()),
            ("rollNo", self.roll_no.as_str()),
            ("category", self.category.as_str()),
            ("title", self.title.as_str()),
            ("date", self.date.as_str()),
        ]
    }
}

//=========================================================================================
// Attendance
//=========================================================================================

fn default_session_type() -> String {
    "Regular".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDraft {
    pub date: NaiveDate,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default = "default_session_type")]
    pub session_type: String,
    #[serde(default)]
    pub marks: AttendanceSheet,
}

impl AttendanceDraft {
    pub fn new(date: NaiveDate, class: &str, subject: &str) -> Self {
        Self {
            date,
            class: class.to_string(),
            subject: subject.to_string(),
            session_type: default_session_type(),
            marks: AttendanceSheet::new(),
        }
    }

    /// Builds the session header sent before the individual marks.
    pub fn session(&self, class_size: u32) -> NewAttendanceSession {
        NewAttendanceSession {
            date: self.date,
            class: self.class.clone(),
            subject: self.subject.clone(),
            session_type: self.session_type.clone(),
            students_present: class_size,
        }
    }

    pub fn marks(&self) -> Vec<AttendanceMark> {
        self.marks
            .iter()
            .map(|(roll_no, status)| AttendanceMark {
                roll_no: roll_no.clone(),
                status: *status,
            })
            .collect()
    }
}

impl Draft for AttendanceDraft {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("class", self.class.as_str()), ("subject", self.subject.as_str())]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_required(self.required_fields())?;
        if self.marks.is_empty() {
            return Err(ValidationError::NothingMarked("attendance"));
        }
        Ok(())
    }
}

//=========================================================================================
// Marks
//=========================================================================================

fn default_max_marks() -> u32 {
    DEFAULT_MAX_MARKS
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksDraft {
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub evaluation_type: String,
    /// Resolved from the exam catalog before validation.
    #[serde(default = "default_max_marks")]
    pub max_marks: u32,
    #[serde(default)]
    pub marks: BTreeMap<String, f64>,
}

impl MarksDraft {
    pub fn to_sheet(&self) -> MarksSheet {
        MarksSheet {
            class: self.class.clone(),
            subject: self.subject.clone(),
            evaluation_type: self.evaluation_type.clone(),
            max_marks: self.max_marks,
            marks: self
                .marks
                .iter()
                .map(|(roll_no, marks)| MarkEntry {
                    roll_no: roll_no.clone(),
                    marks: *marks,
                })
                .collect(),
        }
    }
}

impl Draft for MarksDraft {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("class", self.class.as_str()),
            ("subject", self.subject.as_str()),
            ("evaluationType", self.evaluation_type.as_str()),
        ]
    }

    /// Structural checks only; the range check needs the catalog's
    /// `max_marks` and runs separately through `check_range`.
    fn validate(&self) -> Result<(), ValidationError> {
        check_required(self.required_fields())?;
        if self.marks.is_empty() {
            return Err(ValidationError::NothingMarked("marks"));
        }
        Ok(())
    }
}

impl MarksDraft {
    /// Every entered mark must lie within `0..=max_marks`.
    pub fn check_range(&self) -> Result<(), ValidationError> {
        let max = f64::from(self.max_marks);
        if let Some((roll_no, value)) = self
            .marks
            .iter()
            .find(|(_, value)| !(0.0..=max).contains(*value))
        {
            return Err(ValidationError::OutOfRange {
                roll_no: roll_no.clone(),
                value: *value,
                max: self.max_marks,
            });
        }
        Ok(())
    }
}

//=========================================================================================
// Profile & Grades
//=========================================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub designation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
}

impl Draft for ProfileDraft {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("name", self.name.as_str()), ("email", self.email.as_str())]
    }
}

/// One row of the grading modal. Rows left without marks are skipped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDraft {
    pub submission_id: String,
    #[serde(default)]
    pub marks: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl GradeDraft {
    pub fn grade(&self) -> Option<Grade> {
        self.marks.map(|marks| Grade {
            marks,
            feedback: self.feedback.clone(),
        })
    }
}

impl Draft for GradeDraft {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("submissionId", self.submission_id.as_str())]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_required(self.required_fields())?;
        if self.marks.is_none() {
            return Err(ValidationError::MissingFields(vec!["marks"]));
        }
        Ok(())
    }
}

/// Keeps only the rows that carry marks, failing when none do. Each kept row
/// must also pass its own gate, so a marked row with a blank id is rejected.
pub fn graded_rows(rows: &[GradeDraft]) -> Result<Vec<(&str, Grade)>, ValidationError> {
    let mut graded = Vec::new();
    for row in rows {
        let Some(grade) = row.grade() else { continue };
        row.validate()?;
        graded.push((row.submission_id.as_str(), grade));
    }
    if graded.is_empty() {
        return Err(ValidationError::NothingMarked("marks"));
    }
    Ok(graded)
}

//=========================================================================================
// Approval Decisions
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

/// The approve/reject modal of the leave and gate-pass queues.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDraft {
    #[serde(default)]
    pub request_id: String,
    pub decision: Decision,
    #[serde(default)]
    pub remarks: String,
}

impl Draft for DecisionDraft {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        match self.decision {
            Decision::Approve => vec![("requestId", self.request_id.as_str())],
            // The applicant is told why, so a rejection needs a reason.
            Decision::Reject => vec![
                ("requestId", self.request_id.as_str()),
                ("remarks", self.remarks.as_str()),
            ],
        }
    }
}

//=========================================================================================
// Club Members
//=========================================================================================

impl Draft for ClubMember {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("name", self.name.as_str()),
            ("rollNumber", self.roll_number.as_str()),
            ("department", self.department.as_str()),
            ("email", self.email.as_str()),
        ]
    }
}
