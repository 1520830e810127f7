//! crates/campus_core/src/filter.rs
//!
//! The derive step of the view lifecycle: a pure, order-preserving linear
//! scan over an in-memory collection. Collections are classroom sized, so
//! there is no indexing or pagination.

use serde::Deserialize;

use crate::domain::{
    Achievement, Assignment, CertificateRequest, ClubMember, GatePassRequest, LeaveRequest,
    Student, Submission,
};

/// The category value that disables category matching.
pub const ALL_CATEGORIES: &str = "all";

/// An entity that can be searched by free text and grouped by one category field.
pub trait Searchable {
    /// The text fields a free-text query is matched against.
    fn haystacks(&self) -> Vec<&str>;

    /// The value compared for category equality, if the entity has one.
    fn category(&self) -> Option<&str>;
}

/// The predicates a page applies to its dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ViewFilter {
    #[serde(default, alias = "q")]
    pub query: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ViewFilter {
    /// The identity filter: every element matches.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True when the filter cannot exclude anything.
    pub fn is_identity(&self) -> bool {
        let no_query = self.query.as_deref().map_or(true, |q| q.trim().is_empty());
        let no_category = self
            .category
            .as_deref()
            .map_or(true, |c| c.is_empty() || c == ALL_CATEGORIES);
        no_query && no_category
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        self.matches_query(item) && self.matches_category(item)
    }

    fn matches_query<T: Searchable>(&self, item: &T) -> bool {
        let needle = match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return true,
        };
        item.haystacks()
            .iter()
            .any(|hay| hay.to_lowercase().contains(&needle))
    }

    fn matches_category<T: Searchable>(&self, item: &T) -> bool {
        match self.category.as_deref() {
            None | Some("") | Some(ALL_CATEGORIES) => true,
            Some(wanted) => item.category() == Some(wanted),
        }
    }
}

/// Returns the elements of `dataset` that satisfy `filter`, in original order.
pub fn derive_view<T: Searchable + Clone>(dataset: &[T], filter: &ViewFilter) -> Vec<T> {
    if filter.is_identity() {
        return dataset.to_vec();
    }
    dataset
        .iter()
        .filter(|item| filter.matches(*item))
        .cloned()
        .collect()
}

//=========================================================================================
// Searchable Implementations
//=========================================================================================

impl Searchable for Achievement {
    fn haystacks(&self) -> Vec<&str> {
        vec![self.student_name.as_str(), self.roll_no.as_str(), self.title.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.category.as_str())
    }
}

impl Searchable for Assignment {
    fn haystacks(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.subject.as_str(), self.class.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

impl Searchable for Submission {
    fn haystacks(&self) -> Vec<&str> {
        vec![self.student_name.as_str(), self.student_roll.as_str()]
    }

    fn category(&self) -> Option<&str> {
        None
    }
}

impl Searchable for Student {
    fn haystacks(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.roll_no.as_str()]
    }

    fn category(&self) -> Option<&str> {
        self.class.as_deref()
    }
}

impl Searchable for LeaveRequest {
    fn haystacks(&self) -> Vec<&str> {
        vec![self.faculty_name.as_str(), self.leave_type.as_str(), self.reason.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

impl Searchable for GatePassRequest {
    fn haystacks(&self) -> Vec<&str> {
        vec![
            self.student_name.as_str(),
            self.roll_no.as_str(),
            self.class.as_str(),
            self.reason.as_str(),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

impl Searchable for ClubMember {
    fn haystacks(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.roll_number.as_str(), self.email.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.department.as_str())
    }
}

impl Searchable for CertificateRequest {
    fn haystacks(&self) -> Vec<&str> {
        vec![self.certificate_type.as_str(), self.purpose.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
