//! crates/campus_core/src/view.rs
//!
//! The fetch / derive / render / mutate lifecycle shared by every dashboard
//! page. A controller owns one dataset, a loading flag, an optional modal
//! flag and a single error slot. These are independent flags, not a state
//! machine.

use serde::Serialize;
use tracing::{debug, error, info};

use crate::filter::{derive_view, Searchable, ViewFilter};
use crate::ports::{DataSource, PortError};
use crate::validate::{Draft, ValidationError};

/// The message shown for any failed backend call.
pub const GENERIC_ERROR: &str = "An unexpected error occurred";

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Service call failed: {0}")]
    Port(#[from] PortError),
    #[error("{failed} of {total} updates failed")]
    PartialBatch { failed: usize, total: usize },
}

impl ViewError {
    /// The text a page shows. Validation problems are specific; every
    /// backend failure collapses to one generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Port(_) | Self::PartialBatch { .. } => GENERIC_ERROR.to_string(),
        }
    }
}

/// What a page shows in place of its table body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewBody<T> {
    Table { rows: Vec<T> },
    Empty { message: String },
}

impl<T> ViewBody<T> {
    pub fn from_rows(rows: Vec<T>, empty_message: &str) -> Self {
        if rows.is_empty() {
            Self::Empty {
                message: empty_message.to_string(),
            }
        } else {
            Self::Table { rows }
        }
    }
}

/// A rendered page: the independent flags plus the derived body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot<T> {
    pub loading: bool,
    pub modal_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub body: ViewBody<T>,
}

//=========================================================================================
// ViewController
//=========================================================================================

pub struct ViewController<S: DataSource> {
    source: S,
    dataset: Vec<S::Item>,
    loading: bool,
    modal_open: bool,
    error: Option<String>,
    empty_message: String,
}

impl<S: DataSource> ViewController<S> {
    pub fn new(source: S, empty_message: impl Into<String>) -> Self {
        Self {
            source,
            dataset: Vec::new(),
            loading: false,
            modal_open: false,
            error: None,
            empty_message: empty_message.into(),
        }
    }

    pub fn dataset(&self) -> &[S::Item] {
        &self.dataset
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn open_modal(&mut self) {
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    /// Fetches the dataset once. On failure the previous dataset is kept and
    /// the error slot is filled for the retry affordance.
    pub async fn load(&mut self) -> Result<(), ViewError> {
        self.loading = true;
        self.error = None;
        let result = self.source.fetch().await;
        self.loading = false;

        match result {
            Ok(items) => {
                debug!("Loaded {} items", items.len());
                self.dataset = items;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load view data: {:?}", e);
                let err = ViewError::from(e);
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// The generic "Try Again" action.
    pub async fn retry(&mut self) -> Result<(), ViewError> {
        self.load().await
    }

    /// Gates the draft, sends it, then reloads to reconcile with the backend.
    /// A draft that fails validation never reaches the data source.
    pub async fn submit(&mut self, draft: &S::Draft) -> Result<(), ViewError>
    where
        S::Draft: Draft,
    {
        if let Err(e) = draft.validate() {
            let err = ViewError::from(e);
            self.error = Some(err.user_message());
            return Err(err);
        }

        if let Err(e) = self.source.submit(draft).await {
            error!("Failed to submit draft: {:?}", e);
            let err = ViewError::from(e);
            self.error = Some(err.user_message());
            return Err(err);
        }

        info!("Draft submitted, reloading view");
        self.close_modal();
        self.load().await
    }
}

impl<S> ViewController<S>
where
    S: DataSource,
    S::Item: Searchable,
{
    pub fn derive(&self, filter: &ViewFilter) -> Vec<S::Item> {
        derive_view(&self.dataset, filter)
    }

    pub fn render(&self, filter: &ViewFilter) -> ViewSnapshot<S::Item> {
        ViewSnapshot {
            loading: self.loading,
            modal_open: self.modal_open,
            error: self.error.clone(),
            body: ViewBody::from_rows(self.derive(filter), &self.empty_message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Achievement, AchievementCategory};
    use crate::ports::PortResult;
    use crate::validate::AchievementDraft;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingSource {
        items: Mutex<Vec<Achievement>>,
        fetches: AtomicUsize,
        submits: AtomicUsize,
        fail_fetch: AtomicBool,
        fail_submit: AtomicBool,
    }

    #[async_trait]
    impl DataSource for CountingSource {
        type Item = Achievement;
        type Draft = AchievementDraft;

        async fn fetch(&self) -> PortResult<Vec<Achievement>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(PortError::Network("connection refused".to_string()));
            }
            Ok(self.items.lock().unwrap().clone())
        }

        async fn submit(&self, draft: &AchievementDraft) -> PortResult<()> {
            self.submits.fetch_add(1, Ordering::SeqCst);
            if self.fail_submit.load(Ordering::SeqCst) {
                return Err(PortError::Unexpected("500".to_string()));
            }
            self.items.lock().unwrap().push(Achievement {
                id: None,
                student_name: draft.student_name.clone(),
                roll_no: draft.roll_no.clone(),
                category: AchievementCategory::Technical,
                title: draft.title.clone(),
                description: draft.description.clone(),
                date: draft.date.clone(),
                certificate_url: None,
            });
            Ok(())
        }
    }

    fn complete_draft() -> AchievementDraft {
        AchievementDraft {
            student_name: "Arun Kumar".to_string(),
            roll_no: "CSE01".to_string(),
            category: "Technical".to_string(),
            title: "Hackathon Winner".to_string(),
            date: "2025-10-01".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_dataset_renders_empty_state() {
        let mut view = ViewController::new(CountingSource::default(), "No achievements found");
        view.load().await.unwrap();

        let snapshot = view.render(&ViewFilter::all());
        assert_eq!(
            snapshot.body,
            ViewBody::Empty {
                message: "No achievements found".to_string()
            }
        );
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn incomplete_draft_never_reaches_the_source() {
        let mut view = ViewController::new(CountingSource::default(), "empty");
        let draft = AchievementDraft {
            title: String::new(),
            ..complete_draft()
        };

        let err = view.submit(&draft).await.unwrap_err();
        assert!(matches!(err, ViewError::Validation(_)));
        assert_eq!(view.source().submits.load(Ordering::SeqCst), 0);
        assert_eq!(view.source().fetches.load(Ordering::SeqCst), 0);
        assert!(view.error().unwrap().contains("title"));
    }

    #[tokio::test]
    async fn successful_submit_reloads_exactly_once() {
        let mut view = ViewController::new(CountingSource::default(), "empty");
        view.open_modal();
        view.submit(&complete_draft()).await.unwrap();

        assert_eq!(view.source().submits.load(Ordering::SeqCst), 1);
        assert_eq!(view.source().fetches.load(Ordering::SeqCst), 1);
        assert_eq!(view.dataset().len(), 1);
        assert!(!view.render(&ViewFilter::all()).modal_open);
    }

    #[tokio::test]
    async fn failed_submit_does_not_reload() {
        let source = CountingSource::default();
        source.fail_submit.store(true, Ordering::SeqCst);
        let mut view = ViewController::new(source, "empty");

        let err = view.submit(&complete_draft()).await.unwrap_err();
        assert_eq!(err.user_message(), GENERIC_ERROR);
        assert_eq!(view.source().fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_load_keeps_prior_dataset_and_allows_retry() {
        let mut view = ViewController::new(CountingSource::default(), "empty");
        view.submit(&complete_draft()).await.unwrap();
        assert_eq!(view.dataset().len(), 1);

        view.source().fail_fetch.store(true, Ordering::SeqCst);
        assert!(view.load().await.is_err());
        assert_eq!(view.dataset().len(), 1);
        assert_eq!(view.error(), Some(GENERIC_ERROR));
        assert!(!view.is_loading());

        view.source().fail_fetch.store(false, Ordering::SeqCst);
        view.retry().await.unwrap();
        assert!(view.error().is_none());
    }

    #[tokio::test]
    async fn render_applies_the_filter() {
        let mut view = ViewController::new(CountingSource::default(), "No matches");
        view.submit(&complete_draft()).await.unwrap();

        match view.render(&ViewFilter::all().with_query("arun")).body {
            ViewBody::Table { rows } => assert_eq!(rows.len(), 1),
            other => panic!("expected rows, got {other:?}"),
        }
        assert_eq!(
            view.render(&ViewFilter::all().with_category("Sports")).body,
            ViewBody::Empty {
                message: "No matches".to_string()
            }
        );
    }
}
