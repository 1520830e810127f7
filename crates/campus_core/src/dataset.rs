//! crates/campus_core/src/dataset.rs
//!
//! A hardcoded in-memory collection that stands in for a service client on
//! pages that have no backend endpoint yet.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::{DataSource, PortResult};

/// Fills in the fields of a new item that depend on the existing rows,
/// such as the next numeric id.
pub type Assigner<T> = fn(existing: &[T], item: &mut T);

/// An in-memory `DataSource`. Submitting a draft appends it to the collection.
pub struct StaticDataset<T> {
    items: RwLock<Vec<T>>,
    assign: Option<Assigner<T>>,
}

impl<T> StaticDataset<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            assign: None,
        }
    }

    /// Runs `assign` on every submitted draft while the write lock is held,
    /// so concurrent submits never see the same set of existing rows.
    pub fn with_assigner(items: Vec<T>, assign: Assigner<T>) -> Self {
        Self {
            items: RwLock::new(items),
            assign: Some(assign),
        }
    }
}

#[async_trait]
impl<T> DataSource for StaticDataset<T>
where
    T: Clone + Send + Sync,
{
    type Item = T;
    type Draft = T;

    async fn fetch(&self) -> PortResult<Vec<T>> {
        Ok(self.items.read().await.clone())
    }

    async fn submit(&self, draft: &T) -> PortResult<()> {
        let mut items = self.items.write().await;
        let mut item = draft.clone();
        if let Some(assign) = self.assign {
            assign(&items, &mut item);
        }
        items.push(item);
        Ok(())
    }
}
