//! crates/campus_core/src/batch.rs
//!
//! Fires a group of independent mutation calls at once. There is no ordering
//! between the calls and no rollback: whatever succeeded stays applied.

use futures::future::join_all;
use serde::Serialize;
use std::future::Future;
use tracing::error;

use crate::ports::PortResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Awaits every call concurrently and counts the outcomes.
pub async fn run_batch<I, F>(calls: I) -> BatchOutcome
where
    I: IntoIterator<Item = F>,
    F: Future<Output = PortResult<()>>,
{
    join_all(calls)
        .await
        .into_iter()
        .fold(BatchOutcome::default(), |mut outcome, result| {
            match result {
                Ok(()) => outcome.succeeded += 1,
                Err(e) => {
                    error!("Batched update failed: {:?}", e);
                    outcome.failed += 1;
                }
            }
            outcome
        })
}
