// SPDX-License-Identifier: Apache-2.0

//! Generic bulk processing with bounded concurrency and progress tracking.
//!
//! Each item is processed independently: a failure is recorded against its
//! identifier and the remaining items are still processed. There is no
//! rollback. Outcomes are reported in input order regardless of concurrency.

use std::fmt::Display;
use std::future::Future;

use anyhow::Result;
use futures::{StreamExt, stream};
use tracing::warn;

/// Outcome of processing a single item in a bulk operation.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkOutcome<T> {
    /// Item was processed successfully with a result.
    Success(T),
    /// Item was skipped (e.g., dry run).
    Skipped(String),
    /// Item processing failed with an error.
    Failed(String),
}

impl<T> BulkOutcome<T> {
    /// Returns true for [`BulkOutcome::Failed`].
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, BulkOutcome::Failed(_))
    }
}

/// Result of a bulk processing operation.
#[derive(Debug, Clone)]
pub struct BulkResult<I, T> {
    /// Number of items processed successfully.
    pub succeeded: usize,
    /// Number of items that failed processing.
    pub failed: usize,
    /// Number of items that were skipped.
    pub skipped: usize,
    /// Detailed outcomes for each item (identifier, outcome), in input order.
    pub outcomes: Vec<(I, BulkOutcome<T>)>,
}

impl<I, T> Default for BulkResult<I, T> {
    fn default() -> Self {
        Self {
            succeeded: 0,
            failed: 0,
            skipped: 0,
            outcomes: Vec::new(),
        }
    }
}

impl<I, T> BulkResult<I, T> {
    /// Total number of items.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Identifiers and error details of the failed items, in input order.
    pub fn failures(&self) -> impl Iterator<Item = (&I, &str)> {
        self.outcomes.iter().filter_map(|(id, outcome)| match outcome {
            BulkOutcome::Failed(msg) => Some((id, msg.as_str())),
            _ => None,
        })
    }

    fn record(&mut self, id: I, result: Result<Option<T>>) -> Option<String> {
        match result {
            Ok(Some(value)) => {
                self.succeeded += 1;
                self.outcomes.push((id, BulkOutcome::Success(value)));
                None
            }
            Ok(None) => {
                self.skipped += 1;
                self.outcomes
                    .push((id, BulkOutcome::Skipped("Skipped".to_string())));
                None
            }
            Err(e) => {
                let detail = format!("{e:#}");
                self.failed += 1;
                self.outcomes
                    .push((id, BulkOutcome::Failed(detail.clone())));
                Some(detail)
            }
        }
    }
}

/// Process a collection of items with bounded concurrency.
///
/// # Arguments
///
/// * `items` - Collection of (identifier, data) pairs to process
/// * `concurrency` - Maximum number of items in flight; `0` and `1` both mean
///   strictly sequential
/// * `processor` - Async function that processes a single item, returning:
///   - `Ok(Some(T))` for successful processing
///   - `Ok(None)` for skipped items
///   - `Err(e)` for failures (recorded, never retried)
/// * `progress_callback` - Called before processing each item with
///   (current, total, `action_message`)
///
/// # Example
///
/// ```rust
/// use tagger_core::bulk::process_bulk;
///
/// # tokio_test_block_on(async {
/// let items = vec![(1_u64, "a"), (2, "b")];
/// let result = process_bulk(
///     items,
///     1,
///     |id, data| async move { Ok(Some(format!("{id}:{data}"))) },
///     |_current, _total, _action| {},
/// )
/// .await;
/// assert_eq!(result.succeeded, 2);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
pub async fn process_bulk<I, D, T, F, Fut, P>(
    items: Vec<(I, D)>,
    concurrency: usize,
    processor: F,
    progress_callback: P,
) -> BulkResult<I, T>
where
    I: Clone + Display,
    F: Fn(I, D) -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
    P: Fn(usize, usize, &str),
{
    let total = items.len();
    let processor = &processor;
    let progress_callback = &progress_callback;

    let outcomes: Vec<(I, Result<Option<T>>)> = stream::iter(items.into_iter().enumerate())
        .map(|(idx, (id, data))| async move {
            progress_callback(idx + 1, total, &format!("Processing {id}"));
            let result = processor(id.clone(), data).await;
            (id, result)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut bulk_result = BulkResult::default();
    for (id, result) in outcomes {
        if let Some(detail) = bulk_result.record(id.clone(), result) {
            warn!(item = %id, error = %detail, "Item failed, continuing with the rest");
        }
    }

    bulk_result
}
