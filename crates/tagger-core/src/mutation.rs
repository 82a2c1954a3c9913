// SPDX-License-Identifier: Apache-2.0

//! Apply or remove one label across every matching issue of a repository.
//!
//! One remote update is sent per matching issue. A failed update is reported
//! with the issue reference and the error, and the batch carries on.

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::bulk::{BulkResult, process_bulk};
use crate::query::has_label;
use crate::tracker::IssueTracker;
use crate::types::{Issue, IssueRef, LabelUpdate};

/// Options for a batch label mutation.
#[derive(Debug, Clone, Copy)]
pub struct MutationOptions {
    /// Maximum number of updates in flight.
    pub concurrency: usize,
    /// Select the targets without sending any update.
    pub dry_run: bool,
}

impl Default for MutationOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            dry_run: false,
        }
    }
}

/// Outcome of a batch label mutation, keyed by issue.
pub type MutationResult = BulkResult<IssueRef, ()>;

/// Applies `update` to each target issue and collects the outcomes.
///
/// Dry runs report every target as skipped.
pub async fn apply_to_issues(
    tracker: &dyn IssueTracker,
    owner: &str,
    repo: &str,
    targets: &[&Issue],
    update: &LabelUpdate,
    options: MutationOptions,
    progress: impl Fn(usize, usize, &str),
) -> MutationResult {
    let items: Vec<(IssueRef, u64)> = targets.iter().map(|i| (i.reference(), i.number)).collect();
    let dry_run = options.dry_run;

    process_bulk(
        items,
        options.concurrency,
        |_reference, number| async move {
            if dry_run {
                return Ok(None);
            }
            tracker
                .update_issue_labels(owner, repo, number, update)
                .await
                .map(Some)
        },
        progress,
    )
    .await
}

/// Adds `label` to every issue of the repository matching `predicate`.
///
/// # Errors
///
/// Returns an error only if the issue list cannot be fetched. Per-issue
/// failures are part of the returned result.
#[instrument(skip(tracker, predicate, progress), fields(owner = %owner, repo = %repo, label = %label))]
pub async fn add_label_to_matching<P>(
    tracker: &dyn IssueTracker,
    owner: &str,
    repo: &str,
    label: &str,
    predicate: P,
    options: MutationOptions,
    progress: impl Fn(usize, usize, &str),
) -> Result<MutationResult>
where
    P: Fn(&Issue) -> bool,
{
    let issues = tracker
        .fetch_all_issues(owner, repo)
        .await
        .context("Failed to fetch issues to label")?;
    let targets: Vec<&Issue> = issues.iter().filter(|i| predicate(i)).collect();
    debug!(matching = targets.len(), "Selected issues to label");

    let update = LabelUpdate::add(label);
    let result = apply_to_issues(tracker, owner, repo, &targets, &update, options, progress).await;

    info!(
        succeeded = result.succeeded,
        failed = result.failed,
        skipped = result.skipped,
        "Label add finished"
    );
    Ok(result)
}

/// Removes `label` from every issue of the repository that carries it.
///
/// # Errors
///
/// Returns an error only if the issue list cannot be fetched. Per-issue
/// failures are part of the returned result.
#[instrument(skip(tracker, progress), fields(owner = %owner, repo = %repo, label = %label))]
pub async fn remove_label_from_all(
    tracker: &dyn IssueTracker,
    owner: &str,
    repo: &str,
    label: &str,
    options: MutationOptions,
    progress: impl Fn(usize, usize, &str),
) -> Result<MutationResult> {
    let issues = tracker
        .fetch_all_issues(owner, repo)
        .await
        .context("Failed to fetch issues to unlabel")?;
    let targets: Vec<&Issue> = issues.iter().filter(|i| has_label(i, label)).collect();
    debug!(matching = targets.len(), "Selected issues to unlabel");

    let update = LabelUpdate::remove(label);
    let result = apply_to_issues(tracker, owner, repo, &targets, &update, options, progress).await;

    info!(
        succeeded = result.succeeded,
        failed = result.failed,
        skipped = result.skipped,
        "Label removal finished"
    );
    Ok(result)
}
