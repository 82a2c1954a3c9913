// SPDX-License-Identifier: Apache-2.0

//! Platform-agnostic workflows for the CLI.
//!
//! Every function takes the tracker as `&dyn IssueTracker`, so callers decide
//! whether requests go straight to GitHub or through a [`CachedTracker`].

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::auth::TokenProvider;
use crate::cache::CachedTracker;
use crate::config::AppConfig;
use crate::github::GitHubTracker;
use crate::github::auth::create_client;
use crate::query::{area_labels, filter_by_all_labels, filter_unprocessed};
use crate::report::{AreaReportSpec, AreaRow, area_report as build_area_report};
use crate::scoring::{InternalAliases, RankedIssue, rank};
use crate::tracker::IssueTracker;
use crate::types::{Issue, Label};

/// Builds a GitHub tracker from the provider's credentials.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn github_tracker(provider: &dyn TokenProvider, config: &AppConfig) -> Result<GitHubTracker> {
    let timeout = Duration::from_secs(config.github.api_timeout_seconds);
    let client = create_client(provider, timeout)?;
    Ok(GitHubTracker::new(client).with_max_retries(config.github.max_retries))
}

/// Builds a GitHub tracker wrapped in the session cache.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn session_tracker(
    provider: &dyn TokenProvider,
    config: &AppConfig,
) -> Result<CachedTracker<GitHubTracker>> {
    let tracker = github_tracker(provider, config)?;
    Ok(CachedTracker::with_ttl_minutes(
        tracker,
        config.cache.ttl_minutes,
    ))
}

/// Ranks the issues carrying all of `labels` by engagement, highest first.
///
/// Comments are fetched one issue at a time.
///
/// # Errors
///
/// Returns an error if the issue list or any comment list cannot be fetched.
#[instrument(skip(tracker, aliases), fields(owner = %owner, repo = %repo))]
pub async fn rank_issues_for_labels(
    tracker: &dyn IssueTracker,
    owner: &str,
    repo: &str,
    labels: &[String],
    aliases: &InternalAliases,
) -> Result<Vec<RankedIssue>> {
    let issues = tracker.fetch_all_issues(owner, repo).await?;
    let matching = filter_by_all_labels(&issues, labels);
    debug!(matching = matching.len(), "Ranking issues");

    let mut ranked = Vec::with_capacity(matching.len());
    for issue in matching {
        let comments = tracker
            .fetch_all_comments(owner, repo, issue.number)
            .await
            .with_context(|| format!("Failed to score issue #{}", issue.number))?;
        ranked.push(RankedIssue::new(issue.clone(), &comments, aliases));
    }

    rank(&mut ranked);
    Ok(ranked)
}

/// Issues that still need human triage.
///
/// # Errors
///
/// Returns an error if the issue list cannot be fetched.
#[instrument(skip(tracker), fields(owner = %owner, repo = %repo))]
pub async fn unprocessed_issues(
    tracker: &dyn IssueTracker,
    owner: &str,
    repo: &str,
) -> Result<Vec<Issue>> {
    let issues = tracker.fetch_all_issues(owner, repo).await?;
    Ok(filter_unprocessed(&issues).into_iter().cloned().collect())
}

/// Every label of the repository.
///
/// # Errors
///
/// Returns an error if the label list cannot be fetched.
pub async fn repo_labels(tracker: &dyn IssueTracker, owner: &str, repo: &str) -> Result<Vec<Label>> {
    tracker.fetch_all_labels(owner, repo).await
}

/// Labels of the repository whose name starts with `Area:`.
///
/// # Errors
///
/// Returns an error if the label list cannot be fetched.
pub async fn repo_area_labels(
    tracker: &dyn IssueTracker,
    owner: &str,
    repo: &str,
) -> Result<Vec<Label>> {
    let labels = tracker.fetch_all_labels(owner, repo).await?;
    Ok(area_labels(&labels).into_iter().cloned().collect())
}

/// Area-owner report over all issues of the repository.
///
/// # Errors
///
/// Returns an error if the issue or label list cannot be fetched.
#[instrument(skip(tracker, spec), fields(owner = %owner, repo = %repo))]
pub async fn area_report(
    tracker: &dyn IssueTracker,
    owner: &str,
    repo: &str,
    spec: &AreaReportSpec,
) -> Result<Vec<AreaRow>> {
    let issues = tracker.fetch_all_issues(owner, repo).await?;
    let labels = tracker.fetch_all_labels(owner, repo).await?;
    Ok(build_area_report(&issues, &labels, spec))
}

/// Open issues carrying `label`, through the search index.
///
/// # Errors
///
/// Returns an error if the search fails.
pub async fn priority_issues(
    tracker: &dyn IssueTracker,
    owner: &str,
    repo: &str,
    label: &str,
) -> Result<Vec<Issue>> {
    tracker.search_open_issues_by_label(owner, repo, label).await
}
