// SPDX-License-Identifier: Apache-2.0

//! Issue queries: unprocessed list, engagement ranking, priority snapshot.

use std::path::PathBuf;

use anyhow::Result;
use tagger_core::snapshot::default_path;
use tagger_core::{AppConfig, facade, write_snapshot};
use tracing::info;

use super::Session;
use super::types::{RankResult, SnapshotResult, UnprocessedResult};

/// Issues that still need triage.
pub async fn run_unprocessed(session: &Session) -> Result<UnprocessedResult> {
    let issues = facade::unprocessed_issues(&session.tracker, &session.owner, &session.repo).await?;

    Ok(UnprocessedResult {
        repo: session.slug(),
        issues: issues.iter().map(tagger_core::Issue::reference).collect(),
    })
}

/// Ranks issues carrying all `labels` (or `ranking.labels` when none are given).
pub async fn run_rank(
    session: &Session,
    config: &AppConfig,
    labels: Vec<String>,
    limit: Option<usize>,
) -> Result<RankResult> {
    let labels = if labels.is_empty() {
        config.ranking.labels.clone()
    } else {
        labels
    };

    let mut ranked = facade::rank_issues_for_labels(
        &session.tracker,
        &session.owner,
        &session.repo,
        &labels,
        &config.ranking.aliases(),
    )
    .await?;

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    Ok(RankResult {
        repo: session.slug(),
        labels,
        issues: ranked,
    })
}

/// Writes the open issues carrying `label` (or `report.priority_label`) to JSON.
pub async fn run_snapshot(
    session: &Session,
    config: &AppConfig,
    label: Option<String>,
    out: Option<PathBuf>,
) -> Result<SnapshotResult> {
    let label = label.unwrap_or_else(|| config.report.priority_label.clone());
    let path = out.unwrap_or_else(|| default_path(&config.snapshot.dir, &session.repo));

    let issues =
        facade::priority_issues(&session.tracker, &session.owner, &session.repo, &label).await?;
    write_snapshot(&path, &issues)?;
    info!(count = issues.len(), path = %path.display(), "Snapshot written");

    Ok(SnapshotResult {
        repo: session.slug(),
        label,
        path: path.display().to_string(),
        count: issues.len(),
    })
}
