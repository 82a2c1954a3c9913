// SPDX-License-Identifier: Apache-2.0

//! Label listing and batch label changes.

use anyhow::Result;
use tagger_core::query::{has_label, is_unprocessed};
use tagger_core::{
    AppConfig, Issue, MutationOptions, MutationResult, TaggerError, add_label_to_matching, facade,
    remove_label_from_all,
};
use tracing::debug;

use super::types::{LabelAction, LabelMutationResult, LabelsResult};
use super::{Session, confirm_mutation, maybe_progress_bar, maybe_spinner};
use crate::cli::OutputContext;

/// Every label of the repository.
pub async fn run_list(session: &Session) -> Result<LabelsResult> {
    let labels = facade::repo_labels(&session.tracker, &session.owner, &session.repo).await?;
    Ok(LabelsResult {
        repo: session.slug(),
        labels,
    })
}

/// The `Area:` labels of the repository.
pub async fn run_areas(session: &Session) -> Result<LabelsResult> {
    let labels = facade::repo_area_labels(&session.tracker, &session.owner, &session.repo).await?;
    Ok(LabelsResult {
        repo: session.slug(),
        labels,
    })
}

/// Which issues `label add` applies to.
#[derive(Debug, Clone, Default)]
pub struct LabelTarget {
    /// Issues that still need triage.
    pub unprocessed: bool,
    /// Issues carrying all of these labels.
    pub with_labels: Vec<String>,
    /// Issues in this milestone.
    pub milestone: Option<String>,
    /// Every issue.
    pub all: bool,
}

impl LabelTarget {
    /// Returns true if `issue` is selected.
    ///
    /// The milestone narrows whichever other filter is set.
    pub fn matches(&self, issue: &Issue) -> bool {
        if self.all {
            return true;
        }
        if let Some(milestone) = &self.milestone
            && issue.milestone.as_deref() != Some(milestone.as_str())
        {
            return false;
        }
        if self.unprocessed && !is_unprocessed(issue) {
            return false;
        }
        self.with_labels.iter().all(|l| has_label(issue, l))
    }
}

/// A batch label change.
#[derive(Debug, Clone)]
pub enum LabelChange {
    /// Add the label to the targeted issues.
    Add(LabelTarget),
    /// Remove the label from every issue carrying it.
    Remove,
}

impl LabelChange {
    fn action(&self) -> LabelAction {
        match self {
            LabelChange::Add(_) => LabelAction::Add,
            LabelChange::Remove => LabelAction::Remove,
        }
    }

    async fn execute(
        &self,
        session: &Session,
        label: &str,
        options: MutationOptions,
        progress: impl Fn(usize, usize, &str),
    ) -> Result<MutationResult> {
        match self {
            LabelChange::Add(target) => {
                add_label_to_matching(
                    &session.tracker,
                    &session.owner,
                    &session.repo,
                    label,
                    |issue| target.matches(issue),
                    options,
                    progress,
                )
                .await
            }
            LabelChange::Remove => {
                remove_label_from_all(
                    &session.tracker,
                    &session.owner,
                    &session.repo,
                    label,
                    options,
                    progress,
                )
                .await
            }
        }
    }
}

/// Previews `change`, asks for confirmation and applies it.
///
/// The preview is a dry run over the cached issue list, so confirming does
/// not fetch the issues a second time.
pub async fn run_change(
    session: &Session,
    ctx: &OutputContext,
    config: &AppConfig,
    change: &LabelChange,
    label: &str,
    dry_run: bool,
    yes: bool,
) -> Result<LabelMutationResult> {
    let action = change.action();
    let preview_options = MutationOptions {
        concurrency: 1,
        dry_run: true,
    };

    let spinner = maybe_spinner(ctx, "Fetching issues...");
    let preview = change
        .execute(session, label, preview_options, |_, _, _| {})
        .await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    let preview = preview?;
    debug!(matching = preview.total(), %action, "Previewed label change");

    if dry_run || preview.total() == 0 {
        return Ok(LabelMutationResult::from_run(
            session.slug(),
            action,
            label.to_string(),
            dry_run,
            false,
            preview,
        ));
    }

    let prompt = match change {
        LabelChange::Add(_) => format!(
            "Add '{label}' to {} issues in {}?",
            preview.total(),
            session.slug()
        ),
        LabelChange::Remove => format!(
            "Remove '{label}' from {} issues in {}?",
            preview.total(),
            session.slug()
        ),
    };
    if !confirm_mutation(ctx, config, yes, &prompt)? {
        return Ok(LabelMutationResult::from_run(
            session.slug(),
            action,
            label.to_string(),
            false,
            true,
            preview,
        ));
    }

    if !session.authenticated {
        return Err(TaggerError::NotAuthenticated.into());
    }

    let options = MutationOptions {
        concurrency: config.bulk.concurrency,
        dry_run: false,
    };
    let bar = maybe_progress_bar(ctx, config, preview.total());
    let run = change
        .execute(session, label, options, |current, _total, message| {
            if let Some(bar) = &bar {
                bar.set_position(current as u64);
                bar.set_message(message.to_string());
            }
        })
        .await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    Ok(LabelMutationResult::from_run(
        session.slug(),
        action,
        label.to_string(),
        false,
        false,
        run?,
    ))
}
