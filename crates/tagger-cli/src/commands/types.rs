// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers.
//!
//! Command handlers return data instead of printing directly; the `output`
//! module renders them in the selected format.

use serde::Serialize;
use tagger_core::github::auth::TokenSource;
use tagger_core::{AreaRow, BulkOutcome, IssueRef, Label, MutationResult, RankedIssue};

/// Result from the auth status command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AuthStatusResult {
    /// Whether a token was found.
    pub authenticated: bool,
    /// Where the token came from (if found).
    pub method: Option<TokenSource>,
    /// GitHub username (if the token could be checked).
    pub username: Option<String>,
}

/// Result from the unprocessed issues command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UnprocessedResult {
    /// Repository in owner/repo form.
    pub repo: String,
    /// Issues that still need triage, in fetch order.
    pub issues: Vec<IssueRef>,
}

/// Result from the rank command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RankResult {
    /// Repository in owner/repo form.
    pub repo: String,
    /// Labels every ranked issue carries.
    pub labels: Vec<String>,
    /// Ranked issues, highest score first.
    pub issues: Vec<RankedIssue>,
}

/// Result from the snapshot command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SnapshotResult {
    /// Repository in owner/repo form.
    pub repo: String,
    /// Label that was searched for.
    pub label: String,
    /// File the snapshot was written to.
    pub path: String,
    /// Issues written.
    pub count: usize,
}

/// Result from the label list and area label commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LabelsResult {
    /// Repository in owner/repo form.
    pub repo: String,
    /// Labels in repository order.
    pub labels: Vec<Label>,
}

/// Result from the area report command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AreaReportResult {
    /// Repository in owner/repo form.
    pub repo: String,
    /// One row per configured category, in configuration order.
    pub rows: Vec<AreaRow>,
}

/// Which way a label run changes issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAction {
    /// Label added.
    Add,
    /// Label removed.
    Remove,
}

impl std::fmt::Display for LabelAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelAction::Add => write!(f, "add"),
            LabelAction::Remove => write!(f, "remove"),
        }
    }
}

/// Per-issue status of a label run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// The label was changed.
    Updated,
    /// The issue was left alone (dry run or declined).
    Skipped,
    /// The update failed; the run continued.
    Failed,
}

/// One issue of a label run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MutationEntry {
    /// Issue number.
    pub number: u64,
    /// Issue URL.
    pub url: String,
    /// What happened to the issue.
    pub status: EntryStatus,
    /// Failure cause, when failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result from the label add and remove commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LabelMutationResult {
    /// Repository in owner/repo form.
    pub repo: String,
    /// Whether the label was added or removed.
    pub action: LabelAction,
    /// The label.
    pub label: String,
    /// Whether this was a preview.
    pub dry_run: bool,
    /// Whether the user declined (or a non-interactive run lacked `--yes`).
    pub declined: bool,
    /// Issues updated.
    pub succeeded: usize,
    /// Issues whose update failed.
    pub failed: usize,
    /// Issues left alone.
    pub skipped: usize,
    /// Per-issue outcomes, in processing order.
    pub issues: Vec<MutationEntry>,
}

impl LabelMutationResult {
    /// Builds the report of a finished (or previewed) label run.
    pub fn from_run(
        repo: String,
        action: LabelAction,
        label: String,
        dry_run: bool,
        declined: bool,
        run: MutationResult,
    ) -> Self {
        let issues = run
            .outcomes
            .into_iter()
            .map(|(reference, outcome)| {
                let (status, error) = match outcome {
                    BulkOutcome::Success(()) => (EntryStatus::Updated, None),
                    BulkOutcome::Skipped(_) => (EntryStatus::Skipped, None),
                    BulkOutcome::Failed(cause) => (EntryStatus::Failed, Some(cause)),
                };
                MutationEntry {
                    number: reference.number,
                    url: reference.url,
                    status,
                    error,
                }
            })
            .collect();

        Self {
            repo,
            action,
            label,
            dry_run,
            declined,
            succeeded: run.succeeded,
            failed: run.failed,
            skipped: run.skipped,
            issues,
        }
    }

    /// Total issues the run covered.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagger_core::BulkResult;

    fn reference(number: u64) -> IssueRef {
        IssueRef {
            number,
            url: format!("https://github.com/NuGet/Home/issues/{number}"),
        }
    }

    #[test]
    fn test_from_run_maps_outcomes_in_order() {
        let run: MutationResult = BulkResult {
            succeeded: 1,
            failed: 1,
            skipped: 1,
            outcomes: vec![
                (reference(1), BulkOutcome::Success(())),
                (reference(2), BulkOutcome::Failed("HTTP 403".to_string())),
                (reference(3), BulkOutcome::Skipped("dry run".to_string())),
            ],
        };

        let result = LabelMutationResult::from_run(
            "NuGet/Home".to_string(),
            LabelAction::Add,
            "Pipeline:Triage".to_string(),
            false,
            false,
            run,
        );

        assert_eq!(result.total(), 3);
        let statuses: Vec<_> = result.issues.iter().map(|e| e.status.clone()).collect();
        assert_eq!(
            statuses,
            vec![EntryStatus::Updated, EntryStatus::Failed, EntryStatus::Skipped]
        );
        assert_eq!(result.issues[1].error.as_deref(), Some("HTTP 403"));
    }

    #[test]
    fn test_entry_serializes_without_empty_error() {
        let entry = MutationEntry {
            number: 7,
            url: "https://github.com/NuGet/Home/issues/7".to_string(),
            status: EntryStatus::Updated,
            error: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "updated");
        assert!(json.get("error").is_none());
    }
}
