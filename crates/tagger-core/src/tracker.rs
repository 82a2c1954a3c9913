// SPDX-License-Identifier: Apache-2.0

//! Issue tracker abstraction.
//!
//! Workflows in [`crate::facade`] and [`crate::mutation`] only talk to a
//! tracker through this trait, so they run the same against GitHub, the
//! session cache, or an in-memory fake in tests.

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{Comment, Issue, Label, LabelUpdate};

/// Remote issue tracker operations needed by Tagger.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetches every issue of the repository, in all states and across all pages.
    async fn fetch_all_issues(&self, owner: &str, repo: &str) -> Result<Vec<Issue>>;

    /// Fetches every comment on one issue.
    async fn fetch_all_comments(&self, owner: &str, repo: &str, number: u64)
    -> Result<Vec<Comment>>;

    /// Fetches every label defined in the repository.
    async fn fetch_all_labels(&self, owner: &str, repo: &str) -> Result<Vec<Label>>;

    /// Adds and/or removes one label on one issue.
    async fn update_issue_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &LabelUpdate,
    ) -> Result<()>;

    /// Open issues carrying `label`, through the search index.
    ///
    /// Search results may lag behind the list endpoints.
    async fn search_open_issues_by_label(
        &self,
        owner: &str,
        repo: &str,
        label: &str,
    ) -> Result<Vec<Issue>>;
}
