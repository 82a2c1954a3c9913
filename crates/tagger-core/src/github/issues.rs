// SPDX-License-Identifier: Apache-2.0

//! REST-backed issue tracker.
//!
//! Lists are fetched page by page (100 per page) until a short page comes
//! back. Reads retry transient failures with exponential backoff; label
//! mutations are sent once.

use anyhow::{Context, Result};
use async_trait::async_trait;
use backon::Retryable;
use octocrab::Octocrab;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::TaggerError;
use crate::retry::{DEFAULT_MAX_RETRIES, is_retryable_anyhow, read_backoff};
use crate::tracker::IssueTracker;
use crate::types::{Comment, Issue, IssueState, Label, LabelUpdate};

/// Page size for list and search endpoints (GitHub maximum).
const PER_PAGE: u32 = 100;

/// The search API never returns more than this many results.
const SEARCH_RESULT_LIMIT: u32 = 1000;

/// Login used when GitHub reports no user (deleted accounts).
const GHOST_LOGIN: &str = "ghost";

/// Lifts an Octocrab failure into [`TaggerError::GitHub`] once retries are over.
fn github_error(err: anyhow::Error) -> anyhow::Error {
    match err.downcast::<octocrab::Error>() {
        Ok(e) => TaggerError::from(e).into(),
        Err(other) => other,
    }
}

#[derive(Debug, Deserialize)]
struct RawUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawMilestone {
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawReactions {
    #[serde(default)]
    total_count: u32,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    number: u64,
    title: String,
    html_url: String,
    #[serde(default)]
    state: String,
    user: Option<RawUser>,
    #[serde(default)]
    assignees: Vec<RawUser>,
    milestone: Option<RawMilestone>,
    #[serde(default)]
    labels: Vec<RawLabel>,
    #[serde(default)]
    comments: u32,
    reactions: Option<RawReactions>,
    pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

impl From<RawIssue> for Issue {
    fn from(raw: RawIssue) -> Self {
        let state = if raw.state.eq_ignore_ascii_case("closed") {
            IssueState::Closed
        } else {
            IssueState::Open
        };

        Issue {
            number: raw.number,
            title: raw.title,
            url: raw.html_url,
            author: raw.user.map_or_else(|| GHOST_LOGIN.to_string(), |u| u.login),
            assignees: raw.assignees.into_iter().map(|u| u.login).collect(),
            milestone: raw.milestone.map(|m| m.title),
            labels: raw
                .labels
                .into_iter()
                .map(|l| Label::new(l.id, l.name))
                .collect(),
            comment_count: raw.comments,
            reaction_count: raw.reactions.unwrap_or_default().total_count,
            state,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawComment {
    user: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total_count: u32,
    items: Vec<RawIssue>,
}

#[derive(Debug, Serialize)]
struct PageParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<&'a str>,
    per_page: u32,
    page: u32,
}

impl<'a> PageParams<'a> {
    fn page(page: u32) -> Self {
        Self {
            state: None,
            q: None,
            per_page: PER_PAGE,
            page,
        }
    }

    fn state(mut self, state: &'a str) -> Self {
        self.state = Some(state);
        self
    }

    fn query(mut self, q: &'a str) -> Self {
        self.q = Some(q);
        self
    }
}

/// Search query for open issues carrying one label.
fn label_search_query(owner: &str, repo: &str, label: &str) -> String {
    format!("repo:{owner}/{repo} is:issue is:open label:\"{label}\"")
}

/// Route for removing one label, with the name percent-encoded.
fn remove_label_route(owner: &str, repo: &str, number: u64, label: &str) -> String {
    let encoded = utf8_percent_encode(label, NON_ALPHANUMERIC);
    format!("/repos/{owner}/{repo}/issues/{number}/labels/{encoded}")
}

/// [`IssueTracker`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubTracker {
    client: Octocrab,
    max_retries: usize,
}

impl GitHubTracker {
    /// Wraps an Octocrab client.
    #[must_use]
    pub fn new(client: Octocrab) -> Self {
        Self {
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Sets how many times a failed read is retried.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// GET with retry on transient failures.
    async fn get_with_retry<T, P>(&self, route: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned + Send,
        P: Serialize + Sync + ?Sized,
    {
        (|| async {
            self.client
                .get::<T, _, _>(route, Some(params))
                .await
                .map_err(|e| anyhow::anyhow!(e))
        })
        .retry(read_backoff(self.max_retries))
        .when(is_retryable_anyhow)
        .notify(|err, dur| {
            warn!(
                error = %err,
                retry_after = ?dur,
                route = %route,
                "Retrying GitHub request"
            );
        })
        .await
        .map_err(github_error)
    }

    /// Fetches every page of a list endpoint.
    async fn get_all_pages<T>(&self, route: &str, state: Option<&str>) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let mut params = PageParams::page(page);
            if let Some(state) = state {
                params = params.state(state);
            }
            let items: Vec<T> = self.get_with_retry(route, &params).await?;
            let len = items.len();
            all.extend(items);
            debug!(page, count = len, "Fetched page");
            if len < PER_PAGE as usize {
                break;
            }
            page += 1;
        }
        Ok(all)
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn fetch_all_issues(&self, owner: &str, repo: &str) -> Result<Vec<Issue>> {
        let route = format!("/repos/{owner}/{repo}/issues");
        let raw: Vec<RawIssue> = self
            .get_all_pages(&route, Some("all"))
            .await
            .with_context(|| format!("Failed to fetch issues from {owner}/{repo}"))?;

        let total = raw.len();
        let issues: Vec<Issue> = raw
            .into_iter()
            .filter(|i| !i.is_pull_request())
            .map(Issue::from)
            .collect();

        debug!(
            total,
            issues = issues.len(),
            "Fetched issues (pull requests dropped)"
        );
        Ok(issues)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, number = number))]
    async fn fetch_all_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Comment>> {
        let route = format!("/repos/{owner}/{repo}/issues/{number}/comments");
        let raw: Vec<RawComment> = self
            .get_all_pages(&route, None)
            .await
            .with_context(|| format!("Failed to fetch comments for issue #{number}"))?;

        let comments: Vec<Comment> = raw
            .into_iter()
            .map(|c| Comment {
                issue_number: number,
                author: c.user.map_or_else(|| GHOST_LOGIN.to_string(), |u| u.login),
            })
            .collect();

        debug!(count = comments.len(), "Fetched comments");
        Ok(comments)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn fetch_all_labels(&self, owner: &str, repo: &str) -> Result<Vec<Label>> {
        let route = format!("/repos/{owner}/{repo}/labels");
        let raw: Vec<RawLabel> = self
            .get_all_pages(&route, None)
            .await
            .with_context(|| format!("Failed to fetch labels from {owner}/{repo}"))?;

        let labels: Vec<Label> = raw.into_iter().map(|l| Label::new(l.id, l.name)).collect();
        debug!(count = labels.len(), "Fetched labels");
        Ok(labels)
    }

    #[instrument(skip(self, update), fields(owner = %owner, repo = %repo, number = number))]
    async fn update_issue_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &LabelUpdate,
    ) -> Result<()> {
        if let Some(label) = &update.add {
            let route = format!("/repos/{owner}/{repo}/issues/{number}/labels");
            let payload = serde_json::json!({ "labels": [label] });
            self.client
                .post::<_, serde_json::Value>(route, Some(&payload))
                .await
                .map_err(TaggerError::from)
                .with_context(|| {
                    format!(
                        "Failed to add label '{label}' to issue #{number} in {owner}/{repo}. \
                         Check that you have write access to the repository."
                    )
                })?;
            debug!(label = %label, "Label added");
        }

        if let Some(label) = &update.remove {
            let route = remove_label_route(owner, repo, number, label);
            self.client
                .delete::<serde_json::Value, _, ()>(route, None::<&()>)
                .await
                .map_err(TaggerError::from)
                .with_context(|| {
                    format!("Failed to remove label '{label}' from issue #{number} in {owner}/{repo}")
                })?;
            debug!(label = %label, "Label removed");
        }

        Ok(())
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, label = %label))]
    async fn search_open_issues_by_label(
        &self,
        owner: &str,
        repo: &str,
        label: &str,
    ) -> Result<Vec<Issue>> {
        let query = label_search_query(owner, repo, label);
        debug!(query = %query, "Searching issues");

        let mut issues = Vec::new();
        let mut page = 1;
        loop {
            let params = PageParams::page(page).query(&query);
            let response: SearchResponse = self
                .get_with_retry("/search/issues", &params)
                .await
                .with_context(|| format!("Failed to search issues in {owner}/{repo}"))?;

            let len = response.items.len();
            issues.extend(
                response
                    .items
                    .into_iter()
                    .filter(|i| !i.is_pull_request())
                    .map(Issue::from),
            );

            let fetched = page * PER_PAGE;
            if len < PER_PAGE as usize
                || fetched >= response.total_count
                || fetched >= SEARCH_RESULT_LIMIT
            {
                break;
            }
            page += 1;
        }

        debug!(count = issues.len(), "Search returned issues");
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUE_JSON: &str = r#"{
        "number": 42,
        "title": "Restore fails behind proxy",
        "html_url": "https://github.com/NuGet/Home/issues/42",
        "state": "open",
        "user": { "login": "octocat" },
        "assignees": [{ "login": "zivkan" }, { "login": "nkolev92" }],
        "milestone": { "title": "Sprint 42" },
        "labels": [
            { "id": 1, "name": "Type:Bug", "color": "ff0000" },
            { "id": 2, "name": "Area:Restore" }
        ],
        "comments": 12,
        "reactions": { "total_count": 7, "+1": 7 }
    }"#;

    #[test]
    fn raw_issue_converts_to_domain() {
        let raw: RawIssue = serde_json::from_str(ISSUE_JSON).unwrap();
        assert!(!raw.is_pull_request());
        let issue = Issue::from(raw);

        assert_eq!(issue.number, 42);
        assert_eq!(issue.author, "octocat");
        assert_eq!(issue.assignees, vec!["zivkan", "nkolev92"]);
        assert_eq!(issue.milestone.as_deref(), Some("Sprint 42"));
        assert_eq!(issue.label_names(), vec!["Type:Bug", "Area:Restore"]);
        assert_eq!(issue.comment_count, 12);
        assert_eq!(issue.reaction_count, 7);
        assert_eq!(issue.state, IssueState::Open);
    }

    #[test]
    fn raw_issue_minimal_fields() {
        let raw: RawIssue = serde_json::from_str(
            r#"{"number": 1, "title": "t", "html_url": "u", "state": "closed", "user": null,
                "milestone": null, "pull_request": {"url": "x"}}"#,
        )
        .unwrap();
        assert!(raw.is_pull_request());
        let issue = Issue::from(raw);
        assert_eq!(issue.author, GHOST_LOGIN);
        assert_eq!(issue.state, IssueState::Closed);
        assert_eq!(issue.reaction_count, 0);
        assert!(issue.labels.is_empty());
    }

    #[test]
    fn search_query_quotes_label() {
        assert_eq!(
            label_search_query("NuGet", "Home", "priority:1"),
            "repo:NuGet/Home is:issue is:open label:\"priority:1\""
        );
    }

    #[test]
    fn remove_route_encodes_label() {
        assert_eq!(
            remove_label_route("NuGet", "Home", 7, "Area: Restore"),
            "/repos/NuGet/Home/issues/7/labels/Area%3A%20Restore"
        );
    }

    #[test]
    fn page_params_serialize() {
        let params = PageParams::page(3).state("all");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "state": "all", "per_page": 100, "page": 3 })
        );
    }
}
