// SPDX-License-Identifier: Apache-2.0

//! TTL-based session cache for issue and label lists.
//!
//! [`CachedTracker`] wraps another [`IssueTracker`] and keeps the last issue
//! and label list fetched for each repository. Comments and search results
//! always go to the inner tracker. A successful label update drops the cached
//! issue list of that repository.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::tracker::IssueTracker;
use crate::types::{Comment, Issue, Label, LabelUpdate};

/// Default time-to-live for cached lists.
pub const DEFAULT_TTL_MINUTES: i64 = 60;

/// A cached entry with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached data.
    pub data: T,
    /// When the entry was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Create a new cache entry.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Check if this entry is still valid based on TTL.
    ///
    /// # Returns
    ///
    /// `true` if the entry is within its TTL, `false` if expired.
    pub fn is_valid(&self, ttl: Duration) -> bool {
        let now = Utc::now();
        now.signed_duration_since(self.cached_at) < ttl
    }
}

/// Generate a cache key for a repository.
#[must_use]
pub fn cache_key(owner: &str, repo: &str) -> String {
    format!("{owner}/{repo}")
}

type Slot<T> = Mutex<HashMap<String, CacheEntry<Vec<T>>>>;

/// Returns a clone of the cached list if it is still fresh.
async fn lookup<T: Clone>(slot: &Slot<T>, key: &str, ttl: Duration) -> Option<Vec<T>> {
    let map = slot.lock().await;
    map.get(key)
        .filter(|entry| entry.is_valid(ttl))
        .map(|entry| entry.data.clone())
}

async fn store<T>(slot: &Slot<T>, key: String, data: Vec<T>) {
    slot.lock().await.insert(key, CacheEntry::new(data));
}

/// [`IssueTracker`] decorator that caches issue and label lists.
pub struct CachedTracker<T> {
    inner: T,
    ttl: Duration,
    issues: Slot<Issue>,
    labels: Slot<Label>,
}

impl<T: IssueTracker> CachedTracker<T> {
    /// Wraps `inner` with the given time-to-live.
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            issues: Mutex::new(HashMap::new()),
            labels: Mutex::new(HashMap::new()),
        }
    }

    /// Wraps `inner` with a TTL in minutes.
    pub fn with_ttl_minutes(inner: T, minutes: i64) -> Self {
        Self::new(inner, Duration::minutes(minutes))
    }

    /// The wrapped tracker.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Drops every cached list.
    pub async fn clear(&self) {
        self.issues.lock().await.clear();
        self.labels.lock().await.clear();
    }
}

#[async_trait]
impl<T: IssueTracker> IssueTracker for CachedTracker<T> {
    async fn fetch_all_issues(&self, owner: &str, repo: &str) -> Result<Vec<Issue>> {
        let key = cache_key(owner, repo);
        if let Some(issues) = lookup(&self.issues, &key, self.ttl).await {
            debug!(key = %key, count = issues.len(), "Issue cache hit");
            return Ok(issues);
        }

        let issues = self.inner.fetch_all_issues(owner, repo).await?;
        store(&self.issues, key, issues.clone()).await;
        Ok(issues)
    }

    async fn fetch_all_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Comment>> {
        self.inner.fetch_all_comments(owner, repo, number).await
    }

    async fn fetch_all_labels(&self, owner: &str, repo: &str) -> Result<Vec<Label>> {
        let key = cache_key(owner, repo);
        if let Some(labels) = lookup(&self.labels, &key, self.ttl).await {
            debug!(key = %key, count = labels.len(), "Label cache hit");
            return Ok(labels);
        }

        let labels = self.inner.fetch_all_labels(owner, repo).await?;
        store(&self.labels, key, labels.clone()).await;
        Ok(labels)
    }

    async fn update_issue_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &LabelUpdate,
    ) -> Result<()> {
        self.inner
            .update_issue_labels(owner, repo, number, update)
            .await?;
        let key = cache_key(owner, repo);
        if self.issues.lock().await.remove(&key).is_some() {
            debug!(key = %key, "Issue cache invalidated");
        }
        Ok(())
    }

    async fn search_open_issues_by_label(
        &self,
        owner: &str,
        repo: &str,
        label: &str,
    ) -> Result<Vec<Issue>> {
        self.inner
            .search_open_issues_by_label(owner, repo, label)
            .await
    }
}
