// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Tagger Core
//!
//! Core library for the Tagger CLI - issue ranking, triage queries and label
//! maintenance for GitHub repositories.
//!
//! This crate provides reusable components for:
//! - Filtering fetched issues and labels (label sets, triage state, milestones)
//! - Ranking issues by engagement
//! - Adding or removing a label across every matching issue
//! - Area-owner reports and JSON snapshots
//! - GitHub API integration behind the [`IssueTracker`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tagger_core::{load_config, facade, StaticTokenProvider};
//! use anyhow::Result;
//!
//! # async fn example() -> Result<()> {
//! let config = load_config()?;
//! let tracker = facade::session_tracker(&StaticTokenProvider::default(), &config)?;
//!
//! let labels = vec!["Type:Feature".to_string()];
//! let ranked = facade::rank_issues_for_labels(
//!     &tracker,
//!     "NuGet",
//!     "Home",
//!     &labels,
//!     &config.ranking.aliases(),
//! )
//! .await?;
//!
//! for entry in ranked {
//!     println!("{:.2}\t{}", entry.score, entry.issue.url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`query`] - Issue and label filters
//! - [`scoring`] - Engagement score and ranking
//! - [`mutation`] - Batch label add/remove
//! - [`report`] - Area-owner report
//! - [`github`] - GitHub API (auth, REST tracker)
//! - [`cache`] - Session cache decorator
//! - [`config`] - Configuration loading and paths

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{StaticTokenProvider, TokenProvider};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::TaggerError;

/// Convenience Result type for Tagger operations.
///
/// This is equivalent to `std::result::Result<T, TaggerError>`.
pub type Result<T> = std::result::Result<T, TaggerError>;

// ============================================================================
// Domain Types
// ============================================================================

pub use types::{Comment, Issue, IssueRef, IssueState, Label, LabelUpdate};

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, BulkConfig, CacheConfig, GitHubConfig, RankingConfig, ReportConfig,
    SnapshotConfig, UiConfig, UserConfig, config_dir, config_file_path, load_config,
};

// ============================================================================
// Issue Tracker
// ============================================================================

pub use cache::{CacheEntry, CachedTracker};
pub use github::auth::TokenSource;
pub use github::{GitHubTracker, parse_owner_repo};
pub use tracker::IssueTracker;

// ============================================================================
// Queries and Ranking
// ============================================================================

pub use query::{filter_by_all_labels, filter_by_milestone_and_predicate, filter_unprocessed};
pub use scoring::{InternalAliases, RankedIssue, ScoreBreakdown, extra_comment_impact, score};

// ============================================================================
// Label Mutation
// ============================================================================

pub use bulk::{BulkOutcome, BulkResult, process_bulk};
pub use mutation::{MutationOptions, MutationResult, add_label_to_matching, remove_label_from_all};

// ============================================================================
// Reports
// ============================================================================

pub use report::{AreaCategory, AreaReportSpec, AreaRow};
pub use snapshot::write_snapshot;

// ============================================================================
// Retry Logic
// ============================================================================

pub use retry::{DEFAULT_MAX_RETRIES, is_retryable_anyhow, is_retryable_http, read_backoff};

// ============================================================================
// Utilities
// ============================================================================

pub use utils::{truncate, truncate_with_suffix};

// ============================================================================
// Modules
// ============================================================================

pub mod auth;
pub mod bulk;
pub mod cache;
pub mod config;
pub mod error;
pub mod facade;
pub mod github;
pub mod mutation;
pub mod query;
pub mod report;
pub mod retry;
pub mod scoring;
pub mod snapshot;
pub mod tracker;
pub mod types;
pub mod utils;
