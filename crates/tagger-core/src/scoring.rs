// SPDX-License-Identifier: Apache-2.0

//! Engagement-based issue ranking.
//!
//! An issue's score combines the number of unique commenters, the reactions
//! on the issue, a small penalty for comments coming from the team itself and
//! a graduated bonus for long threads. The formula has to stay stable so that
//! rankings remain comparable with earlier reports.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{Comment, Issue};

/// Penalty per internal commenter.
const INTERNAL_COMMENTER_PENALTY: f64 = 0.25;

/// Logins of team members whose comments do not count as outside interest.
///
/// Matching ignores ASCII case, like GitHub logins do.
#[derive(Debug, Clone, Default)]
pub struct InternalAliases(HashSet<String>);

impl InternalAliases {
    /// Build an alias set from logins.
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            aliases
                .into_iter()
                .map(|a| a.as_ref().to_ascii_lowercase())
                .collect(),
        )
    }

    /// Returns true if the login belongs to the team.
    #[must_use]
    pub fn contains(&self, login: &str) -> bool {
        self.0.contains(&login.to_ascii_lowercase())
    }

    /// Number of distinct aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no aliases are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The individual terms that make up a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Distinct commenters counted towards the score.
    pub unique_commenters: usize,
    /// Reactions on the issue.
    pub reactions: u32,
    /// Counted commenters that are team members.
    pub internal_commenters: usize,
    /// Long-thread bonus from [`extra_comment_impact`].
    pub extra_comment_impact: f64,
}

impl ScoreBreakdown {
    /// Final score.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total(&self) -> f64 {
        self.unique_commenters as f64 + f64::from(self.reactions)
            - self.internal_commenters as f64 * INTERNAL_COMMENTER_PENALTY
            + self.extra_comment_impact
    }
}

/// An issue together with its score.
#[derive(Debug, Clone, Serialize)]
pub struct RankedIssue {
    /// The scored issue.
    pub issue: Issue,
    /// Final score.
    pub score: f64,
    /// Terms behind the score.
    pub breakdown: ScoreBreakdown,
}

impl RankedIssue {
    /// Score an issue and keep the result.
    #[must_use]
    pub fn new(issue: Issue, comments: &[Comment], aliases: &InternalAliases) -> Self {
        let breakdown = score_breakdown(&issue, comments, aliases);
        Self {
            score: breakdown.total(),
            issue,
            breakdown,
        }
    }

    /// Assignee logins joined with commas.
    #[must_use]
    pub fn assignee_display(&self) -> String {
        self.issue.assignees.join(",")
    }
}

/// Bonus for comment threads that are much longer than their commenter count.
///
/// With `diff = total_comments - unique_commenters`, the first 10 extra
/// comments after the first 10 are worth 0.25 each, the next 10 are worth 0.10
/// each and every further one 0.05. A negative `diff` yields 0.
///
/// # Examples
///
/// ```
/// use tagger_core::scoring::extra_comment_impact;
///
/// assert_eq!(extra_comment_impact(5, 5), 0.0);
/// assert_eq!(extra_comment_impact(25, 5), 2.5);
/// assert!((extra_comment_impact(45, 5) - 4.0).abs() < 1e-9);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn extra_comment_impact(total_comments: u32, unique_commenters: usize) -> f64 {
    let diff = i64::from(total_comments) - unique_commenters as i64;

    let tens = (diff - 10).clamp(0, 10) as f64 * 0.25;
    let twenties = (diff - 20).clamp(0, 10) as f64 * 0.10;
    let thirties = (diff - 30).max(0) as f64 * 0.05;

    tens + twenties + thirties
}

/// Distinct commenters that count towards the score, in first-seen order.
///
/// Only comments written by the issue author are kept before counting, so the
/// result holds at most one login. Rankings published so far were computed
/// this way.
fn counted_commenters<'a>(issue: &Issue, comments: &'a [Comment]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    comments
        .iter()
        .map(|c| c.author.as_str())
        .filter(|login| seen.insert(*login))
        .filter(|login| *login == issue.author)
        .collect()
}

/// Compute every term of the score for one issue.
#[must_use]
pub fn score_breakdown(
    issue: &Issue,
    comments: &[Comment],
    aliases: &InternalAliases,
) -> ScoreBreakdown {
    let commenters = counted_commenters(issue, comments);
    let unique_commenters = commenters.len();

    let internal_commenters = if aliases.contains(&issue.author) {
        0
    } else {
        commenters.iter().filter(|c| aliases.contains(c)).count()
    };

    ScoreBreakdown {
        unique_commenters,
        reactions: issue.reaction_count,
        internal_commenters,
        extra_comment_impact: extra_comment_impact(issue.comment_count, unique_commenters),
    }
}

/// Score one issue from its comments.
#[must_use]
pub fn score(issue: &Issue, comments: &[Comment], aliases: &InternalAliases) -> f64 {
    score_breakdown(issue, comments, aliases).total()
}

/// Sort ranked issues by descending score. Ties keep their input order.
pub fn rank(ranked: &mut [RankedIssue]) {
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
}
