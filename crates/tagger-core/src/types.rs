// SPDX-License-Identifier: Apache-2.0

//! Domain types shared by the query layer, the scorer and the tracker client.

use std::fmt;
use std::hash::{Hash, Hasher};

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Open/closed state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    /// Issue is open.
    #[default]
    Open,
    /// Issue is closed.
    Closed,
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => write!(f, "open"),
            IssueState::Closed => write!(f, "closed"),
        }
    }
}

/// A repository label.
///
/// The id is assigned by the remote tracker and is the only key used for
/// equality and hashing. Two labels with the same id but different names
/// (e.g. after a rename) are the same label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Remote label id.
    pub id: u64,
    /// Display name.
    pub name: String,
}

impl Label {
    /// Create a label.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// An issue as fetched from the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct Issue {
    /// Issue number within the repository.
    pub number: u64,
    /// Issue title.
    #[builder(into)]
    pub title: String,
    /// Browser URL of the issue.
    #[builder(into)]
    pub url: String,
    /// Login of the issue author.
    #[builder(into)]
    pub author: String,
    /// Logins of the assignees.
    #[builder(default)]
    pub assignees: Vec<String>,
    /// Milestone title, if any.
    #[builder(into)]
    pub milestone: Option<String>,
    /// Labels currently on the issue.
    #[builder(default)]
    pub labels: Vec<Label>,
    /// Total number of comments reported by the tracker.
    #[builder(default)]
    pub comment_count: u32,
    /// Total number of reactions on the issue body.
    #[builder(default)]
    pub reaction_count: u32,
    /// Open/closed state.
    #[builder(default)]
    pub state: IssueState,
}

impl Issue {
    /// Reference used when reporting per-issue outcomes.
    #[must_use]
    pub fn reference(&self) -> IssueRef {
        IssueRef {
            number: self.number,
            url: self.url.clone(),
        }
    }

    /// Label names in tracker order.
    #[must_use]
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }
}

/// A comment on an issue. Only the author matters for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Number of the issue the comment belongs to.
    pub issue_number: u64,
    /// Login of the comment author.
    pub author: String,
}

/// Short reference to an issue: number plus browser URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRef {
    /// Issue number.
    pub number: u64,
    /// Browser URL.
    pub url: String,
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({})", self.number, self.url)
    }
}

/// A label change sent back to the tracker for a single issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelUpdate {
    /// Label name to add.
    pub add: Option<String>,
    /// Label name to remove.
    pub remove: Option<String>,
}

impl LabelUpdate {
    /// Update that adds one label.
    pub fn add(label: impl Into<String>) -> Self {
        Self {
            add: Some(label.into()),
            remove: None,
        }
    }

    /// Update that removes one label.
    pub fn remove(label: impl Into<String>) -> Self {
        Self {
            add: None,
            remove: Some(label.into()),
        }
    }

    /// True when the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_none() && self.remove.is_none()
    }
}
