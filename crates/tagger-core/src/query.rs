// SPDX-License-Identifier: Apache-2.0

//! Issue and label filters.
//!
//! Everything here works on lists that were already fetched; nothing talks to
//! the network. Results keep the input order.

use crate::types::{Issue, Label};

/// Name prefix of labels applied automatically by the CI pipeline.
///
/// An issue carrying only these labels has not been looked at by a human yet.
pub const PIPELINE_LABEL_PREFIX: &str = "Pipeline";

/// Name prefix of area labels (matched case-insensitively).
pub const AREA_LABEL_PREFIX: &str = "Area:";

/// Returns true if the issue carries a label with exactly this name.
#[must_use]
pub fn has_label(issue: &Issue, name: &str) -> bool {
    issue.labels.iter().any(|l| l.name == name)
}

/// Returns true if the issue carries any label whose id is in `ids`.
#[must_use]
pub fn has_any_label_id(issue: &Issue, ids: &[u64]) -> bool {
    issue.labels.iter().any(|l| ids.contains(&l.id))
}

/// Issues that carry a label with exactly this name.
#[must_use]
pub fn filter_by_label<'a>(issues: &'a [Issue], name: &str) -> Vec<&'a Issue> {
    issues.iter().filter(|i| has_label(i, name)).collect()
}

/// Issues that carry every one of the named labels.
///
/// Name matching is exact and case-sensitive. An empty `label_names` keeps
/// every issue.
///
/// # Examples
///
/// ```
/// use tagger_core::query::filter_by_all_labels;
/// use tagger_core::{Issue, Label};
///
/// let issues = vec![
///     Issue::builder()
///         .number(1)
///         .title("a")
///         .url("u1")
///         .author("x")
///         .labels(vec![Label::new(1, "Type:Bug"), Label::new(2, "Area:Restore")])
///         .build(),
///     Issue::builder()
///         .number(2)
///         .title("b")
///         .url("u2")
///         .author("x")
///         .labels(vec![Label::new(1, "Type:Bug")])
///         .build(),
/// ];
///
/// let hits = filter_by_all_labels(&issues, &["Type:Bug", "Area:Restore"]);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].number, 1);
/// ```
#[must_use]
pub fn filter_by_all_labels<'a, S: AsRef<str>>(
    issues: &'a [Issue],
    label_names: &[S],
) -> Vec<&'a Issue> {
    issues
        .iter()
        .filter(|issue| {
            label_names
                .iter()
                .all(|name| has_label(issue, name.as_ref()))
        })
        .collect()
}

/// Returns true if the issue still needs human triage.
///
/// That is the case when it has no labels at all, or when every label on it
/// was put there by the pipeline.
#[must_use]
pub fn is_unprocessed(issue: &Issue) -> bool {
    issue.labels.is_empty()
        || issue
            .labels
            .iter()
            .all(|l| l.name.starts_with(PIPELINE_LABEL_PREFIX))
}

/// Issues that still need human triage (see [`is_unprocessed`]).
#[must_use]
pub fn filter_unprocessed(issues: &[Issue]) -> Vec<&Issue> {
    issues.iter().filter(|i| is_unprocessed(i)).collect()
}

/// Issues in the named milestone that also satisfy `predicate`.
///
/// The milestone title must match exactly. Issues without a milestone never
/// match.
pub fn filter_by_milestone_and_predicate<'a, P>(
    issues: &'a [Issue],
    milestone_name: &str,
    predicate: P,
) -> Vec<&'a Issue>
where
    P: Fn(&Issue) -> bool,
{
    issues
        .iter()
        .filter(|i| i.milestone.as_deref() == Some(milestone_name))
        .filter(|i| predicate(i))
        .collect()
}

/// Looks up a label by id. Returns `None` when the repository has no such label.
#[must_use]
pub fn find_label_by_id(labels: &[Label], id: u64) -> Option<&Label> {
    labels.iter().find(|l| l.id == id)
}

/// Labels whose name starts with `Area:`, ignoring case.
#[must_use]
pub fn area_labels(labels: &[Label]) -> Vec<&Label> {
    labels
        .iter()
        .filter(|l| {
            l.name
                .get(..AREA_LABEL_PREFIX.len())
                .is_some_and(|p| p.eq_ignore_ascii_case(AREA_LABEL_PREFIX))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(number: u64, labels: &[&str]) -> Issue {
        Issue::builder()
            .number(number)
            .title(format!("Issue {number}"))
            .url(format!("https://github.com/octo/repo/issues/{number}"))
            .author("octocat")
            .labels(
                labels
                    .iter()
                    .enumerate()
                    .map(|(i, n)| Label::new(i as u64 + 1, *n))
                    .collect(),
            )
            .build()
    }

    fn numbers(issues: &[&Issue]) -> Vec<u64> {
        issues.iter().map(|i| i.number).collect()
    }

    #[test]
    fn all_labels_empty_names_keeps_everything_in_order() {
        let issues = vec![issue(3, &["a"]), issue(1, &[]), issue(2, &["b"])];
        let none: [&str; 0] = [];
        let hits = filter_by_all_labels(&issues, &none);
        assert_eq!(numbers(&hits), vec![3, 1, 2]);
    }

    #[test]
    fn all_labels_requires_every_name() {
        let issues = vec![
            issue(1, &["Type:Bug", "Area:Restore"]),
            issue(2, &["Type:Bug"]),
            issue(3, &["Area:Restore"]),
        ];
        let hits = filter_by_all_labels(&issues, &["Type:Bug", "Area:Restore"]);
        assert_eq!(numbers(&hits), vec![1]);
    }

    #[test]
    fn all_labels_is_case_sensitive() {
        let issues = vec![issue(1, &["Type:Bug"])];
        assert!(filter_by_all_labels(&issues, &["type:bug"]).is_empty());
    }

    #[test]
    fn all_labels_is_idempotent() {
        let issues = vec![
            issue(1, &["x", "y"]),
            issue(2, &["x"]),
            issue(3, &["y", "x", "z"]),
        ];
        let once: Vec<Issue> = filter_by_all_labels(&issues, &["x", "y"])
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_by_all_labels(&once, &["x", "y"]);
        assert_eq!(numbers(&twice), vec![1, 3]);
        assert_eq!(twice.len(), once.len());
    }

    #[test]
    fn unprocessed_pipeline_only() {
        let issues = vec![
            issue(1, &["Pipeline:Added"]),
            issue(2, &["Pipeline:Added", "Area:Foo"]),
            issue(3, &[]),
            issue(4, &["Pipeline:Added", "Pipeline:Icebox"]),
        ];
        let hits = filter_unprocessed(&issues);
        assert_eq!(numbers(&hits), vec![1, 3, 4]);
    }

    #[test]
    fn unprocessed_prefix_is_case_sensitive() {
        let issues = vec![issue(1, &["pipeline:Added"])];
        assert!(filter_unprocessed(&issues).is_empty());
    }

    #[test]
    fn milestone_and_predicate() {
        let mut a = issue(1, &["Type:Bug"]);
        a.milestone = Some("6.0".to_string());
        let mut b = issue(2, &[]);
        b.milestone = Some("6.0".to_string());
        let mut c = issue(3, &["Type:Bug"]);
        c.milestone = Some("Backlog".to_string());
        let d = issue(4, &["Type:Bug"]);
        let issues = vec![a, b, c, d];

        let hits =
            filter_by_milestone_and_predicate(&issues, "6.0", |i| has_label(i, "Type:Bug"));
        assert_eq!(numbers(&hits), vec![1]);

        let all_in_milestone = filter_by_milestone_and_predicate(&issues, "6.0", |_| true);
        assert_eq!(numbers(&all_in_milestone), vec![1, 2]);

        assert!(filter_by_milestone_and_predicate(&issues, "7.0", |_| true).is_empty());
    }

    #[test]
    fn single_label_filter() {
        let issues = vec![issue(1, &["priority:1"]), issue(2, &["priority:2"])];
        assert_eq!(numbers(&filter_by_label(&issues, "priority:1")), vec![1]);
    }

    #[test]
    fn label_lookup_by_id() {
        let labels = vec![Label::new(10, "Type:Bug"), Label::new(20, "Type:Feature")];
        assert_eq!(
            find_label_by_id(&labels, 20).map(|l| l.name.as_str()),
            Some("Type:Feature")
        );
        assert!(find_label_by_id(&labels, 30).is_none());
    }

    #[test]
    fn area_labels_ignore_case() {
        let labels = vec![
            Label::new(1, "Area:Restore"),
            Label::new(2, "area:pack"),
            Label::new(3, "Type:Bug"),
            Label::new(4, "Are"),
        ];
        let ids: Vec<u64> = area_labels(&labels).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn any_label_id() {
        let i = issue(1, &["a", "b"]);
        assert!(has_any_label_id(&i, &[2, 99]));
        assert!(!has_any_label_id(&i, &[99]));
    }
}
