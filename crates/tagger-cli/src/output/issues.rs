// SPDX-License-Identifier: Apache-2.0

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use console::style;
use std::io::{self, Write};
use tagger_core::utils::{escape_markdown_cell, format_score, truncate};

use crate::cli::OutputContext;
use crate::commands::types::{RankResult, SnapshotResult, UnprocessedResult};

use super::Renderable;

/// Titles longer than this are cut in the text table.
const TITLE_WIDTH: usize = 60;

impl Renderable for UnprocessedResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        if self.issues.is_empty() {
            writeln!(w, "{}", style("No unprocessed issues.").green())?;
            return Ok(());
        }
        for issue in &self.issues {
            writeln!(w, "{}", issue.url)?;
        }
        if ctx.verbose {
            writeln!(
                w,
                "{}",
                style(format!("{} unprocessed issues in {}", self.issues.len(), self.repo)).dim()
            )?;
        }
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(
            w,
            "## Unprocessed issues: {} ({})\n",
            self.repo,
            self.issues.len()
        )?;
        for issue in &self.issues {
            writeln!(w, "- [#{}]({})", issue.number, issue.url)?;
        }
        Ok(())
    }
}

impl Renderable for RankResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        if self.issues.is_empty() {
            writeln!(
                w,
                "{}",
                style(format!(
                    "No issues carry all of: {}",
                    self.labels.join(", ")
                ))
                .yellow()
            )?;
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_header(vec!["Link", "Title", "Assignee", "Milestone", "Score"]);
        if ctx.is_tty {
            table.set_content_arrangement(ContentArrangement::Dynamic);
        }

        for entry in &self.issues {
            table.add_row(vec![
                Cell::new(&entry.issue.url),
                Cell::new(truncate(&entry.issue.title, TITLE_WIDTH)),
                Cell::new(entry.assignee_display()),
                Cell::new(entry.issue.milestone.as_deref().unwrap_or("")),
                Cell::new(format_score(entry.score)).set_alignment(CellAlignment::Right),
            ]);
        }

        writeln!(w, "{table}")
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "| Link | Title | Assignee | Milestone | Score |")?;
        writeln!(w, "|---|---|---|---|---:|")?;
        for entry in &self.issues {
            writeln!(
                w,
                "| {} | {} | {} | {} | {} |",
                entry.issue.url,
                escape_markdown_cell(&entry.issue.title),
                escape_markdown_cell(&entry.assignee_display()),
                escape_markdown_cell(entry.issue.milestone.as_deref().unwrap_or("")),
                format_score(entry.score)
            )?;
        }
        Ok(())
    }
}

impl Renderable for SnapshotResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(
            w,
            "{} Wrote {} open '{}' issues from {} to {}",
            style("*").green().bold(),
            self.count,
            self.label,
            self.repo,
            style(&self.path).cyan()
        )
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(
            w,
            "Wrote {} open `{}` issues from {} to `{}`",
            self.count, self.label, self.repo, self.path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{markdown, text};
    use super::*;
    use tagger_core::scoring::rank;
    use tagger_core::{Issue, IssueRef, RankedIssue, ScoreBreakdown};

    fn ranked(number: u64, score: f64) -> RankedIssue {
        RankedIssue {
            issue: Issue::builder()
                .number(number)
                .title(format!("Issue {number} | pipes"))
                .url(format!("https://github.com/NuGet/Home/issues/{number}"))
                .author("reporter")
                .assignees(vec!["nkolev92".to_string(), "zivkan".to_string()])
                .maybe_milestone(Some("17.9"))
                .build(),
            score,
            breakdown: ScoreBreakdown {
                unique_commenters: 0,
                reactions: 0,
                internal_commenters: 0,
                extra_comment_impact: score,
            },
        }
    }

    fn result(scores: &[f64]) -> RankResult {
        let mut issues: Vec<RankedIssue> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| ranked(i as u64 + 1, *s))
            .collect();
        rank(&mut issues);
        RankResult {
            repo: "NuGet/Home".to_string(),
            labels: vec!["Type:Feature".to_string()],
            issues,
        }
    }

    #[test]
    fn test_markdown_rows_sorted_by_score() {
        let out = markdown(&result(&[3.0, 7.5, 1.2]));
        let rows: Vec<&str> = out.lines().skip(2).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].ends_with("| 7.50 |"));
        assert!(rows[1].ends_with("| 3.00 |"));
        assert!(rows[2].ends_with("| 1.20 |"));
    }

    #[test]
    fn test_markdown_escapes_cells() {
        let out = markdown(&result(&[1.0]));
        assert!(out.contains("Issue 1 \\| pipes"));
        assert!(out.contains("| nkolev92,zivkan | 17.9 |"));
    }

    #[test]
    fn test_text_table_has_headers_and_order() {
        let out = text(&result(&[3.0, 7.5, 1.2]));
        for header in ["Link", "Title", "Assignee", "Milestone", "Score"] {
            assert!(out.contains(header), "missing {header}");
        }
        let high = out.find("7.50").expect("7.50 rendered");
        let mid = out.find("3.00").expect("3.00 rendered");
        let low = out.find("1.20").expect("1.20 rendered");
        assert!(high < mid && mid < low);
    }

    #[test]
    fn test_text_empty_rank() {
        let out = text(&result(&[]));
        assert!(out.contains("No issues carry all of: Type:Feature"));
    }

    #[test]
    fn test_unprocessed_prints_urls() {
        let result = UnprocessedResult {
            repo: "NuGet/Home".to_string(),
            issues: vec![
                IssueRef {
                    number: 4,
                    url: "https://github.com/NuGet/Home/issues/4".to_string(),
                },
                IssueRef {
                    number: 9,
                    url: "https://github.com/NuGet/Home/issues/9".to_string(),
                },
            ],
        };
        assert_eq!(
            text(&result),
            "https://github.com/NuGet/Home/issues/4\nhttps://github.com/NuGet/Home/issues/9\n"
        );
        assert!(markdown(&result).contains("- [#9](https://github.com/NuGet/Home/issues/9)"));
    }
}
