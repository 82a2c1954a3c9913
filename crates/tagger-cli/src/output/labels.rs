// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};
use tagger_core::utils::escape_markdown_cell;

use crate::cli::OutputContext;
use crate::commands::types::{EntryStatus, LabelAction, LabelMutationResult, LabelsResult};

use super::Renderable;

impl Renderable for LabelsResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "(ID\tName)")?;
        for label in &self.labels {
            writeln!(w, "{}\t{}", label.id, label.name)?;
        }
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "| ID | Name |")?;
        writeln!(w, "|---:|---|")?;
        for label in &self.labels {
            writeln!(w, "| {} | {} |", label.id, escape_markdown_cell(&label.name))?;
        }
        Ok(())
    }
}

impl LabelMutationResult {
    fn headline(&self) -> String {
        let direction = match self.action {
            LabelAction::Add => "to",
            LabelAction::Remove => "from",
        };
        format!(
            "{} '{}' {direction} {} issues in {}",
            self.action,
            self.label,
            self.total(),
            self.repo
        )
    }
}

impl Renderable for LabelMutationResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        if self.total() == 0 {
            writeln!(
                w,
                "{}",
                style(format!("No matching issues in {}.", self.repo)).yellow()
            )?;
            return Ok(());
        }

        if self.dry_run || self.declined {
            writeln!(w, "Would {}:", self.headline())?;
            for entry in &self.issues {
                writeln!(w, "  {}", entry.url)?;
            }
            writeln!(w)?;
            let message = if self.dry_run {
                "Dry run - labels not changed."
            } else {
                "Labels not changed. Use --yes to apply without a prompt."
            };
            writeln!(w, "{}", style(message).yellow())?;
            return Ok(());
        }

        for entry in &self.issues {
            if entry.status == EntryStatus::Failed {
                writeln!(
                    w,
                    "{} #{} ({}): {}",
                    style("x").red().bold(),
                    entry.number,
                    entry.url,
                    entry.error.as_deref().unwrap_or("unknown error")
                )?;
            }
        }

        writeln!(w)?;
        writeln!(w, "{}", style("Label Summary").bold().green())?;
        writeln!(w, "{}", style("=".repeat(13)).dim())?;
        writeln!(w, "  Succeeded: {}", style(self.succeeded).green())?;
        writeln!(w, "  Failed:    {}", style(self.failed).red())?;
        writeln!(w, "  Skipped:   {}", style(self.skipped).yellow())?;
        writeln!(w, "  Total:     {}", self.total())?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        let title = if self.dry_run || self.declined {
            format!("Would {}", self.headline())
        } else {
            let mut headline = self.headline();
            headline[..1].make_ascii_uppercase();
            headline
        };
        writeln!(w, "## {title}\n")?;
        writeln!(w, "| Issue | Status | Error |")?;
        writeln!(w, "|---|---|---|")?;
        for entry in &self.issues {
            let status = match entry.status {
                EntryStatus::Updated => "updated",
                EntryStatus::Skipped => "skipped",
                EntryStatus::Failed => "failed",
            };
            writeln!(
                w,
                "| [#{}]({}) | {status} | {} |",
                entry.number,
                entry.url,
                escape_markdown_cell(entry.error.as_deref().unwrap_or(""))
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{markdown, text};
    use super::*;
    use crate::commands::types::MutationEntry;
    use tagger_core::Label;

    fn entry(number: u64, status: EntryStatus, error: Option<&str>) -> MutationEntry {
        MutationEntry {
            number,
            url: format!("https://github.com/NuGet/Home/issues/{number}"),
            status,
            error: error.map(str::to_string),
        }
    }

    fn mutation(dry_run: bool, declined: bool, issues: Vec<MutationEntry>) -> LabelMutationResult {
        let count = |s: EntryStatus| issues.iter().filter(|e| e.status == s).count();
        LabelMutationResult {
            repo: "NuGet/Home".to_string(),
            action: LabelAction::Remove,
            label: "Pipeline:Triage".to_string(),
            dry_run,
            declined,
            succeeded: count(EntryStatus::Updated),
            failed: count(EntryStatus::Failed),
            skipped: count(EntryStatus::Skipped),
            issues,
        }
    }

    #[test]
    fn test_labels_text_listing() {
        let result = LabelsResult {
            repo: "NuGet/Home".to_string(),
            labels: vec![Label::new(630_044_219, "Area:Restore")],
        };
        assert_eq!(text(&result), "(ID\tName)\n630044219\tArea:Restore\n");
    }

    #[test]
    fn test_summary_lists_failures() {
        let result = mutation(
            false,
            false,
            vec![
                entry(1, EntryStatus::Updated, None),
                entry(3, EntryStatus::Failed, Some("HTTP 404 Not Found")),
                entry(5, EntryStatus::Updated, None),
            ],
        );
        let out = text(&result);
        assert!(out.contains("#3 (https://github.com/NuGet/Home/issues/3): HTTP 404 Not Found"));
        assert!(out.contains("Succeeded: 2"));
        assert!(out.contains("Failed:    1"));
        assert!(out.contains("Total:     3"));
    }

    #[test]
    fn test_dry_run_lists_targets() {
        let result = mutation(true, false, vec![entry(7, EntryStatus::Skipped, None)]);
        let out = text(&result);
        assert!(out.contains("Would remove 'Pipeline:Triage' from 1 issues in NuGet/Home"));
        assert!(out.contains("https://github.com/NuGet/Home/issues/7"));
        assert!(out.contains("Dry run"));
    }

    #[test]
    fn test_declined_mentions_yes() {
        let result = mutation(false, true, vec![entry(7, EntryStatus::Skipped, None)]);
        assert!(text(&result).contains("--yes"));
    }

    #[test]
    fn test_no_matches() {
        let result = mutation(false, false, Vec::new());
        assert!(text(&result).contains("No matching issues in NuGet/Home."));
    }

    #[test]
    fn test_markdown_table() {
        let result = mutation(
            false,
            false,
            vec![entry(3, EntryStatus::Failed, Some("a|b"))],
        );
        let out = markdown(&result);
        assert!(out.starts_with("## Remove 'Pipeline:Triage' from 1 issues in NuGet/Home"));
        assert!(out.contains("| [#3](https://github.com/NuGet/Home/issues/3) | failed | a\\|b |"));
    }
}
