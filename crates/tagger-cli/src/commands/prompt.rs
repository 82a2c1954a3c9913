// SPDX-License-Identifier: Apache-2.0

//! Interactive query menu.
//!
//! Every query of a session goes through the same cached tracker, so picking
//! several reports in a row fetches the issue list once.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Select};
use tagger_core::AppConfig;

use super::{Session, issue, label, report};
use crate::cli::OutputContext;
use crate::errors::format_error;
use crate::output;

/// Entries of the query menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Unprocessed,
    AllLabels,
    AreaLabels,
    AreaReport,
    Rank,
    PrioritySnapshot,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 7] = [
        MenuItem::Unprocessed,
        MenuItem::AllLabels,
        MenuItem::AreaLabels,
        MenuItem::AreaReport,
        MenuItem::Rank,
        MenuItem::PrioritySnapshot,
        MenuItem::Quit,
    ];

    fn title(self) -> &'static str {
        match self {
            MenuItem::Unprocessed => "Unprocessed issues",
            MenuItem::AllLabels => "All labels",
            MenuItem::AreaLabels => "Area labels",
            MenuItem::AreaReport => "Area owner report",
            MenuItem::Rank => "Rank issues by engagement",
            MenuItem::PrioritySnapshot => "Priority issue snapshot",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Runs the menu until the user picks quit or presses Esc.
pub async fn run(session: &Session, ctx: &OutputContext, config: &AppConfig) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal. Use the issue, label or report commands instead."
        );
    }

    println!();
    println!(
        "{} {}",
        style("Tagger").bold().cyan(),
        style(session.slug()).bold()
    );
    println!();

    let titles: Vec<&str> = MenuItem::ALL.iter().map(|m| m.title()).collect();
    loop {
        let Some(index) = Select::new()
            .with_prompt("Choose a query")
            .items(&titles)
            .default(0)
            .interact_opt()
            .context("Failed to read menu selection")?
        else {
            break;
        };

        let item = MenuItem::ALL[index];
        if item == MenuItem::Quit {
            break;
        }

        println!("{}", style(format!("*** {} ***", item.title())).dim());
        if let Err(e) = run_item(item, session, ctx, config).await {
            eprintln!("{} {}", style("Error:").red().bold(), format_error(&e));
        }
        println!();
    }

    Ok(())
}

async fn run_item(
    item: MenuItem,
    session: &Session,
    ctx: &OutputContext,
    config: &AppConfig,
) -> Result<()> {
    match item {
        MenuItem::Unprocessed => output::render(&issue::run_unprocessed(session).await?, ctx),
        MenuItem::AllLabels => output::render(&label::run_list(session).await?, ctx),
        MenuItem::AreaLabels => output::render(&label::run_areas(session).await?, ctx),
        MenuItem::AreaReport => output::render(&report::run_areas(session, config).await?, ctx),
        MenuItem::Rank => {
            let labels = ask_labels(config)?;
            output::render(
                &issue::run_rank(session, config, labels, None).await?,
                ctx,
            )
        }
        MenuItem::PrioritySnapshot => {
            output::render(&issue::run_snapshot(session, config, None, None).await?, ctx)
        }
        MenuItem::Quit => Ok(()),
    }
}

/// Asks for the labels to rank by, defaulting to `ranking.labels`.
fn ask_labels(config: &AppConfig) -> Result<Vec<String>> {
    let answer = Input::<String>::new()
        .with_prompt("Labels (comma separated)")
        .default(config.ranking.labels.join(","))
        .allow_empty(true)
        .interact_text()
        .context("Failed to read labels")?;

    Ok(split_labels(&answer))
}

fn split_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_ends_with_quit() {
        assert_eq!(MenuItem::ALL.last(), Some(&MenuItem::Quit));
        assert_eq!(MenuItem::ALL[0], MenuItem::Unprocessed);
    }

    #[test]
    fn test_menu_titles_are_unique() {
        let mut titles: Vec<&str> = MenuItem::ALL.iter().map(|m| m.title()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), MenuItem::ALL.len());
    }

    #[test]
    fn test_split_labels() {
        assert_eq!(
            split_labels(" Type:Feature, Area:Restore ,,"),
            vec!["Type:Feature", "Area:Restore"]
        );
        assert!(split_labels("").is_empty());
    }
}
