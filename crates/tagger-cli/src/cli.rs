// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for Tagger.
//!
//! Uses clap's derive API for declarative CLI parsing with hierarchical
//! noun-verb subcommands.

use std::io::IsTerminal;

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Extended help text for the generate subcommand with shell-specific examples.
const COMPLETION_GENERATE_HELP: &str = r#"EXAMPLES

  bash
    Add to ~/.bashrc or ~/.bash_profile:
      eval "$(tagger completion generate bash)"

  zsh
    Generate completion file:
      mkdir -p ~/.zsh/completions
      tagger completion generate zsh > ~/.zsh/completions/_tagger

    Add to ~/.zshrc (before compinit):
      fpath=(~/.zsh/completions $fpath)
      autoload -U compinit && compinit -i

  fish
    Generate completion file:
      tagger completion generate fish > ~/.config/fish/completions/tagger.fish

  PowerShell
    Add to $PROFILE:
      tagger completion generate powershell | Out-String | Invoke-Expression
"#;

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// YAML output for programmatic consumption
    Yaml,
    /// Markdown output for GitHub comments and wiki pages
    Markdown,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json, yaml, markdown)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, progress)
    pub quiet: bool,
    /// Enable verbose output
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors, prompts) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// Tagger - issue ranking, triage reports and label maintenance for GitHub.
///
/// Ranks issues by community engagement, lists issues that still need
/// triage and adds or removes labels across many issues at once.
#[derive(Parser)]
#[command(name = "tagger")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json, yaml, markdown)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners, progress)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (info-level logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Repository in owner/repo format (defaults to user.default_repo)
    #[arg(long, short = 'r', global = true)]
    pub repo: Option<String>,

    /// GitHub personal access token (overrides GH_TOKEN, GITHUB_TOKEN and gh)
    #[arg(long, global = true)]
    pub pat: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Query and rank issues
    #[command(subcommand)]
    Issue(IssueCommand),

    /// List labels and add or remove them across issues
    #[command(subcommand)]
    Label(LabelCommand),

    /// Summary reports
    #[command(subcommand)]
    Report(ReportCommand),

    /// Interactive menu over the reports (shares one session cache)
    Prompt,

    /// Show GitHub authentication status
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Generate or install shell completion scripts
    #[command(subcommand)]
    Completion(CompletionCommand),
}

/// Issue subcommands
#[derive(Subcommand)]
pub enum IssueCommand {
    /// List issues that still need triage
    Unprocessed,

    /// Rank issues carrying all given labels by engagement
    Rank {
        /// Label the issue must carry (repeatable; defaults to ranking.labels)
        #[arg(long = "label", short = 'l', value_name = "LABEL")]
        labels: Vec<String>,

        /// Show only the first N ranked issues
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Write the open issues carrying a label to a JSON file
    Snapshot {
        /// Label to search for (defaults to report.priority_label)
        #[arg(long, short = 'l')]
        label: Option<String>,

        /// Output file (defaults to <snapshot.dir>/<repo>-issues.json)
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
}

/// Label subcommands
#[derive(Subcommand)]
pub enum LabelCommand {
    /// List every label with its id
    List,

    /// List the Area: labels
    Areas,

    /// Add a label to every matching issue
    #[command(group(
        ArgGroup::new("target")
            .required(true)
            .multiple(true)
            .args(["unprocessed", "with_labels", "milestone", "all"])
    ))]
    Add {
        /// Label to add
        label: String,

        /// Target issues that still need triage
        #[arg(long, conflicts_with = "with_labels")]
        unprocessed: bool,

        /// Target issues carrying all of these labels (repeatable)
        #[arg(long = "with-label", value_name = "LABEL")]
        with_labels: Vec<String>,

        /// Target issues in this milestone (combines with the other filters)
        #[arg(long)]
        milestone: Option<String>,

        /// Target every issue of the repository
        #[arg(long, conflicts_with_all = ["unprocessed", "with_labels", "milestone"])]
        all: bool,

        /// Preview the affected issues without changing them
        #[arg(long)]
        dry_run: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Remove a label from every issue carrying it
    Remove {
        /// Label to remove (exact name)
        label: String,

        /// Preview the affected issues without changing them
        #[arg(long)]
        dry_run: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommand {
    /// Issue counts per area category, with missing type labels
    Areas,
}

/// Authentication subcommands
#[derive(Subcommand)]
pub enum AuthCommand {
    /// Show where the GitHub token comes from
    Status,
}

/// Completion subcommands
#[derive(Subcommand)]
pub enum CompletionCommand {
    /// Generate completion script for a shell (output to stdout)
    #[command(after_long_help = COMPLETION_GENERATE_HELP)]
    Generate {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Install completion script to standard location
    Install {
        /// Shell to install completions for (auto-detected from $SHELL if not provided)
        #[arg(long, value_enum)]
        shell: Option<Shell>,

        /// Preview installation without writing files
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_label_add_requires_target() {
        let result = Cli::try_parse_from(["tagger", "label", "add", "Pipeline:Triage"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_label_add_all_conflicts_with_filters() {
        let result = Cli::try_parse_from([
            "tagger",
            "label",
            "add",
            "Pipeline:Triage",
            "--all",
            "--unprocessed",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_label_add_milestone_with_labels() {
        let cli = Cli::try_parse_from([
            "tagger",
            "label",
            "add",
            "Area:Restore",
            "--milestone",
            "Sprint 42",
            "--with-label",
            "Type:Bug",
            "--with-label",
            "Functionality:Restore",
        ])
        .expect("should parse");

        let Commands::Label(LabelCommand::Add {
            label,
            with_labels,
            milestone,
            ..
        }) = cli.command
        else {
            panic!("expected label add");
        };
        assert_eq!(label, "Area:Restore");
        assert_eq!(with_labels, vec!["Type:Bug", "Functionality:Restore"]);
        assert_eq!(milestone.as_deref(), Some("Sprint 42"));
    }

    #[test]
    fn test_global_repo_after_subcommand() {
        let cli = Cli::try_parse_from(["tagger", "issue", "unprocessed", "--repo", "NuGet/Home"])
            .expect("should parse");
        assert_eq!(cli.repo.as_deref(), Some("NuGet/Home"));
    }

    #[test]
    fn test_rank_repeatable_labels() {
        let cli = Cli::try_parse_from([
            "tagger",
            "issue",
            "rank",
            "-l",
            "Type:Feature",
            "-l",
            "Area:Restore",
        ])
        .expect("should parse");
        let Commands::Issue(IssueCommand::Rank { labels, limit }) = cli.command else {
            panic!("expected issue rank");
        };
        assert_eq!(labels, vec!["Type:Feature", "Area:Restore"]);
        assert_eq!(limit, None);
    }
}
