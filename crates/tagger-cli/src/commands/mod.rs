// SPDX-License-Identifier: Apache-2.0

//! Command handlers for Tagger CLI.

pub mod auth;
pub mod completion;
pub mod issue;
pub mod label;
pub mod prompt;
pub mod report;
pub mod types;

use std::time::Duration;

use anyhow::{Context, Result};
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use tagger_core::{
    AppConfig, CachedTracker, GitHubTracker, StaticTokenProvider, TaggerError, TokenProvider,
    facade, parse_owner_repo,
};
use tracing::debug;

use crate::cli::{
    AuthCommand, Commands, CompletionCommand, IssueCommand, LabelCommand, OutputContext,
    ReportCommand,
};
use crate::CliTokenProvider;
use crate::output;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if ctx.is_interactive() {
        let s = ProgressBar::new_spinner();
        s.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        s.set_message(message.to_string());
        s.enable_steady_tick(Duration::from_millis(100));
        Some(s)
    } else {
        None
    }
}

/// Creates a progress bar for a label run (only if interactive and enabled).
fn maybe_progress_bar(ctx: &OutputContext, config: &AppConfig, total: usize) -> Option<ProgressBar> {
    if ctx.is_interactive() && config.ui.progress_bars {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    }
}

/// Asks before changing labels.
///
/// `--yes` always proceeds. Non-interactive sessions without `--yes` never
/// proceed.
fn confirm_mutation(ctx: &OutputContext, config: &AppConfig, yes: bool, prompt: &str) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !ctx.is_interactive() {
        return Ok(false);
    }
    if !config.ui.confirm_before_mutation {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to get user confirmation")
}

/// One repository plus the cached tracker every command of a run shares.
pub struct Session {
    /// Tracker with the session cache in front of GitHub.
    pub tracker: CachedTracker<GitHubTracker>,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Whether a GitHub token was found.
    pub authenticated: bool,
}

impl Session {
    /// Resolves the repository (`--repo`, then `user.default_repo`) and builds the tracker.
    ///
    /// The token is resolved once and reused for every request of the run.
    pub fn open(
        provider: &dyn TokenProvider,
        config: &AppConfig,
        repo_arg: Option<&str>,
    ) -> Result<Self> {
        let slug = repo_arg
            .or(config.user.default_repo.as_deref())
            .ok_or(TaggerError::NoRepository)?;
        let (owner, repo) = parse_owner_repo(slug)?;

        let token = provider.github_token();
        let authenticated = token.is_some();
        let tracker = facade::session_tracker(&StaticTokenProvider::new(token), config)?;

        debug!(owner = %owner, repo = %repo, authenticated, "Session opened");
        Ok(Self {
            tracker,
            owner,
            repo,
            authenticated,
        })
    }

    /// Repository in owner/repo form.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Dispatch to the appropriate command handler.
pub async fn run(
    command: Commands,
    repo_arg: Option<&str>,
    provider: &CliTokenProvider,
    ctx: OutputContext,
    config: &AppConfig,
) -> Result<()> {
    match command {
        Commands::Issue(issue_cmd) => {
            let session = Session::open(provider, config, repo_arg)?;
            match issue_cmd {
                IssueCommand::Unprocessed => {
                    let spinner = maybe_spinner(&ctx, "Fetching issues...");
                    let result = issue::run_unprocessed(&session).await;
                    if let Some(s) = spinner {
                        s.finish_and_clear();
                    }
                    output::render(&result?, &ctx)
                }
                IssueCommand::Rank { labels, limit } => {
                    let spinner = maybe_spinner(&ctx, "Ranking issues...");
                    let result = issue::run_rank(&session, config, labels, limit).await;
                    if let Some(s) = spinner {
                        s.finish_and_clear();
                    }
                    output::render(&result?, &ctx)
                }
                IssueCommand::Snapshot { label, out } => {
                    let spinner = maybe_spinner(&ctx, "Searching issues...");
                    let result = issue::run_snapshot(&session, config, label, out).await;
                    if let Some(s) = spinner {
                        s.finish_and_clear();
                    }
                    output::render(&result?, &ctx)
                }
            }
        }

        Commands::Label(label_cmd) => {
            let session = Session::open(provider, config, repo_arg)?;
            match label_cmd {
                LabelCommand::List => {
                    let result = label::run_list(&session).await?;
                    output::render(&result, &ctx)
                }
                LabelCommand::Areas => {
                    let result = label::run_areas(&session).await?;
                    output::render(&result, &ctx)
                }
                LabelCommand::Add {
                    label,
                    unprocessed,
                    with_labels,
                    milestone,
                    all,
                    dry_run,
                    yes,
                } => {
                    let target = label::LabelTarget {
                        unprocessed,
                        with_labels,
                        milestone,
                        all,
                    };
                    let change = label::LabelChange::Add(target);
                    let result =
                        label::run_change(&session, &ctx, config, &change, &label, dry_run, yes)
                            .await?;
                    output::render(&result, &ctx)
                }
                LabelCommand::Remove {
                    label,
                    dry_run,
                    yes,
                } => {
                    let result = label::run_change(
                        &session,
                        &ctx,
                        config,
                        &label::LabelChange::Remove,
                        &label,
                        dry_run,
                        yes,
                    )
                    .await?;
                    output::render(&result, &ctx)
                }
            }
        }

        Commands::Report(report_cmd) => {
            let session = Session::open(provider, config, repo_arg)?;
            match report_cmd {
                ReportCommand::Areas => {
                    let spinner = maybe_spinner(&ctx, "Building area report...");
                    let result = report::run_areas(&session, config).await;
                    if let Some(s) = spinner {
                        s.finish_and_clear();
                    }
                    output::render(&result?, &ctx)
                }
            }
        }

        Commands::Prompt => {
            let session = Session::open(provider, config, repo_arg)?;
            prompt::run(&session, &ctx, config).await
        }

        Commands::Auth(auth_cmd) => match auth_cmd {
            AuthCommand::Status => {
                let result = auth::run_status(provider, config).await?;
                output::render(&result, &ctx)
            }
        },

        Commands::Completion(completion_cmd) => match completion_cmd {
            CompletionCommand::Generate { shell } => completion::run_generate(shell),
            CompletionCommand::Install { shell, dry_run } => {
                completion::run_install(shell, dry_run)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn ctx(format: OutputFormat, is_tty: bool) -> OutputContext {
        OutputContext {
            format,
            quiet: false,
            verbose: false,
            is_tty,
        }
    }

    #[test]
    fn test_yes_always_confirms() {
        let config = AppConfig::default();
        let confirmed = confirm_mutation(&ctx(OutputFormat::Json, false), &config, true, "?")
            .expect("no prompt");
        assert!(confirmed);
    }

    #[test]
    fn test_non_interactive_without_yes_declines() {
        let config = AppConfig::default();
        let confirmed = confirm_mutation(&ctx(OutputFormat::Text, false), &config, false, "?")
            .expect("no prompt");
        assert!(!confirmed);
    }

    #[test]
    fn test_no_repository_is_an_error() {
        let config = AppConfig::default();
        let result = Session::open(&StaticTokenProvider::default(), &config, None);
        let err = result.err().expect("should fail without a repository");
        assert!(matches!(
            err.downcast_ref::<TaggerError>(),
            Some(TaggerError::NoRepository)
        ));
    }

    #[test]
    fn test_invalid_repository_is_an_error() {
        let config = AppConfig::default();
        let result = Session::open(&StaticTokenProvider::default(), &config, Some("NuGet"));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_repo_flag_beats_default_repo() {
        let mut config = AppConfig::default();
        config.user.default_repo = Some("NuGet/Client.Engineering".to_string());
        let session = Session::open(&StaticTokenProvider::default(), &config, Some("NuGet/Home"))
            .expect("should open");
        assert_eq!(session.slug(), "NuGet/Home");
        assert!(!session.authenticated);
    }
}
