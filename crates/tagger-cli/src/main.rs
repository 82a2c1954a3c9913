// SPDX-License-Identifier: Apache-2.0

//! Tagger - issue ranking, triage reports and label maintenance for GitHub.
//!
//! A CLI tool that ranks issues by community engagement, lists issues that
//! still need triage and adds or removes labels across many issues at once.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;
mod provider;

pub use provider::CliTokenProvider;

use anyhow::{Context, Result};
use clap::Parser;
use tagger_core::config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.output, cli.verbose);

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet, cli.verbose);

    let config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    if !config.ui.color {
        console::set_colors_enabled(false);
    }

    let provider = CliTokenProvider::new(cli.pat);

    match commands::run(
        cli.command,
        cli.repo.as_deref(),
        &provider,
        output_ctx,
        &config,
    )
    .await
    {
        Ok(()) => Ok(()),
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            std::process::exit(1);
        }
    }
}
