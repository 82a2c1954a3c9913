// SPDX-License-Identifier: Apache-2.0

//! GitHub token resolution and client construction.
//!
//! Token resolution priority chain:
//! 1. Explicit token (`--pat`)
//! 2. Environment variable (`GH_TOKEN` or `GITHUB_TOKEN`)
//! 3. GitHub CLI (`gh auth token`)
//!
//! Without a token the client is built anonymously, which works for public
//! repositories at a much lower rate limit.

use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::auth::TokenProvider;

/// Source of the GitHub authentication token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    /// Token passed on the command line.
    Flag,
    /// Token from `GH_TOKEN` or `GITHUB_TOKEN` environment variable.
    Environment,
    /// Token from `gh auth token` command.
    GhCli,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Flag => write!(f, "--pat flag"),
            TokenSource::Environment => write!(f, "environment variable"),
            TokenSource::GhCli => write!(f, "GitHub CLI"),
        }
    }
}

/// Attempts to get a token from the GitHub CLI (`gh auth token`).
///
/// Returns `None` if `gh` is not installed, not logged in, or fails.
#[instrument]
fn get_token_from_gh_cli() -> Option<SecretString> {
    debug!("Attempting to get token from gh CLI");

    let output = Command::new("gh").args(["auth", "token"]).output();

    match output {
        Ok(output) if output.status.success() => {
            let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if token.is_empty() {
                debug!("gh auth token returned empty output");
                None
            } else {
                debug!("Successfully retrieved token from gh CLI");
                Some(SecretString::from(token))
            }
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(
                status = ?output.status,
                stderr = %stderr.trim(),
                "gh auth token failed"
            );
            None
        }
        Err(e) => {
            debug!(error = %e, "Failed to execute gh command");
            None
        }
    }
}

/// Reads a non-empty environment variable.
fn env_token(name: &str) -> Option<SecretString> {
    std::env::var(name)
        .ok()
        .filter(|t| !t.is_empty())
        .map(SecretString::from)
}

/// Resolves a GitHub token using the priority chain.
///
/// Returns the token and its source, or `None` if no token is found.
#[instrument(skip(explicit))]
pub fn resolve_token(explicit: Option<&str>) -> Option<(SecretString, TokenSource)> {
    if let Some(token) = explicit.filter(|t| !t.is_empty()) {
        debug!("Using token from --pat flag");
        return Some((SecretString::from(token), TokenSource::Flag));
    }

    for var in ["GH_TOKEN", "GITHUB_TOKEN"] {
        if let Some(token) = env_token(var) {
            debug!(var, "Using token from environment variable");
            return Some((token, TokenSource::Environment));
        }
    }

    if let Some(token) = get_token_from_gh_cli() {
        debug!("Using token from GitHub CLI");
        return Some((token, TokenSource::GhCli));
    }

    debug!("No token found in any source");
    None
}

/// Creates an Octocrab client from the given provider.
///
/// Falls back to an anonymous client when the provider has no token.
///
/// # Errors
///
/// Returns an error if the Octocrab client cannot be built.
#[instrument(skip(provider))]
pub fn create_client(provider: &dyn TokenProvider, timeout: Duration) -> Result<Octocrab> {
    let builder = Octocrab::builder()
        .set_connect_timeout(Some(timeout))
        .set_read_timeout(Some(timeout));

    let client = if let Some(token) = provider.github_token() {
        info!("Creating authenticated GitHub client");
        builder
            .personal_token(token.expose_secret().to_string())
            .build()
            .context("Failed to build GitHub client")?
    } else {
        warn!("No GitHub token found, using anonymous access with lower rate limits");
        builder.build().context("Failed to build GitHub client")?
    };

    debug!(timeout_secs = timeout.as_secs(), "Created GitHub client");
    Ok(client)
}
