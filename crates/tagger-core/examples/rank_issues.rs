// SPDX-License-Identifier: Apache-2.0

//! Rank a repository's issues by engagement with a custom `TokenProvider`.
//!
//! Run with: `cargo run --example rank_issues -p tagger-core -- NuGet/Home Type:Feature`

use anyhow::Result;
use secrecy::SecretString;
use tagger_core::{AppConfig, InternalAliases, TokenProvider, facade, parse_owner_repo};

/// Reads the token from a project-specific variable instead of `GITHUB_TOKEN`.
struct EnvProvider;

impl TokenProvider for EnvProvider {
    fn github_token(&self) -> Option<SecretString> {
        std::env::var("TAGGER_EXAMPLE_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let slug = args.next().unwrap_or_else(|| "NuGet/Home".to_string());
    let labels: Vec<String> = args.collect();
    let (owner, repo) = parse_owner_repo(&slug)?;

    let config = AppConfig::default();
    let tracker = facade::session_tracker(&EnvProvider, &config)?;
    let aliases = InternalAliases::new(["nkolev92", "zivkan"]);

    let ranked = facade::rank_issues_for_labels(&tracker, &owner, &repo, &labels, &aliases).await?;
    for entry in ranked.iter().take(10) {
        println!("{:>6.2}  {}  {}", entry.score, entry.issue.url, entry.issue.title);
    }
    Ok(())
}
