// SPDX-License-Identifier: Apache-2.0

//! CLI-specific `TokenProvider` implementation.
//!
//! Resolves the GitHub token from the `--pat` flag, then `GH_TOKEN` /
//! `GITHUB_TOKEN`, then the GitHub CLI.

use secrecy::SecretString;
use tagger_core::TokenProvider;
use tagger_core::github::auth::{TokenSource, resolve_token};
use tracing::debug;

/// CLI implementation of `TokenProvider`.
pub struct CliTokenProvider {
    pat: Option<String>,
}

impl CliTokenProvider {
    /// Provider honouring an explicit `--pat` value.
    pub fn new(pat: Option<String>) -> Self {
        Self { pat }
    }

    /// Resolves the token together with where it came from.
    pub fn resolve(&self) -> Option<(SecretString, TokenSource)> {
        resolve_token(self.pat.as_deref())
    }
}

impl TokenProvider for CliTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        if let Some((token, source)) = self.resolve() {
            debug!(%source, "Resolved GitHub token from CLI sources");
            Some(token)
        } else {
            debug!("No GitHub token found in CLI sources");
            None
        }
    }
}
