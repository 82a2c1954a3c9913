// SPDX-License-Identifier: Apache-2.0

//! Token provider abstraction.
//!
//! The core never reads credentials itself. Front-ends implement
//! [`TokenProvider`] and hand it to [`crate::github::auth::create_client`].

use secrecy::SecretString;

/// Provides GitHub credentials for API calls.
///
/// Implementations return `None` when no token is available; the client then
/// falls back to anonymous access.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the GitHub API token.
    fn github_token(&self) -> Option<SecretString>;
}

/// Provider that always returns the same token (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<SecretString>,
}

impl StaticTokenProvider {
    /// Provider for a fixed token.
    #[must_use]
    pub fn new(token: Option<SecretString>) -> Self {
        Self { token }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        self.token.clone()
    }
}
