// SPDX-License-Identifier: Apache-2.0

//! Error types for Tagger.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur during Tagger operations.
#[derive(Error, Debug)]
pub enum TaggerError {
    /// GitHub API error from octocrab.
    #[error("GitHub API error: {message}")]
    GitHub {
        /// Error message.
        message: String,
    },

    /// The command needs a token but none could be resolved.
    #[error(
        "Authentication required - pass --pat, set GITHUB_TOKEN, or log in with `gh auth login`"
    )]
    NotAuthenticated,

    /// No repository was given and no default is configured.
    #[error("No repository selected - pass --repo owner/repo or set user.default_repo")]
    NoRepository,

    /// Repository reference is not `owner/repo`.
    #[error("Invalid repository '{input}', expected owner/repo")]
    InvalidRepo {
        /// The rejected input.
        input: String,
    },

    /// Configuration file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Snapshot file could not be written.
    #[error("Failed to write snapshot {path}: {source}")]
    Snapshot {
        /// Target path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl From<octocrab::Error> for TaggerError {
    fn from(err: octocrab::Error) -> Self {
        TaggerError::GitHub {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for TaggerError {
    fn from(err: config::ConfigError) -> Self {
        TaggerError::Config {
            message: err.to_string(),
        }
    }
}
