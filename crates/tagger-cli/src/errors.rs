// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `TaggerError` and appends a hint for the
//! error kind. Library errors stay structured; presentation lives here.

use anyhow::Error;
use tagger_core::error::TaggerError;

/// Formats an error for CLI display with helpful hints.
///
/// Errors that are not a `TaggerError` anywhere in their chain are shown
/// with their full context chain.
pub fn format_error(error: &Error) -> String {
    let Some(tagger_err) = error.chain().find_map(|e| e.downcast_ref::<TaggerError>()) else {
        return format!("{error:#}");
    };

    match tagger_err {
        TaggerError::NotAuthenticated => {
            format!("{tagger_err}\n\nTip: Run `tagger auth status` to see which sources were checked.")
        }
        TaggerError::NoRepository => {
            format!(
                "{tagger_err}\n\nTip: Add `default_repo = \"owner/repo\"` under [user] in {}",
                tagger_core::config::config_file_path().display()
            )
        }
        TaggerError::InvalidRepo { .. } => {
            format!("{tagger_err}\n\nTip: Use the form owner/repo, for example NuGet/Home.")
        }
        TaggerError::Config { .. } => {
            format!(
                "{tagger_err}\n\nTip: Check your config file at {}",
                tagger_core::config::config_file_path().display()
            )
        }
        TaggerError::GitHub { .. } => {
            format!(
                "{error:#}\n\nTip: Check your GitHub token with `tagger auth status`. Anonymous access has a much lower rate limit."
            )
        }
        TaggerError::Snapshot { .. } => {
            format!("{tagger_err}\n\nTip: Check that the snapshot directory is writable.")
        }
    }
}
