// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides token resolution and the REST-backed [`IssueTracker`](crate::IssueTracker).

use crate::error::TaggerError;

pub mod auth;
pub mod issues;

pub use issues::GitHubTracker;

/// Parses an owner/repo string to extract owner and repo.
///
/// Validates format: exactly one `/`, non-empty parts.
///
/// # Errors
///
/// Returns [`TaggerError::InvalidRepo`] if the format is invalid.
pub fn parse_owner_repo(s: &str) -> Result<(String, String), TaggerError> {
    let parts: Vec<&str> = s.trim().split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(TaggerError::InvalidRepo {
            input: s.to_string(),
        });
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_repo_valid() {
        let (owner, repo) = parse_owner_repo("NuGet/Home").unwrap();
        assert_eq!(owner, "NuGet");
        assert_eq!(repo, "Home");
    }

    #[test]
    fn test_parse_owner_repo_invalid_no_slash() {
        assert!(parse_owner_repo("NuGet").is_err());
    }

    #[test]
    fn test_parse_owner_repo_invalid_empty_owner() {
        assert!(parse_owner_repo("/repo").is_err());
    }

    #[test]
    fn test_parse_owner_repo_invalid_empty_repo() {
        assert!(parse_owner_repo("owner/").is_err());
    }

    #[test]
    fn test_parse_owner_repo_too_many_parts() {
        let err = parse_owner_repo("a/b/c").unwrap_err();
        assert!(matches!(err, TaggerError::InvalidRepo { input } if input == "a/b/c"));
    }
}
