// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::AuthStatusResult;

use super::Renderable;

impl Renderable for AuthStatusResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        if self.authenticated {
            writeln!(w, "{} GitHub token found", style("*").green().bold())?;
            if let Some(ref method) = self.method {
                writeln!(w, "  Source: {}", style(method.to_string()).cyan())?;
            }
            if let Some(ref username) = self.username {
                writeln!(w, "  Username: {}", style(username).cyan())?;
            }
        } else {
            writeln!(
                w,
                "{} No GitHub token. Requests are anonymous with lower rate limits.",
                style("!").yellow().bold(),
            )?;
            writeln!(
                w,
                "  Pass {}, set {} or run {}.",
                style("--pat").cyan(),
                style("GITHUB_TOKEN").cyan(),
                style("gh auth login").cyan()
            )?;
        }
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Authentication Status\n")?;
        if self.authenticated {
            writeln!(w, "**Status:** Token found")?;
            if let Some(ref method) = self.method {
                writeln!(w, "**Source:** {method}")?;
            }
            if let Some(ref username) = self.username {
                writeln!(w, "**Username:** {username}")?;
            }
        } else {
            writeln!(w, "**Status:** Anonymous")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{markdown, text};
    use super::*;
    use tagger_core::TokenSource;

    #[test]
    fn test_authenticated_shows_source() {
        let status = AuthStatusResult {
            authenticated: true,
            method: Some(TokenSource::Environment),
            username: Some("octocat".to_string()),
        };
        let out = text(&status);
        assert!(out.contains("environment variable"));
        assert!(out.contains("octocat"));
    }

    #[test]
    fn test_anonymous_markdown() {
        let status = AuthStatusResult {
            authenticated: false,
            method: None,
            username: None,
        };
        assert!(markdown(&status).contains("**Status:** Anonymous"));
    }
}
