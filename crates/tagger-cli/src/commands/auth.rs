// SPDX-License-Identifier: Apache-2.0

//! GitHub authentication status.

use anyhow::Result;
use tagger_core::github::auth::create_client;
use tagger_core::{AppConfig, StaticTokenProvider};
use tracing::debug;

use super::types::AuthStatusResult;
use crate::CliTokenProvider;

/// Run the status command - show where the token comes from and whom it belongs to.
pub async fn run_status(
    provider: &CliTokenProvider,
    config: &AppConfig,
) -> Result<AuthStatusResult> {
    let Some((token, source)) = provider.resolve() else {
        return Ok(AuthStatusResult {
            authenticated: false,
            method: None,
            username: None,
        });
    };

    let timeout = std::time::Duration::from_secs(config.github.api_timeout_seconds);
    let username = match create_client(&StaticTokenProvider::new(Some(token)), timeout) {
        Ok(client) => match client.current().user().await {
            Ok(user) => Some(user.login),
            Err(e) => {
                debug!(error = %e, "Could not look up the token owner");
                None
            }
        },
        Err(_) => None,
    };

    Ok(AuthStatusResult {
        authenticated: true,
        method: Some(source),
        username,
    })
}
