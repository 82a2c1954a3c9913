// SPDX-License-Identifier: Apache-2.0

//! Area-owner report.

use anyhow::Result;
use tagger_core::{AppConfig, facade};

use super::Session;
use super::types::AreaReportResult;

/// Issue counts per configured area category.
pub async fn run_areas(session: &Session, config: &AppConfig) -> Result<AreaReportResult> {
    let spec = config.report.area_spec();
    if spec.areas.is_empty() {
        tracing::warn!("No area categories configured; add [[report.areas]] to the config file");
    }

    let rows = facade::area_report(&session.tracker, &session.owner, &session.repo, &spec).await?;
    Ok(AreaReportResult {
        repo: session.slug(),
        rows,
    })
}
