// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};
use tagger_core::AreaRow;
use tagger_core::utils::escape_markdown_cell;

use crate::cli::OutputContext;
use crate::commands::types::AreaReportResult;

use super::Renderable;

impl Renderable for AreaReportResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        if self.rows.is_empty() {
            writeln!(w, "{}", style("No area categories configured.").yellow())?;
            return Ok(());
        }
        for row in &self.rows {
            match row {
                AreaRow::Counted { .. } => writeln!(w, "{row}")?,
                AreaRow::Skipped { .. } => writeln!(w, "{}", style(row).dim())?,
            }
        }
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Area Report: {}\n", self.repo)?;
        writeln!(w, "| Area | Issues | Missing Types |")?;
        writeln!(w, "|---|---:|---:|")?;
        for row in &self.rows {
            match row {
                AreaRow::Counted {
                    name,
                    count,
                    missing_types,
                } => writeln!(
                    w,
                    "| {} | {count} | {missing_types} |",
                    escape_markdown_cell(name)
                )?,
                AreaRow::Skipped { name } => {
                    writeln!(w, "| {} | skipped | |", escape_markdown_cell(name))?;
                }
            }
        }
        Ok(())
    }
}
