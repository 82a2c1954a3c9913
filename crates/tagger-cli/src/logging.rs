// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the Tagger CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging to stderr.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default: warnings only
//! tagger issue unprocessed
//!
//! # Per-issue progress of a label run
//! tagger -v label remove Pipeline:Triage --yes
//!
//! # Debug output for troubleshooting
//! RUST_LOG=tagger_core=debug tagger issue rank -l Type:Feature
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::OutputFormat;

const DEFAULT_FILTER: &str = "tagger=warn,tagger_core=warn,octocrab=error";
const VERBOSE_FILTER: &str = "tagger=info,tagger_core=info,octocrab=error";

/// Picks the filter directives used when `RUST_LOG` is not set.
///
/// Structured formats stay at the default level so stderr only carries
/// warnings next to machine-readable stdout.
fn default_filter(format: OutputFormat, verbose: bool) -> &'static str {
    let structured = matches!(
        format,
        OutputFormat::Json | OutputFormat::Yaml | OutputFormat::Markdown
    );
    if verbose && !structured {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `format` - Output format (structured formats keep logging quiet)
/// * `verbose` - Whether `-v` was given
pub fn init_logging(format: OutputFormat, verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(format, verbose)));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
