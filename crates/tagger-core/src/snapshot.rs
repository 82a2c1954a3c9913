// SPDX-License-Identifier: Apache-2.0

//! JSON snapshots of issue lists.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::TaggerError;
use crate::types::Issue;

/// Default snapshot file name for a repository.
#[must_use]
pub fn default_file_name(repo: &str) -> String {
    format!("{}-issues.json", repo.to_ascii_lowercase())
}

/// Default snapshot path for a repository inside `dir`.
#[must_use]
pub fn default_path(dir: &Path, repo: &str) -> PathBuf {
    dir.join(default_file_name(repo))
}

fn io_error(path: &Path, source: std::io::Error) -> TaggerError {
    TaggerError::Snapshot {
        path: path.display().to_string(),
        source,
    }
}

/// Writes `issues` to `path` as pretty-printed JSON.
///
/// Creates parent directories if they don't exist. Writes to a temporary file
/// first and renames it into place so a failed write never leaves a truncated
/// snapshot.
///
/// # Errors
///
/// Returns [`TaggerError::Snapshot`] if the file cannot be written.
#[instrument(skip(issues), fields(path = %path.display(), count = issues.len()))]
pub fn write_snapshot(path: &Path, issues: &[Issue]) -> Result<(), TaggerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let contents = serde_json::to_string_pretty(issues)
        .map_err(|e| io_error(path, std::io::Error::other(e)))?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, contents).map_err(|e| io_error(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| io_error(path, e))?;

    debug!("Snapshot written");
    Ok(())
}

/// Reads a snapshot written by [`write_snapshot`].
///
/// # Errors
///
/// Returns [`TaggerError::Snapshot`] if the file cannot be read or parsed.
pub fn read_snapshot(path: &Path) -> Result<Vec<Issue>, TaggerError> {
    let contents = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    serde_json::from_str(&contents).map_err(|e| io_error(path, std::io::Error::other(e)))
}
