// SPDX-License-Identifier: Apache-2.0

//! Configuration management for the Tagger CLI.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `TAGGER_`)
//! 2. Config file: `~/.config/tagger/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Override the default repository via environment variable
//! TAGGER_USER__DEFAULT_REPO=NuGet/Home tagger issue unprocessed
//! ```

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::cache::DEFAULT_TTL_MINUTES;
use crate::error::TaggerError;
use crate::report::{AreaCategory, AreaReportSpec};
use crate::scoring::InternalAliases;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// User preferences.
    pub user: UserConfig,
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// Issue ranking settings.
    pub ranking: RankingConfig,
    /// Area report settings.
    pub report: ReportConfig,
    /// Snapshot output settings.
    pub snapshot: SnapshotConfig,
    /// Session cache settings.
    pub cache: CacheConfig,
    /// Batch label mutation settings.
    pub bulk: BulkConfig,
    /// UI preferences.
    pub ui: UiConfig,
}

/// User preferences.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct UserConfig {
    /// Repository used when `--repo` is not given.
    pub default_repo: Option<String>,
}

/// GitHub API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// Retries for a failed read. Label changes never retry.
    pub max_retries: usize,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_timeout_seconds: 10,
            max_retries: crate::retry::DEFAULT_MAX_RETRIES,
        }
    }
}

/// Issue ranking settings.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RankingConfig {
    /// Logins of team members (matched ignoring case).
    pub internal_aliases: Vec<String>,
    /// Labels an issue must all carry to be ranked when none are given.
    pub labels: Vec<String>,
}

impl RankingConfig {
    /// Alias set used by the scorer.
    #[must_use]
    pub fn aliases(&self) -> InternalAliases {
        InternalAliases::new(&self.internal_aliases)
    }
}

/// Area report settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Issues with any of these label ids are left out of the area report.
    pub ignore_label_ids: Vec<u64>,
    /// Label ids that count as a type label.
    pub type_label_ids: Vec<u64>,
    /// Label used for the priority snapshot.
    pub priority_label: String,
    /// Area categories, reported in order.
    pub areas: Vec<AreaCategory>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            ignore_label_ids: Vec::new(),
            type_label_ids: Vec::new(),
            priority_label: "priority:1".to_string(),
            areas: Vec::new(),
        }
    }
}

impl ReportConfig {
    /// Inputs for [`crate::report::area_report`].
    #[must_use]
    pub fn area_spec(&self) -> AreaReportSpec {
        AreaReportSpec {
            ignore_label_ids: self.ignore_label_ids.clone(),
            type_label_ids: self.type_label_ids.clone(),
            areas: self.areas.clone(),
        }
    }
}

/// Snapshot output settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Directory snapshots are written to.
    pub dir: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

/// Session cache settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Issue and label list TTL in minutes.
    pub ttl_minutes: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: DEFAULT_TTL_MINUTES,
        }
    }
}

/// Batch label mutation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BulkConfig {
    /// Label updates in flight at once. `1` keeps updates strictly sequential.
    pub concurrency: usize,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

/// UI preferences.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Enable colored output.
    pub color: bool,
    /// Show progress bars.
    pub progress_bars: bool,
    /// Ask before changing labels.
    pub confirm_before_mutation: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress_bars: true,
            confirm_before_mutation: true,
        }
    }
}

/// Returns the Tagger configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/tagger`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("tagger");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tagger")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `TAGGER_` and double underscore
/// for nested keys (e.g., `TAGGER_CACHE__TTL_MINUTES`).
///
/// # Errors
///
/// Returns `TaggerError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, TaggerError> {
    let config_path = config_file_path();

    let config = Config::builder()
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        .add_source(
            Environment::with_prefix("TAGGER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn parse(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .expect("should build config")
            .try_deserialize()
            .expect("should deserialize")
    }

    #[test]
    fn test_defaults() {
        let config = parse("");

        assert_eq!(config.user.default_repo, None);
        assert_eq!(config.github.api_timeout_seconds, 10);
        assert_eq!(config.github.max_retries, 3);
        assert!(config.ranking.internal_aliases.is_empty());
        assert_eq!(config.report.priority_label, "priority:1");
        assert_eq!(config.snapshot.dir, PathBuf::from("."));
        assert_eq!(config.cache.ttl_minutes, 60);
        assert_eq!(config.bulk.concurrency, 1);
        assert!(config.ui.color);
        assert!(config.ui.confirm_before_mutation);
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
[user]
default_repo = "NuGet/Home"

[ranking]
internal_aliases = ["nkolev92", "zivkan", "NKOLEV92"]
labels = ["Type:Feature", "Area:Restore"]

[report]
ignore_label_ids = [2671458320, 801160517]
type_label_ids = [180116450]

[[report.areas]]
name = "Restore"
label_ids = [1950335805, 630044219]

[[report.areas]]
name = "Pack"
label_ids = [263262237]

[bulk]
concurrency = 4
"#,
        );

        assert_eq!(config.user.default_repo.as_deref(), Some("NuGet/Home"));
        assert_eq!(config.ranking.aliases().len(), 2);
        assert_eq!(config.ranking.labels, vec!["Type:Feature", "Area:Restore"]);

        let spec = config.report.area_spec();
        assert_eq!(spec.ignore_label_ids, vec![2_671_458_320, 801_160_517]);
        assert_eq!(spec.type_label_ids, vec![180_116_450]);
        assert_eq!(spec.areas.len(), 2);
        assert_eq!(spec.areas[0].name, "Restore");
        assert_eq!(spec.areas[1].label_ids, vec![263_262_237]);
        assert_eq!(config.bulk.concurrency, 4);
    }

    #[test]
    fn test_invalid_type_is_rejected() {
        let result = Config::builder()
            .add_source(config::File::from_str(
                "[bulk]\nconcurrency = \"many\"",
                config::FileFormat::Toml,
            ))
            .build()
            .and_then(|c| c.try_deserialize::<AppConfig>());
        assert!(result.is_err());
    }

    #[test]
    fn test_config_file_path() {
        let path = config_file_path();
        assert!(path.ends_with("tagger/config.toml"));
    }

    #[test]
    #[serial]
    fn test_config_dir_respects_xdg_config_home() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "/custom/config");
        }

        let dir = config_dir();
        assert_eq!(dir, PathBuf::from("/custom/config/tagger"));

        unsafe {
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_ignores_empty_xdg_config_home() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "");
        }

        let dir = config_dir();
        assert!(dir.ends_with("tagger"));

        unsafe {
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_env_override() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "/nonexistent/tagger-test");
            std::env::set_var("TAGGER_CACHE__TTL_MINUTES", "5");
        }

        let config = load_config().expect("should load");
        assert_eq!(config.cache.ttl_minutes, 5);

        unsafe {
            std::env::remove_var("TAGGER_CACHE__TTL_MINUTES");
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }
}
