//! Viewer configuration stored as TOML.
//!
//! Config keys: `snapshot_path`, `refresh_seconds`, `manager_process_marker`,
//! `plot_extension`, and one `[[drives]]` table per drive group
//! (`kind`, `paths`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{self, AppDirs};
use crate::drives::DriveGroup;

const MIN_REFRESH_SECONDS: u64 = 1;

/// Errors that may occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// No usable config directory found.
    #[error("Failed to resolve config directory: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
}

/// Settings for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Manager snapshot to render; defaults to `snapshot.json` beside the config.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
    /// Seconds between render passes in watch mode.
    #[serde(default = "default_refresh_seconds")]
    pub refresh_seconds: u64,
    /// Text that identifies the manager in a process command line.
    #[serde(default = "default_manager_process_marker")]
    pub manager_process_marker: String,
    /// File extension counted as a finished plot.
    #[serde(default = "default_plot_extension")]
    pub plot_extension: String,
    /// Drive groups in display order.
    #[serde(default)]
    pub drives: Vec<DriveGroup>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            refresh_seconds: default_refresh_seconds(),
            manager_process_marker: default_manager_process_marker(),
            plot_extension: default_plot_extension(),
            drives: Vec::new(),
        }
    }
}

impl ViewConfig {
    fn normalized(mut self) -> Self {
        self.refresh_seconds = self.refresh_seconds.max(MIN_REFRESH_SECONDS);
        self.plot_extension = self.plot_extension.trim_start_matches('.').to_string();
        self
    }
}

fn default_refresh_seconds() -> u64 {
    60
}

fn default_manager_process_marker() -> String {
    "stateless-manager".to_string()
}

fn default_plot_extension() -> String {
    "plot".to_string()
}

/// Resolve the configuration file path inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(AppDirs::resolve()?.config_file())
}

/// Resolve the default snapshot path inside the app directory.
pub fn default_snapshot_path() -> Result<PathBuf, ConfigError> {
    Ok(AppDirs::resolve()?.snapshot_file())
}

/// Load configuration from the app directory, returning defaults if missing.
pub fn load_or_default() -> Result<ViewConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load configuration from `path`, returning defaults if the file is absent.
pub fn load_from(path: &Path) -> Result<ViewConfig, ConfigError> {
    if !path.exists() {
        tracing::info!("No config at {}; using defaults", path.display());
        return Ok(ViewConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
        .map(ViewConfig::normalized)
}
