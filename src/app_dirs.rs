//! The `.plotview` folder holding the viewer's config, default snapshot
//! and logs.
//!
//! The folder sits under the OS config directory (`~/.config` on Linux,
//! `%APPDATA%` on Windows) unless `PLOTVIEW_CONFIG_HOME` names another base.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application folder created under the base directory.
pub const APP_DIR_NAME: &str = ".plotview";
/// Environment variable that replaces the OS config directory as the base.
pub const CONFIG_HOME_ENV: &str = "PLOTVIEW_CONFIG_HOME";
/// Viewer configuration file inside the application folder.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Manager snapshot read when neither the CLI nor the config names one.
pub const SNAPSHOT_FILE_NAME: &str = "snapshot.json";
const LOGS_DIR_NAME: &str = "logs";

/// Errors raised while locating or creating the application folder.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// Neither the override variable nor the OS reported a config directory.
    #[error("No config directory available; set {CONFIG_HOME_ENV}")]
    NoBaseDir,
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// An existing `.plotview` folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    root: PathBuf,
}

impl AppDirs {
    /// Locate the folder from the environment and create it if missing.
    pub fn resolve() -> Result<Self, AppDirError> {
        let base = std::env::var_os(CONFIG_HOME_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
            .ok_or(AppDirError::NoBaseDir)?;
        Self::under(base)
    }

    /// Use `base/.plotview`, creating it if missing.
    pub fn under(base: impl Into<PathBuf>) -> Result<Self, AppDirError> {
        let root = base.into().join(APP_DIR_NAME);
        create_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn snapshot_file(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILE_NAME)
    }

    /// The `logs` subfolder, created on demand.
    pub fn logs_dir(&self) -> Result<PathBuf, AppDirError> {
        let path = self.root.join(LOGS_DIR_NAME);
        create_dir(&path)?;
        Ok(path)
    }
}

fn create_dir(path: &Path) -> Result<(), AppDirError> {
    std::fs::create_dir_all(path).map_err(|source| AppDirError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
