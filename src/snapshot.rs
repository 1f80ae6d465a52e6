//! Manager state exported for the viewer.
//!
//! The manager writes a JSON document with its job list, live work, daily
//! completion counts and the time of its next log check. The viewer only
//! reads it; each render pass loads a fresh copy.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Date, PrimitiveDateTime, format_description::FormatItem, macros::format_description};

use crate::jobs::{Job, RunningWork};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Errors that may occur while loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Failed to read the snapshot file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The snapshot is not valid JSON for this layout.
    #[error("Invalid snapshot at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Completed plot counts per calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct CompletionSummary {
    days: BTreeMap<Date, u32>,
}

impl CompletionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day: Date, count: u32) {
        self.days.insert(day, count);
    }

    /// Count for `day`, or zero when the manager recorded none.
    pub fn count_on(&self, day: Date) -> u32 {
        self.days.get(&day).copied().unwrap_or(0)
    }
}

impl TryFrom<BTreeMap<String, u32>> for CompletionSummary {
    type Error = time::error::Parse;

    fn try_from(raw: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        let mut summary = CompletionSummary::new();
        for (day, count) in raw {
            summary.insert(Date::parse(&day, DATE_FORMAT)?, count);
        }
        Ok(summary)
    }
}

impl From<CompletionSummary> for BTreeMap<String, u32> {
    fn from(summary: CompletionSummary) -> Self {
        summary
            .days
            .into_iter()
            .filter_map(|(day, count)| day.format(DATE_FORMAT).ok().map(|day| (day, count)))
            .collect()
    }
}

/// Everything the manager shares with the viewer for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerSnapshot {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub running_work: RunningWork,
    #[serde(default)]
    pub summary: CompletionSummary,
    #[serde(with = "crate::format::serde_timestamp")]
    pub next_log_check: PrimitiveDateTime,
}

/// Load a snapshot from `path`.
pub fn load(path: &Path) -> Result<ManagerSnapshot, SnapshotError> {
    let text = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
