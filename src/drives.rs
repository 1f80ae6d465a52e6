//! Drive utilization table and plot counting.

use std::{
    collections::HashMap,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::{SizeUnit, format_decimal};
use crate::probe::{DiskUsageReader, ProbeError};
use crate::table::{TableError, render_table};

/// Column headers of the drive status table.
pub const DRIVE_TABLE_HEADER: [&str; 6] = ["type", "drive", "used", "total", "percent", "plots"];
/// Shown when no plot count is known for a drive.
pub const UNKNOWN_PLOTS: &str = "?";

/// Paths that share a role such as `temp` or `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveGroup {
    pub kind: String,
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

/// Known plot file counts, by drive type and then path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlotCounts {
    counts: HashMap<String, HashMap<PathBuf, u64>>,
}

impl PlotCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: impl Into<String>, path: impl Into<PathBuf>, count: u64) {
        self.counts
            .entry(kind.into())
            .or_default()
            .insert(path.into(), count);
    }

    pub fn get(&self, kind: &str, path: &Path) -> Option<u64> {
        self.counts.get(kind)?.get(path).copied()
    }
}

/// Errors raised while building the drive table.
#[derive(Debug, Error)]
pub enum DriveTableError {
    #[error("Failed to read usage for {path}: {source}")]
    Usage { path: PathBuf, source: ProbeError },
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Collect one row per configured drive, in configuration order.
pub fn drive_rows(
    groups: &[DriveGroup],
    plot_counts: &PlotCounts,
    disks: &dyn DiskUsageReader,
) -> Result<Vec<Vec<String>>, DriveTableError> {
    let mut rows = Vec::new();
    for group in groups {
        for path in &group.paths {
            let usage = disks
                .disk_usage(path)
                .map_err(|source| DriveTableError::Usage {
                    path: path.clone(),
                    source,
                })?;
            let plots = plot_counts
                .get(&group.kind, path)
                .map(|count| count.to_string())
                .unwrap_or_else(|| UNKNOWN_PLOTS.to_string());
            rows.push(vec![
                group.kind.clone(),
                path.display().to_string(),
                format!("{}TB", format_decimal(SizeUnit::Terabytes.convert(usage.used_bytes))),
                format!("{}TB", format_decimal(SizeUnit::Terabytes.convert(usage.total_bytes))),
                format!("{:.1}%", usage.percent_used),
                plots,
            ]);
        }
    }
    Ok(rows)
}

/// Render the drive status table.
pub fn render_drive_table(
    groups: &[DriveGroup],
    plot_counts: &PlotCounts,
    disks: &dyn DiskUsageReader,
) -> Result<String, DriveTableError> {
    let mut rows: Vec<Vec<String>> =
        vec![DRIVE_TABLE_HEADER.iter().map(|cell| cell.to_string()).collect()];
    rows.extend(drive_rows(groups, plot_counts, disks)?);
    Ok(render_table(&rows)?)
}

/// Count files with `extension` directly inside every configured path.
///
/// Paths that cannot be listed are left out, so they show as unknown.
pub fn count_plot_files(groups: &[DriveGroup], extension: &str) -> PlotCounts {
    let mut counts = PlotCounts::new();
    for group in groups {
        for path in &group.paths {
            match count_in_dir(path, extension) {
                Ok(count) => counts.insert(group.kind.clone(), path.clone(), count),
                Err(err) => {
                    tracing::warn!("Failed to count plots in {}: {err}", path.display());
                }
            }
        }
    }
    counts
}

fn count_in_dir(dir: &Path, extension: &str) -> std::io::Result<u64> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
        let path = entry.path();
        if is_file && path.extension().and_then(OsStr::to_str) == Some(extension) {
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::DiskUsage;
    use tempfile::tempdir;

    const TERABYTE: u64 = 1_099_511_627_776;

    struct FixedDisks;

    impl DiskUsageReader for FixedDisks {
        fn disk_usage(&self, path: &Path) -> Result<DiskUsage, ProbeError> {
            if path.starts_with("/missing") {
                return Err(ProbeError::DiskNotFound {
                    path: path.to_path_buf(),
                });
            }
            Ok(DiskUsage::from_space(4 * TERABYTE, TERABYTE + TERABYTE / 2))
        }
    }

    fn groups() -> Vec<DriveGroup> {
        vec![
            DriveGroup {
                kind: "temp".to_string(),
                paths: vec![PathBuf::from("/mnt/nvme")],
            },
            DriveGroup {
                kind: "destination".to_string(),
                paths: vec![PathBuf::from("/mnt/hdd2"), PathBuf::from("/mnt/hdd1")],
            },
        ]
    }

    #[test]
    fn rows_follow_group_order_with_units() {
        let mut counts = PlotCounts::new();
        counts.insert("destination", "/mnt/hdd1", 37);
        let rows = drive_rows(&groups(), &counts, &FixedDisks).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            vec!["temp", "/mnt/nvme", "2.5TB", "4.0TB", "62.5%", "?"]
        );
        assert_eq!(rows[1][1], "/mnt/hdd2");
        assert_eq!(rows[1][5], "?");
        assert_eq!(rows[2][5], "37");
    }

    #[test]
    fn plot_count_is_scoped_to_drive_type() {
        let mut counts = PlotCounts::new();
        counts.insert("temp", "/mnt/hdd1", 5);
        assert_eq!(counts.get("destination", Path::new("/mnt/hdd1")), None);
        assert_eq!(counts.get("temp", Path::new("/mnt/hdd1")), Some(5));
    }

    #[test]
    fn usage_failure_aborts_the_table() {
        let groups = vec![DriveGroup {
            kind: "temp".to_string(),
            paths: vec![PathBuf::from("/missing/disk")],
        }];
        let err = render_drive_table(&groups, &PlotCounts::new(), &FixedDisks).unwrap_err();
        assert!(matches!(err, DriveTableError::Usage { .. }));
    }

    #[test]
    fn rendered_table_has_header_row() {
        let table = render_drive_table(&groups(), &PlotCounts::new(), &FixedDisks).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].trim_start().starts_with("type"));
    }

    #[test]
    fn counts_only_matching_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.plot"), b"").unwrap();
        fs::write(dir.path().join("b.plot"), b"").unwrap();
        fs::write(dir.path().join("c.plot.tmp"), b"").unwrap();
        fs::create_dir(dir.path().join("nested.plot")).unwrap();

        let groups = vec![DriveGroup {
            kind: "destination".to_string(),
            paths: vec![dir.path().to_path_buf(), dir.path().join("absent")],
        }];
        let counts = count_plot_files(&groups, "plot");
        assert_eq!(counts.get("destination", dir.path()), Some(2));
        assert_eq!(counts.get("destination", &dir.path().join("absent")), None);
    }
}
