//! Console snapshot of a plot job manager: live work, drive usage and host
//! load rendered as fixed-width text tables.

/// Application directory resolution.
pub mod app_dirs;
/// Command-line options for the binary.
pub mod cli;
/// TOML configuration for the viewer.
pub mod config;
/// Drive utilization table and plot counting.
pub mod drives;
/// Byte, duration and timestamp formatting.
pub mod format;
/// Job and work model plus the job status table.
pub mod jobs;
/// File-backed tracing setup.
pub mod logging;
/// Host capabilities (disks, processes, CPU, memory, clock, console).
pub mod probe;
/// Manager snapshot loading.
pub mod snapshot;
/// Generic fixed-width table layout.
pub mod table;
/// Full snapshot composition and printing.
pub mod view;
