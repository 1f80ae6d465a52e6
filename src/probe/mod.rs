//! Capabilities the renderer needs from the host.
//!
//! Each query sits behind a trait so a render pass can run against fakes.
//! The `sysinfo`-backed [`SystemProbe`], [`LocalClock`] and
//! [`StdoutConsole`] are the production implementations.

use std::path::{Path, PathBuf};

use thiserror::Error;
use time::PrimitiveDateTime;

mod clock;
mod console;
mod system;

pub use clock::LocalClock;
pub use console::StdoutConsole;
pub use system::SystemProbe;

/// Space usage of the volume holding a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
    /// Share of the volume in use, rounded to one decimal place.
    pub percent_used: f64,
}

impl DiskUsage {
    pub fn from_space(total_bytes: u64, available_bytes: u64) -> Self {
        let used_bytes = total_bytes.saturating_sub(available_bytes);
        Self {
            used_bytes,
            total_bytes,
            percent_used: percent(used_bytes, total_bytes),
        }
    }
}

/// Physical memory usage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub percent_used: f64,
}

impl MemoryUsage {
    pub fn new(used_bytes: u64, total_bytes: u64) -> Self {
        Self {
            used_bytes,
            total_bytes,
            percent_used: percent(used_bytes, total_bytes),
        }
    }
}

fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let value = used as f64 / total as f64 * 100.0;
    (value * 10.0).round() / 10.0
}

/// Errors raised by host queries.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// No mounted volume contains the path.
    #[error("No mounted volume contains {path}")]
    DiskNotFound { path: PathBuf },
    /// The process table could not be read.
    #[error("Failed to query processes: {0}")]
    ProcessQuery(String),
    /// The console could not be cleared.
    #[error("Failed to clear console: {0}")]
    Clear(std::io::Error),
    /// Output could not be written to the console.
    #[error("Failed to write to console: {0}")]
    Write(std::io::Error),
}

/// Reports space usage for the volume holding a path.
pub trait DiskUsageReader {
    fn disk_usage(&self, path: &Path) -> Result<DiskUsage, ProbeError>;
}

/// Reports whether the job manager itself is alive.
pub trait ProcessInspector {
    fn manager_running(&self) -> Result<bool, ProbeError>;
}

/// Whole-host CPU and memory sampling.
pub trait HostMetrics {
    /// CPU usage across all cores since the previous sample.
    fn cpu_percent(&self) -> f32;
    fn memory(&self) -> MemoryUsage;
}

/// Wall-clock source in local time.
pub trait Clock {
    fn now(&self) -> PrimitiveDateTime;
}

/// Output surface for a rendered snapshot.
pub trait Console {
    fn clear(&mut self) -> Result<(), ProbeError>;
    fn write_text(&mut self, text: &str) -> Result<(), ProbeError>;
}
