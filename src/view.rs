//! One full console snapshot: job table, manager status, drive table, host
//! load, completion counts and the next scheduled check.

use thiserror::Error;
use time::PrimitiveDateTime;

use crate::drives::{DriveGroup, DriveTableError, PlotCounts, render_drive_table};
use crate::format::{FormatError, SizeUnit, format_decimal, format_timestamp};
use crate::jobs::{Job, JobTableError, RunningWork, render_job_table};
use crate::probe::{Clock, Console, DiskUsageReader, HostMetrics, ProbeError, ProcessInspector};
use crate::snapshot::CompletionSummary;

/// Errors that abort a render pass.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Failed to build job table: {0}")]
    Jobs(#[from] JobTableError),
    #[error("Failed to build drive table: {0}")]
    Drives(#[from] DriveTableError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

/// Manager-owned state rendered in one pass.
#[derive(Debug, Clone, Copy)]
pub struct ViewInputs<'a> {
    pub jobs: &'a [Job],
    pub running_work: &'a RunningWork,
    pub summary: &'a CompletionSummary,
    pub drives: &'a [DriveGroup],
    pub plot_counts: &'a PlotCounts,
    pub next_log_check: PrimitiveDateTime,
}

/// Renders snapshots against injected host capabilities.
pub struct ViewController<'a> {
    processes: &'a dyn ProcessInspector,
    disks: &'a dyn DiskUsageReader,
    host: &'a dyn HostMetrics,
    clock: &'a dyn Clock,
}

impl<'a> ViewController<'a> {
    pub fn new(
        processes: &'a dyn ProcessInspector,
        disks: &'a dyn DiskUsageReader,
        host: &'a dyn HostMetrics,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            processes,
            disks,
            host,
            clock,
        }
    }

    /// Build the complete snapshot text without touching the console.
    pub fn compose(&self, inputs: &ViewInputs<'_>) -> Result<String, ViewError> {
        let now = self.clock.now();
        let job_table = render_job_table(inputs.jobs, inputs.running_work, now)?;
        let drive_table = render_drive_table(inputs.drives, inputs.plot_counts, self.disks)?;
        let manager_running = self.processes.manager_running()?;

        let cpu = self.host.cpu_percent();
        let memory = self.host.memory();
        let today = now.date();
        let yesterday = today.previous_day().map_or(0, |day| inputs.summary.count_on(day));

        let lines = [
            job_table,
            format!(
                "Manager Status: {}",
                if manager_running { "Running" } else { "Stopped" }
            ),
            String::new(),
            drive_table,
            format!("CPU Usage: {cpu:.1}%"),
            format!(
                "RAM Usage: {}/{}GB ({:.1}%)",
                format_decimal(SizeUnit::Gigabytes.convert(memory.used_bytes)),
                format_decimal(SizeUnit::Gigabytes.convert(memory.total_bytes)),
                memory.percent_used
            ),
            String::new(),
            format!("Plots Completed Yesterday: {yesterday}"),
            format!("Plots Completed Today: {}", inputs.summary.count_on(today)),
            String::new(),
            format!(
                "Next log check at {}",
                format_timestamp(inputs.next_log_check)?
            ),
            String::new(),
        ];
        Ok(lines.join("\n") + "\n")
    }

    /// Clear `console` and print a fresh snapshot.
    ///
    /// Everything is gathered before the clear so a failed query leaves the
    /// previous snapshot on screen.
    pub fn print_view(
        &self,
        console: &mut dyn Console,
        inputs: &ViewInputs<'_>,
    ) -> Result<(), ViewError> {
        let text = self.compose(inputs)?;
        console.clear()?;
        console.write_text(&text)?;
        tracing::debug!(
            work = inputs.running_work.len(),
            jobs = inputs.jobs.len(),
            "Rendered snapshot"
        );
        Ok(())
    }
}
