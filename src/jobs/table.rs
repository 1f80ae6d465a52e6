use std::collections::HashSet;

use time::PrimitiveDateTime;

use crate::format::FormatError;
use crate::table::{TableError, render_table};

use super::{Job, Pid, RunningWork, row::work_row};

/// Column headers of the job status table.
pub const JOB_TABLE_HEADER: [&str; 11] = [
    "num",
    "job",
    "pid",
    "start",
    "elapsed_time",
    "current",
    "phase1",
    "phase2",
    "phase3",
    "phase4",
    "progress",
];
const START_COLUMN: usize = 2;

/// Collect one row per live work instance, newest start first.
///
/// Jobs are walked first, in order, and a pid tracked by several jobs is only
/// taken from the first one listing it; any remaining live pids follow in
/// snapshot order. Pids a job still lists but that have no live work are
/// skipped. Rows are numbered after sorting.
pub fn job_rows(
    jobs: &[Job],
    running_work: &RunningWork,
    now: PrimitiveDateTime,
) -> Result<Vec<Vec<String>>, FormatError> {
    let mut added: HashSet<Pid> = HashSet::with_capacity(running_work.len());
    let mut rows = Vec::with_capacity(running_work.len());

    let tracked = jobs.iter().flat_map(|job| job.running_work.iter().copied());
    let remaining = running_work.iter().map(|work| work.pid);
    for pid in tracked.chain(remaining) {
        let Some(work) = running_work.get(pid) else {
            continue;
        };
        if !added.insert(pid) {
            continue;
        }
        rows.push(work_row(work, now)?);
    }

    // Stable, so equal start times keep their encounter order.
    rows.sort_by(|a, b| b[START_COLUMN].cmp(&a[START_COLUMN]));
    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let mut numbered = Vec::with_capacity(row.len() + 1);
            numbered.push((index + 1).to_string());
            numbered.extend(row);
            numbered
        })
        .collect())
}

/// Errors raised while building the job table.
#[derive(Debug, thiserror::Error)]
pub enum JobTableError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Render the full job status table.
pub fn render_job_table(
    jobs: &[Job],
    running_work: &RunningWork,
    now: PrimitiveDateTime,
) -> Result<String, JobTableError> {
    let mut rows: Vec<Vec<String>> =
        vec![JOB_TABLE_HEADER.iter().map(|cell| cell.to_string()).collect()];
    rows.extend(job_rows(jobs, running_work, now)?);
    tracing::debug!(rows = rows.len() - 1, "Rendering job table");
    Ok(render_table(&rows)?)
}
