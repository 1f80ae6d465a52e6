use time::PrimitiveDateTime;

use crate::format::{FormatError, duration_to_clock, format_timestamp};

use super::Work;

/// Placeholder shown in the job column for work with no known owner.
pub const UNKNOWN_JOB: &str = "?";
const PHASES: [u8; 4] = [1, 2, 3, 4];

/// Build the display cells for one work instance.
///
/// Cells: job, pid, start, elapsed, current phase, phase 1..4, progress.
pub fn work_row(work: &Work, now: PrimitiveDateTime) -> Result<Vec<String>, FormatError> {
    let mut row = Vec::with_capacity(10);
    row.push(work.job.clone().unwrap_or_else(|| UNKNOWN_JOB.to_string()));
    row.push(work.pid.to_string());
    row.push(format_timestamp(work.datetime_start)?);
    row.push(duration_to_clock(elapsed_seconds(work.datetime_start, now)));
    row.push(work.current_phase.to_string());
    for phase in PHASES {
        row.push(work.phase_times.get(&phase).cloned().unwrap_or_default());
    }
    row.push(work.progress.to_string());
    Ok(row)
}

/// Whole seconds from `start` to `now`; a start in the future counts as zero.
fn elapsed_seconds(start: PrimitiveDateTime, now: PrimitiveDateTime) -> u64 {
    u64::try_from((now - start).whole_seconds()).unwrap_or(0)
}
