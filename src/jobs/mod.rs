use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::format::format_decimal;

pub mod row;
pub mod table;

pub use row::work_row;
pub use table::{JOB_TABLE_HEADER, JobTableError, job_rows, render_job_table};

/// Operating-system process identifier of a plotting process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(pub u32);

impl std::fmt::Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A job definition tracked by the manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    /// Processes the manager currently attributes to this job, in launch order.
    #[serde(default)]
    pub running_work: Vec<Pid>,
}

/// Progress reported for a work instance. Text is shown verbatim; numbers
/// keep at least one fractional digit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Progress {
    Number(f64),
    Text(String),
}

impl Default for Progress {
    fn default() -> Self {
        Progress::Text(String::new())
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Progress::Number(value) => f.write_str(&format_decimal(*value)),
            Progress::Text(text) => f.write_str(text),
        }
    }
}

/// One in-flight plotting process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub pid: Pid,
    /// Name of the owning job; `None` for work the manager cannot attribute.
    #[serde(default)]
    pub job: Option<String>,
    #[serde(with = "crate::format::serde_timestamp")]
    pub datetime_start: PrimitiveDateTime,
    /// Recorded value per finished phase, keyed by phase number (1..=4).
    #[serde(default)]
    pub phase_times: BTreeMap<u8, String>,
    #[serde(default)]
    pub current_phase: u8,
    #[serde(default)]
    pub progress: Progress,
}

/// Live work keyed by pid, in the order the manager listed it.
///
/// Iteration order is part of the contract: orphaned work is appended to the
/// job table in this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Work>", into = "Vec<Work>")]
pub struct RunningWork {
    entries: Vec<Work>,
}

impl RunningWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `work`, replacing an existing entry for the same pid in place.
    pub fn insert(&mut self, work: Work) {
        match self.entries.iter_mut().find(|entry| entry.pid == work.pid) {
            Some(existing) => *existing = work,
            None => self.entries.push(work),
        }
    }

    pub fn get(&self, pid: Pid) -> Option<&Work> {
        self.entries.iter().find(|entry| entry.pid == pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.get(pid).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Work> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Work> for RunningWork {
    fn from_iter<I: IntoIterator<Item = Work>>(iter: I) -> Self {
        let mut running = RunningWork::new();
        for work in iter {
            running.insert(work);
        }
        running
    }
}

impl From<Vec<Work>> for RunningWork {
    fn from(entries: Vec<Work>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<RunningWork> for Vec<Work> {
    fn from(running: RunningWork) -> Self {
        running.entries
    }
}
