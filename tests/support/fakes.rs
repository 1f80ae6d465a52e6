use std::{
    cell::RefCell,
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use plotview::jobs::{Job, Pid, Progress, Work};
use plotview::probe::{
    Clock, Console, DiskUsage, DiskUsageReader, HostMetrics, MemoryUsage, ProbeError,
    ProcessInspector,
};
use time::PrimitiveDateTime;

pub const GIB: u64 = 1_073_741_824;
pub const TIB: u64 = 1_099_511_627_776;

/// Host double with fixed answers and a per-path disk table.
pub struct FakeHost {
    pub manager_running: bool,
    pub disks: BTreeMap<PathBuf, DiskUsage>,
    pub cpu: f32,
    pub memory: MemoryUsage,
    pub disk_queries: RefCell<Vec<PathBuf>>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            manager_running: true,
            disks: BTreeMap::new(),
            cpu: 3.0,
            memory: MemoryUsage::new(4 * GIB, 16 * GIB),
            disk_queries: RefCell::new(Vec::new()),
        }
    }
}

impl FakeHost {
    pub fn with_disk(mut self, path: &str, total: u64, available: u64) -> Self {
        self.disks
            .insert(PathBuf::from(path), DiskUsage::from_space(total, available));
        self
    }
}

impl ProcessInspector for FakeHost {
    fn manager_running(&self) -> Result<bool, ProbeError> {
        Ok(self.manager_running)
    }
}

impl DiskUsageReader for FakeHost {
    fn disk_usage(&self, path: &Path) -> Result<DiskUsage, ProbeError> {
        self.disk_queries.borrow_mut().push(path.to_path_buf());
        self.disks
            .get(path)
            .copied()
            .ok_or_else(|| ProbeError::DiskNotFound {
                path: path.to_path_buf(),
            })
    }
}

impl HostMetrics for FakeHost {
    fn cpu_percent(&self) -> f32 {
        self.cpu
    }

    fn memory(&self) -> MemoryUsage {
        self.memory
    }
}

pub struct FixedClock(pub PrimitiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> PrimitiveDateTime {
        self.0
    }
}

#[derive(Default)]
pub struct BufferConsole {
    pub clears: usize,
    pub output: String,
}

impl Console for BufferConsole {
    fn clear(&mut self) -> Result<(), ProbeError> {
        self.clears += 1;
        self.output.clear();
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ProbeError> {
        self.output.push_str(text);
        Ok(())
    }
}

pub fn job(name: &str, pids: &[u32]) -> Job {
    Job {
        name: name.to_string(),
        running_work: pids.iter().copied().map(Pid).collect(),
    }
}

pub fn work(pid: u32, job: Option<&str>, start: PrimitiveDateTime) -> Work {
    Work {
        pid: Pid(pid),
        job: job.map(str::to_string),
        datetime_start: start,
        phase_times: BTreeMap::new(),
        current_phase: 1,
        progress: Progress::Text("0.00%".to_string()),
    }
}
