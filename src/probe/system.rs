use std::{
    cell::{Cell, RefCell},
    ffi::OsString,
    path::Path,
    time::Instant,
};

use sysinfo::{
    Disks, MINIMUM_CPU_UPDATE_INTERVAL, Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind,
};

use super::{DiskUsage, DiskUsageReader, HostMetrics, MemoryUsage, ProbeError, ProcessInspector};

/// Host queries backed by `sysinfo`.
///
/// Holds one [`System`] across render passes so CPU usage is measured over
/// the interval between passes, like a `top`-style refresh.
pub struct SystemProbe {
    system: RefCell<System>,
    last_cpu_refresh: Cell<Instant>,
    manager_marker: String,
}

impl SystemProbe {
    /// `manager_marker` is matched against process command lines to detect
    /// the job manager.
    pub fn new(manager_marker: impl Into<String>) -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        Self {
            system: RefCell::new(system),
            last_cpu_refresh: Cell::new(Instant::now()),
            manager_marker: manager_marker.into(),
        }
    }
}

impl DiskUsageReader for SystemProbe {
    fn disk_usage(&self, path: &Path) -> Result<DiskUsage, ProbeError> {
        let disks = Disks::new_with_refreshed_list();
        let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        // Longest mount point wins so nested mounts resolve to the inner volume.
        disks
            .list()
            .iter()
            .filter(|disk| resolved.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().as_os_str().len())
            .map(|disk| DiskUsage::from_space(disk.total_space(), disk.available_space()))
            .ok_or_else(|| ProbeError::DiskNotFound {
                path: path.to_path_buf(),
            })
    }
}

impl ProcessInspector for SystemProbe {
    fn manager_running(&self) -> Result<bool, ProbeError> {
        let mut system = self.system.borrow_mut();
        system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cmd(UpdateKind::OnlyIfNotSet),
        );
        let own_pid = sysinfo::get_current_pid().ok();
        let running = marker_in_processes(
            system
                .processes()
                .iter()
                .map(|(pid, process)| (*pid, process.cmd())),
            own_pid,
            &self.manager_marker,
        )?;
        tracing::trace!(running, marker = %self.manager_marker, "Checked manager process");
        Ok(running)
    }
}

/// Scan command lines for `marker`, skipping the viewer itself.
///
/// An empty process table means the host refused the listing, since the
/// viewer is always running.
fn marker_in_processes<'a>(
    processes: impl IntoIterator<Item = (Pid, &'a [OsString])>,
    own_pid: Option<Pid>,
    marker: &str,
) -> Result<bool, ProbeError> {
    let mut seen = 0usize;
    let mut running = false;
    for (pid, cmd) in processes {
        seen += 1;
        if Some(pid) == own_pid {
            continue;
        }
        if cmd.iter().any(|arg| arg.to_string_lossy().contains(marker)) {
            running = true;
            break;
        }
    }
    if seen == 0 {
        return Err(ProbeError::ProcessQuery("process table is empty".to_string()));
    }
    Ok(running)
}

impl HostMetrics for SystemProbe {
    fn cpu_percent(&self) -> f32 {
        let since_last = self.last_cpu_refresh.get().elapsed();
        if since_last < MINIMUM_CPU_UPDATE_INTERVAL {
            std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL - since_last);
        }
        let mut system = self.system.borrow_mut();
        system.refresh_cpu_usage();
        self.last_cpu_refresh.set(Instant::now());
        system.global_cpu_usage()
    }

    fn memory(&self) -> MemoryUsage {
        let mut system = self.system.borrow_mut();
        system.refresh_memory();
        MemoryUsage::new(system.used_memory(), system.total_memory())
    }
}
