use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::{Local, TimeZone};
use sysinfo::{
    CpuRefreshKind, Disks, MemoryRefreshKind, Networks, ProcessRefreshKind, ProcessesToUpdate,
    System,
};

use crate::snapshot::{BatteryInfo, DiskInfo, NetworkInfo, ProcessInfo, Snapshot};

/// Processes listed in a snapshot, largest resident memory first.
pub const TOP_PROCESSES: usize = 10;

/// Errors a collector may surface. The view treats every one of them as
/// "render what we have": they never reach the render path.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("collection failed: {0}")]
    Other(String),
}

/// Source of system metric snapshots.
///
/// `collect` may block for a noticeable time (it samples CPU counters, walks
/// process tables); callers run it off the event loop.
pub trait SystemInfoProvider: Send + Sync {
    fn collect(&self) -> Result<Snapshot, ProviderError>;
}

impl<T: SystemInfoProvider + ?Sized> SystemInfoProvider for Arc<T> {
    fn collect(&self) -> Result<Snapshot, ProviderError> {
        (**self).collect()
    }
}

struct Probes {
    system: System,
    disks: Disks,
    networks: Networks,
    primed: bool,
}

/// Collector for the local host built on `sysinfo`.
///
/// The probes live across calls so CPU usage is the delta since the previous
/// collect. Battery and link state are not covered by `sysinfo`; they are read
/// from `/sys` under `root` and stay empty elsewhere.
pub struct HostProvider {
    root: PathBuf,
    probes: Mutex<Probes>,
}

impl std::fmt::Debug for HostProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostProvider").field("root", &self.root).finish()
    }
}

impl Default for HostProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HostProvider {
    pub fn new() -> Self {
        Self::with_root("/")
    }

    /// Read `/sys` relative to `root` instead of `/`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            probes: Mutex::new(Probes {
                system: System::new(),
                disks: Disks::new_with_refreshed_list(),
                networks: Networks::new_with_refreshed_list(),
                primed: false,
            }),
        }
    }

    fn read(&self, relative: &str) -> Option<String> {
        std::fs::read_to_string(self.root.join(relative)).ok()
    }

    fn link_is_up(&self, interface: &str) -> bool {
        self.read(&format!("sys/class/net/{interface}/operstate"))
            .is_some_and(|s| s.trim() == "up")
    }

    fn collect_battery(&self) -> Option<BatteryInfo> {
        let dir = ["sys/class/power_supply/BAT0", "sys/class/power_supply/BAT1"]
            .into_iter()
            .find(|d| self.root.join(d).join("capacity").exists())?;
        let percent = self.read(&format!("{dir}/capacity"))?.trim().parse().ok()?;
        let status = self
            .read(&format!("{dir}/status"))
            .map(|s| s.trim().to_owned())
            .unwrap_or_default();
        let plugged_in = status == "Charging" || status == "Full";
        Some(BatteryInfo {
            percent,
            status,
            plugged_in,
        })
    }
}

impl SystemInfoProvider for HostProvider {
    fn collect(&self) -> Result<Snapshot, ProviderError> {
        let started = Instant::now();
        let mut probes = self
            .probes
            .lock()
            .map_err(|_| ProviderError::Other("probe state poisoned".into()))?;
        let Probes {
            system,
            disks,
            networks,
            primed,
        } = &mut *probes;

        system.refresh_cpu_specifics(CpuRefreshKind::everything());
        if !*primed {
            // usage needs two samples
            std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
            system.refresh_cpu_specifics(CpuRefreshKind::everything());
            *primed = true;
        }
        system.refresh_memory_specifics(MemoryRefreshKind::everything());
        system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::everything(),
        );
        disks.refresh(true);
        networks.refresh(true);

        let mut snapshot = Snapshot::default();

        let host = &mut snapshot.host;
        host.hostname = System::host_name().unwrap_or_default();
        host.username = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_default();
        host.os = System::long_os_version()
            .or_else(System::name)
            .unwrap_or_else(|| std::env::consts::OS.to_owned());
        host.platform = std::env::consts::FAMILY.to_owned();
        host.arch = std::env::consts::ARCH.to_owned();
        host.kernel = System::kernel_version().unwrap_or_default();
        host.uptime = std::time::Duration::from_secs(System::uptime());
        host.boot_time = i64::try_from(System::boot_time())
            .ok()
            .filter(|secs| *secs > 0)
            .and_then(|secs| Local.timestamp_opt(secs, 0).single());
        let load = System::load_average();
        host.load_average =
            (load.one + load.five + load.fifteen > 0.0).then_some([load.one, load.five, load.fifteen]);
        host.process_count = system.processes().len() as u64;

        let cpus = system.cpus();
        snapshot.cpu.threads = cpus.len();
        snapshot.cpu.cores = cpus.len();
        if let Some(first) = cpus.first() {
            snapshot.cpu.model = first.brand().trim().to_owned();
            snapshot.cpu.frequency = first.frequency() as f64;
        }
        snapshot.cpu.usage = average_usage(cpus.iter().map(sysinfo::Cpu::cpu_usage));

        let memory = &mut snapshot.memory;
        memory.total = system.total_memory();
        memory.used = system.used_memory();
        memory.free = system.free_memory();
        memory.available = system.available_memory();
        memory.percent = percent_of(memory.used, memory.total);
        memory.swap_total = system.total_swap();
        memory.swap_used = system.used_swap();
        memory.swap_percent = percent_of(memory.swap_used, memory.swap_total);

        snapshot.disks = disks
            .iter()
            .map(|d| {
                disk_info(
                    d.mount_point().to_string_lossy().into_owned(),
                    d.file_system().to_string_lossy().into_owned(),
                    d.total_space(),
                    d.available_space(),
                )
            })
            .collect();

        let mut adapters: Vec<NetworkInfo> = networks
            .iter()
            .filter(|(name, _)| name.as_str() != "lo")
            .map(|(name, data)| NetworkInfo {
                name: name.clone(),
                mac: data.mac_address().to_string(),
                is_up: self.link_is_up(name),
                bytes_sent: data.total_transmitted(),
                bytes_recv: data.total_received(),
                addrs: Vec::new(),
            })
            .collect();
        adapters.sort_by(|a, b| a.name.cmp(&b.name));
        snapshot.networks = adapters;

        snapshot.top_processes = top_by_memory(
            system.processes().values().map(|p| ProcessInfo {
                pid: p.pid().as_u32(),
                name: p.name().to_string_lossy().into_owned(),
                memory: p.memory(),
            }),
            TOP_PROCESSES,
        );

        snapshot.battery = self.collect_battery();
        snapshot.collected_at = Some(Local::now());
        snapshot.collect_time = started.elapsed();

        tracing::debug!(
            elapsed_ms = snapshot.collect_time.as_millis() as u64,
            disks = snapshot.disks.len(),
            networks = snapshot.networks.len(),
            processes = snapshot.host.process_count,
            "collected host snapshot"
        );
        Ok(snapshot)
    }
}

/// Mean of per-CPU usage percentages, 0 when there are none.
pub fn average_usage(usages: impl Iterator<Item = f32>) -> f64 {
    let (sum, n) = usages.fold((0.0f64, 0usize), |(sum, n), u| (sum + f64::from(u), n + 1));
    if n == 0 {
        0.0
    } else {
        (sum / n as f64).clamp(0.0, 100.0)
    }
}

pub fn disk_info(path: String, fs_type: String, total: u64, available: u64) -> DiskInfo {
    let free = available.min(total);
    let used = total - free;
    DiskInfo {
        path,
        fs_type,
        total,
        used,
        free,
        percent: percent_of(used, total),
    }
}

/// The `limit` largest processes by memory; ties keep the lower pid first.
pub fn top_by_memory(processes: impl Iterator<Item = ProcessInfo>, limit: usize) -> Vec<ProcessInfo> {
    let mut all: Vec<ProcessInfo> = processes.collect();
    all.sort_by(|a, b| b.memory.cmp(&a.memory).then(a.pid.cmp(&b.pid)));
    all.truncate(limit);
    all
}

fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
