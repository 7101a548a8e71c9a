use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Local};

/// Number of samples kept for the sparkline history.
pub const HISTORY_LEN: usize = 60;

/// An immutable point-in-time read of system metrics.
///
/// Every field is best-effort: collectors leave what they cannot read at its
/// default (empty or zero) and the views render those as `N/A`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub host: HostInfo,
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub disks: Vec<DiskInfo>,
    pub networks: Vec<NetworkInfo>,
    pub gpus: Vec<GpuInfo>,
    pub top_processes: Vec<ProcessInfo>,
    pub battery: Option<BatteryInfo>,
    pub security: SecurityInfo,
    pub collected_at: Option<DateTime<Local>>,
    /// How long the collector took.
    pub collect_time: Duration,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostInfo {
    pub hostname: String,
    pub username: String,
    pub os: String,
    pub platform: String,
    pub kernel: String,
    pub arch: String,
    pub uptime: Duration,
    pub boot_time: Option<DateTime<Local>>,
    pub process_count: u64,
    pub load_average: Option<[f64; 3]>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuInfo {
    pub model: String,
    pub cores: usize,
    pub threads: usize,
    /// MHz.
    pub frequency: f64,
    /// Percent, 0..=100.
    pub usage: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryInfo {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub available: u64,
    pub percent: f64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskInfo {
    pub path: String,
    pub fs_type: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkInfo {
    pub name: String,
    pub mac: String,
    pub is_up: bool,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub addrs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpuInfo {
    pub name: String,
    pub vendor: String,
    pub driver: String,
    pub vram: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub memory: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatteryInfo {
    pub percent: f64,
    pub status: String,
    pub plugged_in: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityInfo {
    pub firewall: String,
    pub antivirus: String,
}

/// Overall health bucket derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl HealthStatus {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Excellent,
            70..=89 => Self::Good,
            50..=69 => Self::Fair,
            30..=49 => Self::Poor,
            _ => Self::Critical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub score: u8,
    pub status: HealthStatus,
}

impl Snapshot {
    /// Score 0..=100 penalising hot CPU, memory, disks, swap and a low battery.
    pub fn health(&self) -> Health {
        let mut score: i32 = 100;

        let cpu = self.cpu.usage;
        score -= if cpu > 90.0 {
            30
        } else if cpu > 70.0 {
            15
        } else if cpu > 50.0 {
            5
        } else {
            0
        };

        let mem = self.memory.percent;
        score -= if mem > 90.0 {
            25
        } else if mem > 80.0 {
            15
        } else if mem > 70.0 {
            5
        } else {
            0
        };

        for disk in &self.disks {
            score -= if disk.percent > 95.0 {
                20
            } else if disk.percent > 90.0 {
                10
            } else if disk.percent > 80.0 {
                3
            } else {
                0
            };
        }

        if self.memory.swap_percent > 50.0 {
            score -= 10;
        }

        if let Some(battery) = &self.battery
            && battery.percent < 20.0
            && !battery.plugged_in
        {
            score -= 15;
        }

        let score = score.clamp(0, 100) as u8;
        Health {
            score,
            status: HealthStatus::from_score(score),
        }
    }

    pub fn total_bytes_recv(&self) -> u64 {
        self.networks.iter().map(|n| n.bytes_recv).sum()
    }

    pub fn total_bytes_sent(&self) -> u64 {
        self.networks.iter().map(|n| n.bytes_sent).sum()
    }
}

/// Rolling window of the most recent samples for sparklines.
#[derive(Debug, Clone)]
pub struct History {
    capacity: usize,
    pub cpu: VecDeque<f64>,
    pub memory: VecDeque<f64>,
    pub net_in: VecDeque<f64>,
    pub net_out: VecDeque<f64>,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(HISTORY_LEN)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            cpu: VecDeque::with_capacity(capacity),
            memory: VecDeque::with_capacity(capacity),
            net_in: VecDeque::with_capacity(capacity),
            net_out: VecDeque::with_capacity(capacity),
        }
    }

    /// Append one sample per series. Network series only grow when the
    /// snapshot has adapters.
    pub fn record(&mut self, snapshot: &Snapshot) {
        let capacity = self.capacity;
        push_bounded(&mut self.cpu, snapshot.cpu.usage, capacity);
        push_bounded(&mut self.memory, snapshot.memory.percent, capacity);
        if !snapshot.networks.is_empty() {
            push_bounded(&mut self.net_in, snapshot.total_bytes_recv() as f64, capacity);
            push_bounded(&mut self.net_out, snapshot.total_bytes_sent() as f64, capacity);
        }
    }
}

fn push_bounded(series: &mut VecDeque<f64>, value: f64, capacity: usize) {
    if series.len() == capacity {
        series.pop_front();
    }
    series.push_back(value);
}
