//! Projection of a [`Snapshot`] into browsable groups.
//!
//! Each metric becomes a record whose id is the label and whose description
//! is the formatted value, so the metrics view reuses the catalogue engine.

use std::collections::HashMap;

use cmdmatrix::format::{bytes_or_na, or_na};
use cmdmatrix::{Catalogue, Group, NOT_AVAILABLE, Record, Snapshot, format_bytes, format_duration};

const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Build the metric groups for `snapshot`.
pub fn metric_catalogue(snapshot: &Snapshot) -> Catalogue {
    Catalogue::new(vec![
        Group::new("dashboard", "Dashboard", "#00FFFF").with_records(dashboard(snapshot)),
        Group::new("cpu", "CPU", "#FFFF00").with_records(cpu(snapshot)),
        Group::new("memory", "Memory", "#FF00FF").with_records(memory(snapshot)),
        Group::new("gpu", "GPU", "#FF6B6B").with_records(gpu(snapshot)),
        Group::new("storage", "Storage", "#00FF88").with_records(storage(snapshot)),
        Group::new("network", "Network", "#00BFFF").with_records(network(snapshot)),
        Group::new("processes", "Processes", "#FFA500").with_records(processes(snapshot)),
        Group::new("security", "Security", "#22C55E").with_records(security(snapshot)),
        Group::new("system", "System", "#A78BFA").with_records(system(snapshot)),
    ])
}

/// Repeated labels get a ` (n)` suffix so ids stay unique within a group.
fn unique_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    labels
        .map(|label| {
            let n = seen.entry(label).or_insert(0);
            *n += 1;
            if *n == 1 {
                label.to_owned()
            } else {
                format!("{label} ({n})")
            }
        })
        .collect()
}

fn metric(label: impl Into<String>, value: impl Into<String>, tags: &[&str]) -> Record {
    Record::new(label, value).with_tags(tags.iter().copied())
}

fn percent(value: f64, known: bool) -> String {
    if known {
        format!("{value:.1}%")
    } else {
        NOT_AVAILABLE.to_owned()
    }
}

fn count(value: usize) -> String {
    if value == 0 {
        NOT_AVAILABLE.to_owned()
    } else {
        value.to_string()
    }
}

fn dashboard(s: &Snapshot) -> Vec<Record> {
    let health = s.health();
    let load = s
        .host
        .load_average
        .map(|[a, b, c]| format!("{a:.2} {b:.2} {c:.2}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned());
    let battery = s
        .battery
        .as_ref()
        .map(|b| {
            let source = if b.plugged_in { "plugged in" } else { "on battery" };
            format!("{:.0}% {} ({source})", b.percent, or_na(&b.status))
        })
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned());

    vec![
        metric(
            "Health",
            format!("{}/100 ({})", health.score, health.status.label()),
            &["score", "status"],
        ),
        metric("CPU", percent(s.cpu.usage, s.cpu.threads > 0), &["cpu", "usage"]),
        metric(
            "Memory",
            percent(s.memory.percent, s.memory.total > 0),
            &["memory", "ram", "usage"],
        ),
        metric("Uptime", format_duration(s.host.uptime), &["time"]),
        metric("Processes", count(s.host.process_count as usize), &["tasks"]),
        metric("Load", load, &["cpu", "load"]),
        metric("Battery", battery, &["power"]),
    ]
}

fn cpu(s: &Snapshot) -> Vec<Record> {
    let frequency = if s.cpu.frequency > 0.0 {
        format!("{:.0} MHz", s.cpu.frequency)
    } else {
        NOT_AVAILABLE.to_owned()
    };
    vec![
        metric("Model", or_na(&s.cpu.model), &["cpu", "name"]),
        metric("Cores", count(s.cpu.cores), &["cpu"]),
        metric("Threads", count(s.cpu.threads), &["cpu"]),
        metric("Frequency", frequency, &["cpu", "clock"]),
        metric("Usage", percent(s.cpu.usage, s.cpu.threads > 0), &["cpu", "load"]),
    ]
}

fn memory(s: &Snapshot) -> Vec<Record> {
    let m = &s.memory;
    vec![
        metric("Total", bytes_or_na(m.total), &["ram"]),
        metric("Used", bytes_or_na(m.used), &["ram"]),
        metric("Free", bytes_or_na(m.free), &["ram"]),
        metric("Available", bytes_or_na(m.available), &["ram"]),
        metric("Usage", percent(m.percent, m.total > 0), &["ram"]),
        metric("Swap total", bytes_or_na(m.swap_total), &["swap"]),
        metric("Swap used", format_bytes(m.swap_used), &["swap"]),
        metric("Swap usage", percent(m.swap_percent, m.swap_total > 0), &["swap"]),
    ]
}

fn gpu(s: &Snapshot) -> Vec<Record> {
    if s.gpus.is_empty() {
        return vec![metric("GPU", NOT_AVAILABLE, &["graphics"])];
    }
    s.gpus
        .iter()
        .enumerate()
        .map(|(i, g)| {
            metric(
                format!("GPU {}", i + 1),
                format!(
                    "{} ({}) {} VRAM, driver {}",
                    or_na(&g.name),
                    or_na(&g.vendor),
                    bytes_or_na(g.vram),
                    or_na(&g.driver)
                ),
                &["graphics"],
            )
        })
        .collect()
}

fn storage(s: &Snapshot) -> Vec<Record> {
    if s.disks.is_empty() {
        return vec![metric("Disks", NOT_AVAILABLE, &["disk"])];
    }
    let labels = unique_labels(s.disks.iter().map(|d| d.path.as_str()));
    s.disks
        .iter()
        .zip(labels)
        .map(|(d, label)| {
            metric(
                label,
                format!(
                    "{} / {} ({:.1}%) {}",
                    format_bytes(d.used),
                    format_bytes(d.total),
                    d.percent,
                    or_na(&d.fs_type)
                ),
                &["disk", "storage"],
            )
        })
        .collect()
}

fn network(s: &Snapshot) -> Vec<Record> {
    if s.networks.is_empty() {
        return vec![metric("Adapters", NOT_AVAILABLE, &["network"])];
    }
    let labels = unique_labels(s.networks.iter().map(|n| n.name.as_str()));
    s.networks
        .iter()
        .zip(labels)
        .map(|(n, label)| {
            let state = if n.is_up { "up" } else { "down" };
            metric(
                label,
                format!(
                    "{state} \u{2191} {} \u{2193} {} MAC {}",
                    format_bytes(n.bytes_sent),
                    format_bytes(n.bytes_recv),
                    or_na(&n.mac)
                ),
                &["network", "adapter"],
            )
        })
        .collect()
}

fn processes(s: &Snapshot) -> Vec<Record> {
    let mut records = vec![metric(
        "Total",
        count(s.host.process_count as usize),
        &["processes"],
    )];
    records.extend(s.top_processes.iter().map(|p| {
        metric(
            format!("{} ({})", p.name, p.pid),
            format_bytes(p.memory),
            &["process", "memory"],
        )
    }));
    records
}

fn security(s: &Snapshot) -> Vec<Record> {
    vec![
        metric("Firewall", or_na(&s.security.firewall), &["security"]),
        metric("Antivirus", or_na(&s.security.antivirus), &["security"]),
    ]
}

fn system(s: &Snapshot) -> Vec<Record> {
    let h = &s.host;
    let boot = h
        .boot_time
        .map(|t| t.format(TIMESTAMP).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned());
    let collected = s
        .collected_at
        .map(|t| t.format(TIMESTAMP).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned());
    vec![
        metric("Hostname", or_na(&h.hostname), &["host"]),
        metric("User", or_na(&h.username), &["host"]),
        metric("OS", or_na(&h.os), &["os"]),
        metric("Platform", or_na(&h.platform), &["os"]),
        metric("Kernel", or_na(&h.kernel), &["os"]),
        metric("Architecture", or_na(&h.arch), &["os", "arch"]),
        metric("Boot time", boot, &["time"]),
        metric("Collected", collected, &["time"]),
        metric(
            "Collect time",
            format!("{} ms", s.collect_time.as_millis()),
            &["time"],
        ),
    ]
}
