use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::format::{format_bytes, format_duration, or_na};
use crate::snapshot::{DiskInfo, NetworkInfo, Snapshot};

const RULE: &str = "================================================================================";
const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Errors surfaced while writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes a fixed-format plain-text report of a snapshot.
pub trait ReportExporter: Send + Sync {
    fn export(&self, snapshot: &Snapshot, destination: &Path) -> Result<(), ExportError>;
}

impl<T: ReportExporter + ?Sized> ReportExporter for Arc<T> {
    fn export(&self, snapshot: &Snapshot, destination: &Path) -> Result<(), ExportError> {
        (**self).export(snapshot, destination)
    }
}

/// Exports to a file on disk, creating the parent directory when missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExporter;

impl ReportExporter for PlainTextExporter {
    fn export(&self, snapshot: &Snapshot, destination: &Path) -> Result<(), ExportError> {
        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let text = render_report(snapshot, Local::now());
        std::fs::write(destination, text).map_err(|source| ExportError::Write {
            path: destination.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %destination.display(), "wrote system report");
        Ok(())
    }
}

/// `SystemReport_YYYYMMDD_HHMMSS.txt` for the given instant.
pub fn report_file_name(at: DateTime<Local>) -> String {
    format!("SystemReport_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// The desktop when the platform has one, else the home directory, else `.`.
pub fn default_export_dir() -> PathBuf {
    dirs::desktop_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Render the report text.
pub fn render_report(snapshot: &Snapshot, generated: DateTime<Local>) -> String {
    let host = &snapshot.host;
    let cpu = &snapshot.cpu;
    let mem = &snapshot.memory;

    let boot_time = host
        .boot_time
        .map(|t| t.format(TIMESTAMP).to_string())
        .unwrap_or_default();

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "
{RULE}
                      SYSTEM INFORMATION REPORT
                      Generated: {generated}
{RULE}

SYSTEM OVERVIEW
---------------
Hostname       : {hostname}
User           : {user}
OS             : {os}
Platform       : {platform}
Kernel         : {kernel}
Architecture   : {arch}
Uptime         : {uptime}
Boot Time      : {boot}
Processes      : {procs}

CPU INFORMATION
---------------
Model          : {model}
Cores          : {cores}
Threads        : {threads}
Frequency      : {freq:.2} MHz
Usage          : {usage:.1}%

MEMORY
------
Total          : {mem_total}
Used           : {mem_used}
Free           : {mem_free}
Usage          : {mem_pct:.1}%
Swap Total     : {swap_total}
Swap Used      : {swap_used}

DISK DRIVES
-----------
{disks}
NETWORK ADAPTERS
----------------
{nets}
{RULE}
                              End of Report
{RULE}
",
        generated = generated.format(TIMESTAMP),
        hostname = or_na(&host.hostname),
        user = or_na(&host.username),
        os = or_na(&host.os),
        platform = or_na(&host.platform),
        kernel = or_na(&host.kernel),
        arch = or_na(&host.arch),
        uptime = format_duration(host.uptime),
        boot = or_na(&boot_time),
        procs = host.process_count,
        model = or_na(&cpu.model),
        cores = cpu.cores,
        threads = cpu.threads,
        freq = cpu.frequency,
        usage = cpu.usage,
        mem_total = format_bytes(mem.total),
        mem_used = format_bytes(mem.used),
        mem_free = format_bytes(mem.free),
        mem_pct = mem.percent,
        swap_total = format_bytes(mem.swap_total),
        swap_used = format_bytes(mem.swap_used),
        disks = disks_section(&snapshot.disks),
        nets = networks_section(&snapshot.networks),
    );
    out
}

fn disks_section(disks: &[DiskInfo]) -> String {
    let mut out = String::new();
    for d in disks {
        let _ = writeln!(out, "Drive {} ({})", d.path, or_na(&d.fs_type));
        let _ = writeln!(
            out,
            "  Total: {}, Used: {}, Free: {}, Usage: {:.1}%\n",
            format_bytes(d.total),
            format_bytes(d.used),
            format_bytes(d.free),
            d.percent
        );
    }
    out
}

fn networks_section(nets: &[NetworkInfo]) -> String {
    let mut out = String::new();
    for n in nets {
        let status = if n.is_up { "Up" } else { "Down" };
        let _ = writeln!(out, "{} [{status}]", n.name);
        let _ = writeln!(out, "  MAC: {}", or_na(&n.mac));
        let _ = writeln!(
            out,
            "  Sent: {}, Recv: {}\n",
            format_bytes(n.bytes_sent),
            format_bytes(n.bytes_recv)
        );
    }
    out
}
