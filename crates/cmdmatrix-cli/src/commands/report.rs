use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cmdmatrix::report::report_file_name;
use cmdmatrix::{ReportExporter, SystemInfoProvider};

/// Where the report goes: `output` when given, else a timestamped file in
/// `export_dir`.
pub fn destination(output: Option<PathBuf>, export_dir: &Path) -> PathBuf {
    output.unwrap_or_else(|| export_dir.join(report_file_name(chrono::Local::now())))
}

/// Collect one snapshot and export it to `destination`.
pub fn run(
    provider: &dyn SystemInfoProvider,
    exporter: &dyn ReportExporter,
    destination: &Path,
) -> Result<()> {
    let snapshot = provider.collect().context("failed to collect system information")?;
    exporter
        .export(&snapshot, destination)
        .with_context(|| format!("failed to export report to {}", destination.display()))?;
    println!("Report saved: {}", destination.display());
    Ok(())
}
