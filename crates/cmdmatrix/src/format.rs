use std::time::Duration;

/// Placeholder shown for values a collector could not read.
pub const NOT_AVAILABLE: &str = "N/A";

/// Human-readable byte count using 1024-based units.
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }

    let mut div = UNIT;
    let mut exp = 0usize;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    let prefix = ['K', 'M', 'G', 'T', 'P', 'E'][exp];
    format!("{:.2} {prefix}B", bytes as f64 / div as f64)
}

/// Compact duration: `2d 3h 4m`, `3h 4m 5s`, `4m 5s` or `5s`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / 86_400;
    let hours = (total / 3_600) % 24;
    let mins = (total / 60) % 60;
    let secs = total % 60;

    if days > 0 {
        format!("{days}d {hours}h {mins}m")
    } else if hours > 0 {
        format!("{hours}h {mins}m {secs}s")
    } else if mins > 0 {
        format!("{mins}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// The string itself, or `N/A` when empty.
pub fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

/// Byte count, or `N/A` when zero (unknown).
pub fn bytes_or_na(bytes: u64) -> String {
    if bytes == 0 {
        NOT_AVAILABLE.to_owned()
    } else {
        format_bytes(bytes)
    }
}
