//! Units formatting and conversion utilities
//!
//! Rounding for exported figures, block throughput arithmetic, and
//! human-readable sizes and durations for the front-ends.

use std::time::Duration;

pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// Round to a fixed number of decimal places
///
/// # Examples
/// ```
/// use monkeytest::util::units::round_to;
///
/// assert_eq!(round_to(3.14159, 2), 3.14);
/// assert_eq!(round_to(2.675, 0), 3.0);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Megabytes per second for `megabytes` moved in `seconds`.
///
/// Returns `None` when the time is zero or not finite, since the rate is
/// undefined there.
///
/// # Examples
/// ```
/// use monkeytest::util::units::throughput_mbps;
///
/// assert_eq!(throughput_mbps(10.0, 1.0), Some(10.0));
/// assert_eq!(throughput_mbps(10.0, 0.0), None);
/// ```
pub fn throughput_mbps(megabytes: f64, seconds: f64) -> Option<f64> {
    if seconds > 0.0 && seconds.is_finite() {
        Some(megabytes / seconds)
    } else {
        None
    }
}

/// Convert a byte count to megabytes (MiB)
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Format bytes into human-readable size with appropriate units
///
/// # Examples
/// ```
/// use monkeytest::util::units::format_bytes;
///
/// assert_eq!(format_bytes(1024), "1.0 KiB");
/// assert_eq!(format_bytes(1048576), "1.0 MiB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Format duration into human-readable string
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use monkeytest::util::units::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 3600 {
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if total_secs >= 60 {
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{}m {}s", minutes, seconds)
    } else if total_secs > 0 {
        if millis > 0 {
            format!("{}.{:02}s", total_secs, millis / 10)
        } else {
            format!("{}s", total_secs)
        }
    } else {
        format!("{}ms", millis)
    }
}
