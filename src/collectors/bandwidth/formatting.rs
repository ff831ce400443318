//! Formatting utilities for bandwidth data
//!
//! This module provides utility functions for formatting byte counts and uptimes
//! for the human-readable status output and report log lines.

use std::time::Duration;

/// Formats byte values with appropriate units
///
/// Converts raw byte values into human-readable format with appropriate
/// unit prefixes (B, KB, MB, GB, TB).
///
/// # Arguments
///
/// * `bytes` - Byte count
///
/// # Returns
///
/// A formatted string with the byte value and appropriate unit
///
/// # Examples
///
/// ```
/// use ignite_node::collectors::bandwidth::formatting::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// assert_eq!(format_bytes(1073741824), "1.00 GB");
/// assert_eq!(format_bytes(1099511627776), "1.00 TB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let value = bytes as f64;

    if value < KB {
        format!("{} B", bytes)
    } else if value < KB * KB {
        format!("{:.2} KB", value / KB)
    } else if value < KB * KB * KB {
        format!("{:.2} MB", value / (KB * KB))
    } else if value < KB * KB * KB * KB {
        format!("{:.2} GB", value / (KB * KB * KB))
    } else {
        format!("{:.2} TB", value / (KB * KB * KB * KB))
    }
}

/// Formats an elapsed duration as hours, minutes and seconds
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use ignite_node::collectors::bandwidth::formatting::format_uptime;
///
/// assert_eq!(format_uptime(Duration::from_secs(0)), "0h 0m 0s");
/// assert_eq!(format_uptime(Duration::from_secs(3725)), "1h 2m 5s");
/// ```
pub fn format_uptime(elapsed: Duration) -> String {
    let total_seconds = elapsed.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}h {}m {}s", hours, minutes, seconds)
}
