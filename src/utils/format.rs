//! Human-readable formatting helpers.

/// Formats a byte count as a binary-prefixed (1024-based) size with one
/// decimal place, e.g. `1.5 KB`. Values under 1 KB render as a bare byte
/// count, e.g. `14 B`.
pub fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: u64 = 1024;

    if size < THRESHOLD {
        return format!("{size} B");
    }

    let mut value = size as f64;
    let mut unit_index = 0;

    while value >= THRESHOLD as f64 && unit_index < UNITS.len() - 1 {
        value /= THRESHOLD as f64;
        unit_index += 1;
    }

    format!("{:.1} {}", value, UNITS[unit_index])
}
