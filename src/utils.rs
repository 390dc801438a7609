//! Shared utility functions.

use crate::constants::SOFT_LIMIT_BYTES;

/// Format bytes in human-readable form.
///
/// # Examples
///
/// ```
/// use ntrl_secure_store::utils::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 bytes");
/// assert_eq!(format_bytes(1024), "1.0 KB");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes == 0 {
        "0 bytes".to_string()
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

/// Describe a stored value's size against the soft limit, e.g. `"312 bytes"`
/// or `"2.1 KB (over 2048 byte limit)"`.
pub fn describe_size(len: usize) -> String {
    let size = format_bytes(len as u64);
    if len > SOFT_LIMIT_BYTES {
        format!("{size} (over {SOFT_LIMIT_BYTES} byte limit)")
    } else {
        size
    }
}
