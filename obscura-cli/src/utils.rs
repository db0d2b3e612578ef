//! Common utility functions shared across CLI commands.

use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};

/// Build the receipt output path from the original file path.
///
/// Transforms `photo.jpg` into `photo.jpg.attest`.
pub fn build_receipt_path(file: &Path) -> PathBuf {
    file.with_extension(format!(
        "{}.attest",
        file.extension().and_then(|e| e.to_str()).unwrap_or("bin")
    ))
}

/// Format a Unix timestamp (milliseconds) as a human-readable UTC string.
pub fn format_timestamp(timestamp_ms: u64) -> String {
    let secs = (timestamp_ms / 1000) as i64;
    let nsecs = ((timestamp_ms % 1000) * 1_000_000) as u32;
    match Utc.timestamp_opt(secs, nsecs) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        _ => format!("{}ms", timestamp_ms),
    }
}
