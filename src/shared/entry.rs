/**
 * Note Log Entry
 *
 * This module defines the LogEntry struct stored by the persistent note log
 * and sent to clients in `new_message` and `sync_data` frames.
 *
 * The display timestamp doubles as the entry's key: deleting a note matches
 * on the exact timestamp string.
 */
use serde::{Deserialize, Serialize};

/// Display format used for entry timestamps and other human-facing times
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single note in the shared log
///
/// # Fields
/// * `time` - Local display timestamp (`YYYY-MM-DD HH:MM:SS`), also the delete key
/// * `content` - Free text as posted by the client
///
/// # Example
/// ```rust
/// use lanshare::shared::LogEntry;
///
/// let entry = LogEntry::with_time("2024-05-01 10:00:00", "hello");
/// assert_eq!(entry.time, "2024-05-01 10:00:00");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    /// Display timestamp; unique key for deletion
    pub time: String,
    /// Note text
    pub content: String,
}

impl LogEntry {
    /// Create an entry stamped with the current local time
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            time: now_display(),
            content: content.into(),
        }
    }

    /// Create an entry with an explicit timestamp
    pub fn with_time(time: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            content: content.into(),
        }
    }
}

/// Current local time in [`TIMESTAMP_FORMAT`]
pub fn now_display() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
