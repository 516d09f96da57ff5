/**
 * Relayed File Metadata
 *
 * Files are never stored. An upload is base64-encoded once and fanned out
 * to every connected device inside a `file_incoming` frame.
 */
use serde::{Deserialize, Serialize};

use crate::shared::config::AppConfig;
use crate::shared::error::SharedError;

/// Delivery mode used when a receipt does not name one
pub const DEFAULT_RECEIPT_MODE: &str = "exclusive";

/// Metadata plus encoded payload for a file relayed to all devices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileInfo {
    /// `YYYYMMDD_HHMMSS_<filename>`
    pub file_id: String,
    /// Original file name as uploaded
    pub filename: String,
    /// Size in bytes
    pub size: u64,
    /// Size in MiB, for display
    pub size_mb: f64,
    /// Content type reported by the uploader
    #[serde(rename = "type")]
    pub content_type: String,
    /// Standard base64 of the file bytes
    pub data: String,
    /// Address of the uploading client
    pub sender_ip: String,
    /// Display timestamp of the upload
    pub send_time: String,
    /// Always `file_incoming`
    pub action: String,
}

impl FileInfo {
    /// Build the relay record for an upload received now
    pub fn incoming(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: &[u8],
        sender_ip: impl Into<String>,
    ) -> Self {
        use base64::Engine as _;

        let now = chrono::Local::now();
        let filename = filename.into();
        let size = bytes.len() as u64;
        Self {
            file_id: format!("{}_{}", now.format("%Y%m%d_%H%M%S"), filename),
            filename,
            size,
            size_mb: size as f64 / 1024.0 / 1024.0,
            content_type: content_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            sender_ip: sender_ip.into(),
            send_time: now.format(crate::shared::entry::TIMESTAMP_FORMAT).to_string(),
            action: "file_incoming".to_string(),
        }
    }
}

/// Lower-cased extension of `filename`, if it has one
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Reject an upload before anything is encoded or broadcast
///
/// Checks, in order: a file name is present, its extension is on the
/// allow-list, and the size is within the configured cap.
pub fn check_upload(config: &AppConfig, filename: &str, size: u64) -> Result<(), SharedError> {
    if filename.trim().is_empty() {
        return Err(SharedError::validation("file", "No file selected"));
    }
    match file_extension(filename) {
        Some(ext) if config.is_extension_allowed(&ext) => {}
        _ => return Err(SharedError::validation("file", "File type not allowed")),
    }
    if size > config.max_upload_bytes {
        return Err(SharedError::validation(
            "file",
            format!(
                "File too large, the limit is {} MB",
                config.max_upload_bytes / 1024 / 1024
            ),
        ));
    }
    Ok(())
}
