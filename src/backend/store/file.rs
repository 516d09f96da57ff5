/**
 * JSON Document Files
 *
 * Helpers shared by the note log and the templates store. Documents are
 * small, so every write replaces the whole file: the new content goes to a
 * sibling `.tmp` file which is then renamed over the original. A failed
 * write therefore leaves the previous document untouched.
 */

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::backend::store::error::StoreError;

/// Result of reading a document that may be absent or damaged
#[derive(Debug)]
pub(crate) enum Loaded<T> {
    /// No file on disk yet
    Missing,
    /// Parsed successfully
    Present(T),
    /// File exists but does not parse; carries the parser message
    Corrupt(String),
}

/// Read and parse a JSON document
///
/// Only genuine I/O failures are errors; a missing or unparseable file is
/// reported through [`Loaded`].
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Loaded<T>, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Loaded::Missing),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Loaded::Missing);
    }

    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(Loaded::Present(value)),
        Err(e) => Ok(Loaded::Corrupt(e.to_string())),
    }
}

/// Replace the document at `path` with `value`
pub(crate) async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
    }

    let tmp = sibling(path, ".tmp");
    if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(StoreError::io(&tmp, e));
    }
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(StoreError::io(path, e));
    }
    Ok(())
}

/// Copy a damaged document aside before it gets overwritten
pub(crate) async fn preserve_corrupt(path: &Path) {
    let backup = sibling(path, ".corrupt");
    match tokio::fs::copy(path, &backup).await {
        Ok(_) => tracing::warn!("[Store] Preserved corrupt {} as {}", path.display(), backup.display()),
        Err(e) => tracing::warn!("[Store] Could not preserve corrupt {}: {}", path.display(), e),
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
