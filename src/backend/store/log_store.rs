/**
 * Persistent Note Log
 *
 * The log is a JSON array of entries, most recent first, rewritten whole on
 * every mutation. The file is the only copy of the data: nothing is cached
 * in memory, so a failed write leaves no trace of the rejected entry.
 *
 * # Concurrency
 *
 * Every load-modify-save sequence runs under one `tokio::sync::Mutex`, so
 * two concurrent appends cannot both read the old collection and overwrite
 * each other. Plain reads skip the lock; the write path replaces the file by
 * rename, so a reader sees either the old or the new document.
 */

use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::backend::store::error::StoreError;
use crate::backend::store::file::{preserve_corrupt, read_json, write_json_atomic, Loaded};
use crate::shared::LogEntry;

/// Durable, ordered collection of notes
#[derive(Debug)]
pub struct LogStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LogStore {
    /// Open a store backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Backing file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every entry, most recent first
    ///
    /// A missing file yields an empty log. A corrupt file also yields an
    /// empty log; the format error is logged, never returned.
    pub async fn load_all(&self) -> Result<Vec<LogEntry>, StoreError> {
        match read_json::<Vec<LogEntry>>(&self.path).await? {
            Loaded::Missing => Ok(Vec::new()),
            Loaded::Present(entries) => Ok(entries),
            Loaded::Corrupt(message) => {
                let err = StoreError::Format {
                    path: self.path.clone(),
                    message,
                };
                tracing::error!("[Store] {}; treating log as empty", err);
                Ok(Vec::new())
            }
        }
    }

    /// Insert `entry` at the front and rewrite the file
    pub async fn append(&self, entry: LogEntry) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load_for_update().await?;
        entries.insert(0, entry);
        write_json_atomic(&self.path, &entries).await?;

        tracing::debug!("[Store] Appended entry, log now holds {} entries", entries.len());
        Ok(())
    }

    /// Delete the first entry whose timestamp equals `key` exactly
    ///
    /// Returns the removed entry, or `StoreError::NotFound` without touching
    /// the file when nothing matches.
    pub async fn remove(&self, key: &str) -> Result<LogEntry, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load_for_update().await?;
        let index = entries
            .iter()
            .position(|entry| entry.time == key)
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })?;
        let removed = entries.remove(index);
        write_json_atomic(&self.path, &entries).await?;

        tracing::debug!("[Store] Removed entry {}, {} remain", key, entries.len());
        Ok(removed)
    }

    async fn load_for_update(&self) -> Result<Vec<LogEntry>, StoreError> {
        match read_json::<Vec<LogEntry>>(&self.path).await? {
            Loaded::Missing => Ok(Vec::new()),
            Loaded::Present(entries) => Ok(entries),
            Loaded::Corrupt(message) => {
                tracing::error!(
                    "[Store] corrupt data in {}: {}; starting a new log",
                    self.path.display(),
                    message
                );
                preserve_corrupt(&self.path).await;
                Ok(Vec::new())
            }
        }
    }
}
