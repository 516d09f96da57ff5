/**
 * Realtime Hub
 *
 * The single entry point for writes that other devices must see. Each
 * operation validates its input, persists through the [`LogStore`] when the
 * event is a log mutation, and then broadcasts the matching [`ServerEvent`].
 *
 * # Ordering
 *
 * Persist and broadcast run together under one commit mutex. Two concurrent
 * appends therefore reach every connection in the same order they were
 * written to the log, and a delete can never be broadcast ahead of the
 * append it removes.
 *
 * A failed persist aborts the operation before anything is broadcast.
 */

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::backend::error::BackendError;
use crate::backend::realtime::broadcast::{broadcast_event, BroadcastOutcome};
use crate::backend::realtime::connection::Connection;
use crate::backend::realtime::registry::ConnectionRegistry;
use crate::backend::realtime::session::SyncSession;
use crate::backend::store::{LogStore, StoreError};
use crate::shared::file::DEFAULT_RECEIPT_MODE;
use crate::shared::{FileInfo, LogEntry, ServerEvent};

/// Shared persist-then-broadcast service
#[derive(Debug)]
pub struct RealtimeHub {
    store: Arc<LogStore>,
    registry: Arc<ConnectionRegistry>,
    commit_lock: Mutex<()>,
}

impl RealtimeHub {
    pub fn new(store: Arc<LogStore>, registry: Arc<ConnectionRegistry>) -> Self {
        Self {
            store,
            registry,
            commit_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<LogStore> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Create the protocol session for a freshly upgraded connection
    pub fn session(&self, connection: Arc<Connection>) -> SyncSession {
        SyncSession::new(connection, Arc::clone(&self.registry), Arc::clone(&self.store))
    }

    /// Append a note and broadcast `new_message`
    ///
    /// Content is trimmed; empty or whitespace-only content is rejected
    /// before anything is written.
    pub async fn append_note(&self, content: &str) -> Result<LogEntry, BackendError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(BackendError::validation("content", "Content cannot be empty"));
        }
        let entry = LogEntry::new(content);

        let _commit = self.commit_lock.lock().await;
        self.store.append(entry.clone()).await?;
        let outcome = broadcast_event(&self.registry, &ServerEvent::new_message(&entry)).await;
        tracing::info!(
            "[Realtime] Note {} added, broadcast to {} connections",
            entry.time,
            outcome.delivered
        );
        Ok(entry)
    }

    /// Delete the note keyed by `time` and broadcast `message_deleted`
    pub async fn delete_note(&self, time: &str) -> Result<LogEntry, BackendError> {
        if time.is_empty() {
            return Err(BackendError::validation("time", "No timestamp provided"));
        }

        let _commit = self.commit_lock.lock().await;
        let removed = self.store.remove(time).await.map_err(|e| match e {
            StoreError::NotFound { .. } => BackendError::not_found("Message not found"),
            other => BackendError::from(other),
        })?;
        let outcome = broadcast_event(&self.registry, &ServerEvent::message_deleted(time)).await;
        tracing::info!(
            "[Realtime] Note {} deleted, broadcast to {} connections",
            time,
            outcome.delivered
        );
        Ok(removed)
    }

    /// Broadcast an uploaded file to every device; nothing is persisted
    pub async fn relay_file(&self, info: FileInfo) -> BroadcastOutcome {
        let (filename, size, sender) = (info.filename.clone(), info.size, info.sender_ip.clone());

        let _commit = self.commit_lock.lock().await;
        let outcome = broadcast_event(&self.registry, &ServerEvent::FileIncoming(info)).await;
        tracing::info!(
            "[Files] Relayed {} ({} bytes) from {} to {} connections",
            filename,
            size,
            sender,
            outcome.delivered
        );
        outcome
    }

    /// Broadcast that `receiver_ip` took delivery of `file_id`
    ///
    /// A missing or blank `mode` becomes `exclusive`.
    pub async fn acknowledge_file(
        &self,
        file_id: &str,
        receiver_ip: &str,
        mode: Option<&str>,
    ) -> Result<ServerEvent, BackendError> {
        if file_id.is_empty() {
            return Err(BackendError::validation("file_id", "Missing file ID"));
        }
        let mode = mode
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_RECEIPT_MODE);
        let event = ServerEvent::file_received(file_id, receiver_ip, mode);

        let _commit = self.commit_lock.lock().await;
        broadcast_event(&self.registry, &event).await;
        tracing::info!(
            "[Files] {} received by {} (mode: {})",
            file_id,
            receiver_ip,
            mode
        );
        Ok(event)
    }

    /// Current log contents, most recent first
    pub async fn snapshot(&self) -> Result<Vec<LogEntry>, BackendError> {
        Ok(self.store.load_all().await?)
    }
}
