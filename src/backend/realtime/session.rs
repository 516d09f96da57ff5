/**
 * Sync Protocol Session
 *
 * One `SyncSession` drives one connection through
 * `Connecting -> Open -> Closed`.
 *
 * - Opening queues the `connected` acknowledgement and then registers the
 *   connection, so the acknowledgement is always the first frame.
 * - While open, inbound text frames are parsed; `request_sync` is answered
 *   with a full log snapshot sent to this connection only. Anything else is
 *   logged and ignored.
 * - An inbound error, end of stream, a failed reply or an external close
 *   moves the session to `Closed`, which unregisters exactly once.
 *
 * The session is written against a plain `Stream` of text frames rather than
 * a socket, so it runs the same way under tests with channel-backed streams.
 */

use futures_util::{Stream, StreamExt};
use std::fmt::Display;
use std::sync::Arc;

use crate::backend::realtime::connection::{Connection, TransportError};
use crate::backend::realtime::registry::ConnectionRegistry;
use crate::backend::store::LogStore;
use crate::shared::{ClientRequest, ServerEvent};

/// Message returned to the client when the log could not be read
pub const SYNC_FAILED_MESSAGE: &str = "Failed to load messages";

/// Lifecycle of a realtime connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Open,
    Closed,
}

/// Per-connection protocol handler
#[derive(Debug)]
pub struct SyncSession {
    connection: Arc<Connection>,
    registry: Arc<ConnectionRegistry>,
    store: Arc<LogStore>,
    state: SessionState,
}

impl SyncSession {
    pub fn new(
        connection: Arc<Connection>,
        registry: Arc<ConnectionRegistry>,
        store: Arc<LogStore>,
    ) -> Self {
        Self {
            connection,
            registry,
            store,
            state: SessionState::Connecting,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.connection
    }

    /// Acknowledge the connection and make it visible to broadcasts
    pub async fn open(&mut self) -> Result<(), TransportError> {
        if self.state != SessionState::Connecting {
            return Ok(());
        }
        self.connection.send_event(&ServerEvent::connected())?;
        self.registry.register(Arc::clone(&self.connection)).await;
        self.state = SessionState::Open;
        tracing::info!(
            "[Realtime] Connection {} open (peer {})",
            self.connection.id(),
            self.connection
                .peer()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        Ok(())
    }

    /// React to one inbound text frame
    ///
    /// Unparseable and unrecognized frames are not errors. An error is
    /// returned only when a reply could not be queued.
    pub async fn handle_text(&self, text: &str) -> Result<(), TransportError> {
        match ClientRequest::parse(text) {
            Ok(ClientRequest::RequestSync) => self.resync().await,
            Ok(ClientRequest::Other(kind)) => {
                tracing::debug!(
                    "[Realtime] Ignoring '{}' frame from {}",
                    kind,
                    self.connection.id()
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "[Realtime] Unparseable frame from {}: {}",
                    self.connection.id(),
                    e
                );
                Ok(())
            }
        }
    }

    async fn resync(&self) -> Result<(), TransportError> {
        let reply = match self.store.load_all().await {
            Ok(messages) => {
                tracing::debug!(
                    "[Realtime] Sending {} entries to {}",
                    messages.len(),
                    self.connection.id()
                );
                ServerEvent::SyncData { messages }
            }
            Err(e) => {
                tracing::error!("[Realtime] Resync for {} failed: {}", self.connection.id(), e);
                ServerEvent::SyncError {
                    error: SYNC_FAILED_MESSAGE.to_string(),
                }
            }
        };
        self.connection.send_event(&reply)
    }

    /// Open the session and process `inbound` until it ends
    pub async fn run<S, E>(mut self, mut inbound: S)
    where
        S: Stream<Item = Result<String, E>> + Unpin,
        E: Display,
    {
        if let Err(e) = self.open().await {
            tracing::warn!("[Realtime] Could not open connection: {}", e);
            self.close().await;
            return;
        }

        let connection = Arc::clone(&self.connection);
        loop {
            tokio::select! {
                _ = connection.closed() => {
                    tracing::debug!("[Realtime] Connection {} closed by server", connection.id());
                    break;
                }
                frame = inbound.next() => match frame {
                    Some(Ok(text)) => {
                        if let Err(e) = self.handle_text(&text).await {
                            tracing::warn!("[Realtime] Reply failed: {}", e);
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        tracing::info!("[Realtime] Read error on {}: {}", connection.id(), e);
                        break;
                    }
                    None => break,
                },
            }
        }

        self.close().await;
    }

    /// Move to `Closed`; later calls do nothing
    pub async fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closed;
        self.connection.close();
        if self.registry.unregister(self.connection.id()).await.is_none() {
            tracing::debug!(
                "[Realtime] Connection {} was already removed",
                self.connection.id()
            );
        }
    }
}
