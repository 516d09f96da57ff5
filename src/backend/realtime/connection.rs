/**
 * Live Connection Handle
 *
 * A `Connection` is the registry's view of one open WebSocket: an identity,
 * the peer address, a bounded queue of outbound frames drained by the
 * socket's writer task, and a close signal.
 *
 * Sending never blocks. A full queue or a closed connection is reported as
 * a `TransportError`, which the broadcaster treats as a delivery failure.
 */

use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use crate::shared::ServerEvent;

/// Failure to hand a frame to a single connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection {0} is closed")]
    Closed(Uuid),
    #[error("send queue for connection {0} is full")]
    QueueFull(Uuid),
    #[error("failed to encode frame: {0}")]
    Encode(String),
}

/// One open duplex channel
#[derive(Debug)]
pub struct Connection {
    id: Uuid,
    peer: Option<SocketAddr>,
    tx: mpsc::Sender<Arc<str>>,
    closed: watch::Sender<bool>,
}

impl Connection {
    /// Create a connection with room for `capacity` queued frames
    ///
    /// The returned receiver must be drained by whoever owns the socket.
    pub fn new(peer: Option<SocketAddr>, capacity: usize) -> (Arc<Self>, mpsc::Receiver<Arc<str>>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let (closed, _) = watch::channel(false);
        let connection = Arc::new(Self {
            id: Uuid::new_v4(),
            peer,
            tx,
            closed,
        });
        (connection, rx)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Queue an already-serialized frame
    pub fn send(&self, frame: Arc<str>) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed(self.id));
        }
        self.tx.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => TransportError::QueueFull(self.id),
            mpsc::error::TrySendError::Closed(_) => TransportError::Closed(self.id),
        })
    }

    /// Serialize and queue a frame for this connection only
    pub fn send_event(&self, event: &ServerEvent) -> Result<(), TransportError> {
        let frame = event
            .to_frame()
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        self.send(Arc::from(frame))
    }

    /// Mark the connection closed and wake everything waiting on it
    ///
    /// Returns `true` only for the call that actually closed it.
    pub fn close(&self) -> bool {
        !self.closed.send_replace(true)
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Resolve once [`close`](Self::close) has been called
    pub async fn closed(&self) {
        let mut rx = self.closed.subscribe();
        // The sender lives in `self`, so wait_for cannot fail while we are borrowed.
        let _ = rx.wait_for(|closed| *closed).await;
    }
}
