/**
 * Realtime Event Broadcasting
 *
 * Fan-out of one [`ServerEvent`] to every registered connection.
 *
 * The event is serialized once and the same frame is queued on each
 * connection without blocking. Connections whose queue is full or already
 * closed are closed and unregistered after the walk, so one slow or dead
 * client never delays or breaks delivery to the others.
 */

use std::sync::Arc;

use crate::backend::realtime::connection::Connection;
use crate::backend::realtime::registry::ConnectionRegistry;
use crate::shared::ServerEvent;

/// What happened during one broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastOutcome {
    /// Connections the frame was queued on
    pub delivered: usize,
    /// Connections removed because the frame could not be queued
    pub evicted: usize,
}

/// Broadcast an event to all registered connections
///
/// # Arguments
///
/// * `registry` - The live connection set
/// * `event` - The event to send
///
/// # Returns
///
/// Delivery counts. Zero connections is a successful broadcast.
///
/// # Example
///
/// ```rust,ignore
/// let outcome = broadcast_event(&registry, &ServerEvent::message_deleted(time)).await;
/// tracing::debug!("delivered to {}", outcome.delivered);
/// ```
pub async fn broadcast_event(registry: &ConnectionRegistry, event: &ServerEvent) -> BroadcastOutcome {
    let frame: Arc<str> = match event.to_frame() {
        Ok(frame) => Arc::from(frame),
        Err(e) => {
            tracing::error!("[Broadcast] Failed to serialize {} event: {}", event.kind(), e);
            return BroadcastOutcome::default();
        }
    };

    let mut outcome = BroadcastOutcome::default();
    let mut failed: Vec<Arc<Connection>> = Vec::new();

    registry
        .for_each(|connection| match connection.send(Arc::clone(&frame)) {
            Ok(()) => outcome.delivered += 1,
            Err(e) => {
                tracing::warn!("[Broadcast] Dropping connection: {}", e);
                failed.push(Arc::clone(connection));
            }
        })
        .await;

    if !failed.is_empty() {
        for connection in &failed {
            connection.close();
        }
        let ids: Vec<_> = failed.iter().map(|c| c.id()).collect();
        outcome.evicted = registry.unregister_all(&ids).await;
    }

    tracing::debug!(
        "[Broadcast] {} event delivered to {} connections ({} evicted)",
        event.kind(),
        outcome.delivered,
        outcome.evicted
    );
    outcome
}
