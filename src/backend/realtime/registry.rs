/**
 * Connection Registry
 *
 * The set of currently open realtime connections, keyed by connection id.
 * Register and unregister take the write lock; fan-out walks the map under
 * the read lock, so a broadcast never observes a half-registered entry.
 */

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::realtime::connection::Connection;

/// Set of live connections
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<Uuid, Arc<Connection>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection; returns `false` if the id was already present
    pub async fn register(&self, connection: Arc<Connection>) -> bool {
        let mut connections = self.connections.write().await;
        let id = connection.id();
        let fresh = connections.insert(id, connection).is_none();
        tracing::info!(
            "[Registry] Connection {} registered, {} active",
            id,
            connections.len()
        );
        fresh
    }

    /// Remove a connection; removing an unknown id is a no-op
    pub async fn unregister(&self, id: Uuid) -> Option<Arc<Connection>> {
        let mut connections = self.connections.write().await;
        let removed = connections.remove(&id);
        if removed.is_some() {
            tracing::info!(
                "[Registry] Connection {} unregistered, {} active",
                id,
                connections.len()
            );
        }
        removed
    }

    /// Remove several connections under one write lock
    pub async fn unregister_all(&self, ids: &[Uuid]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let mut connections = self.connections.write().await;
        ids.iter()
            .filter(|id| connections.remove(id).is_some())
            .count()
    }

    /// Visit every registered connection under the read lock
    ///
    /// `visit` must not await; it runs while registration is blocked.
    pub async fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&Arc<Connection>),
    {
        let connections = self.connections.read().await;
        for connection in connections.values() {
            visit(connection);
        }
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.connections.read().await.contains_key(&id)
    }

    /// Number of active connections
    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}
