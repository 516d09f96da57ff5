//! Real-time Sync Module
//!
//! Live WebSocket connections and the fan-out of note and file events to
//! them.
//!
//! # Architecture
//!
//! - **`connection`** - One open socket: id, bounded outbound queue, close signal
//! - **`registry`** - `RwLock`-guarded set of open connections
//! - **`broadcast`** - Serialize once, queue everywhere, evict failures
//! - **`session`** - Per-connection protocol loop (`connected`, `request_sync`)
//! - **`hub`** - Persist-then-broadcast operations under one commit lock
//! - **`socket`** - axum `/ws` upgrade and writer task
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── connection.rs   - Connection handle and TransportError
//! ├── registry.rs     - ConnectionRegistry
//! ├── broadcast.rs    - broadcast_event
//! ├── session.rs      - SyncSession state machine
//! ├── hub.rs          - RealtimeHub
//! └── socket.rs       - WebSocket handler
//! ```
//!
//! # Delivery
//!
//! Fan-out is best effort. A connection whose queue is full or closed is
//! dropped from the registry; the client reconnects and sends
//! `request_sync` to catch up.

pub mod broadcast;
pub mod connection;
pub mod hub;
pub mod registry;
pub mod session;
pub mod socket;

pub use broadcast::{broadcast_event, BroadcastOutcome};
pub use connection::{Connection, TransportError};
pub use hub::RealtimeHub;
pub use registry::ConnectionRegistry;
pub use session::{SessionState, SyncSession};
pub use socket::ws_handler;
