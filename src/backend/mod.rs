//! Backend Module
//!
//! All server-side code for LanShare: an Axum HTTP server with a WebSocket
//! endpoint for real-time note and file sharing across a local network.
//!
//! # Architecture
//!
//! - **`store`** - Persistent note log and templates document
//! - **`realtime`** - Connection registry, fan-out and per-connection sessions
//! - **`locality`** - Client address resolution and LAN switch prompt
//! - **`handlers`** - HTTP request handlers
//! - **`routes`** - Router assembly
//! - **`server`** - Configuration, application state, initialization
//! - **`middleware`** - Request extractors
//! - **`error`** - Backend error type and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── handlers/       - HTTP handlers
//! ├── realtime/       - Registry, broadcast, sessions, socket glue
//! ├── locality/       - Locality classification
//! ├── store/          - On-disk documents
//! ├── middleware/     - Extractors
//! └── error/          - Error types
//! ```
//!
//! # Consistency
//!
//! Every note mutation goes through `RealtimeHub`, which persists and then
//! broadcasts while holding one commit lock. Connections therefore observe
//! log events in the same order the log file records them, and a failed
//! write is never announced.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// HTTP handlers
pub mod handlers;

/// Real-time update system
pub mod realtime;

/// Network locality classification
pub mod locality;

/// On-disk stores
pub mod store;

/// Backend error types
pub mod error;

/// Request extractors
pub mod middleware;

pub use error::BackendError;
pub use realtime::{broadcast_event, RealtimeHub};
pub use server::create_app;
