//! LanShare - Main Library
//!
//! LanShare lets devices on the same network exchange short text notes and
//! files in real time. One device posts, every connected device sees the
//! update immediately, and the note log survives server restarts.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that cross the wire
//!   - Log entries, server/client WebSocket frames, file metadata
//!   - Configuration and shared error types
//!
//! - **`backend`** - The Axum server
//!   - Persistent note log and templates store
//!   - Connection registry, fan-out and per-connection sync sessions
//!   - Network-locality classification (LAN switch prompt)
//!   - HTTP routes and server bootstrap
//!
//! # Usage
//!
//! ```rust,no_run
//! use lanshare::backend::server::init::create_app;
//! use lanshare::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::default()).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All server state is shared through `Arc`. The connection registry sits
//! behind a `tokio::sync::RwLock`; every read-modify-write of an on-disk
//! document is serialized by a `tokio::sync::Mutex`.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
