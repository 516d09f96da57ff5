//! Shared Module
//!
//! This module contains types that are serialized over HTTP or the realtime
//! WebSocket channel, plus configuration and the shared error type.
//!
//! # Overview
//!
//! None of these types hold locks or perform I/O; the backend owns all
//! state and uses these as plain values.

/// Note log entries
pub mod entry;

/// Realtime frames (server events and client requests)
pub mod event;

/// Relayed file metadata
pub mod file;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use entry::LogEntry;
pub use event::{ClientRequest, ServerEvent};
pub use file::FileInfo;
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
