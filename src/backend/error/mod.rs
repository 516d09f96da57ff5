//! Backend Error Module
//!
//! Error types used by HTTP handlers and converted to HTTP responses.
//!
//! - **`types`** - `BackendError` and its status/message mapping
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # Example
//!
//! ```rust,no_run
//! use lanshare::backend::error::BackendError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<serde_json::Value>, BackendError> {
//!     Err(BackendError::validation("content", "Content cannot be empty"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
