/**
 * Backend Error Types
 *
 * The HTTP-facing error union. Every fallible handler returns
 * `Result<_, BackendError>` and lets the `IntoResponse` impl in
 * `conversion.rs` pick the status code.
 *
 * # Status Mapping
 *
 * - Validation failures (empty content, disallowed or oversized upload) - 400
 * - Missing delete target, unknown template category - 404
 * - I/O and serialization failures - 500
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::{StoreError, TemplateError};
use crate::shared::SharedError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error raised directly by a handler with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Requested item does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Shared error (validation or serialization)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Persistent store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Template edit failure
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a handler error with a status code
    ///
    /// # Example
    ///
    /// ```rust
    /// use lanshare::backend::error::BackendError;
    /// use axum::http::StatusCode;
    ///
    /// let err = BackendError::handler(StatusCode::BAD_REQUEST, "No file selected");
    /// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    /// ```
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Shorthand for a 400 validation failure on `field`
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SharedError(SharedError::validation(field, message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(err) => store_status(err),
            Self::Template(err) => match err {
                TemplateError::UnknownCategory(_) => StatusCode::NOT_FOUND,
                TemplateError::EmptyContent => StatusCode::BAD_REQUEST,
                TemplateError::Store(err) => store_status(err),
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client
    ///
    /// Store failures are reported generically; their detail (paths, OS
    /// errors) goes to the log instead.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::NotFound { message } => message.clone(),
            Self::SharedError(SharedError::ValidationError { message, .. }) => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::Store(err) | Self::Template(TemplateError::Store(err)) => store_message(err),
            Self::Template(err) => err.to_string(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}

fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::Io { .. } | StoreError::Format { .. } | StoreError::Serialize(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn store_message(err: &StoreError) -> String {
    match err {
        StoreError::NotFound { .. } => "Message not found".to_string(),
        StoreError::Io { .. } | StoreError::Format { .. } | StoreError::Serialize(_) => {
            "Failed to save data".to_string()
        }
    }
}
