//! HTTP Handlers Module
//!
//! Thin request/response wrappers over the realtime hub, the stores and the
//! locality service.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Request and response bodies
//! ├── notes.rs      - POST /add, POST /delete, GET /api/messages
//! ├── files.rs      - POST /upload, POST /file_received
//! ├── lan.rs        - GET /api/lan-check, GET /api/server-info
//! ├── templates.rs  - /api/templates routes
//! └── health.rs     - GET /health
//! ```

/// Request and response types
pub mod types;

/// Note log handlers
pub mod notes;

/// File relay handlers
pub mod files;

/// LAN detection handlers
pub mod lan;

/// Template handlers
pub mod templates;

/// Health check
pub mod health;

pub use files::{file_received, upload_file};
pub use health::health;
pub use lan::{lan_check, server_info};
pub use notes::{add_note, delete_note, list_notes};
pub use templates::{add_template, get_templates, replace_templates};
