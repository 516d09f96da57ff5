//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Layered configuration loading
//! └── init.rs         - Service construction and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: defaults, TOML file, environment
//! 2. **State Creation**: note log, registry, hub, templates, locality
//! 3. **Router Creation**: routes, static files, CORS and tracing layers
//!
//! # Example
//!
//! ```rust,no_run
//! use lanshare::backend::server::{config::load_config, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config()?;
//! let app = create_app(config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::{build_state, create_app, InitError};
pub use state::AppState;
