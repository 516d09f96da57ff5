//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Notes, files, LAN detection, templates, health
//! ```
//!
//! # Route Organization
//!
//! 1. **Realtime** - `GET /ws`
//! 2. **API Routes** - form and JSON endpoints
//! 3. **Static Files** - `/static` and the fallback page
//!
//! Every state-changing endpoint goes through `RealtimeHub`, so a note or
//! file posted over HTTP reaches every open socket.

/// Main router creation
pub mod router;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
