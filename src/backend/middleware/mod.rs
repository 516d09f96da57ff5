//! Middleware Module
//!
//! Request-level extraction shared by several handlers.
//!
//! - **`client`** - `ClientAddr` extractor (transport peer and client IP)

pub mod client;

pub use client::{peer_addr, ClientAddr};
