//! Integration tests
//!
//! - `api` - HTTP routes through `axum-test`
//! - `realtime` - hub, sessions and the `/ws` endpoint
//! - `config` - layered configuration from the process environment

mod config_test;
mod realtime;
