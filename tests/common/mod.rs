//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Temp-dir backed application state with deterministic locality
//! - In-process `axum-test` servers and real listeners
//! - Frame helpers for registered connections
//! - Custom assertion macros

pub mod app;
pub mod assertions;

pub use app::*;
