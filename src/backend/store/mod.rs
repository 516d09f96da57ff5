//! Storage Module
//!
//! On-disk documents owned by the server:
//!
//! - **`log_store`** - The persistent note log (source of truth for history)
//! - **`templates`** - Quick-reply templates grouped by category
//! - **`file`** - Whole-file JSON read/replace helpers shared by both
//! - **`error`** - `StoreError` taxonomy (I/O, format, not found)
//!
//! Both stores serialize their load-modify-save sequences behind a mutex;
//! neither keeps an in-memory copy of the document.

pub mod error;
pub(crate) mod file;
pub mod log_store;
pub mod templates;

pub use error::StoreError;
pub use log_store::LogStore;
pub use templates::{AddOutcome, Template, TemplateError, TemplateStore, TemplatesConfig};
