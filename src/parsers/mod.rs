//! Parsers for conversation export files
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **Field-level oddities**: Fields with unexpected types are absorbed by the lenient
//!   deserializers in [`deserializers`] and become absent values.
//!
//! - **Record-level failures**: Records that are not JSON objects are logged and skipped,
//!   so a single bad record does not prevent the corpus from loading.
//!
//! - **Catastrophic failure detection**: An unreadable file, invalid JSON, a top-level value
//!   that is not an array, or more than 50% undecodable records aborts loading.
//!
//! - **Error propagation**: Uses `anyhow::Result` with context. Callers treat any error
//!   from here as fatal to startup.

pub mod deserializers;
pub mod export;

pub use export::{parse_export_file, parse_export_reader};
