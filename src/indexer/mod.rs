//! Search index construction from the corpus store
//!
//! The builder turns each ingested conversation into a search document and fits the
//! full-text index over them. Construction is infallible: malformed message content
//! has already degraded to empty strings during linearization, so every conversation
//! in the store yields exactly one document.

pub mod builder;

pub use builder::{build_search_index, search_document};
