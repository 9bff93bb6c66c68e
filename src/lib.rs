//! Chat Archive Explorer - Browse and search exported chat conversation archives
//!
//! This library loads a conversation export (a JSON array of conversations, each
//! carrying a tree of message nodes) into an immutable in-memory corpus and serves
//! read-only queries over it. It supports:
//!
//! - Linearizing a conversation's message tree into a time-ordered message list
//! - Indexing conversations by id and by UTC calendar day
//! - Aggregate statistics and per-day contribution counts for a year
//! - Boosted TF-IDF full-text search over titles and message content
//! - Persisting the search index next to the export so later startups skip the rebuild
//!
//! # Example
//!
//! ```no_run
//! use chat_archive_explorer::{ArchiveService, ExplorerConfig};
//!
//! let config = ExplorerConfig::new("/data/conversations.json");
//! let service = ArchiveService::load(&config)?;
//! println!("{} conversations", service.stats().total_conversations);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod index_storage;
pub mod indexer;
pub mod models;
pub mod normalizer;
pub mod parsers;
pub mod search;
pub mod service;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::ExplorerConfig;
pub use indexer::build_search_index;
pub use models::{Conversation, MessageRecord, RawConversation, SearchDocument};
pub use normalizer::linearize_messages;
pub use parsers::parse_export_file;
pub use search::FullTextIndex;
pub use service::ArchiveService;
pub use store::CorpusStore;
