//! Full-text search over conversation titles and message content.
//!
//! Each text field gets its own TF-IDF index ([`field::TextFieldIndex`]); a query
//! is scored against both and the field scores are combined with per-field boosts
//! (title 3×, content 1×). Keyword fields (`id`, `createTime`, `model`) only take
//! part in exact-match filtering.

pub mod field;
pub mod index;
pub mod tokenizer;

pub use field::TextFieldIndex;
pub use index::{
    DEFAULT_SEARCH_LIMIT, FieldBoost, FullTextIndex, KeywordField, KeywordFilter, ScoredDocument,
    SearchOptions,
};
pub use tokenizer::{term_frequencies, tokenize};
