//! Data models for exported chat conversation archives.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`RawConversation`] - One loosely-typed record as it appears in the export
//! - [`Conversation`] - An ingested conversation with a validated creation time
//! - [`MessageTree`] / [`MessageNode`] - The flat node-id mapping of a conversation
//! - [`MessageRecord`] - One linearized message
//! - [`SearchDocument`] - One conversation as seen by the full-text index
//! - Response shapes returned by the query operations (`responses`)
//!
//! Raw records use serde with lenient deserializers (see `parsers::deserializers`)
//! so that odd field types degrade to absent values instead of failing a record.

pub mod conversation;
pub mod message;
pub mod responses;
pub mod search;

pub use conversation::{Conversation, IngestRejection, MessageNode, MessageTree, RawConversation};
pub use message::MessageRecord;
pub use responses::{
    Contribution, ContributionDay, ConversationDetail, ConversationSummary, ConversationsForDate,
    DateRange, ModelCount, SearchResponse, Stats,
};
pub use search::SearchDocument;
