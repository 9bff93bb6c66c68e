//! Message tree linearization.
//!
//! A conversation's mapping is a tree of nodes keyed by node id. Only nodes that
//! carry a message payload produce output, and the output order comes from the
//! messages' own timestamps, never from parent/child links.

pub mod content;

use serde_json::Value;

pub use content::{extract_author, extract_content_text, extract_create_time, resolve_timestamp};

use crate::models::{MessageRecord, MessageTree};
use crate::parsers::deserializers::string_from_value;

/// Flatten a message tree into records sorted by ascending `create_time`.
///
/// Messages without a `create_time` sort first (key 0). The sort is stable, so
/// equal keys keep mapping order. Malformed payloads degrade to empty fields.
pub fn linearize_messages(tree: &MessageTree) -> Vec<MessageRecord> {
    let mut messages: Vec<MessageRecord> = tree.messages().map(message_record).collect();
    messages.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));
    messages
}

/// Build one record from a message payload
pub fn message_record(message: &Value) -> MessageRecord {
    let (role, author_name) = extract_author(message);
    let create_time = extract_create_time(message);

    MessageRecord {
        id: message.get("id").and_then(string_from_value),
        role,
        author_name,
        content: extract_content_text(message),
        create_time,
        timestamp: resolve_timestamp(create_time),
    }
}

/// Space-joined non-empty message contents, in linearized order
pub fn joined_content(messages: &[MessageRecord]) -> String {
    messages
        .iter()
        .filter(|m| !m.content.is_empty())
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
