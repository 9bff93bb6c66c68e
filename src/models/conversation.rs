use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::utils::timestamps::{epoch_to_datetime, utc_day};

/// Title shown for conversations exported without one
pub const UNTITLED: &str = "(no title)";

/// One conversation record exactly as the export provides it.
///
/// Every field is optional here; [`Conversation::try_from`] decides which
/// records are usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConversation {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub conversation_id: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_epoch_seconds")]
    pub create_time: Option<f64>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_epoch_seconds")]
    pub update_time: Option<f64>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub default_model_slug: Option<String>,
    #[serde(default)]
    pub mapping: MessageTree,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_bool")]
    pub is_archived: Option<bool>,
}

/// One entry of a conversation's message mapping.
///
/// Parent/child links stay in `metadata` untouched; nothing walks them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageNode {
    pub message: Option<Value>,
    pub metadata: Map<String, Value>,
}

impl MessageNode {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut fields) => {
                let message = fields.remove("message").filter(is_present);
                Self { message, metadata: fields }
            }
            _ => Self::default(),
        }
    }

    /// Whether this node carries a message payload (structural nodes do not)
    pub fn has_message(&self) -> bool {
        self.message.is_some()
    }
}

/// A conversation's node-id → node mapping, in export order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageTree {
    nodes: Vec<(String, MessageNode)>,
}

impl MessageTree {
    pub fn new(nodes: Vec<(String, MessageNode)>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageNode)> {
        self.nodes.iter().map(|(id, node)| (id.as_str(), node))
    }

    /// Message payloads of all nodes that carry one, in mapping order
    pub fn messages(&self) -> impl Iterator<Item = &Value> {
        self.nodes.iter().filter_map(|(_, node)| node.message.as_ref())
    }

    /// Number of nodes carrying a message payload, counted straight off the mapping
    pub fn message_count(&self) -> usize {
        self.nodes.iter().filter(|(_, node)| node.has_message()).count()
    }
}

impl<'de> Deserialize<'de> for MessageTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Anything other than an object is treated as an empty mapping
        let nodes = match Value::deserialize(deserializer)? {
            Value::Object(entries) => entries
                .into_iter()
                .map(|(id, node)| (id, MessageNode::from_value(node)))
                .collect(),
            _ => Vec::new(),
        };
        Ok(Self { nodes })
    }
}

/// Falsy payloads (null, empty object, empty string, ...) count as "no message"
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Reason a raw record was left out of the corpus
#[derive(Debug, Clone, PartialEq)]
pub enum IngestRejection {
    MissingCreateTime,
    UnrepresentableCreateTime(f64),
}

impl fmt::Display for IngestRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCreateTime => write!(f, "missing create_time"),
            Self::UnrepresentableCreateTime(secs) => {
                write!(f, "create_time {} is outside the representable range", secs)
            }
        }
    }
}

/// An ingested conversation. Immutable once the corpus is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub create_time: f64,
    pub update_time: f64,
    pub created_at: DateTime<Utc>,
    pub model: Option<String>,
    pub mapping: MessageTree,
    pub is_archived: bool,
}

impl Conversation {
    /// Title for display, falling back to [`UNTITLED`]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() { UNTITLED } else { &self.title }
    }

    /// UTC calendar day (`YYYY-MM-DD`) the conversation was created on
    pub fn created_day(&self) -> String {
        utc_day(&self.created_at)
    }

    /// Non-empty model slug, if any
    pub fn model_slug(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.is_empty())
    }

    pub fn message_count(&self) -> usize {
        self.mapping.message_count()
    }
}

impl TryFrom<RawConversation> for Conversation {
    type Error = IngestRejection;

    fn try_from(raw: RawConversation) -> Result<Self, Self::Error> {
        let create_time = raw.create_time.ok_or(IngestRejection::MissingCreateTime)?;
        let created_at = epoch_to_datetime(create_time)
            .ok_or(IngestRejection::UnrepresentableCreateTime(create_time))?;

        Ok(Self {
            id: raw.id.or(raw.conversation_id).unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            create_time,
            update_time: raw.update_time.unwrap_or(create_time),
            created_at,
            model: raw.default_model_slug,
            mapping: raw.mapping,
            is_archived: raw.is_archived.unwrap_or(false),
        })
    }
}
