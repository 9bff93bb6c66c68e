use serde::{Deserialize, Serialize};

/// One conversation as stored in the full-text index.
///
/// `title` and `content` are free-text fields; `id`, `create_time` and `model`
/// are keyword fields that only support exact-match filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocument {
    pub id: String,
    pub title: String,
    pub content: String,
    pub create_time: String,
    pub model: String,
}
