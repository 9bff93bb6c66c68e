use serde::{Deserialize, Serialize};

/// One message flattened out of a conversation's message tree.
///
/// `create_time` keeps the raw epoch seconds from the export; `timestamp` is the
/// ISO-8601 rendering and is absent when the raw value is missing, non-positive
/// or outside the representable range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "name")]
    pub author_name: Option<String>,
    pub content: String,
    pub create_time: Option<f64>,
    pub timestamp: Option<String>,
}

impl MessageRecord {
    /// Sort key used by linearization; missing timestamps sort first
    pub fn sort_key(&self) -> f64 {
        self.create_time.unwrap_or(0.0)
    }
}
