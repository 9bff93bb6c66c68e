//! Response shapes produced by the query operations.
//!
//! Field names serialize in camelCase to match what the viewer frontend consumes.

use serde::{Deserialize, Serialize};

use super::message::MessageRecord;
use super::search::SearchDocument;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCount {
    pub model: String,
    pub count: usize,
}

/// Corpus-wide statistics. `Stats::default()` is the empty-corpus value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_conversations: usize,
    pub total_messages: usize,
    pub date_range: DateRange,
    pub top_models: Vec<ModelCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: String,
    pub count: usize,
}

/// Per-day conversation counts for one calendar year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub year: i32,
    pub days: Vec<ContributionDay>,
    pub max: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub create_time: String,
    pub model: Option<String>,
    pub message_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationsForDate {
    pub date: String,
    pub conversations: Vec<ConversationSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDetail {
    pub id: String,
    pub title: String,
    pub create_time: String,
    pub update_time: String,
    pub model: Option<String>,
    pub messages: Vec<MessageRecord>,
    pub is_archived: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchDocument>,
}
