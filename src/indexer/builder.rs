//! Search index builder for an ingested corpus.
//!
//! Every conversation becomes one [`SearchDocument`]. The `content` field is the
//! space-joined text of the conversation's linearized messages, so content appears
//! in timestamp order. Linearization runs in parallel across conversations; the
//! document order always matches the store's ingest order.

use rayon::prelude::*;

use crate::models::{Conversation, SearchDocument};
use crate::normalizer::{joined_content, linearize_messages};
use crate::search::FullTextIndex;
use crate::store::CorpusStore;
use crate::utils::format_iso;

/// Build the full-text index for every conversation in the store
///
/// # Examples
///
/// ```
/// use chat_archive_explorer::{CorpusStore, build_search_index};
///
/// let store = CorpusStore::ingest(Vec::new());
/// let index = build_search_index(&store);
/// assert!(index.is_empty());
/// ```
pub fn build_search_index(store: &CorpusStore) -> FullTextIndex {
    log::info!("Building search index...");
    let documents: Vec<SearchDocument> =
        store.conversations().par_iter().map(search_document).collect();
    let index = FullTextIndex::build(documents);
    log::info!("Search index built with {} documents", index.len());
    index
}

/// The searchable view of one conversation
pub fn search_document(conversation: &Conversation) -> SearchDocument {
    let messages = linearize_messages(&conversation.mapping);

    SearchDocument {
        id: conversation.id.clone(),
        title: conversation.title.clone(),
        content: joined_content(&messages),
        create_time: format_iso(&conversation.created_at),
        model: conversation.model.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::RawConversation;

    fn store(values: Vec<serde_json::Value>) -> CorpusStore {
        CorpusStore::ingest(
            values.into_iter().map(|v| serde_json::from_value::<RawConversation>(v).unwrap()),
        )
    }

    #[test]
    fn test_search_document_joins_content_in_timestamp_order() {
        let store = store(vec![json!({
            "id": "c1",
            "title": "Trip planning",
            "create_time": 1700000000,
            "mapping": {
                "b": { "message": { "create_time": 1700000002, "content": { "parts": ["World"] } } },
                "empty": { "message": { "create_time": 1700000003, "content": { "parts": [] } } },
                "a": { "message": { "create_time": 1700000001, "content": { "parts": ["Hello"] } } }
            }
        })]);

        let document = search_document(&store.conversations()[0]);
        assert_eq!(document.id, "c1");
        assert_eq!(document.title, "Trip planning");
        assert_eq!(document.content, "Hello World");
        assert_eq!(document.create_time, "2023-11-14T22:13:20+00:00");
        assert_eq!(document.model, "");
    }

    #[test]
    fn test_untitled_conversation_indexes_empty_title() {
        let store = store(vec![json!({ "id": "c1", "create_time": 1700000000 })]);
        let document = search_document(&store.conversations()[0]);
        assert_eq!(document.title, "");
    }

    #[test]
    fn test_build_search_index_keeps_store_order() {
        let store = store(
            (0..50)
                .map(|i| json!({ "id": format!("c{}", i), "title": "same", "create_time": 1700000000 + i }))
                .collect(),
        );

        let index = build_search_index(&store);
        assert_eq!(index.len(), 50);
        let ids: Vec<&str> = index.documents().iter().map(|d| d.id.as_str()).collect();
        let expected: Vec<String> = (0..50).map(|i| format!("c{}", i)).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
