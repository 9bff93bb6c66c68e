//! Corpus store: the authoritative, immutable set of ingested conversations.
//!
//! Built once by [`CorpusStore::ingest`]; every method afterwards takes `&self`,
//! so a store can be shared across threads without locking.

mod stats;

use std::collections::HashMap;

use crate::models::{Conversation, IngestRejection, RawConversation};

/// Counts reported by a single ingest pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub ingested: usize,
    pub missing_create_time: usize,
    pub invalid_create_time: usize,
    /// Records whose id was already taken; they are kept but not reachable by id
    pub duplicate_ids: usize,
}

impl IngestSummary {
    pub fn skipped(&self) -> usize {
        self.missing_create_time + self.invalid_create_time
    }
}

#[derive(Debug, Default)]
pub struct CorpusStore {
    conversations: Vec<Conversation>,
    by_id: HashMap<String, usize>,
    by_date: HashMap<String, Vec<usize>>,
    summary: IngestSummary,
}

impl CorpusStore {
    /// Build a store from raw export records in a single pass.
    ///
    /// Records without `create_time` (or with one that cannot be represented as a
    /// date) are skipped. Every other record is counted and bucketed by day; when
    /// two records share an id, id lookup resolves to the first one.
    pub fn ingest<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawConversation>,
    {
        let mut store = Self::default();

        for record in records {
            let conversation = match Conversation::try_from(record) {
                Ok(conversation) => conversation,
                Err(IngestRejection::MissingCreateTime) => {
                    store.summary.missing_create_time += 1;
                    continue;
                }
                Err(rejection) => {
                    log::warn!("Skipping conversation: {}", rejection);
                    store.summary.invalid_create_time += 1;
                    continue;
                }
            };

            let position = store.conversations.len();
            if store.by_id.contains_key(&conversation.id) {
                log::warn!("Duplicate conversation id {:?}; lookup keeps the first", conversation.id);
                store.summary.duplicate_ids += 1;
            } else {
                store.by_id.insert(conversation.id.clone(), position);
            }
            store.by_date.entry(conversation.created_day()).or_default().push(position);
            store.conversations.push(conversation);
        }

        store.summary.ingested = store.conversations.len();
        log::info!(
            "Loaded {} conversations ({} skipped: {} without create_time, {} invalid create_time; {} duplicate ids)",
            store.summary.ingested,
            store.summary.skipped(),
            store.summary.missing_create_time,
            store.summary.invalid_create_time,
            store.summary.duplicate_ids
        );

        store
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// All conversations in ingest order
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn summary(&self) -> &IngestSummary {
        &self.summary
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Conversation> {
        self.by_id.get(id).map(|&position| &self.conversations[position])
    }

    /// Conversations created on a UTC day (`YYYY-MM-DD`), newest first.
    ///
    /// Unknown or malformed days yield an empty list.
    pub fn get_by_date(&self, day: &str) -> Vec<&Conversation> {
        let mut bucket: Vec<&Conversation> = self
            .by_date
            .get(day)
            .map(|positions| positions.iter().map(|&p| &self.conversations[p]).collect())
            .unwrap_or_default();
        bucket.sort_by(|a, b| b.create_time.total_cmp(&a.create_time));
        bucket
    }

    /// Number of conversations bucketed under a UTC day
    pub fn count_on(&self, day: &str) -> usize {
        self.by_date.get(day).map_or(0, Vec::len)
    }
}
