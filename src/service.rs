//! Query engine over a loaded archive.
//!
//! [`ArchiveService`] is constructed once at startup and then only read. It holds
//! no interior mutability, so a single instance can be shared across request
//! handlers (for example behind an `Arc`) without locking.

use anyhow::Result;

use crate::config::ExplorerConfig;
use crate::index_storage::{SidecarStore, restore_or_build};
use crate::indexer::build_search_index;
use crate::models::{
    Contribution, Conversation, ConversationDetail, ConversationSummary, ConversationsForDate,
    RawConversation, SearchResponse, Stats,
};
use crate::normalizer::linearize_messages;
use crate::parsers::parse_export_file;
use crate::search::{FullTextIndex, SearchOptions};
use crate::store::CorpusStore;
use crate::utils::{epoch_to_iso, format_iso, format_path_with_tilde};

pub struct ArchiveService {
    store: CorpusStore,
    index: FullTextIndex,
}

impl ArchiveService {
    /// Load the export, ingest it, and restore or build the search index.
    ///
    /// # Errors
    ///
    /// Fails only when the export itself cannot be read or parsed. Problems with
    /// the persisted index are logged and answered with a rebuild.
    pub fn load(config: &ExplorerConfig) -> Result<Self> {
        log::info!("Loading conversations from {}...", format_path_with_tilde(&config.data_path));
        let records = parse_export_file(&config.data_path)?;
        let store = CorpusStore::ingest(records);

        let index = match SidecarStore::for_location(&config.data_path, config.index_location) {
            Ok(index_store) => restore_or_build(&index_store, config.rebuild_index, || {
                build_search_index(&store)
            }),
            Err(e) => {
                log::warn!("Search index persistence unavailable: {:#}", e);
                build_search_index(&store)
            }
        };

        Ok(Self { store, index })
    }

    /// Ingest records and build a fresh index, without touching the filesystem
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawConversation>,
    {
        let store = CorpusStore::ingest(records);
        let index = build_search_index(&store);
        Self { store, index }
    }

    pub fn from_parts(store: CorpusStore, index: FullTextIndex) -> Self {
        Self { store, index }
    }

    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    pub fn index(&self) -> &FullTextIndex {
        &self.index
    }

    pub fn stats(&self) -> Stats {
        self.store.compute_stats()
    }

    pub fn contribution(&self, year: i32) -> Contribution {
        self.store.compute_contribution(year)
    }

    /// Summaries of the conversations created on `date` (`YYYY-MM-DD`, UTC), newest first
    pub fn conversations_for_date(&self, date: &str) -> ConversationsForDate {
        let conversations = self.store.get_by_date(date).into_iter().map(summary).collect();
        ConversationsForDate { date: date.to_string(), conversations }
    }

    /// Full metadata plus the linearized messages; `None` if the id is unknown
    pub fn conversation_detail(&self, id: &str) -> Option<ConversationDetail> {
        let conversation = self.store.get_by_id(id)?;
        let create_time = format_iso(&conversation.created_at);

        Some(ConversationDetail {
            id: conversation.id.clone(),
            title: conversation.display_title().to_string(),
            update_time: epoch_to_iso(conversation.update_time)
                .unwrap_or_else(|| create_time.clone()),
            create_time,
            model: conversation.model.clone(),
            messages: linearize_messages(&conversation.mapping),
            is_archived: conversation.is_archived,
        })
    }

    pub fn search(&self, query: &str, limit: usize) -> SearchResponse {
        self.search_with(query, &SearchOptions::new(limit))
    }

    pub fn search_with(&self, query: &str, options: &SearchOptions) -> SearchResponse {
        let results = self
            .index
            .search_with(query, options)
            .into_iter()
            .map(|hit| hit.document.clone())
            .collect();
        SearchResponse { query: query.to_string(), results }
    }

    /// Ids of conversations whose mapping message count disagrees with the
    /// linearized message count. Empty for a consistent corpus.
    pub fn message_count_divergences(&self) -> Vec<&str> {
        self.store
            .conversations()
            .iter()
            .filter(|c| c.message_count() != linearize_messages(&c.mapping).len())
            .map(|c| c.id.as_str())
            .collect()
    }
}

fn summary(conversation: &Conversation) -> ConversationSummary {
    ConversationSummary {
        id: conversation.id.clone(),
        title: conversation.display_title().to_string(),
        create_time: format_iso(&conversation.created_at),
        model: conversation.model.clone(),
        message_count: conversation.message_count(),
    }
}
