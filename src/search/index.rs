use serde::{Deserialize, Serialize};

use super::field::TextFieldIndex;
use super::tokenizer::term_frequencies;
use crate::models::SearchDocument;

/// Number of results returned when the caller does not ask for a specific limit
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Per-field score multipliers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBoost {
    pub title: f32,
    pub content: f32,
}

impl Default for FieldBoost {
    fn default() -> Self {
        Self { title: 3.0, content: 1.0 }
    }
}

/// Exact-match fields of a [`SearchDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordField {
    Id,
    CreateTime,
    Model,
}

impl KeywordField {
    fn value_of(self, document: &SearchDocument) -> &str {
        match self {
            Self::Id => &document.id,
            Self::CreateTime => &document.create_time,
            Self::Model => &document.model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFilter {
    pub field: KeywordField,
    pub value: String,
}

impl KeywordFilter {
    pub fn new(field: KeywordField, value: impl Into<String>) -> Self {
        Self { field, value: value.into() }
    }

    fn matches(&self, document: &SearchDocument) -> bool {
        self.field.value_of(document) == self.value
    }
}

/// Options for [`FullTextIndex::search_with`]. All filters must match.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub limit: usize,
    pub boost: FieldBoost,
    pub filters: Vec<KeywordFilter>,
}

impl SearchOptions {
    pub fn new(limit: usize) -> Self {
        Self { limit, ..Self::default() }
    }

    pub fn with_filter(mut self, filter: KeywordFilter) -> Self {
        self.filters.push(filter);
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { limit: DEFAULT_SEARCH_LIMIT, boost: FieldBoost::default(), filters: Vec::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDocument<'a> {
    pub document: &'a SearchDocument,
    pub score: f32,
}

/// Ranked keyword search over conversation titles and contents.
///
/// Built once from the corpus and read-only afterwards. Serializable so a
/// built index can be persisted and restored without rebuilding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullTextIndex {
    documents: Vec<SearchDocument>,
    title: TextFieldIndex,
    content: TextFieldIndex,
}

impl FullTextIndex {
    pub fn build(documents: Vec<SearchDocument>) -> Self {
        let title = TextFieldIndex::build(documents.iter().map(|d| d.title.as_str()));
        let content = TextFieldIndex::build(documents.iter().map(|d| d.content.as_str()));
        Self { documents, title, content }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }

    /// Top `limit` documents for `query` with the default boosts and no filters
    pub fn search(&self, query: &str, limit: usize) -> Vec<ScoredDocument<'_>> {
        self.search_with(query, &SearchOptions::new(limit))
    }

    /// Rank documents by `Σ boost(field) × cosine(query, field)`.
    ///
    /// Only documents with a positive score that pass every filter are returned,
    /// highest score first; equal scores keep index order.
    pub fn search_with(&self, query: &str, options: &SearchOptions) -> Vec<ScoredDocument<'_>> {
        if self.documents.is_empty() || options.limit == 0 {
            return Vec::new();
        }

        let query_terms = term_frequencies(query);
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut scores = vec![0.0_f32; self.documents.len()];
        self.title.accumulate_scores(&query_terms, options.boost.title, &mut scores);
        self.content.accumulate_scores(&query_terms, options.boost.content, &mut scores);

        let mut ranked: Vec<ScoredDocument<'_>> = self
            .documents
            .iter()
            .zip(scores)
            .filter(|(document, score)| {
                *score > 0.0 && options.filters.iter().all(|f| f.matches(document))
            })
            .map(|(document, score)| ScoredDocument { document, score })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(options.limit);
        ranked
    }
}
