use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::tokenizer::term_frequencies;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Posting {
    doc: u32,
    weight: f32,
}

/// TF-IDF index over one free-text field.
///
/// Document vectors are L2-normalised at build time, so scoring a normalised
/// query against the postings yields cosine similarity in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFieldIndex {
    idf: HashMap<String, f32>,
    postings: HashMap<String, Vec<Posting>>,
}

impl TextFieldIndex {
    /// Build from the field text of every document, in document order
    pub fn build<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let term_counts: Vec<BTreeMap<String, u32>> =
            texts.into_iter().map(term_frequencies).collect();
        let doc_count = term_counts.len();

        let mut document_frequency: BTreeMap<&str, u32> = BTreeMap::new();
        for counts in &term_counts {
            for term in counts.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let idf: HashMap<String, f32> = document_frequency
            .iter()
            .map(|(term, &df)| {
                let value = ((1 + doc_count) as f32 / (1 + df) as f32).ln() + 1.0;
                (term.to_string(), value)
            })
            .collect();

        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        for (doc, counts) in term_counts.iter().enumerate() {
            let weights: Vec<(&String, f32)> =
                counts.iter().map(|(term, &tf)| (term, tf as f32 * idf[term.as_str()])).collect();
            let norm = weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
            if norm == 0.0 {
                continue;
            }
            for (term, weight) in weights {
                postings
                    .entry(term.clone())
                    .or_default()
                    .push(Posting { doc: doc as u32, weight: weight / norm });
            }
        }

        Self { idf, postings }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    /// Add `boost × cosine(query, doc)` to each document's score.
    ///
    /// Query terms outside the vocabulary are ignored; a query with no known
    /// terms leaves the scores untouched.
    pub fn accumulate_scores(
        &self,
        query_terms: &BTreeMap<String, u32>,
        boost: f32,
        scores: &mut [f32],
    ) {
        let weighted: Vec<(&[Posting], f32)> = query_terms
            .iter()
            .filter_map(|(term, &tf)| {
                let idf = self.idf.get(term)?;
                let postings = self.postings.get(term).map_or(&[][..], Vec::as_slice);
                Some((postings, tf as f32 * idf))
            })
            .collect();

        let norm = weighted.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm == 0.0 {
            return;
        }

        for (postings, weight) in weighted {
            let query_weight = weight / norm * boost;
            for posting in postings {
                if let Some(score) = scores.get_mut(posting.doc as usize) {
                    *score += query_weight * posting.weight;
                }
            }
        }
    }
}
