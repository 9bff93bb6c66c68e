use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use super::CorpusStore;
use crate::models::{Contribution, ContributionDay, DateRange, ModelCount, Stats};
use crate::utils::utc_day;

/// Number of models reported in [`Stats::top_models`]
const TOP_MODELS_LIMIT: usize = 10;

impl CorpusStore {
    /// Aggregate statistics over the whole corpus.
    ///
    /// Message totals are counted straight from each mapping. Models with equal
    /// counts keep the order in which they were first seen.
    pub fn compute_stats(&self) -> Stats {
        let conversations = self.conversations();
        let (Some(earliest), Some(latest)) = (
            conversations.iter().min_by(|a, b| a.create_time.total_cmp(&b.create_time)),
            conversations.iter().max_by(|a, b| a.create_time.total_cmp(&b.create_time)),
        ) else {
            return Stats::default();
        };

        let mut model_counts: Vec<ModelCount> = Vec::new();
        let mut model_positions: HashMap<&str, usize> = HashMap::new();
        let mut total_messages = 0;

        for conversation in conversations {
            if let Some(model) = conversation.model_slug() {
                let position = *model_positions.entry(model).or_insert_with(|| {
                    model_counts.push(ModelCount { model: model.to_string(), count: 0 });
                    model_counts.len() - 1
                });
                model_counts[position].count += 1;
            }
            total_messages += conversation.message_count();
        }

        // Stable sort keeps first-seen order among ties
        model_counts.sort_by(|a, b| b.count.cmp(&a.count));
        model_counts.truncate(TOP_MODELS_LIMIT);

        Stats {
            total_conversations: conversations.len(),
            total_messages,
            date_range: DateRange {
                start: utc_day(&earliest.created_at),
                end: utc_day(&latest.created_at),
            },
            top_models: model_counts,
        }
    }

    /// One entry per calendar day of `year`, in date order, with the number of
    /// conversations created on that UTC day.
    ///
    /// A year chrono cannot represent yields no days.
    pub fn compute_contribution(&self, year: i32) -> Contribution {
        let mut days = Vec::with_capacity(366);
        let mut next = NaiveDate::from_ymd_opt(year, 1, 1);

        while let Some(day) = next.filter(|d| d.year() == year) {
            let date = day.format("%Y-%m-%d").to_string();
            let count = self.count_on(&date);
            days.push(ContributionDay { date, count });
            next = day.succ_opt();
        }

        let max = days.iter().map(|d| d.count).max().unwrap_or(0);
        let total = days.iter().map(|d| d.count).sum();

        Contribution { year, days, max, total }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::tests::records;
    use super::*;

    #[test]
    fn test_empty_corpus_stats() {
        let store = CorpusStore::ingest(Vec::new());
        let stats = store.compute_stats();
        assert_eq!(stats, Stats::default());
        assert_eq!(stats.date_range.start, "");
        assert!(stats.top_models.is_empty());
    }

    #[test]
    fn test_stats_counts_and_range() {
        let store = CorpusStore::ingest(records(vec![
            json!({
                "id": "c1",
                "create_time": 1700000000,
                "default_model_slug": "gpt-4",
                "mapping": {
                    "root": { "message": null },
                    "a": { "message": { "id": "a" } },
                    "b": { "message": { "id": "b" } }
                }
            }),
            json!({
                "id": "c2",
                "create_time": 1672531200,
                "default_model_slug": "gpt-4o",
                "mapping": { "a": { "message": { "id": "a" } } }
            }),
            json!({ "id": "c3", "create_time": 1704067199, "default_model_slug": "" }),
        ]));

        let stats = store.compute_stats();
        assert_eq!(stats.total_conversations, 3);
        assert_eq!(stats.total_messages, 3);
        assert_eq!(stats.date_range.start, "2023-01-01");
        assert_eq!(stats.date_range.end, "2023-12-31");
        assert_eq!(
            stats.top_models,
            vec![
                ModelCount { model: "gpt-4".to_string(), count: 1 },
                ModelCount { model: "gpt-4o".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_top_models_sorted_and_limited() {
        let mut values = Vec::new();
        let mut n = 0;
        // model-0 appears once, model-11 twelve times
        for model in 0..12 {
            for _ in 0..=model {
                n += 1;
                values.push(json!({
                    "id": format!("c{}", n),
                    "create_time": 1700000000 + n,
                    "default_model_slug": format!("model-{}", model)
                }));
            }
        }
        let store = CorpusStore::ingest(records(values));

        let top = store.compute_stats().top_models;
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].model, "model-11");
        assert_eq!(top[0].count, 12);
        assert_eq!(top[9].model, "model-2");
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_top_models_ties_keep_first_seen_order() {
        let store = CorpusStore::ingest(records(vec![
            json!({ "id": "1", "create_time": 1, "default_model_slug": "b" }),
            json!({ "id": "2", "create_time": 2, "default_model_slug": "a" }),
            json!({ "id": "3", "create_time": 3, "default_model_slug": "c" }),
            json!({ "id": "4", "create_time": 4, "default_model_slug": "c" }),
        ]));

        let models: Vec<String> =
            store.compute_stats().top_models.into_iter().map(|m| m.model).collect();
        assert_eq!(models, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_contribution_day_counts() {
        let store = CorpusStore::ingest(records(vec![
            json!({ "id": "a", "create_time": 1700000000 }),
            json!({ "id": "b", "create_time": 1699948800 }),
            json!({ "id": "c", "create_time": 1672531200 }),
            // 2024-01-01, outside the year
            json!({ "id": "d", "create_time": 1704067200 }),
        ]));

        let contribution = store.compute_contribution(2023);
        assert_eq!(contribution.year, 2023);
        assert_eq!(contribution.days.len(), 365);
        assert_eq!(contribution.days[0].date, "2023-01-01");
        assert_eq!(contribution.days[0].count, 1);
        assert_eq!(contribution.days[364].date, "2023-12-31");
        assert_eq!(contribution.max, 2);
        assert_eq!(contribution.total, 3);

        let nov_14 = contribution.days.iter().find(|d| d.date == "2023-11-14").unwrap();
        assert_eq!(nov_14.count, 2);
    }

    #[test]
    fn test_contribution_leap_year() {
        let store = CorpusStore::ingest(Vec::new());
        let contribution = store.compute_contribution(2024);
        assert_eq!(contribution.days.len(), 366);
        assert!(contribution.days.iter().any(|d| d.date == "2024-02-29"));
        assert_eq!(contribution.max, 0);
        assert_eq!(contribution.total, 0);
        assert!(contribution.days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_contribution_unrepresentable_year() {
        let store = CorpusStore::ingest(Vec::new());
        let contribution = store.compute_contribution(i32::MAX);
        assert!(contribution.days.is_empty());
        assert_eq!(contribution.max, 0);
        assert_eq!(contribution.total, 0);
    }
}
