//! Similarity bounds and determinism over random catalogs.

use crate::common::engine_over;
use orgsearch::{fuzzy, wratio, LexicalIndex, Record, SearchRequest};
use proptest::prelude::*;
use std::collections::HashSet;

fn word() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "food", "bank", "hand", "hands", "helping", "shelter", "youth", "clinic", "health",
        "care", "river", "hope", "house", "legal", "aid", "the", "and", "café", "naïve",
    ])
    .prop_map(str::to_string)
}

fn text(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 0..max_words).prop_map(|words| words.join(" "))
}

fn catalog() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((text(3), text(6)), 1..8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, description))| {
                Record::new(i as i64, name).with_description(description)
            })
            .collect()
    })
}

proptest! {
    /// Property: fuzzy scores live in [0, 100] and identical strings score 100.
    #[test]
    fn prop_fuzzy_bounds(a in text(4), b in text(4)) {
        for score in [fuzzy::ratio(&a, &b), wratio(&a, &b)] {
            prop_assert!((0.0..=100.0).contains(&score), "score {}", score);
        }
        if !a.is_empty() {
            prop_assert_eq!(fuzzy::ratio(&a, &a), 100.0);
        }
    }

    /// Property: cosine similarities are in [0, 1] and respect the threshold.
    #[test]
    fn prop_lexical_bounds(docs in prop::collection::vec(text(6), 1..8), query in text(3)) {
        let index = LexicalIndex::fit(&docs, 5000);
        for (row, score) in index.query(&query, 0.15) {
            prop_assert!(row < docs.len());
            prop_assert!((0.15..=1.0).contains(&score), "score {}", score);
        }
    }

    /// Property: every search result is a distinct record with similarity
    /// in [0, 1], and repeating the search gives the same answer.
    #[test]
    fn prop_search_invariants(records in catalog(), query in text(3)) {
        let engine = engine_over(records);
        let request = SearchRequest::new(query);

        let first = engine.try_search(&request).unwrap();
        let unique: HashSet<_> = first.iter().map(|hit| hit.id.clone()).collect();
        prop_assert_eq!(unique.len(), first.len());
        for hit in &first {
            prop_assert!((0.0..=1.0).contains(&hit.similarity));
        }
        prop_assert_eq!(engine.try_search(&request).unwrap(), first);
    }
}
