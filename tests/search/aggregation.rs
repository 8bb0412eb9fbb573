//! Max-aggregation across strategies: one result per record, best score wins.

use crate::common::{engine_over, make_record, sample_engine};
use orgsearch::{RecordId, SearchRequest};
use std::collections::HashSet;

#[test]
fn test_each_record_appears_once() {
    let engine = sample_engine();
    for query in ["hand", "helping", "food bank", "clinic", "youth shelter", "a"] {
        let hits = engine.try_search(&SearchRequest::new(query)).unwrap();
        let unique: HashSet<&RecordId> = hits.iter().map(|hit| &hit.id).collect();
        assert_eq!(unique.len(), hits.len(), "duplicate ids for {:?}", query);
    }
}

#[test]
fn test_similarity_stays_in_unit_interval() {
    let engine = sample_engine();
    for query in ["hand", "helping hands", "food", "free health care"] {
        for hit in engine.try_search(&SearchRequest::new(query)).unwrap() {
            assert!((0.0..=1.0).contains(&hit.similarity), "{:?}: {}", query, hit.similarity);
        }
    }
}

#[test]
fn test_exact_match_dominates_weaker_votes() {
    // Name contains the query (1.0) and the description also matches it
    // fuzzily; the merged score is the maximum, not a sum.
    let engine = engine_over(vec![
        make_record(1, "Food Bank", "food bank"),
        make_record(2, "Other", "unrelated"),
    ]);
    let hits = engine.try_search(&SearchRequest::new("food bank")).unwrap();
    assert_eq!(hits[0].id, RecordId::Int(1));
    assert_eq!(hits[0].similarity, 1.0);
}

#[test]
fn test_ranking_is_descending() {
    let hits = sample_engine().try_search(&SearchRequest::new("helping hand")).unwrap();
    for pair in hits.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

#[test]
fn test_ties_keep_corpus_order() {
    let engine = engine_over(vec![
        make_record(30, "Hope Center", ""),
        make_record(10, "Hope House", ""),
        make_record(20, "Hope Hall", ""),
    ]);
    let hits = engine.try_search(&SearchRequest::new("hope")).unwrap();
    let order: Vec<RecordId> = hits.iter().map(|hit| hit.id.clone()).collect();
    assert_eq!(order, vec![RecordId::Int(30), RecordId::Int(10), RecordId::Int(20)]);
}
