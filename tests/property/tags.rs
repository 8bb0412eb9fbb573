//! Tag filter properties: strict AND, in-process equals delegated.

use crate::common::engine_over;
use orgsearch::search::{filter_by_membership, filter_by_tags, unranked};
use orgsearch::{Record, RecordId, SearchRequest, TagQuery};
use proptest::prelude::*;
use std::collections::HashSet;

fn tagged_catalog() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(prop::collection::btree_set(1i64..6, 0..4), 1..10).prop_map(|sets| {
        sets.into_iter()
            .enumerate()
            .map(|(i, tags)| Record::new(i as i64, format!("Org {}", i)).with_tags(tags))
            .collect()
    })
}

fn tag_query() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1i64..6, 0..3)
}

proptest! {
    /// Property: every surviving record carries every requested tag, and
    /// every record carrying them survives.
    #[test]
    fn prop_filter_is_and(records in tagged_catalog(), tags in tag_query()) {
        let engine = engine_over(records.clone());
        let hits = engine
            .try_search(&SearchRequest::new("").with_tags(tags.clone()))
            .unwrap();
        let required: TagQuery = tags.into_iter().collect();

        let expected: Vec<RecordId> = records
            .iter()
            .filter(|record| required.is_satisfied_by(&record.tags))
            .map(|record| record.id.clone())
            .collect();
        let actual: Vec<RecordId> = hits.into_iter().map(|hit| hit.id).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: delegated membership and in-process filtering agree.
    #[test]
    fn prop_delegated_equals_in_process(records in tagged_catalog(), tags in tag_query()) {
        let required: TagQuery = tags.into_iter().collect();
        let allowed: HashSet<RecordId> = records
            .iter()
            .filter(|record| required.is_satisfied_by(&record.tags))
            .map(|record| record.id.clone())
            .collect();

        let in_process = filter_by_tags(unranked(&records), &records, &required);
        let delegated = if required.is_empty() {
            unranked(&records)
        } else {
            filter_by_membership(unranked(&records), &allowed)
        };
        prop_assert_eq!(in_process, delegated);
    }
}
