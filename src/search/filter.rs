// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tag filtering: keep results that carry every requested tag.
//!
//! Two equivalent paths. `filter_by_tags` checks the tag sets already joined
//! into each record. `filter_by_membership` takes the answer from a store
//! that did the join itself (`TagMembership`). Both are AND filters and both
//! preserve input order; filtering is never a re-sort point.
//!
//! Tags live in a `BTreeSet`, so a record cannot hold the same tag twice and
//! "carries every requested tag" is a plain subset check.

use crate::error::Result;
use crate::types::{AggregatedResult, Record, RecordId, TagQuery};
use std::collections::HashSet;

/// A store that can answer "which records hold all of these tags?".
pub trait TagMembership: Send + Sync {
    fn records_having_all_tags(&self, tags: &TagQuery) -> Result<HashSet<RecordId>>;
}

/// Keep results whose record carries every tag in `required`.
///
/// `records` is the snapshot the results' positions index into.
pub fn filter_by_tags(
    results: Vec<AggregatedResult>,
    records: &[Record],
    required: &TagQuery,
) -> Vec<AggregatedResult> {
    if required.is_empty() {
        return results;
    }
    results
        .into_iter()
        .filter(|result| {
            records
                .get(result.position)
                .is_some_and(|record| required.is_satisfied_by(&record.tags))
        })
        .collect()
}

/// Keep results whose id is in `allowed`.
pub fn filter_by_membership(
    results: Vec<AggregatedResult>,
    allowed: &HashSet<RecordId>,
) -> Vec<AggregatedResult> {
    results
        .into_iter()
        .filter(|result| allowed.contains(&result.record_id))
        .collect()
}
