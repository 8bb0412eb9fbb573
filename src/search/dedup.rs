// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result aggregation: one entry per record, best score wins.
//!
//! Four strategies vote independently, and a strong name match for a record
//! should not be dragged down by a weak description match for the same
//! record. So the merge keeps the maximum, never a sum or an average, and
//! the result can never leave `[0, 1]`.
//!
//! **Invariant**: each record id appears at most once in the output, and the
//! output order is first-seen order. No hash iteration decides ordering.

use crate::types::{AggregatedResult, Candidate, Record, RecordId};
use std::collections::HashMap;

/// Merges candidate lists keyed by record id.
///
/// # Example
///
/// ```ignore
/// let mut merger = ResultMerger::new();
/// merger.merge_all(exact);
/// merger.merge_all(lexical);
/// let results = merger.into_results();
/// ```
#[derive(Debug, Default)]
pub struct ResultMerger {
    /// Record id → slot in `results`.
    slots: HashMap<RecordId, usize>,
    /// One entry per distinct id, in first-seen order.
    results: Vec<AggregatedResult>,
}

impl ResultMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: HashMap::with_capacity(capacity),
            results: Vec::with_capacity(capacity),
        }
    }

    /// Merge one candidate, keeping the higher similarity for its id.
    pub fn merge(&mut self, candidate: Candidate) {
        match self.slots.get(&candidate.record_id) {
            Some(&slot) => {
                let existing = &mut self.results[slot];
                if candidate.similarity > existing.similarity {
                    existing.similarity = candidate.similarity;
                }
            }
            None => {
                self.slots.insert(candidate.record_id.clone(), self.results.len());
                self.results.push(AggregatedResult {
                    position: candidate.position,
                    record_id: candidate.record_id,
                    similarity: candidate.similarity,
                });
            }
        }
    }

    pub fn merge_all(&mut self, candidates: impl IntoIterator<Item = Candidate>) {
        for candidate in candidates {
            self.merge(candidate);
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.slots.contains_key(id)
    }

    /// Merged results in first-seen order (not yet ranked).
    pub fn into_results(self) -> Vec<AggregatedResult> {
        self.results
    }
}

/// Flatten and merge any number of candidate lists.
pub fn aggregate<I>(lists: I) -> Vec<AggregatedResult>
where
    I: IntoIterator<Item = Vec<Candidate>>,
{
    let mut merger = ResultMerger::new();
    for list in lists {
        merger.merge_all(list);
    }
    merger.into_results()
}

/// The empty-query path: every record at similarity 0, corpus order.
pub fn unranked(records: &[Record]) -> Vec<AggregatedResult> {
    records
        .iter()
        .enumerate()
        .map(|(position, record)| AggregatedResult {
            position,
            record_id: record.id.clone(),
            similarity: 0.0,
        })
        .collect()
}
