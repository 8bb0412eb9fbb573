// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how aggregated results get sorted.
//!
//! Similarity descending, then corpus position ascending. Position is the
//! only tie-breaker, which makes a tie come out in the order the catalog
//! lists the records, every run.

use crate::types::AggregatedResult;
use std::cmp::Ordering;

/// Compare two results for ranking.
///
/// Sort order:
/// 1. **Similarity** - higher wins
/// 2. **Position** - earlier record in the snapshot wins
pub fn compare_results(a: &AggregatedResult, b: &AggregatedResult) -> Ordering {
    b.similarity
        .total_cmp(&a.similarity)
        .then_with(|| a.position.cmp(&b.position))
}

/// Sort results in place by `compare_results`.
pub fn rank(results: &mut [AggregatedResult]) {
    results.sort_by(compare_results);
}
