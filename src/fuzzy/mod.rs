// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy search: typo tolerance via weighted string ratios.
//!
//! `ratio` holds the scorers. This module runs one of them across a field of
//! every record and keeps the best few.

mod ratio;

pub use ratio::*;

use crate::types::{Field, Record};
use crate::utils::fuzzy_process;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default number of fuzzy matches kept per field.
pub const DEFAULT_LIMIT: usize = 10;

/// Score `query` against `field` of every record.
///
/// Keeps the `limit` best records by weighted ratio, then drops anything
/// under `threshold` (0-100). Returns `(position, score / 100)`.
///
/// Results are keyed by position, so two records with the same name both
/// come back. Equal scores keep input order.
pub fn fuzzy_match(
    query: &str,
    records: &[Record],
    field: Field,
    threshold: f64,
    limit: usize,
) -> Vec<(usize, f64)> {
    let query = fuzzy_process(query);
    let score = |(position, record): (usize, &Record)| {
        (position, wratio(&query, &fuzzy_process(field.extract(record))))
    };

    #[cfg(feature = "parallel")]
    let mut scored: Vec<(usize, f64)> = records.par_iter().enumerate().map(score).collect();
    #[cfg(not(feature = "parallel"))]
    let mut scored: Vec<(usize, f64)> = records.iter().enumerate().map(score).collect();

    // Stable: equal scores stay in corpus order.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored
        .into_iter()
        .filter(|&(_, score)| score >= threshold)
        .map(|(position, score)| (position, score / 100.0))
        .collect()
}
