// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! TF-IDF lexical index: vector-space similarity over record text.
//!
//! One document per record (`name + " " + description`), fitted once per
//! snapshot. Queries are projected into the fitted vocabulary and scored by
//! cosine similarity against every row.
//!
//! # Weighting
//!
//! | Quantity | Definition                                  |
//! |----------|---------------------------------------------|
//! | tf       | raw term count in the document              |
//! | idf      | `ln((1 + n) / (1 + df)) + 1`                |
//! | row      | `tf * idf`, L2-normalized                   |
//!
//! Rows are unit vectors, so cosine similarity is a plain dot product.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **ROW_ALIGNMENT**: row `i` was built from record `i` of the snapshot.
//!    `Corpus` owns both halves and rebuilds them together.
//! 2. **SORTED_ROWS**: every sparse row is sorted by term index, so the dot
//!    product is a linear merge.
//! 3. **IMMUTABLE**: nothing mutates an index after `fit`; concurrent
//!    queries need no locking.

mod stop_words;

pub use stop_words::is_stop_word;

use crate::utils::tokenize;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// Default similarity floor for lexical candidates.
pub const DEFAULT_THRESHOLD: f64 = 0.15;

/// Default vocabulary cap.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Sparse vector: `(term index, weight)` sorted by term index.
pub type SparseVector = Vec<(u32, f64)>;

/// A fitted TF-IDF model plus one unit vector per document.
#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    /// Term → column. Columns are assigned in alphabetical term order.
    vocabulary: HashMap<String, u32>,
    /// Column → term (sorted).
    terms: Vec<String>,
    /// Column → idf weight.
    idf: Vec<f64>,
    /// Document → L2-normalized row.
    rows: Vec<SparseVector>,
}

impl LexicalIndex {
    /// Fit the model over `texts`, keeping at most `max_features` terms.
    ///
    /// When the vocabulary overflows the cap, the most frequent terms across
    /// the whole corpus survive; equal counts fall back to alphabetical order
    /// so a refit over the same texts always picks the same vocabulary.
    pub fn fit<S: AsRef<str>>(texts: &[S], max_features: usize) -> Self {
        let doc_counts: Vec<BTreeMap<String, u32>> =
            texts.iter().map(|text| count_terms(text.as_ref())).collect();

        let mut doc_freq: BTreeMap<&str, u32> = BTreeMap::new();
        let mut total_freq: BTreeMap<&str, u64> = BTreeMap::new();
        for counts in &doc_counts {
            for (term, count) in counts {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                *total_freq.entry(term.as_str()).or_insert(0) += u64::from(*count);
            }
        }

        // BTreeMap iteration is alphabetical, and sort_by is stable.
        let mut ranked: Vec<(&str, u64)> = total_freq.into_iter().collect();
        if ranked.len() > max_features {
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            ranked.truncate(max_features);
        }
        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        terms.sort();

        let vocabulary: HashMap<String, u32> = terms
            .iter()
            .enumerate()
            .map(|(col, term)| (term.clone(), col as u32))
            .collect();

        let n = texts.len() as f64;
        let idf: Vec<f64> = terms
            .iter()
            .map(|term| {
                let df = f64::from(doc_freq.get(term.as_str()).copied().unwrap_or(0));
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = doc_counts
            .iter()
            .map(|counts| weigh(counts, &vocabulary, &idf))
            .collect();

        Self {
            vocabulary,
            terms,
            idf,
            rows,
        }
    }

    /// Project `text` into the fitted space. Out-of-vocabulary terms vanish.
    pub fn transform(&self, text: &str) -> SparseVector {
        weigh(&count_terms(text), &self.vocabulary, &self.idf)
    }

    /// Every `(row, similarity)` with `similarity >= threshold`, in row order.
    ///
    /// A query with no known terms is the zero vector and scores 0 against
    /// every row, so it only returns rows when `threshold <= 0`.
    pub fn query(&self, text: &str, threshold: f64) -> Vec<(usize, f64)> {
        let query = self.transform(text);
        let score = |(row, vector): (usize, &SparseVector)| {
            let similarity = dot(&query, vector).clamp(0.0, 1.0);
            (similarity >= threshold).then_some((row, similarity))
        };

        #[cfg(feature = "parallel")]
        {
            self.rows.par_iter().enumerate().filter_map(score).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.rows.iter().enumerate().filter_map(score).collect()
        }
    }

    /// Number of documents (rows) the index was fitted on.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Fitted terms in column order (alphabetical).
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&col| self.idf[col as usize])
    }
}

/// Term counts for one document, stop words removed.
fn count_terms(text: &str) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for term in tokenize(text) {
        if !is_stop_word(&term) {
            *counts.entry(term).or_insert(0) += 1;
        }
    }
    counts
}

/// `tf * idf` over known terms, L2-normalized. All-zero stays all-zero.
fn weigh(counts: &BTreeMap<String, u32>, vocabulary: &HashMap<String, u32>, idf: &[f64]) -> SparseVector {
    let mut vector: SparseVector = counts
        .iter()
        .filter_map(|(term, &count)| {
            vocabulary
                .get(term)
                .map(|&col| (col, f64::from(count) * idf[col as usize]))
        })
        .collect();
    vector.sort_by_key(|&(col, _)| col);

    let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, weight) in &mut vector {
            *weight /= norm;
        }
    }
    vector
}

/// Dot product of two sorted sparse vectors.
fn dot(a: &[(u32, f64)], b: &[(u32, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
