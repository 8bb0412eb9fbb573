// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Candidate sources: the four strategies that vote on each query.
//!
//! | Source             | Signal                          | Similarity      |
//! |--------------------|---------------------------------|-----------------|
//! | `ExactSource`      | name contains the query         | always 1.0      |
//! | `LexicalSource`    | TF-IDF cosine over name + desc. | `≥ threshold`   |
//! | `FuzzySource` name | weighted ratio against name     | score / 100     |
//! | `FuzzySource` desc | weighted ratio against desc.    | score / 100     |
//!
//! Sources see the lower-cased query and the snapshot. They return
//! candidates in corpus order except fuzzy sources, which return best-first.

use crate::corpus::Corpus;
use crate::config::EngineConfig;
use crate::error::{Result, SearchError};
use crate::fuzzy::fuzzy_match;
use crate::types::{Candidate, Field, Strategy};

/// One strategy that turns a query into candidates.
pub trait CandidateSource: Send + Sync {
    /// Short name for logs and error messages.
    fn name(&self) -> &str;

    fn candidates(&self, query: &str, corpus: &Corpus) -> Result<Vec<Candidate>>;
}

/// Turn `(row, similarity)` pairs into candidates, checking every row
/// actually exists in the snapshot.
fn to_candidates(
    source: &str,
    strategy: Strategy,
    corpus: &Corpus,
    hits: Vec<(usize, f64)>,
) -> Result<Vec<Candidate>> {
    hits.into_iter()
        .map(|(position, similarity)| {
            let record = corpus.get(position).ok_or_else(|| {
                SearchError::strategy(
                    source,
                    format!("row {} outside snapshot of {} records", position, corpus.len()),
                )
            })?;
            Ok(Candidate {
                position,
                record_id: record.id.clone(),
                similarity,
                strategy,
            })
        })
        .collect()
}

/// Records whose lower-cased name contains the query.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactSource;

impl CandidateSource for ExactSource {
    fn name(&self) -> &str {
        Strategy::Exact.as_str()
    }

    fn candidates(&self, query: &str, corpus: &Corpus) -> Result<Vec<Candidate>> {
        let query = query.to_lowercase();
        Ok(corpus
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                !record.name.is_empty() && record.name.to_lowercase().contains(&query)
            })
            .map(|(position, record)| Candidate {
                position,
                record_id: record.id.clone(),
                similarity: 1.0,
                strategy: Strategy::Exact,
            })
            .collect())
    }
}

/// TF-IDF cosine similarity against the snapshot's lexical index.
#[derive(Debug, Clone, Copy)]
pub struct LexicalSource {
    pub threshold: f64,
}

impl CandidateSource for LexicalSource {
    fn name(&self) -> &str {
        Strategy::Lexical.as_str()
    }

    fn candidates(&self, query: &str, corpus: &Corpus) -> Result<Vec<Candidate>> {
        let hits = corpus.index().query(query, self.threshold);
        to_candidates(self.name(), Strategy::Lexical, corpus, hits)
    }
}

/// Weighted-ratio fuzzy matching against one record field.
#[derive(Debug, Clone, Copy)]
pub struct FuzzySource {
    pub field: Field,
    pub threshold: f64,
    pub limit: usize,
}

impl FuzzySource {
    fn strategy(&self) -> Strategy {
        match self.field {
            Field::Name => Strategy::FuzzyName,
            Field::Description => Strategy::FuzzyDescription,
        }
    }
}

impl CandidateSource for FuzzySource {
    fn name(&self) -> &str {
        self.strategy().as_str()
    }

    fn candidates(&self, query: &str, corpus: &Corpus) -> Result<Vec<Candidate>> {
        let hits = fuzzy_match(query, corpus.records(), self.field, self.threshold, self.limit);
        to_candidates(self.name(), self.strategy(), corpus, hits)
    }
}

/// The stock pipeline: exact, lexical, fuzzy name, fuzzy description.
pub fn default_sources(config: &EngineConfig) -> Vec<Box<dyn CandidateSource>> {
    vec![
        Box::new(ExactSource),
        Box::new(LexicalSource {
            threshold: config.lexical_threshold,
        }),
        Box::new(FuzzySource {
            field: Field::Name,
            threshold: config.fuzzy_name_threshold,
            limit: config.fuzzy_limit,
        }),
        Box::new(FuzzySource {
            field: Field::Description,
            threshold: config.fuzzy_description_threshold,
            limit: config.fuzzy_limit,
        }),
    ]
}
