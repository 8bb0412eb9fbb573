//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures to avoid duplication.

#![doc(hidden)]

use crate::corpus::Corpus;
use crate::error::{Result, SearchError};
use crate::lexical::DEFAULT_MAX_FEATURES;
use crate::search::sources::CandidateSource;
use crate::types::{Candidate, Record};

/// Create a simple record with a name and description.
pub fn make_record(id: i64, name: &str, description: &str) -> Record {
    Record::new(id, name).with_description(description)
}

/// Create a record carrying tags.
pub fn make_tagged(id: i64, name: &str, tags: &[i64]) -> Record {
    Record::new(id, name).with_tags(tags.iter().copied())
}

/// Build a corpus with the default vocabulary cap.
pub fn make_corpus(records: Vec<Record>) -> Corpus {
    match Corpus::build(records, DEFAULT_MAX_FEATURES) {
        Ok(corpus) => corpus,
        Err(e) => panic!("fixture corpus failed to build: {}", e),
    }
}

/// The small catalog most scenario tests run against.
///
/// Records 1 and 2 both contain "hand" in their names; 3 and 4 only
/// mention it in descriptions or not at all.
pub fn sample_records() -> Vec<Record> {
    vec![
        make_record(1, "Helping Hands", "food bank and pantry").with_tags([1, 2]),
        make_record(2, "Hand in Hand", "youth shelter").with_tags([2]),
        make_record(3, "River Clinic", "free health care, a helping hand for families")
            .with_tags([3]),
        make_record(4, "Open Doors", "housing assistance").with_tags([1, 2, 3]),
        make_record(5, "", "legal aid"),
    ]
}

/// A candidate source that always fails. For failure-policy tests.
#[derive(Debug, Default)]
pub struct FailingSource;

impl CandidateSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    fn candidates(&self, _query: &str, _corpus: &Corpus) -> Result<Vec<Candidate>> {
        Err(SearchError::strategy("failing", "induced failure"))
    }
}
