// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus snapshots: records and the lexical index built from them.
//!
//! The index only knows rows. Row `i` means "record `i` of the sequence I
//! was fitted on", so pairing an index with any other record sequence
//! silently returns the wrong organizations. `Corpus` makes that pairing
//! unbreakable: the only way to get one is `Corpus::build`, which fits the
//! index over exactly the records it stores, and nothing mutates either
//! half afterwards. A rebuild means a whole new `Corpus`.
//!
//! # Staleness
//!
//! A snapshot can drift from the live store. The core does not detect that
//! during a search; whoever triggers rebuilds compares
//! `Corpus::fingerprint` against `fingerprint_records(&fresh_records)`.

use crate::error::{Result, SearchError};
use crate::lexical::LexicalIndex;
use crate::types::{Record, RecordId};
use std::collections::HashSet;

/// An immutable `(records, index)` pair.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<Record>,
    index: LexicalIndex,
    fingerprint: u32,
    version: u64,
}

impl Corpus {
    /// Fit a lexical index over `records` and pair them up.
    ///
    /// Fails if two records share an id.
    pub fn build(records: Vec<Record>, max_features: usize) -> Result<Self> {
        let mut seen: HashSet<&RecordId> = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(&record.id) {
                return Err(SearchError::DuplicateRecordId(record.id.to_string()));
            }
        }

        let texts: Vec<String> = records.iter().map(Record::indexed_text).collect();
        let index = LexicalIndex::fit(&texts, max_features);
        let fingerprint = fingerprint_records(&records);

        Ok(Self {
            records,
            index,
            fingerprint,
            version: 0,
        })
    }

    pub(crate) fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn index(&self) -> &LexicalIndex {
        &self.index
    }

    pub fn get(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// CRC32 over the snapshot's records (see `fingerprint_records`).
    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }

    /// Which swap produced this snapshot (0 = never installed in an engine).
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Fingerprint of everything a search reads from `records`.
///
/// Covers ids, names, descriptions, logos and tag sets, in record order.
/// Tag display names are not covered.
pub fn fingerprint_records(records: &[Record]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    for record in records {
        let id = record.id.to_string();
        for field in [
            id.as_str(),
            record.name.as_str(),
            record.description.as_str(),
            record.logo.as_deref().unwrap_or(""),
        ] {
            hasher.update(field.as_bytes());
            hasher.update(&[0]);
        }
        for tag in &record.tags {
            hasher.update(&tag.get().to_le_bytes());
        }
        hasher.update(&[0xff]);
    }
    hasher.finalize()
}
