// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a search: records, candidates, results.
//!
//! Records come in from a provider with whatever shape the backing table
//! has. By the time one lands in a `Record`, every field the scorers touch
//! is typed and always present: a missing description is `""`, missing tags
//! are an empty set. Scoring code never sees `null`.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Record**: `id` is unique within a corpus snapshot.
//!   `Corpus::build` rejects duplicates.
//!
//! - **Candidate**: `position < corpus.len()` and `0.0 ≤ similarity ≤ 1.0`.
//!   Position is the record's row in the snapshot, and the only tie-breaker
//!   anything downstream is allowed to use.
//!
//! - **AggregatedResult**: at most one per `record_id`.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Opaque record identifier.
///
/// The backing store uses integer keys, but nothing in the engine depends on
/// that, so string ids deserialize just as well.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

/// Type-safe tag identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct TagId(pub i64);

impl TagId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for TagId {
    fn from(id: i64) -> Self {
        TagId(id)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// CATALOG TYPES
// =============================================================================

/// One catalog entity, normalized for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, alias = "org_description", deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, alias = "org_logo")]
    pub logo: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<TagId>,
    /// Display names of `tags`, for listings. Never scored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_names: Vec<String>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            logo: None,
            tags: BTreeSet::new(),
            tag_names: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = i64>) -> Self {
        self.tags = tags.into_iter().map(TagId).collect();
        self
    }

    /// The text the lexical index sees: `name + " " + description`.
    pub fn indexed_text(&self) -> String {
        format!("{} {}", self.name, self.description)
    }
}

/// `null` and missing both become `""`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A row from the tag table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Which record field a fuzzy pass reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Description,
}

impl Field {
    #[inline]
    pub fn extract(self, record: &Record) -> &str {
        match self {
            Field::Name => &record.name,
            Field::Description => &record.description,
        }
    }
}

// =============================================================================
// SCORING TYPES
// =============================================================================

/// Which strategy produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Exact,
    Lexical,
    FuzzyName,
    FuzzyDescription,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Exact => "exact",
            Strategy::Lexical => "lexical",
            Strategy::FuzzyName => "fuzzy-name",
            Strategy::FuzzyDescription => "fuzzy-description",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One strategy's vote for one record. Lives for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Row of the record in the corpus snapshot.
    pub position: usize,
    pub record_id: RecordId,
    pub similarity: f64,
    pub strategy: Strategy,
}

/// The merged score for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResult {
    pub position: usize,
    pub record_id: RecordId,
    pub similarity: f64,
}

// =============================================================================
// TAG QUERY
// =============================================================================

/// The set of tags a result must carry. Empty means "no filtering".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagQuery(BTreeSet<TagId>);

impl TagQuery {
    pub fn new(tags: impl IntoIterator<Item = TagId>) -> Self {
        Self(tags.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagId> {
        self.0.iter()
    }

    /// Does `tags` hold every requested tag?
    pub fn is_satisfied_by(&self, tags: &BTreeSet<TagId>) -> bool {
        self.0.is_subset(tags)
    }
}

impl FromIterator<i64> for TagQuery {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().map(TagId).collect())
    }
}

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// One entry of a search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub org_logo: Option<String>,
    pub similarity: f64,
}

impl SearchHit {
    pub const KIND: &'static str = "organization";

    pub fn from_record(record: &Record, similarity: f64) -> Self {
        Self {
            kind: Self::KIND,
            id: record.id.clone(),
            title: record.name.clone(),
            description: record.description.clone(),
            org_logo: record.logo.clone(),
            similarity,
        }
    }
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub id: RecordId,
    pub name: String,
}
