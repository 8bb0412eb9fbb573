// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus providers: where records come from.
//!
//! The engine only needs `CorpusProvider::fetch_all_records`, returning
//! records with their tags already joined in. `TableStore` is a small local
//! stand-in for the real table store: a JSON dump of the three tables the
//! catalog lives in, joined in process.
//!
//! ```json
//! {
//!   "tags": [{"id": 1, "name": "Food"}],
//!   "organizations": [{"id": 1, "name": "Helping Hands", "org_description": "food bank"}],
//!   "organization_tags": [{"organization_id": 1, "tags_id": 1}]
//! }
//! ```

use crate::error::Result;
use crate::search::filter::TagMembership;
use crate::types::{Record, RecordId, Tag, TagId, TagQuery};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Something that can hand over the whole catalog.
pub trait CorpusProvider: Send + Sync {
    /// Every record, tags resolved.
    fn fetch_all_records(&self) -> Result<Vec<Record>>;

    /// The tag table, if the provider has one.
    fn fetch_tags(&self) -> Result<Vec<Tag>> {
        Ok(Vec::new())
    }
}

/// One row of the organization ↔ tag association table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAssociation {
    pub organization_id: RecordId,
    #[serde(alias = "tag_id")]
    pub tags_id: TagId,
    #[serde(default)]
    pub tag_name: Option<String>,
}

/// A snapshot of the three backing tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDump {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub organizations: Vec<Record>,
    #[serde(default)]
    pub organization_tags: Vec<TagAssociation>,
}

impl TableDump {
    /// Attach each organization's tags (ids and display names).
    ///
    /// Association rows pointing at unknown organizations are ignored.
    /// Repeated rows for the same pair collapse, since tags are a set.
    pub fn join(&self) -> Vec<Record> {
        let tag_names: HashMap<TagId, &str> = self
            .tags
            .iter()
            .map(|tag| (tag.id, tag.name.as_str()))
            .collect();

        let mut by_org: HashMap<&RecordId, BTreeSet<TagId>> = HashMap::new();
        for row in &self.organization_tags {
            by_org.entry(&row.organization_id).or_default().insert(row.tags_id);
        }
        let row_names: HashMap<TagId, &str> = self
            .organization_tags
            .iter()
            .filter_map(|row| row.tag_name.as_deref().map(|name| (row.tags_id, name)))
            .collect();

        let known: HashSet<&RecordId> = self.organizations.iter().map(|o| &o.id).collect();
        let orphans = by_org.keys().filter(|id| !known.contains(*id)).count();
        if orphans > 0 {
            debug!(orphans, "ignoring tag associations for unknown organizations");
        }

        self.organizations
            .iter()
            .map(|org| {
                let mut record = org.clone();
                if let Some(tags) = by_org.get(&org.id) {
                    record.tags.extend(tags.iter().copied());
                }
                record.tag_names = record
                    .tags
                    .iter()
                    .filter_map(|id| tag_names.get(id).or_else(|| row_names.get(id)))
                    .map(|name| name.to_string())
                    .collect();
                record
            })
            .collect()
    }

    /// Ids of organizations associated with every tag in `required`.
    pub fn records_having_all_tags(&self, required: &TagQuery) -> HashSet<RecordId> {
        let mut by_org: HashMap<&RecordId, BTreeSet<TagId>> = HashMap::new();
        for row in &self.organization_tags {
            by_org.entry(&row.organization_id).or_default().insert(row.tags_id);
        }
        by_org
            .into_iter()
            .filter(|(_, tags)| required.is_satisfied_by(tags))
            .map(|(id, _)| id.clone())
            .collect()
    }
}

#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Memory(TableDump),
}

/// Table dump provider, backed by a JSON file or held in memory.
///
/// File-backed stores re-read the file on every fetch, so a rebuild picks
/// up edits.
#[derive(Debug, Clone)]
pub struct TableStore {
    source: Source,
}

impl TableStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            source: Source::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_dump(dump: TableDump) -> Self {
        Self {
            source: Source::Memory(dump),
        }
    }

    pub fn load(&self) -> Result<TableDump> {
        match &self.source {
            Source::File(path) => {
                let raw = fs::read_to_string(path)?;
                Ok(serde_json::from_str(&raw)?)
            }
            Source::Memory(dump) => Ok(dump.clone()),
        }
    }
}

impl CorpusProvider for TableStore {
    fn fetch_all_records(&self) -> Result<Vec<Record>> {
        Ok(self.load()?.join())
    }

    fn fetch_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.load()?.tags)
    }
}

impl TagMembership for TableStore {
    fn records_having_all_tags(&self, tags: &TagQuery) -> Result<HashSet<RecordId>> {
        Ok(self.load()?.records_having_all_tags(tags))
    }
}

/// A fixed list of records. Handy when the caller already has them.
impl CorpusProvider for Vec<Record> {
    fn fetch_all_records(&self) -> Result<Vec<Record>> {
        Ok(self.clone())
    }
}
