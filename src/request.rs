// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Request and response shapes at the engine boundary.
//!
//! Requests arrive either as JSON bodies (`{"query": "...", "tagIds": [1, 2]}`)
//! or as query-string pairs where `tagIds` is `"1,2"`. Both land in the same
//! `SearchRequest`. Anything that is not a list of integer tag ids is an
//! `InvalidQueryShape`.

use crate::error::{Result, SearchError};
use crate::types::{SearchHit, TagId, TagQuery};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub query: String,
    #[serde(default, rename = "tagIds", alias = "tag_ids", deserialize_with = "tag_ids")]
    pub tags: TagQuery,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            tags: TagQuery::default(),
        }
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = i64>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Parse a JSON request body.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| SearchError::InvalidQueryShape(e.to_string()))
    }

    /// Build a request from query-string parameters.
    pub fn from_params(query: Option<&str>, tag_ids: Option<&str>) -> Result<Self> {
        let tags = match tag_ids {
            Some(raw) => parse_tag_list(raw)?,
            None => TagQuery::default(),
        };
        Ok(Self {
            query: query.unwrap_or_default().to_string(),
            tags,
        })
    }
}

/// Parse `"1,2,3"` into a tag set. Blank input means no tags.
pub fn parse_tag_list(raw: &str) -> Result<TagQuery> {
    if raw.trim().is_empty() {
        return Ok(TagQuery::default());
    }
    raw.split(',')
        .map(|part| parse_tag_id(part.trim()))
        .collect::<Result<Vec<TagId>>>()
        .map(TagQuery::new)
}

fn parse_tag_id(raw: &str) -> Result<TagId> {
    raw.parse::<i64>()
        .map(TagId)
        .map_err(|_| SearchError::InvalidQueryShape(format!("tag id {:?} is not an integer", raw)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTagId {
    Int(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTagIds {
    List(Vec<RawTagId>),
    Csv(String),
}

fn tag_ids<'de, D>(deserializer: D) -> std::result::Result<TagQuery, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<RawTagIds>::deserialize(deserializer)? {
        None => Ok(TagQuery::default()),
        Some(RawTagIds::Csv(raw)) => parse_tag_list(&raw),
        Some(RawTagIds::List(items)) => items
            .into_iter()
            .map(|item| match item {
                RawTagId::Int(id) => Ok(TagId(id)),
                RawTagId::Text(raw) => parse_tag_id(raw.trim()),
            })
            .collect::<Result<Vec<TagId>>>()
            .map(TagQuery::new),
    };
    parsed.map_err(serde::de::Error::custom)
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Echo of the request plus a couple of counts, for debugging clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugInfo {
    pub query: String,
    pub tag_ids: TagQuery,
    pub total_results: usize,
    /// Records in the snapshot the request ran against.
    pub raw_data_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub status: Status,
    pub results: Vec<SearchHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
}

impl SearchResponse {
    pub fn success(results: Vec<SearchHit>, debug_info: DebugInfo) -> Self {
        Self {
            status: Status::Success,
            results,
            message: None,
            debug_info: Some(debug_info),
        }
    }

    pub fn error(err: &SearchError) -> Self {
        Self {
            status: Status::Error,
            results: Vec::new(),
            message: Some(err.to_string()),
            debug_info: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Keep the first `limit` results; `debug_info.total_results` follows.
    pub fn truncate(&mut self, limit: usize) {
        self.results.truncate(limit);
        if let Some(debug) = self.debug_info.as_mut() {
            debug.total_results = self.results.len();
        }
    }
}
