// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for the search engine.
//!
//! Errors fall into two camps: the caller sent something malformed
//! (`InvalidQueryShape`), or the server side could not do its job (no data,
//! a scoring strategy blew up, a bad config). `SearchEngine::search` turns
//! every variant into a structured `status: "error"` response, so nothing
//! here ever escapes the engine as a panic.
//!
//! Stale indexes have no variant. A snapshot whose records drifted from the
//! live store is not detectable from inside a search; the rebuild trigger
//! owns that check (see `Corpus::fingerprint` and `SearchEngine::is_stale`).

use thiserror::Error;

/// Everything that can go wrong between fetching the corpus and projecting
/// a response.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The corpus provider failed or returned no records.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// The request carried malformed tag ids or an unreadable body.
    #[error("invalid query: {0}")]
    InvalidQueryShape(String),

    /// A candidate source raised an unexpected condition.
    #[error("{strategy} strategy failed: {reason}")]
    StrategyFailure { strategy: String, reason: String },

    /// Two records in one snapshot share an id.
    #[error("duplicate record id {0} in corpus snapshot")]
    DuplicateRecordId(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SearchError {
    /// True when the caller is at fault (HTTP 4xx territory).
    pub fn is_client_error(&self) -> bool {
        matches!(self, SearchError::InvalidQueryShape(_))
    }

    pub(crate) fn strategy(strategy: &str, reason: impl Into<String>) -> Self {
        SearchError::StrategyFailure {
            strategy: strategy.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for SearchError {
    fn from(err: toml::de::Error) -> Self {
        SearchError::Config(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SearchError>;
