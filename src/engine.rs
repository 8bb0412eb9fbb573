// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The orchestrator: one request in, one ranked response out.
//!
//! ```text
//! request ─▶ empty query? ──yes──▶ every record, similarity 0, corpus order
//!                 │ no
//!                 ▼
//!   exact ┐
//! lexical ├─▶ aggregate (max per id) ─▶ rank ─▶ tag filter ─▶ project
//!   fuzzy ┘
//! ```
//!
//! # Snapshots
//!
//! The engine holds an `Arc<Corpus>` behind a `RwLock`. A search clones the
//! `Arc` once, drops the lock, and runs entirely against that snapshot, so a
//! concurrent rebuild can never hand it records from one build and index
//! rows from another. `rebuild_index` fits the new corpus outside the lock
//! and only takes the write lock for the pointer swap. If the rebuild fails
//! the previous snapshot keeps serving.
//!
//! Rebuilds are serialized by a separate mutex, so fetch, build and swap
//! happen in one order and the live version only ever grows. Searches never
//! touch that mutex.

use crate::config::{EngineConfig, FailurePolicy};
use crate::corpus::{fingerprint_records, Corpus};
use crate::error::{Result, SearchError};
use crate::provider::CorpusProvider;
use crate::request::{DebugInfo, SearchRequest, SearchResponse};
use crate::scoring::rank;
use crate::search::{
    aggregate, default_sources, filter_by_membership, filter_by_tags, unranked, CandidateSource,
    TagMembership,
};
use crate::types::{AggregatedResult, Candidate, Record, SearchHit, Suggestion, Tag, TagQuery};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct SearchEngine {
    config: EngineConfig,
    snapshot: RwLock<Arc<Corpus>>,
    provider: Option<Box<dyn CorpusProvider>>,
    membership: Option<Arc<dyn TagMembership>>,
    sources: Vec<Box<dyn CandidateSource>>,
    rebuild_guard: Mutex<()>,
    next_version: AtomicU64,
}

impl SearchEngine {
    /// Build an engine and its first snapshot from `provider`.
    pub fn new(provider: impl CorpusProvider + 'static, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let engine = Self {
            sources: default_sources(&config),
            config,
            snapshot: RwLock::new(Arc::new(Corpus::default())),
            provider: Some(Box::new(provider)),
            membership: None,
            rebuild_guard: Mutex::new(()),
            next_version: AtomicU64::new(1),
        };
        engine.rebuild_index()?;
        Ok(engine)
    }

    /// An engine over a fixed record list. `rebuild_index` is unavailable.
    pub fn from_records(records: Vec<Record>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let corpus = Corpus::build(records, config.max_features)?.with_version(1);
        Ok(Self {
            sources: default_sources(&config),
            config,
            snapshot: RwLock::new(Arc::new(corpus)),
            provider: None,
            membership: None,
            rebuild_guard: Mutex::new(()),
            next_version: AtomicU64::new(2),
        })
    }

    /// Replace the candidate sources (default: exact, lexical, fuzzy x2).
    pub fn with_sources(mut self, sources: Vec<Box<dyn CandidateSource>>) -> Self {
        self.sources = sources;
        self
    }

    /// Delegate tag filtering to a store that can answer membership itself.
    pub fn with_tag_membership(mut self, membership: Arc<dyn TagMembership>) -> Self {
        self.membership = Some(membership);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current snapshot. Cheap: one `Arc` clone under a read lock.
    pub fn snapshot(&self) -> Arc<Corpus> {
        Arc::clone(&self.snapshot.read())
    }

    // =========================================================================
    // INDEX LIFECYCLE
    // =========================================================================

    /// Fetch the catalog, fit a fresh corpus, and swap it in.
    ///
    /// Provider failures and empty catalogs are `DataUnavailable`; in every
    /// failure case the old snapshot stays in place. Concurrent calls run one
    /// after another; the last one to fetch is the one left serving.
    pub fn rebuild_index(&self) -> Result<Arc<Corpus>> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| SearchError::DataUnavailable("engine has no corpus provider".into()))?;

        let _rebuilding = self.rebuild_guard.lock();

        let records = provider
            .fetch_all_records()
            .map_err(|e| SearchError::DataUnavailable(format!("corpus fetch failed: {}", e)))?;
        if records.is_empty() {
            return Err(SearchError::DataUnavailable("no organizations found".into()));
        }

        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        let corpus = Arc::new(Corpus::build(records, self.config.max_features)?.with_version(version));
        info!(
            version,
            records = corpus.len(),
            vocabulary = corpus.index().vocabulary_size(),
            fingerprint = %format!("{:08x}", corpus.fingerprint()),
            "lexical index built"
        );

        *self.snapshot.write() = Arc::clone(&corpus);
        Ok(corpus)
    }

    /// Does `records` differ from what the current snapshot was built on?
    pub fn is_stale(&self, records: &[Record]) -> bool {
        self.snapshot().fingerprint() != fingerprint_records(records)
    }

    // =========================================================================
    // SEARCH
    // =========================================================================

    /// Run a search, folding any failure into an error response.
    ///
    /// A query that is empty after trimming whitespace lists every record
    /// with similarity 0 in corpus order.
    pub fn search(&self, request: &SearchRequest) -> SearchResponse {
        let corpus = self.snapshot();
        match self.search_in(&corpus, request) {
            Ok(results) => {
                let debug_info = DebugInfo {
                    query: request.query.clone(),
                    tag_ids: request.tags.clone(),
                    total_results: results.len(),
                    raw_data_count: corpus.len(),
                };
                SearchResponse::success(results, debug_info)
            }
            Err(err) => {
                if err.is_client_error() {
                    debug!(error = %err, "rejected search request");
                } else {
                    warn!(error = %err, "search failed");
                }
                SearchResponse::error(&err)
            }
        }
    }

    /// Parse a JSON request body and run it. Malformed bodies become error
    /// responses like any other failure.
    pub fn search_json(&self, body: &str) -> SearchResponse {
        match SearchRequest::from_json(body) {
            Ok(request) => self.search(&request),
            Err(err) => {
                debug!(error = %err, "rejected search request");
                SearchResponse::error(&err)
            }
        }
    }

    /// Run a search, surfacing failures as `Err`.
    pub fn try_search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        self.search_in(&self.snapshot(), request)
    }

    fn search_in(&self, corpus: &Corpus, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        if corpus.is_empty() {
            return Err(SearchError::DataUnavailable("no organizations found".into()));
        }

        let query = request.query.trim().to_lowercase();
        let results = if query.is_empty() {
            unranked(corpus.records())
        } else {
            let mut results = aggregate(self.collect_candidates(&query, corpus)?);
            debug!(combined = results.len(), "aggregated candidates");
            rank(&mut results);
            results
        };

        let results = self.apply_tag_filter(results, corpus, &request.tags)?;
        if !request.tags.is_empty() {
            debug!(filtered = results.len(), tags = request.tags.len(), "applied tag filter");
        }

        Ok(results
            .into_iter()
            .filter_map(|result| {
                corpus
                    .get(result.position)
                    .map(|record| SearchHit::from_record(record, result.similarity))
            })
            .collect())
    }

    fn collect_candidates(&self, query: &str, corpus: &Corpus) -> Result<Vec<Vec<Candidate>>> {
        let mut lists = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            match source.candidates(query, corpus) {
                Ok(candidates) => {
                    debug!(strategy = source.name(), count = candidates.len(), "candidates");
                    lists.push(candidates);
                }
                Err(err) => match self.config.failure_policy {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::Skip => {
                        warn!(strategy = source.name(), error = %err, "skipping failed strategy");
                    }
                },
            }
        }
        Ok(lists)
    }

    fn apply_tag_filter(
        &self,
        results: Vec<AggregatedResult>,
        corpus: &Corpus,
        tags: &TagQuery,
    ) -> Result<Vec<AggregatedResult>> {
        if tags.is_empty() {
            return Ok(results);
        }
        match &self.membership {
            Some(membership) => {
                let allowed = membership.records_having_all_tags(tags)?;
                Ok(filter_by_membership(results, &allowed))
            }
            None => Ok(filter_by_tags(results, corpus.records(), tags)),
        }
    }

    // =========================================================================
    // AUTOCOMPLETE & LISTINGS
    // =========================================================================

    /// First few records, in corpus order, whose name contains `query`.
    pub fn autocomplete(&self, query: &str) -> Vec<Suggestion> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.snapshot()
            .records()
            .iter()
            .filter(|record| !record.name.is_empty() && record.name.to_lowercase().contains(&query))
            .take(self.config.autocomplete_limit)
            .map(|record| Suggestion {
                id: record.id.clone(),
                name: record.name.clone(),
            })
            .collect()
    }

    /// Every record in the current snapshot, tag names included.
    pub fn organizations(&self) -> Vec<Record> {
        self.snapshot().records().to_vec()
    }

    /// The tag table from the provider; empty without one.
    pub fn tags(&self) -> Result<Vec<Tag>> {
        match &self.provider {
            Some(provider) => provider.fetch_tags(),
            None => Ok(Vec::new()),
        }
    }
}
