//! Multi-strategy organization search.
//!
//! Free-text queries against a small in-memory catalog of organizations,
//! answered by three independently scored matchers whose votes are merged
//! into one ranked list, optionally narrowed to records carrying every
//! requested tag.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │ provider.rs │────▶│  corpus.rs   │────▶│    engine.rs    │
//! │ (TableStore,│     │ (records +   │     │ (snapshot swap, │
//! │  fetch_all) │     │  LexicalIdx) │     │  search, rank)  │
//! └─────────────┘     └──────────────┘     └─────────────────┘
//!                            │                      │
//!                            ▼                      ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │ search/sources.rs: exact │ lexical (TF-IDF) │ fuzzy (WRatio) │
//! │ search/dedup.rs: max per record  ·  scoring/: stable ranking │
//! │ search/filter.rs: tag AND filter                             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Strategies
//!
//! | Module     | Strategy          | Similarity                         |
//! |------------|-------------------|------------------------------------|
//! | `search`   | exact substring   | 1.0 when the name contains query   |
//! | `lexical`  | TF-IDF cosine     | cosine over `name + description`   |
//! | `fuzzy`    | weighted ratio    | `WRatio / 100` on name and desc.   |
//!
//! # Usage
//!
//! ```ignore
//! use orgsearch::{EngineConfig, SearchEngine, SearchRequest, TableStore};
//!
//! let engine = SearchEngine::new(TableStore::open("store.json"), EngineConfig::default())?;
//! let response = engine.search(&SearchRequest::new("food bank").with_tags([1]));
//! for hit in &response.results {
//!     println!("{:.3} {}", hit.similarity, hit.title);
//! }
//! ```

// Module declarations
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod lexical;
pub mod logging;
pub mod provider;
pub mod request;
pub mod scoring;
pub mod search;
pub mod testing;
mod types;
mod utils;

// Re-exports for public API
pub use config::{EngineConfig, FailurePolicy};
pub use corpus::{fingerprint_records, Corpus};
pub use engine::SearchEngine;
pub use error::{Result, SearchError};
pub use fuzzy::{fuzzy_match, wratio};
pub use lexical::LexicalIndex;
pub use provider::{CorpusProvider, TableDump, TableStore, TagAssociation};
pub use request::{parse_tag_list, DebugInfo, SearchRequest, SearchResponse, Status};
pub use search::{CandidateSource, TagMembership};
pub use types::{
    AggregatedResult, Candidate, Field, Record, RecordId, SearchHit, Strategy, Suggestion, Tag,
    TagId, TagQuery,
};
pub use utils::{fuzzy_process, normalize, tokenize};
