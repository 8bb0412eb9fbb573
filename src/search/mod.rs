// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The request pipeline, stage by stage.
//!
//! Sources produce candidates, the merger collapses them to one result per
//! record, ranking orders them, and the tag filter drops what the caller
//! excluded. Ranking lives in `crate::scoring`; everything else is here.

pub mod dedup;
pub mod filter;
pub mod sources;

pub use dedup::{aggregate, unranked, ResultMerger};
pub use filter::{filter_by_membership, filter_by_tags, TagMembership};
pub use sources::{default_sources, CandidateSource, ExactSource, FuzzySource, LexicalSource};
