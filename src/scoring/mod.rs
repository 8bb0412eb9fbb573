// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their order.
//!
//! Strategies already produce similarities in `[0, 1]`; nothing here
//! rescales them. This module only decides how scored results are sorted.

pub mod ranking;

pub use ranking::{compare_results, rank};
