// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! String similarity scorers on a 0-100 scale.
//!
//! Everything here bottoms out in `ratio`, the normalized Indel similarity:
//! `100 * (1 - indel(a, b) / (len(a) + len(b)))`, where Indel distance only
//! counts insertions and deletions (a substitution costs 2). Indel distance
//! is `len(a) + len(b) - 2 * lcs(a, b)`, so the DP below computes the longest
//! common subsequence instead.
//!
//! Lengths are in characters, not bytes.

use std::collections::BTreeSet;

/// Length ratio below which two strings are compared whole.
const WHOLE_LEN_RATIO: f64 = 1.5;
/// Length ratio above which partial matches are trusted less.
const LONG_LEN_RATIO: f64 = 8.0;
const UNBASE_SCALE: f64 = 0.95;

/// Longest common subsequence length, single-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ac in a {
        let mut diag = 0;
        for (j, &bc) in b.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = if ac == bc {
                diag + 1
            } else {
                up.max(row[j])
            };
            diag = up;
        }
    }
    row[b.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let indel = total - 2 * lcs_len(a, b);
    100.0 * (1.0 - indel as f64 / total as f64)
}

/// Normalized Indel similarity. Two empty strings are identical (100).
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best `ratio` of `short` against every window of `long` with the same
/// length, including windows clipped at either end.
fn partial_windows(short: &[char], long: &[char]) -> f64 {
    let m = short.len();
    let n = long.len();
    let mut best: f64 = 0.0;

    let windows = (1..m)
        .map(|end| &long[..end])
        .chain((0..=n - m).map(|start| &long[start..start + m]))
        .chain((n - m + 1..n).map(|start| &long[start..]));

    for window in windows {
        best = best.max(ratio_chars(short, window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// How well does the shorter string fit somewhere inside the longer one?
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return if a.is_empty() && b.is_empty() { 100.0 } else { 0.0 };
    }

    match a.len().cmp(&b.len()) {
        std::cmp::Ordering::Less => partial_windows(&a, &b),
        std::cmp::Ordering::Greater => partial_windows(&b, &a),
        std::cmp::Ordering::Equal => partial_windows(&a, &b).max(partial_windows(&b, &a)),
    }
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join(set: &BTreeSet<&str>) -> String {
    set.iter().copied().collect::<Vec<_>>().join(" ")
}

/// `ratio` after sorting the words of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Compares the shared words against each side's leftovers.
///
/// If one side's words are a subset of the other's, this is 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let common: BTreeSet<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: BTreeSet<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: BTreeSet<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !common.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let sect = join(&common);
    let with_sect = |rest: &BTreeSet<&str>| {
        if sect.is_empty() {
            join(rest)
        } else {
            format!("{} {}", sect, join(rest))
        }
    };
    let combined_a = with_sect(&only_a);
    let combined_b = with_sect(&only_b);

    let mut best = ratio(&combined_a, &combined_b);
    if !sect.is_empty() {
        best = best.max(ratio(&sect, &combined_a)).max(ratio(&sect, &combined_b));
    }
    best
}

/// Best of the sorted-word and word-set comparisons.
pub fn token_ratio(a: &str, b: &str) -> f64 {
    token_sort_ratio(a, b).max(token_set_ratio(a, b))
}

/// `partial_ratio` over word-sorted and word-set forms.
///
/// Any shared word is a perfect partial token match.
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    if tokens_a.intersection(&tokens_b).next().is_some() {
        return 100.0;
    }

    let sorted = partial_ratio(&sorted_tokens(a), &sorted_tokens(b));
    sorted.max(partial_ratio(&join(&tokens_a), &join(&tokens_b)))
}

/// Weighted ratio: picks the comparison that suits the length difference.
///
/// - Similar lengths (ratio < 1.5): whole-string and token comparisons.
/// - Otherwise: partial comparisons, scaled by 0.9 (0.6 when one string is
///   at least 8 times longer than the other).
///
/// Empty input on either side scores 0.
pub fn wratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let whole = ratio(a, b);

    if len_ratio < WHOLE_LEN_RATIO {
        return whole.max(token_ratio(a, b) * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < LONG_LEN_RATIO { 0.9 } else { 0.6 };
    whole
        .max(partial_ratio(a, b) * partial_scale)
        .max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}
