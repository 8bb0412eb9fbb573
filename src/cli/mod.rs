// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the orgsearch command-line interface.
//!
//! Every subcommand reads a JSON table dump (see `orgsearch::provider`),
//! builds a corpus from it, and answers one question: search it, complete a
//! prefix, list it, or inspect the index built over it.

pub mod display;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "orgsearch",
    about = "Multi-strategy organization search over a JSON table dump",
    version
)]
pub struct Cli {
    /// Engine configuration (TOML). Defaults apply for anything unset.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines (also ORGSEARCH_LOG_JSON=1)
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank organizations against a free-text query
    Search {
        /// Path to the JSON table dump
        store: PathBuf,

        /// Search query; omit to list everything unranked
        #[arg(default_value = "")]
        query: String,

        /// Required tag ids, comma separated (all must match)
        #[arg(short, long)]
        tags: Option<String>,

        /// Maximum number of results to print
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest organization names containing a prefix
    Autocomplete {
        store: PathBuf,
        query: String,
    },

    /// List every organization with its tags
    List {
        store: PathBuf,
    },

    /// List the tag table
    Tags {
        store: PathBuf,
    },

    /// Show corpus statistics: records, vocabulary size, fingerprint
    Inspect {
        store: PathBuf,
    },
}
