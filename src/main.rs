// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use orgsearch::logging::{self, setup_logging};
use orgsearch::{
    parse_tag_list, EngineConfig, Result, SearchEngine, SearchRequest, TableStore,
};
use std::path::Path;

mod cli;
use cli::{display, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.log_json || logging::should_use_json(), logging::DEFAULT_LEVEL);

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Search {
            store,
            query,
            tags,
            limit,
            json,
        } => run_search(&store, config, &query, tags.as_deref(), limit, json),
        Commands::Autocomplete { store, query } => {
            let engine = open_engine(&store, config)?;
            display::print_suggestions(&engine.autocomplete(&query));
            Ok(())
        }
        Commands::List { store } => {
            let engine = open_engine(&store, config)?;
            display::print_records(&engine.organizations());
            Ok(())
        }
        Commands::Tags { store } => {
            let tags = TableStore::open(&store).load()?.tags;
            display::print_tags(&tags);
            Ok(())
        }
        Commands::Inspect { store } => {
            let engine = open_engine(&store, config)?;
            display::print_inspect(&store.display().to_string(), &engine.snapshot());
            Ok(())
        }
    }
}

fn open_engine(store: &Path, config: EngineConfig) -> Result<SearchEngine> {
    SearchEngine::new(TableStore::open(store), config)
}

fn run_search(
    store: &Path,
    config: EngineConfig,
    query: &str,
    tags: Option<&str>,
    limit: usize,
    json: bool,
) -> Result<()> {
    let engine = open_engine(store, config)?;
    let request = SearchRequest {
        query: query.to_string(),
        tags: match tags {
            Some(raw) => parse_tag_list(raw)?,
            None => Default::default(),
        },
    };

    let mut response = engine.search(&request);
    let total = response.results.len();
    response.truncate(limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if response.is_success() {
        display::print_hits(query, &response.results, total);
    }

    if let (false, Some(message)) = (response.is_success(), &response.message) {
        eprintln!("❌ {}", message);
        std::process::exit(1);
    }
    Ok(())
}
