// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Subscriber setup for the CLI.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! binary's job. Logs go to stderr so search output on stdout stays clean.
//!
//! - `RUST_LOG` overrides the level filter (e.g. `orgsearch=debug`).
//! - `ORGSEARCH_LOG_JSON=1` (or `--log-json`) switches to JSON lines.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LEVEL: &str = "warn";
pub const JSON_ENV: &str = "ORGSEARCH_LOG_JSON";

/// Install the global subscriber. A second call is a no-op.
pub fn setup_logging(json: bool, default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()
    };
    if installed.is_err() {
        tracing::debug!("global subscriber already installed; keeping it");
    }
}

/// Is JSON logging requested through the environment?
pub fn should_use_json() -> bool {
    json_requested(std::env::var(JSON_ENV).ok().as_deref())
}

fn json_requested(value: Option<&str>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}
