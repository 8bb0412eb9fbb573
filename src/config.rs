// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! Every knob has a default matching the reference behavior, so an empty
//! TOML file (or none at all) gives the stock engine:
//!
//! ```toml
//! lexical_threshold = 0.15
//! max_features = 5000
//! fuzzy_name_threshold = 60.0
//! fuzzy_description_threshold = 50.0
//! fuzzy_limit = 10
//! autocomplete_limit = 5
//! failure_policy = "abort"
//! ```

use crate::error::{Result, SearchError};
use crate::fuzzy::DEFAULT_LIMIT;
use crate::lexical::{DEFAULT_MAX_FEATURES, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What to do when one candidate source fails mid-request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Fail the whole request with a single error.
    #[default]
    Abort,
    /// Drop the failing source's candidates, log a warning, carry on.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Minimum cosine similarity for lexical candidates, in `[0, 1]`.
    pub lexical_threshold: f64,
    /// Vocabulary cap for the TF-IDF fit.
    pub max_features: usize,
    /// Minimum weighted ratio (0-100) for name matches.
    pub fuzzy_name_threshold: f64,
    /// Minimum weighted ratio (0-100) for description matches.
    pub fuzzy_description_threshold: f64,
    /// Fuzzy matches kept per field before thresholding.
    pub fuzzy_limit: usize,
    pub autocomplete_limit: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lexical_threshold: DEFAULT_THRESHOLD,
            max_features: DEFAULT_MAX_FEATURES,
            fuzzy_name_threshold: 60.0,
            fuzzy_description_threshold: 50.0,
            fuzzy_limit: DEFAULT_LIMIT,
            autocomplete_limit: 5,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            SearchError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.lexical_threshold) {
            return Err(SearchError::Config(format!(
                "lexical_threshold must be within [0, 1], got {}",
                self.lexical_threshold
            )));
        }
        for (name, value) in [
            ("fuzzy_name_threshold", self.fuzzy_name_threshold),
            ("fuzzy_description_threshold", self.fuzzy_description_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(SearchError::Config(format!(
                    "{} must be within [0, 100], got {}",
                    name, value
                )));
            }
        }
        if self.max_features == 0 {
            return Err(SearchError::Config("max_features must be positive".into()));
        }
        Ok(())
    }
}
