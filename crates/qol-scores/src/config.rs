//! Scoring configuration.
//!
//! A JSON document naming the weight set and the thread count:
//!
//! ```json
//! {
//!   "weights": [
//!     { "name": "walkability_index_norm", "weight": 0.18 },
//!     { "name": "PollutionScore_norm", "weight": 0.18 }
//!   ],
//!   "n_threads": 0
//! }
//! ```
//!
//! Both fields are optional; see [`ScoringConfig`] for defaults.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ScoreError};
use crate::scoring::QualityScorer;
use crate::utils::{Parallelism, run_with_threads};
use crate::weights::QualityWeights;

fn default_threads() -> usize {
    1
}

/// Weight set plus execution settings.
///
/// Always valid: the only ways to obtain one are [`new`](Self::new), the
/// JSON loaders, and [`Default`], and all of them validate.
///
/// JSON has no encoding for NaN or infinity, so config weights must be
/// finite. Weight sets with NaN weights can still be scored by building a
/// [`QualityScorer`] directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Weights in feature order. Defaults to the quality-of-life table.
    #[serde(default)]
    weights: QualityWeights,

    /// Thread count: 0 = auto, 1 = sequential (default), n > 1 = exactly n.
    #[serde(default = "default_threads")]
    n_threads: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: QualityWeights::default(),
            n_threads: default_threads(),
        }
    }
}

impl ScoringConfig {
    /// Build and validate a config.
    pub fn new(weights: QualityWeights, n_threads: usize) -> Result<Self, ConfigError> {
        let config = Self { weights, n_threads };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("loading scoring config from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Pretty-printed JSON, readable by [`from_json_str`](Self::from_json_str).
    pub fn to_json(&self) -> Result<String, ConfigError> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Weights in feature order.
    #[inline]
    pub fn weights(&self) -> &QualityWeights {
        &self.weights
    }

    /// Thread count: 0 = auto, 1 = sequential, n > 1 = exactly n.
    #[inline]
    pub fn n_threads(&self) -> usize {
        self.n_threads
    }

    /// Reject empty weight sets, repeated feature names and non-finite weights.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weights.is_empty() {
            return Err(ConfigError::EmptyWeights);
        }
        let mut seen = HashSet::with_capacity(self.weights.n_features());
        for (name, weight) in self.weights.iter() {
            if !seen.insert(name) {
                return Err(ConfigError::DuplicateFeature(name.to_string()));
            }
            if !weight.is_finite() {
                return Err(ConfigError::NonFiniteWeight {
                    feature: name.to_string(),
                    weight,
                });
            }
        }
        Ok(())
    }

    /// Build a scorer whose parallelism follows `n_threads` in the current pool.
    pub fn scorer(&self) -> QualityScorer {
        QualityScorer::new(self.weights.clone())
            .with_parallelism(Parallelism::from_threads(self.n_threads))
    }

    /// Run `f` with a scorer inside a pool sized by `n_threads`.
    pub fn run<T: Send>(
        &self,
        f: impl FnOnce(&QualityScorer) -> T + Send,
    ) -> Result<T, ScoreError> {
        let scorer = QualityScorer::new(self.weights.clone());
        run_with_threads(self.n_threads, move |parallelism| {
            f(&scorer.with_parallelism(parallelism))
        })
    }
}
