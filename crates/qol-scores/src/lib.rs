//! qol-scores: NaN-tolerant weighted quality scores.
//!
//! Computes one scalar score per sample as the weighted sum of its features,
//! with a weight vector shared across all samples. NaN feature values are
//! skipped; NaN weights are not.
//!
//! # Key Types
//!
//! - [`compute_quality_scores`] - The flat-buffer kernel
//! - [`QualityScorer`] - Weights bound to an execution mode, with checked entry points
//! - [`QualityWeights`] - Named, ordered weight vector
//! - [`SamplesView`] - Zero-copy row-major view over a feature buffer
//! - [`ScoringConfig`] - JSON configuration for weight sets
//!
//! # Example
//!
//! ```
//! use qol_scores::compute_quality_scores;
//!
//! let features = [1.0, f64::NAN, 3.0];
//! let weights = [2.0, 5.0, 4.0];
//! let mut scores = [0.0];
//!
//! compute_quality_scores(&features, &weights, 1, 3, &mut scores);
//! assert_eq!(scores[0], 14.0);
//! ```

// Re-export approx traits for users who want to compare scores
pub use approx;

pub mod config;
pub mod data;
pub mod error;
pub mod rank;
pub mod scoring;
pub mod testing;
pub mod utils;
pub mod weights;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use config::ScoringConfig;
pub use data::SamplesView;
pub use error::{ConfigError, ScoreError};
pub use rank::top_n;
pub use scoring::{
    QualityScorer, compute_quality_scores, is_missing, score_row, try_compute_quality_scores,
};
pub use utils::{Parallelism, run_with_threads};
pub use weights::{FeatureWeight, QualityWeights};
