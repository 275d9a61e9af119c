//! Quality score computation.
//!
//! - [`kernel`]: the flat-buffer routine and its per-row building blocks
//! - [`scorer`]: [`QualityScorer`], which binds a weight set to an execution mode
//!
//! A score is the weighted sum of a sample's features:
//!
//! ```text
//! score[i] = Σ_j  features[i, j] × weights[j]    (skipping NaN features[i, j])
//! ```
//!
//! Only NaN *features* are skipped. A NaN *weight* multiplies into the sum
//! and makes the score NaN.

mod kernel;
mod scorer;

pub use kernel::{compute_quality_scores, is_missing, score_row, try_compute_quality_scores};
pub use scorer::QualityScorer;
