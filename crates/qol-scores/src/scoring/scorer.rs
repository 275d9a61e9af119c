//! Reusable scorer bound to a weight set.

use ndarray::Array1;
use rayon::prelude::*;

use super::kernel::{compute_quality_scores, score_row};
use crate::data::SamplesView;
use crate::error::ScoreError;
use crate::utils::Parallelism;
use crate::weights::QualityWeights;

/// Rows handed to one rayon task at minimum. Rows are short dot products,
/// so finer splitting costs more in scheduling than it saves.
const MIN_ROWS_PER_TASK: usize = 256;

/// Scores batches of samples against one weight set.
///
/// Unlike the bare kernel, every entry point validates shapes and returns a
/// [`ScoreError`] instead of panicking.
///
/// # Example
///
/// ```
/// use qol_scores::{QualityScorer, QualityWeights, SamplesView};
///
/// let scorer = QualityScorer::new(QualityWeights::from_values(&[2.0, 5.0, 4.0]));
///
/// let data = [1.0, f64::NAN, 3.0, 0.0, 1.0, 0.0];
/// let view = SamplesView::from_slice(&data, 2, 3).unwrap();
///
/// let scores = scorer.score(view).unwrap();
/// assert_eq!(scores.to_vec(), vec![14.0, 5.0]);
/// ```
#[derive(Debug, Clone)]
pub struct QualityScorer {
    weights: QualityWeights,
    parallelism: Parallelism,
}

impl QualityScorer {
    /// Create a sequential scorer.
    ///
    /// NaN weights are kept as given; they make the score of any sample with
    /// a present value in that column NaN. A warning names each such feature.
    pub fn new(weights: QualityWeights) -> Self {
        log::debug!("quality scorer over {} features", weights.n_features());
        for name in weights.nan_features() {
            log::warn!("weight for feature '{name}' is NaN; samples with a value for it score NaN");
        }

        Self {
            weights,
            parallelism: Parallelism::Sequential,
        }
    }

    /// Set the execution mode.
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    #[inline]
    pub fn weights(&self) -> &QualityWeights {
        &self.weights
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.weights.n_features()
    }

    #[inline]
    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Score every sample, allocating the output.
    pub fn score(&self, data: SamplesView<'_>) -> Result<Array1<f64>, ScoreError> {
        let mut scores = vec![0.0; data.n_samples()];
        self.score_into(data, &mut scores)?;
        Ok(Array1::from_vec(scores))
    }

    /// Score every sample into a caller-owned buffer of length `n_samples`.
    ///
    /// Nothing is written when an error is returned.
    pub fn score_into(&self, data: SamplesView<'_>, out: &mut [f64]) -> Result<(), ScoreError> {
        let n_samples = data.n_samples();
        let n_features = data.n_features();

        if n_features != self.n_features() {
            return Err(ScoreError::WeightLength {
                expected: n_features,
                actual: self.n_features(),
            });
        }
        if out.len() != n_samples {
            return Err(ScoreError::OutputLength {
                expected: n_samples,
                actual: out.len(),
            });
        }

        log::trace!(
            "scoring {n_samples} samples x {n_features} features ({:?})",
            self.parallelism
        );

        let weights = self.weights.values();
        match self.parallelism {
            Parallelism::Sequential => {
                compute_quality_scores(data.as_slice(), weights, n_samples, n_features, out);
            }
            Parallelism::Parallel => {
                out.par_iter_mut()
                    .enumerate()
                    .with_min_len(MIN_ROWS_PER_TASK)
                    .for_each(|(sample, score)| {
                        *score = score_row(data.sample(sample), weights);
                    });
            }
        }

        Ok(())
    }

    /// Score a flat row-major buffer.
    ///
    /// The feature count is taken from the weight set.
    pub fn score_slice(
        &self,
        features: &[f64],
        n_samples: usize,
        out: &mut [f64],
    ) -> Result<(), ScoreError> {
        let view = SamplesView::from_slice(features, n_samples, self.n_features())?;
        self.score_into(view, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{random_features, random_weights, sprinkle_missing};
    use crate::weights::FeatureWeight;

    #[test]
    fn score_matches_kernel() {
        let scorer = QualityScorer::new(QualityWeights::from_values(&[0.5, -2.0]));
        let data = [
            4.0, 1.0, // 2 - 2 = 0
            f64::NAN, 0.25, // -0.5
            2.0, f64::NAN, // 1
        ];
        let view = SamplesView::from_slice(&data, 3, 2).unwrap();

        let scores = scorer.score(view).unwrap();

        assert_eq!(scores.to_vec(), vec![0.0, -0.5, 1.0]);
    }

    #[test]
    fn rejects_feature_count_mismatch() {
        let scorer = QualityScorer::new(QualityWeights::from_values(&[1.0, 1.0, 1.0]));
        let view = SamplesView::from_slice(&[1.0, 2.0], 1, 2).unwrap();

        assert_eq!(
            scorer.score(view).unwrap_err(),
            ScoreError::WeightLength {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn rejects_output_mismatch_without_writing() {
        let scorer = QualityScorer::new(QualityWeights::from_values(&[1.0]));
        let view = SamplesView::from_slice(&[1.0, 2.0, 3.0], 3, 1).unwrap();
        let mut out = [f64::MAX; 2];

        let err = scorer.score_into(view, &mut out).unwrap_err();

        assert_eq!(
            err,
            ScoreError::OutputLength {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(out, [f64::MAX; 2]);
    }

    #[test]
    fn score_slice_uses_weight_width() {
        let scorer = QualityScorer::new(QualityWeights::new(vec![
            FeatureWeight::new("a", 1.0),
            FeatureWeight::new("b", 10.0),
        ]));
        let mut out = [0.0; 2];

        scorer.score_slice(&[1.0, 2.0, 3.0, 4.0], 2, &mut out).unwrap();
        assert_eq!(out, [21.0, 43.0]);

        let err = scorer.score_slice(&[1.0, 2.0, 3.0], 2, &mut out).unwrap_err();
        assert_eq!(
            err,
            ScoreError::FeatureLength {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn parallel_is_bit_identical_to_sequential() {
        let n_samples = 3_000;
        let n_features = 17;
        let mut data = random_features(n_samples, n_features, 7, -10.0, 10.0);
        sprinkle_missing(&mut data, 0.1, 8);
        let weights = QualityWeights::from_values(&random_weights(n_features, 9));
        let view = SamplesView::from_slice(&data, n_samples, n_features).unwrap();

        let sequential = QualityScorer::new(weights.clone()).score(view).unwrap();
        let parallel = QualityScorer::new(weights)
            .with_parallelism(Parallelism::Parallel)
            .score(view)
            .unwrap();

        let seq_bits: Vec<u64> = sequential.iter().map(|s| s.to_bits()).collect();
        let par_bits: Vec<u64> = parallel.iter().map(|s| s.to_bits()).collect();
        assert_eq!(seq_bits, par_bits);
    }

    #[test]
    fn parallel_handles_zero_features() {
        let scorer = QualityScorer::new(QualityWeights::from_values(&[]))
            .with_parallelism(Parallelism::Parallel);
        let view = SamplesView::from_slice(&[], 5, 0).unwrap();

        assert_eq!(scorer.score(view).unwrap().to_vec(), vec![0.0; 5]);
    }

    #[test]
    fn nan_weight_is_kept() {
        let scorer = QualityScorer::new(QualityWeights::from_values(&[f64::NAN, 1.0]));
        let view = SamplesView::from_slice(&[1.0, 2.0, f64::NAN, 2.0], 2, 2).unwrap();

        let scores = scorer.score(view).unwrap();

        assert!(scores[0].is_nan());
        assert_eq!(scores[1], 2.0);
    }
}
