//! Flat-buffer scoring kernel.

use crate::error::ScoreError;

/// Whether a feature value is missing.
///
/// Missing means IEEE-754 NaN, nothing else. Infinities are ordinary values.
#[inline]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// Weighted sum of one sample's features, skipping missing features.
///
/// Accumulates left to right starting from `0.0`, so the result is
/// bit-reproducible for a fixed input. Weights are never filtered: a NaN
/// weight paired with a present feature yields NaN.
#[inline]
pub fn score_row(row: &[f64], weights: &[f64]) -> f64 {
    debug_assert_eq!(
        row.len(),
        weights.len(),
        "row has {} features but {} weights were given",
        row.len(),
        weights.len()
    );

    let mut acc = 0.0;
    for (&value, &weight) in row.iter().zip(weights) {
        if is_missing(value) {
            continue;
        }
        acc += value * weight;
    }
    acc
}

/// Compute one quality score per sample.
///
/// # Arguments
///
/// * `features` - Row-major matrix, length `n_samples * n_features`
/// * `weights` - Shared weight vector, length `n_features`
/// * `n_samples` - Number of rows
/// * `n_features` - Number of columns
/// * `out_scores` - Output, length `n_samples`; every slot is overwritten
///
/// Rows are processed in ascending order, features within a row in ascending
/// order. With `n_features == 0` every score is `0.0`; with `n_samples == 0`
/// nothing is written.
///
/// # Panics
///
/// Panics if any buffer length disagrees with the counts. The check runs
/// before the first write, so `out_scores` is untouched on panic. Use
/// [`try_compute_quality_scores`] to get an error instead.
pub fn compute_quality_scores(
    features: &[f64],
    weights: &[f64],
    n_samples: usize,
    n_features: usize,
    out_scores: &mut [f64],
) {
    if let Err(err) = check_buffers(features, weights, n_samples, n_features, out_scores) {
        panic!("compute_quality_scores: {err}");
    }
    fill_scores(features, weights, n_features, out_scores);
}

/// Checked variant of [`compute_quality_scores`].
///
/// Returns the first length mismatch found (features, then weights, then
/// output) and writes nothing in that case.
pub fn try_compute_quality_scores(
    features: &[f64],
    weights: &[f64],
    n_samples: usize,
    n_features: usize,
    out_scores: &mut [f64],
) -> Result<(), ScoreError> {
    check_buffers(features, weights, n_samples, n_features, out_scores)?;
    fill_scores(features, weights, n_features, out_scores);
    Ok(())
}

fn check_buffers(
    features: &[f64],
    weights: &[f64],
    n_samples: usize,
    n_features: usize,
    out_scores: &[f64],
) -> Result<(), ScoreError> {
    if n_samples.checked_mul(n_features) != Some(features.len()) {
        return Err(ScoreError::FeatureLength {
            expected: n_samples.saturating_mul(n_features),
            actual: features.len(),
        });
    }
    if weights.len() != n_features {
        return Err(ScoreError::WeightLength {
            expected: n_features,
            actual: weights.len(),
        });
    }
    if out_scores.len() != n_samples {
        return Err(ScoreError::OutputLength {
            expected: n_samples,
            actual: out_scores.len(),
        });
    }
    Ok(())
}

/// Shapes must already be validated.
fn fill_scores(features: &[f64], weights: &[f64], n_features: usize, out_scores: &mut [f64]) {
    // chunks_exact(0) panics; an empty row always sums to zero.
    if n_features == 0 {
        out_scores.fill(0.0);
        return;
    }

    for (row, score) in features.chunks_exact(n_features).zip(out_scores.iter_mut()) {
        *score = score_row(row, weights);
    }
}
