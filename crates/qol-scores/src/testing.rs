//! Deterministic test and benchmark data.

use rand::prelude::*;

/// Generate random dense features in row-major order.
///
/// Values are uniform in `[min, max)`.
pub fn random_features(
    n_samples: usize,
    n_features: usize,
    seed: u64,
    min: f64,
    max: f64,
) -> Vec<f64> {
    assert!(max >= min);
    let mut rng = StdRng::seed_from_u64(seed);
    let width = max - min;
    (0..n_samples * n_features)
        .map(|_| min + rng.r#gen::<f64>() * width)
        .collect()
}

/// Random weights, uniform in `[-1, 1)`.
pub fn random_weights(n_features: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_features).map(|_| rng.r#gen::<f64>() * 2.0 - 1.0).collect()
}

/// Replace roughly `fraction` of the values with NaN.
///
/// Returns how many values were replaced.
pub fn sprinkle_missing(data: &mut [f64], fraction: f64, seed: u64) -> usize {
    assert!((0.0..=1.0).contains(&fraction));
    let mut rng = StdRng::seed_from_u64(seed);
    let mut replaced = 0;
    for value in data.iter_mut() {
        if rng.r#gen::<f64>() < fraction {
            *value = f64::NAN;
            replaced += 1;
        }
    }
    replaced
}

/// Independent reference for the scoring kernel.
///
/// Indexes the flat buffer directly instead of chunking it, and detects NaN
/// by self-inequality.
#[allow(clippy::eq_op)]
pub fn reference_scores(
    features: &[f64],
    weights: &[f64],
    n_samples: usize,
    n_features: usize,
) -> Vec<f64> {
    let mut scores = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let mut total = 0.0;
        for j in 0..n_features {
            let value = features[i * n_features + j];
            if value == value {
                total += value * weights[j];
            }
        }
        scores.push(total);
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_features_are_seeded_and_bounded() {
        let a = random_features(10, 4, 1, -2.0, 3.0);
        let b = random_features(10, 4, 1, -2.0, 3.0);

        assert_eq!(a.len(), 40);
        assert_eq!(a, b);
        assert!(a.iter().all(|&v| (-2.0..3.0).contains(&v)));
    }

    #[test]
    fn sprinkle_missing_counts_replacements() {
        let mut data = random_features(100, 10, 3, 0.0, 1.0);
        let replaced = sprinkle_missing(&mut data, 0.2, 4);

        assert_eq!(data.iter().filter(|v| v.is_nan()).count(), replaced);
        assert!(replaced > 100 && replaced < 300);

        let mut none = vec![1.0; 10];
        assert_eq!(sprinkle_missing(&mut none, 0.0, 4), 0);
    }
}
