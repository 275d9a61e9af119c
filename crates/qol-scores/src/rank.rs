//! Ranking of scored samples.

use std::cmp::Ordering;

/// Indices of the `n` highest scores, best first.
///
/// Ties keep ascending index order. NaN scores rank below every number.
/// Asking for more than `scores.len()` returns every index.
///
/// # Example
///
/// ```
/// use qol_scores::top_n;
///
/// let scores = [0.2, f64::NAN, 0.9, 0.5];
/// assert_eq!(top_n(&scores, 2), vec![2, 3]);
/// assert_eq!(top_n(&scores, 10), vec![2, 3, 0, 1]);
/// ```
pub fn top_n(scores: &[f64], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // sort_by is stable, which keeps ties in index order
    order.sort_by(|&a, &b| descending_nan_last(scores[a], scores[b]));
    order.truncate(n);
    order
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
