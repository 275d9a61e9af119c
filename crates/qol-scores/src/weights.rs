//! Named feature weights.
//!
//! A [`QualityWeights`] is an ordered list of `(feature name, weight)` pairs.
//! The order fixes the feature positions: weight `j` multiplies column `j` of
//! the feature matrix. Values are kept contiguous so [`QualityWeights::values`]
//! can be handed straight to the kernel.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::data::SamplesView;
use crate::error::ScoreError;

/// One entry of a weight set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureWeight {
    pub name: String,
    pub weight: f64,
}

impl FeatureWeight {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Default quality-of-life weights over normalized tract indicators.
///
/// Positively oriented indicators (walkability, resilience, ...) and inverted
/// burden indicators (`1 - normalized pollution`, ...) share one scale, and
/// the weights sum to one.
const DEFAULT_WEIGHTS: [(&str, f64); 10] = [
    ("walkability_index_norm", 0.18),
    ("non_auto_share_norm", 0.12),
    ("nri_resilience_score_norm", 0.13),
    ("ces_score_delta_norm", 0.07),
    ("PollutionScore_norm", 0.18),
    ("traffic_norm", 0.1),
    ("cdc_ozone_exceedance_days_norm", 0.07),
    ("cdc_pm25_person_days_norm", 0.07),
    ("asthma_norm", 0.04),
    ("pov_norm", 0.04),
];

/// Ordered, named weight vector shared by every sample.
///
/// Serializes as a JSON list of `{"name": ..., "weight": ...}` objects so the
/// order survives a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<FeatureWeight>", into = "Vec<FeatureWeight>")]
pub struct QualityWeights {
    names: Vec<String>,
    values: Vec<f64>,
}

impl QualityWeights {
    /// Build from named entries, keeping their order.
    pub fn new(entries: Vec<FeatureWeight>) -> Self {
        let (names, values) = entries.into_iter().map(|e| (e.name, e.weight)).unzip();
        Self { names, values }
    }

    /// Build from bare values; features are named `f0`, `f1`, ...
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            names: (0..values.len()).map(|j| format!("f{j}")).collect(),
            values: values.to_vec(),
        }
    }

    /// Number of weighted features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Feature names in position order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Flat weight vector in position order.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Weight at a feature position.
    #[inline]
    pub fn weight(&self, feature: usize) -> f64 {
        debug_assert!(feature < self.n_features(), "feature index out of bounds");
        self.values[feature]
    }

    /// Position of a feature by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Iterate `(name, weight)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Names of features whose weight is NaN.
    pub fn nan_features(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().filter(|(_, w)| w.is_nan()).map(|(name, _)| name)
    }

    /// Whether any weight is NaN.
    pub fn has_nan(&self) -> bool {
        self.values.iter().any(|w| w.is_nan())
    }

    /// Reorder the columns of an arbitrary table into weight order.
    ///
    /// `columns` names the columns of `table`. The result has shape
    /// `[table.n_samples(), self.n_features()]`, and column `j` is the table
    /// column named `self.names()[j]`. A weighted feature the table lacks is
    /// filled with `0.0`, so it contributes nothing to the score. Table
    /// columns without a weight are dropped.
    ///
    /// # Errors
    ///
    /// [`ScoreError::ColumnCount`] if `columns.len() != table.n_features()`.
    pub fn gather<S: AsRef<str>>(
        &self,
        columns: &[S],
        table: SamplesView<'_>,
    ) -> Result<Array2<f64>, ScoreError> {
        if columns.len() != table.n_features() {
            return Err(ScoreError::ColumnCount {
                expected: table.n_features(),
                actual: columns.len(),
            });
        }

        let sources: Vec<Option<usize>> = self
            .names
            .iter()
            .map(|name| columns.iter().position(|c| c.as_ref() == name))
            .collect();

        let missing = sources.iter().filter(|s| s.is_none()).count();
        if missing > 0 {
            log::debug!("{missing} weighted feature(s) absent from table, filling with 0.0");
        }

        Ok(Array2::from_shape_fn(
            (table.n_samples(), self.n_features()),
            |(sample, feature)| match sources[feature] {
                Some(col) => table.get(sample, col),
                None => 0.0,
            },
        ))
    }
}

impl Default for QualityWeights {
    /// The ten-feature quality-of-life weight table.
    fn default() -> Self {
        Self::new(
            DEFAULT_WEIGHTS
                .iter()
                .map(|&(name, weight)| FeatureWeight::new(name, weight))
                .collect(),
        )
    }
}

impl From<Vec<FeatureWeight>> for QualityWeights {
    fn from(entries: Vec<FeatureWeight>) -> Self {
        Self::new(entries)
    }
}

impl From<QualityWeights> for Vec<FeatureWeight> {
    fn from(weights: QualityWeights) -> Self {
        weights
            .names
            .into_iter()
            .zip(weights.values)
            .map(|(name, weight)| FeatureWeight { name, weight })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn default_table() {
        let weights = QualityWeights::default();

        assert_eq!(weights.n_features(), 10);
        assert_eq!(weights.names()[0], "walkability_index_norm");
        assert_eq!(weights.weight(0), 0.18);
        assert_eq!(weights.position("pov_norm"), Some(9));
        assert_abs_diff_eq!(weights.values().iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(!weights.has_nan());
    }

    #[test]
    fn from_values_names_positions() {
        let weights = QualityWeights::from_values(&[0.5, 0.25]);
        assert_eq!(weights.names(), &["f0".to_string(), "f1".to_string()]);
        assert_eq!(weights.values(), &[0.5, 0.25]);
        assert_eq!(weights.position("f1"), Some(1));
        assert_eq!(weights.position("f2"), None);
    }

    #[test]
    fn nan_features_are_reported_by_name() {
        let weights = QualityWeights::new(vec![
            FeatureWeight::new("a", 1.0),
            FeatureWeight::new("b", f64::NAN),
            FeatureWeight::new("c", 2.0),
        ]);
        assert!(weights.has_nan());
        assert_eq!(weights.nan_features().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn serializes_as_ordered_list() {
        let weights = QualityWeights::new(vec![
            FeatureWeight::new("zeta", 1.0),
            FeatureWeight::new("alpha", 2.0),
        ]);
        let json = serde_json::to_string(&weights).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"zeta","weight":1.0},{"name":"alpha","weight":2.0}]"#
        );

        let parsed: QualityWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.names()[0], "zeta");
    }

    #[test]
    fn gather_reorders_and_fills_missing() {
        let weights = QualityWeights::new(vec![
            FeatureWeight::new("b", 1.0),
            FeatureWeight::new("missing", 1.0),
            FeatureWeight::new("a", 1.0),
        ]);
        let table = [
            1.0, 2.0, 9.0, // a, b, unweighted
            3.0, f64::NAN, 9.0,
        ];
        let view = SamplesView::from_slice(&table, 2, 3).unwrap();

        let gathered = weights.gather(&["a", "b", "extra"], view).unwrap();

        assert_eq!(gathered.dim(), (2, 3));
        assert_eq!(gathered.row(0), array![2.0, 0.0, 1.0]);
        assert!(gathered[[1, 0]].is_nan());
        assert_eq!(gathered[[1, 1]], 0.0);
        assert_eq!(gathered[[1, 2]], 3.0);
    }

    #[test]
    fn gather_checks_column_names() {
        let weights = QualityWeights::from_values(&[1.0]);
        let view = SamplesView::from_slice(&[1.0, 2.0], 1, 2).unwrap();
        let err = weights.gather(&["only_one"], view).unwrap_err();
        assert_eq!(
            err,
            ScoreError::ColumnCount {
                expected: 2,
                actual: 1
            }
        );
    }
}
