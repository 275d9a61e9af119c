//! Error types.

/// Buffer-shape errors reported by the checked scoring entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    /// Feature buffer length is not `n_samples * n_features`.
    #[error("feature buffer has {actual} values, expected n_samples * n_features = {expected}")]
    FeatureLength { expected: usize, actual: usize },

    /// Weight vector length is not `n_features`.
    #[error("weight vector has {actual} values, expected n_features = {expected}")]
    WeightLength { expected: usize, actual: usize },

    /// Output buffer length is not `n_samples`.
    #[error("output buffer has {actual} slots, expected n_samples = {expected}")]
    OutputLength { expected: usize, actual: usize },

    /// Number of column names differs from the table width.
    #[error("table has {expected} columns but {actual} column names were given")]
    ColumnCount { expected: usize, actual: usize },

    /// The rayon pool for a fixed thread count could not be built.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Errors raised while loading a [`ScoringConfig`](crate::ScoringConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config must define at least one feature weight")]
    EmptyWeights,

    #[error("feature '{0}' is weighted more than once")]
    DuplicateFeature(String),

    /// JSON cannot represent NaN or infinity, so config weights must be finite.
    #[error("feature '{feature}' has non-finite weight {weight}")]
    NonFiniteWeight { feature: String, weight: f64 },
}
