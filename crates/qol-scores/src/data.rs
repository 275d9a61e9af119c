//! Row-major sample view.
//!
//! The scoring kernel works on flat buffers; [`SamplesView`] pairs such a
//! buffer with its shape so higher-level code can pass one value around
//! instead of a slice and two counts.

use ndarray::ArrayView2;

use crate::error::ScoreError;

/// Read-only view into a sample-major feature matrix.
///
/// Storage is row-major: `[n_samples, n_features]`, and sample `i` occupies
/// `data[i * n_features..(i + 1) * n_features]`. Rows are contiguous, so
/// [`sample`](Self::sample) is a plain slice.
#[derive(Clone, Copy)]
pub struct SamplesView<'a> {
    data: &'a [f64],
    array: ArrayView2<'a, f64>,
}

impl<'a> SamplesView<'a> {
    /// Create from a contiguous slice in sample-major (row-major) order.
    ///
    /// This is zero-copy.
    ///
    /// # Arguments
    ///
    /// * `data` - Slice of length `n_samples * n_features`
    /// * `n_samples` - Number of samples (rows)
    /// * `n_features` - Number of features (columns)
    ///
    /// # Errors
    ///
    /// [`ScoreError::FeatureLength`] if the slice length doesn't match
    /// `n_samples * n_features` exactly.
    pub fn from_slice(
        data: &'a [f64],
        n_samples: usize,
        n_features: usize,
    ) -> Result<Self, ScoreError> {
        let length_error = || ScoreError::FeatureLength {
            expected: n_samples.saturating_mul(n_features),
            actual: data.len(),
        };

        // ndarray accepts slices longer than the shape; we don't.
        if n_samples.checked_mul(n_features) != Some(data.len()) {
            return Err(length_error());
        }
        let array = ArrayView2::from_shape((n_samples, n_features), data)
            .map_err(|_| length_error())?;

        Ok(Self { data, array })
    }

    /// Create from an ndarray view with shape `[n_samples, n_features]`.
    ///
    /// Returns `None` unless the view is in standard (C) layout, since rows
    /// must be contiguous.
    pub fn from_array(array: ArrayView2<'a, f64>) -> Option<Self> {
        array.to_slice().map(|data| Self { data, array })
    }

    /// Number of samples (first dimension).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.array.nrows()
    }

    /// Number of features (second dimension).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.array.ncols()
    }

    /// Get feature value at (sample, feature).
    #[inline]
    pub fn get(&self, sample: usize, feature: usize) -> f64 {
        self.array[[sample, feature]]
    }

    /// All feature values of one sample.
    #[inline]
    pub fn sample(&self, sample: usize) -> &'a [f64] {
        let n_features = self.n_features();
        let start = sample * n_features;
        &self.data[start..start + n_features]
    }

    /// The underlying flat buffer, row-major.
    #[inline]
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// The underlying array view. Shape is `[n_samples, n_features]`.
    #[inline]
    pub fn as_array(&self) -> ArrayView2<'a, f64> {
        self.array
    }
}

impl std::fmt::Debug for SamplesView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplesView")
            .field("n_samples", &self.n_samples())
            .field("n_features", &self.n_features())
            .finish()
    }
}
