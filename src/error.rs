use thiserror::Error;

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, KMeansError>;

/// Errors returned by a k-means calculation.
///
/// All of them are raised from within [`crate::cluster`] / [`crate::KMeans::kmeans_lloyd`] (or the
/// constructors of [`crate::KMeans`]). Validation errors are raised before any iteration runs, so a
/// failed call never hands out a partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KMeansError {
    /// Malformed input: empty dataset, ragged rows, `k == 0`, `k > n`, zero dimensions,
    /// negative threshold, zero iteration limit, ...
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Distinct-sample initialization was requested, but the dataset does not contain
    /// enough distinct points.
    #[error("cannot select {requested} distinct initial centroids, dataset only contains {available} distinct samples")]
    DegenerateInitialization {
        /// Amount of centroids that were requested (k)
        requested: usize,
        /// Amount of distinct samples that exist in the dataset
        available: usize,
    },

    /// A non-finite value (NaN / infinity) was encountered.
    #[error("non-finite value encountered in {stage} (index {index})")]
    NumericFailure {
        /// Stage of the calculation, where the value was detected
        stage: &'static str,
        /// Index of the sample / centroid the value belongs to
        index: usize,
    },
}

impl KMeansError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        KMeansError::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(KMeansError::invalid("k must be > 0").to_string(), "invalid input: k must be > 0");
        assert_eq!(
            KMeansError::DegenerateInitialization { requested: 3, available: 2 }.to_string(),
            "cannot select 3 distinct initial centroids, dataset only contains 2 distinct samples"
        );
        assert_eq!(
            KMeansError::NumericFailure { stage: "assignment", index: 7 }.to_string(),
            "non-finite value encountered in assignment (index 7)"
        );
    }
}
