//! Error types for tract matching.

use thiserror::Error;

/// Errors that can occur while matching bundles of tracts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TractError {
    /// The metric set is empty.
    #[error("no metric selected")]
    NoMetricSelected,

    /// Curves need at least two samples.
    #[error("resample count must be at least 2, got {count}")]
    InvalidResampleCount {
        /// The rejected sample count.
        count: usize,
    },

    /// A metric produced NaN or an infinite value while validation was enabled.
    #[error("metric `{metric}` returned a non-finite distance comparing bundle {bundle} to candidate {candidate}")]
    NonFiniteDistance {
        /// Index of the bundle in the first collection.
        bundle: usize,
        /// Index of the candidate bundle in the second collection.
        candidate: usize,
        /// Name of the offending metric.
        metric: &'static str,
    },

    /// The dedicated worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(TractError::NoMetricSelected.to_string(), "no metric selected");
        assert_eq!(
            TractError::InvalidResampleCount { count: 1 }.to_string(),
            "resample count must be at least 2, got 1"
        );
        let err = TractError::NonFiniteDistance {
            bundle: 3,
            candidate: 7,
            metric: "euclidean_mean",
        };
        assert!(err.to_string().contains("bundle 3"));
        assert!(err.to_string().contains("candidate 7"));
    }
}
