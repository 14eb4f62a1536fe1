//! Matcher configuration.

use crate::error::{Result, TractError};
use crate::resample::ResampleMode;

/// Default number of samples per resampled curve.
pub const DEFAULT_RESAMPLE_COUNT: usize = 12;

/// What to do with NaN or infinite metric outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NumericPolicy {
    /// Feed them into the minimum and sum unchanged. A NaN never wins a
    /// comparison, so it silently drops out of the minimum.
    #[default]
    PassThrough,
    /// Abort the search with [`TractError::NonFiniteDistance`].
    Reject,
}

/// Configuration for [`TractMatcher`](super::TractMatcher).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    /// Samples per resampled curve. Must be at least 2.
    pub resample_count: usize,

    /// How samples are spaced along each tract.
    pub resample_mode: ResampleMode,

    /// Handling of non-finite metric outputs.
    pub numeric_policy: NumericPolicy,

    /// Worker threads for the outer loop.
    /// `None` uses the global rayon pool; `Some(n)` builds a dedicated pool.
    /// Ignored without the `parallel` feature.
    pub threads: Option<usize>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            resample_count: DEFAULT_RESAMPLE_COUNT,
            resample_mode: ResampleMode::default(),
            numeric_policy: NumericPolicy::default(),
            threads: None,
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resample_count(mut self, count: usize) -> Self {
        self.resample_count = count;
        self
    }

    pub fn with_resample_mode(mut self, mode: ResampleMode) -> Self {
        self.resample_mode = mode;
        self
    }

    pub fn with_numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.numeric_policy = policy;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Checks the settings that have hard limits.
    pub fn validate(&self) -> Result<()> {
        if self.resample_count < 2 {
            return Err(TractError::InvalidResampleCount {
                count: self.resample_count,
            });
        }
        Ok(())
    }
}
