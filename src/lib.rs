//! tractum - Nearest-match search between bundles of 3D tracts
//!
//! Given two collections of bundles, each bundle a set of 3D polylines, this
//! library finds for every bundle of the first collection the bundle of the
//! second collection that lies closest under one or more pluggable curve
//! metrics. Tracts are resampled to a fixed number of samples, compared pairwise,
//! and aggregated into a directed bundle-to-bundle distance. The outer search
//! runs in parallel with shared progress accounting.
//!
//! # Example
//!
//! ```
//! use tractum::{Bundle, MatchConfig, Point3, TractMatcher};
//! use tractum::metric::{Endpoints, EuclideanMean};
//!
//! let arc = |z: f64| -> Vec<Point3<f64>> {
//!     (0..20).map(|i| Point3::new(i as f64, (i as f64 * 0.3).sin(), z)).collect()
//! };
//!
//! let subject = vec![Bundle::new(vec![arc(0.1), arc(0.2)])];
//! let atlas = vec![
//!     Bundle::new(vec![arc(5.0)]),
//!     Bundle::new(vec![arc(0.0)]),
//! ];
//!
//! let mut matcher = TractMatcher::new(MatchConfig::default())
//!     .with_metric(EuclideanMean)
//!     .with_metric(Endpoints);
//! let result = matcher.match_bundles(&subject, &atlas).unwrap();
//!
//! assert_eq!(result.indices(), &[Some(1)]);
//! assert_eq!(matcher.progress().value(), matcher.progress().total());
//! ```

pub mod aggregate;
pub mod error;
pub mod matcher;
pub mod metric;
pub mod primitives;
pub mod progress;
pub mod resample;
pub mod tract;

pub use error::{Result, TractError};
pub use matcher::{match_bundles, MatchConfig, MatchResult, NumericPolicy, TractMatcher};
pub use metric::{Measurement, Metric};
pub use primitives::Point3;
pub use progress::{CancellationToken, Progress};
pub use resample::ResampleMode;
pub use tract::{Bundle, Curve, ResampledBundle, Tract};
