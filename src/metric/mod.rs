//! Pluggable distance metrics between resampled curves.
//!
//! A [`Metric`] compares two curves of equal sample count and reports a scalar
//! distance together with the orientation it used. Tracts carry no intrinsic
//! direction, so most metrics also compare against the reversed candidate and
//! keep the better orientation. That policy belongs to the metric. The
//! aggregator only records the distance.
//!
//! Metrics must be pure. The matcher shares one metric set across worker
//! threads, which is why the trait requires `Send + Sync`.

mod endpoint;
mod euclidean;

pub use endpoint::Endpoints;
pub use euclidean::{EuclideanMax, EuclideanMean, EuclideanStd};

use crate::tract::Curve;
use num_traits::Float;
use std::sync::Arc;

/// Result of comparing two curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement<F> {
    /// Distance between the curves.
    pub distance: F,
    /// True if the distance was obtained against the reversed candidate.
    pub flipped: bool,
}

impl<F: Float> Measurement<F> {
    #[inline]
    pub fn new(distance: F, flipped: bool) -> Self {
        Self { distance, flipped }
    }

    /// Picks the smaller of a direct and a reversed distance. Ties keep the
    /// direct orientation.
    #[inline]
    pub fn best_of(direct: F, reversed: F) -> Self {
        if reversed < direct {
            Self::new(reversed, true)
        } else {
            Self::new(direct, false)
        }
    }
}

/// A distance function between two resampled curves.
pub trait Metric<F: Float>: Send + Sync {
    /// Short label used in logs and errors.
    fn name(&self) -> &'static str;

    /// Compares `a` against `b`.
    fn measure(&self, a: &Curve<F>, b: &Curve<F>) -> Measurement<F>;
}

impl<F: Float, M: Metric<F> + ?Sized> Metric<F> for &M {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn measure(&self, a: &Curve<F>, b: &Curve<F>) -> Measurement<F> {
        (**self).measure(a, b)
    }
}

impl<F: Float, M: Metric<F> + ?Sized> Metric<F> for Box<M> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn measure(&self, a: &Curve<F>, b: &Curve<F>) -> Measurement<F> {
        (**self).measure(a, b)
    }
}

impl<F: Float, M: Metric<F> + ?Sized> Metric<F> for Arc<M> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn measure(&self, a: &Curve<F>, b: &Curve<F>) -> Measurement<F> {
        (**self).measure(a, b)
    }
}

/// Multiplies another metric's distance by a constant factor.
///
/// Useful for weighting metrics of different magnitude against each other
/// when several are combined in one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaled<M, F> {
    inner: M,
    factor: F,
}

impl<M, F: Float> Scaled<M, F> {
    pub fn new(inner: M, factor: F) -> Self {
        Self { inner, factor }
    }

    pub fn factor(&self) -> F {
        self.factor
    }
}

impl<F: Float + Send + Sync, M: Metric<F>> Metric<F> for Scaled<M, F> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn measure(&self, a: &Curve<F>, b: &Curve<F>) -> Measurement<F> {
        let m = self.inner.measure(a, b);
        Measurement::new(m.distance * self.factor, m.flipped)
    }
}

/// Sample-wise distances with `b` in its stored orientation.
pub(crate) fn direct_distances<'a, F: Float>(
    a: &'a Curve<F>,
    b: &'a Curve<F>,
) -> impl Iterator<Item = F> + 'a {
    a.points().iter().zip(b.points()).map(|(p, q)| p.distance(*q))
}

/// Sample-wise distances with `b` reversed.
pub(crate) fn reversed_distances<'a, F: Float>(
    a: &'a Curve<F>,
    b: &'a Curve<F>,
) -> impl Iterator<Item = F> + 'a {
    a.points().iter().zip(b.iter_reversed()).map(|(p, q)| p.distance(*q))
}

/// Mean of an iterator, or zero when it is empty.
pub(crate) fn mean<F: Float>(values: impl Iterator<Item = F>) -> F {
    let (sum, n) = values.fold((F::zero(), 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        return F::zero();
    }
    sum / F::from(n).unwrap_or_else(F::one)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Point3;
    use approx::assert_relative_eq;

    fn line(x0: f64, x1: f64) -> Curve<f64> {
        Curve::from_points(vec![Point3::new(x0, 0.0, 0.0), Point3::new(x1, 0.0, 0.0)])
    }

    #[test]
    fn test_best_of_prefers_direct_on_tie() {
        assert_eq!(Measurement::best_of(1.0, 1.0), Measurement::new(1.0, false));
        assert_eq!(Measurement::best_of(2.0, 1.0), Measurement::new(1.0, true));
    }

    #[test]
    fn test_scaled() {
        let metric = Scaled::new(EuclideanMean, 2.5);
        let m = metric.measure(&line(0.0, 1.0), &line(0.0, 3.0));
        // Direct mean is (0 + 2) / 2 = 1, reversed is (3 + 1) / 2 = 2.
        assert_relative_eq!(m.distance, 2.5, epsilon = 1e-12);
        assert!(!m.flipped);
        assert_eq!(metric.name(), "euclidean_mean");
        assert_eq!(metric.factor(), 2.5);
    }

    #[test]
    fn test_dyn_dispatch() {
        let metrics: Vec<Box<dyn Metric<f64>>> = vec![Box::new(EuclideanMean), Box::new(Endpoints)];
        let names: Vec<_> = metrics.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["euclidean_mean", "endpoints"]);

        let shared: Arc<dyn Metric<f64>> = Arc::new(EuclideanMax);
        let m = shared.measure(&line(0.0, 1.0), &line(1.0, 0.0));
        assert_eq!(m.distance, 0.0);
        assert!(m.flipped);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(std::iter::empty::<f64>()), 0.0);
        assert_relative_eq!(mean([1.0, 2.0, 6.0].into_iter()), 3.0);
    }
}
