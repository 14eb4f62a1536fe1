//! Metrics built on sample-wise Euclidean distances.
//!
//! Sample `k` of one curve is paired with sample `k` of the other, or with
//! sample `n - 1 - k` when the candidate is reversed. Curves of different
//! length are compared over their common prefix. Empty curves measure zero.

use super::{direct_distances, mean, reversed_distances, Measurement, Metric};
use crate::tract::Curve;
use num_traits::Float;

/// Mean distance between corresponding samples.
///
/// This is the minimum average direct-flip distance: both orientations of the
/// candidate are tried and the smaller mean wins.
///
/// # Example
///
/// ```
/// use tractum::metric::{EuclideanMean, Metric};
/// use tractum::{Curve, Point3};
///
/// let a = Curve::from_points(vec![Point3::new(0.0_f64, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)]);
/// let b = Curve::from_points(vec![Point3::new(2.0_f64, 1.0, 0.0), Point3::new(0.0, 1.0, 0.0)]);
///
/// let m = EuclideanMean.measure(&a, &b);
/// assert_eq!(m.distance, 1.0);
/// assert!(m.flipped);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuclideanMean;

impl<F: Float> Metric<F> for EuclideanMean {
    fn name(&self) -> &'static str {
        "euclidean_mean"
    }

    fn measure(&self, a: &Curve<F>, b: &Curve<F>) -> Measurement<F> {
        Measurement::best_of(
            mean(direct_distances(a, b)),
            mean(reversed_distances(a, b)),
        )
    }
}

/// Largest distance between corresponding samples, in the better orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuclideanMax;

impl<F: Float> Metric<F> for EuclideanMax {
    fn name(&self) -> &'static str {
        "euclidean_max"
    }

    fn measure(&self, a: &Curve<F>, b: &Curve<F>) -> Measurement<F> {
        Measurement::best_of(
            direct_distances(a, b).fold(F::zero(), max_or_nan),
            reversed_distances(a, b).fold(F::zero(), max_or_nan),
        )
    }
}

/// `max` that keeps a NaN once it has been seen. `F::max` would drop it.
#[inline]
fn max_or_nan<F: Float>(acc: F, d: F) -> F {
    if d > acc || d.is_nan() {
        d
    } else {
        acc
    }
}

/// Standard deviation of the sample-wise distances.
///
/// The orientation is chosen by mean distance, as in [`EuclideanMean`]. A
/// low value means the curves run parallel, even if they are far apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuclideanStd;

impl<F: Float> Metric<F> for EuclideanStd {
    fn name(&self) -> &'static str {
        "euclidean_std"
    }

    fn measure(&self, a: &Curve<F>, b: &Curve<F>) -> Measurement<F> {
        let direct: Vec<F> = direct_distances(a, b).collect();
        let reversed: Vec<F> = reversed_distances(a, b).collect();
        let chosen = Measurement::best_of(
            mean(direct.iter().copied()),
            mean(reversed.iter().copied()),
        );

        let distances = if chosen.flipped { &reversed } else { &direct };
        let mu = chosen.distance;
        let variance = mean(distances.iter().map(|&d| (d - mu) * (d - mu)));
        Measurement::new(variance.sqrt(), chosen.flipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Point3;
    use approx::assert_relative_eq;

    fn curve(points: &[(f64, f64, f64)]) -> Curve<f64> {
        Curve::from_points(points.iter().map(|&c| Point3::from(c)).collect())
    }

    #[test]
    fn test_mean_identical() {
        let a = curve(&[(0.0, 0.0, 0.0), (1.0, 2.0, 3.0), (4.0, 4.0, 4.0)]);
        let m = EuclideanMean.measure(&a, &a);
        assert_eq!(m.distance, 0.0);
        assert!(!m.flipped);
    }

    #[test]
    fn test_mean_parallel_offset() {
        let a = curve(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (2.0, 0.0, 0.0)]);
        let b = curve(&[(0.0, 3.0, 4.0), (1.0, 3.0, 4.0), (2.0, 3.0, 4.0)]);
        let m = EuclideanMean.measure(&a, &b);
        assert_relative_eq!(m.distance, 5.0, epsilon = 1e-12);
        assert!(!m.flipped);
    }

    #[test]
    fn test_mean_reversed_candidate() {
        let a = curve(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (2.0, 0.0, 0.0)]);
        let b = curve(&[(2.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 0.0, 0.0)]);
        let m = EuclideanMean.measure(&a, &b);
        assert_eq!(m.distance, 0.0);
        assert!(m.flipped);
    }

    #[test]
    fn test_max() {
        let a = curve(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (2.0, 0.0, 0.0)]);
        let b = curve(&[(0.0, 1.0, 0.0), (1.0, 3.0, 0.0), (2.0, 1.0, 0.0)]);
        let m = EuclideanMax.measure(&a, &b);
        assert_relative_eq!(m.distance, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_std_parallel_is_zero() {
        let a = curve(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (2.0, 0.0, 0.0)]);
        let b = curve(&[(0.0, 0.0, 7.0), (1.0, 0.0, 7.0), (2.0, 0.0, 7.0)]);
        let m = EuclideanStd.measure(&a, &b);
        assert_relative_eq!(m.distance, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_std_spread() {
        let a = curve(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]);
        let b = curve(&[(0.0, 1.0, 0.0), (1.0, 3.0, 0.0)]);
        // Direct distances 1 and 3: mean 2, std 1. Reversed mean is larger.
        let m = EuclideanStd.measure(&a, &b);
        assert_relative_eq!(m.distance, 1.0, epsilon = 1e-12);
        assert!(!m.flipped);
    }

    #[test]
    fn test_empty_curves() {
        let empty = Curve::<f64>::from_points(Vec::new());
        assert_eq!(EuclideanMean.measure(&empty, &empty).distance, 0.0);
        assert_eq!(EuclideanMax.measure(&empty, &empty).distance, 0.0);
        assert_eq!(EuclideanStd.measure(&empty, &empty).distance, 0.0);
    }

    #[test]
    fn test_nan_passes_through() {
        let a = curve(&[(f64::NAN, 0.0, 0.0), (1.0, 0.0, 0.0)]);
        let b = curve(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]);
        assert!(EuclideanMean.measure(&a, &b).distance.is_nan());
    }

    #[test]
    fn test_max_keeps_nan() {
        let a = curve(&[(0.0, 0.0, 0.0), (f64::NAN, 0.0, 0.0), (2.0, 0.0, 0.0)]);
        let b = curve(&[(0.0, 5.0, 0.0), (1.0, 0.0, 0.0), (2.0, 0.0, 0.0)]);
        // The NaN sits between finite samples on both sides of it.
        assert!(EuclideanMax.measure(&a, &b).distance.is_nan());
    }
}
