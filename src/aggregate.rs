//! Directed aggregate distance between two bundles.
//!
//! For every metric and every curve in `a`, the closest curve in `b` is found.
//! Those nearest-neighbour distances are summed and normalized by
//! `|a| * |metrics|`:
//!
//! ```text
//! d(A, B) = Σ_m Σ_{a∈A} min_{b∈B} m(a, b) / (|A| · |M|)
//! ```
//!
//! This is a directed, mean-of-minima relative of the Hausdorff distance. It
//! is asymmetric: `d(A, B) != d(B, A)` in general, and `|B|` never appears in
//! the normalization.

use crate::metric::Metric;
use crate::tract::Curve;
use num_traits::Float;

/// Computes the directed aggregate distance from `a` to `b`.
///
/// # Arguments
///
/// * `a` - Curves whose nearest partners are searched for
/// * `b` - Candidate partners
/// * `metrics` - Metrics applied to every curve pair
///
/// # Returns
///
/// The per-metric sum of nearest distances divided by `|a| · |metrics|`.
/// Returns infinity if `a` or `metrics` is empty, or if `b` is empty, since no
/// nearest neighbour exists. NaN or infinite metric outputs are not filtered.
///
/// # Complexity
///
/// O(|M| · |A| · |B|) metric evaluations.
///
/// # Example
///
/// ```
/// use tractum::aggregate::bundle_distance;
/// use tractum::metric::EuclideanMean;
/// use tractum::{Curve, Point3};
///
/// let near = Curve::from_points(vec![Point3::new(0.0_f64, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]);
/// let far = Curve::from_points(vec![Point3::new(0.0_f64, 4.0, 0.0), Point3::new(1.0, 4.0, 0.0)]);
///
/// // Every curve of A has an exact partner in B.
/// let d = bundle_distance(&[near.clone()], &[far.clone(), near.clone()], &[EuclideanMean]);
/// assert_eq!(d, 0.0);
///
/// // The reverse direction has to account for `far`.
/// let d = bundle_distance(&[far, near.clone()], &[near], &[EuclideanMean]);
/// assert_eq!(d, 2.0);
/// ```
pub fn bundle_distance<F, M>(a: &[Curve<F>], b: &[Curve<F>], metrics: &[M]) -> F
where
    F: Float,
    M: Metric<F>,
{
    match aggregate(a, b, metrics, false) {
        Ok(d) => d,
        Err(_) => F::nan(),
    }
}

/// Number of metric evaluations one aggregate performs.
#[inline]
pub fn comparison_count(a_len: usize, b_len: usize, metric_count: usize) -> u64 {
    metric_count as u64 * a_len as u64 * b_len as u64
}

/// Shared implementation. With `reject_non_finite` set, the first NaN or
/// infinite metric output aborts and reports the metric's name.
pub(crate) fn aggregate<F, M>(
    a: &[Curve<F>],
    b: &[Curve<F>],
    metrics: &[M],
    reject_non_finite: bool,
) -> Result<F, &'static str>
where
    F: Float,
    M: Metric<F>,
{
    if a.is_empty() || metrics.is_empty() {
        return Ok(F::infinity());
    }

    let mut total = F::zero();
    for metric in metrics {
        for curve_a in a {
            let mut min_dist = F::infinity();
            for curve_b in b {
                let d = metric.measure(curve_a, curve_b).distance;
                if reject_non_finite && !d.is_finite() {
                    return Err(metric.name());
                }
                if d < min_dist {
                    min_dist = d;
                }
            }
            total = total + min_dist;
        }
    }

    let norm = F::from(a.len() * metrics.len()).unwrap_or_else(F::one);
    Ok(total / norm)
}
