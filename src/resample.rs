//! Fixed-count resampling of tracts into curves.
//!
//! Every tract becomes a [`Curve`] with exactly `count` samples, regardless of
//! how many vertices it had. Metrics can then compare curves sample by sample.
//!
//! # Fill policy
//!
//! Output columns that have no source point stay at the origin. A tract with
//! fewer than two vertices cannot be interpolated, so its vertices are copied
//! into the leading columns and the rest are zero-filled:
//!
//! ```
//! use tractum::resample::{resample_tract, ResampleMode};
//! use tractum::Point3;
//!
//! let tract = vec![Point3::new(1.0_f64, 1.0, 1.0)];
//! let curve = resample_tract(&tract, 3, ResampleMode::Index);
//!
//! assert_eq!(curve.points()[0], Point3::new(1.0, 1.0, 1.0));
//! assert_eq!(curve.points()[1], Point3::origin());
//! assert_eq!(curve.points()[2], Point3::origin());
//! ```
//!
//! Empty tracts resample to all-zero curves. Neither case is an error.

use crate::primitives::Point3;
use crate::tract::{Bundle, Curve, ResampledBundle};
use log::trace;
use num_traits::Float;

/// How samples are spaced along a tract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResampleMode {
    /// Evenly spaced in vertex index, interpolating between neighbours.
    #[default]
    Index,
    /// Evenly spaced in arc length.
    ArcLength,
}

/// Resamples a single tract to exactly `count` samples.
///
/// The source is only read. With `count < 2` the leading `count` vertices
/// are copied and zero-filled like a short tract.
///
/// # Arguments
///
/// * `tract` - Source polyline, any length
/// * `count` - Number of output samples
/// * `mode` - How samples are spaced along the tract
///
/// # Returns
///
/// A curve of exactly `count` samples. Tracts with fewer than two vertices
/// are copied into the leading samples and padded with the origin.
///
/// # Example
///
/// ```
/// use tractum::resample::{resample_tract, ResampleMode};
/// use tractum::Point3;
///
/// let tract = vec![Point3::new(0.0_f64, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)];
/// let curve = resample_tract(&tract, 5, ResampleMode::Index);
///
/// let xs: Vec<f64> = curve.points().iter().map(|p| p.x).collect();
/// assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn resample_tract<F: Float>(tract: &[Point3<F>], count: usize, mode: ResampleMode) -> Curve<F> {
    if tract.len() < 2 || count < 2 {
        return copy_with_fill(tract, count);
    }

    let points = match mode {
        ResampleMode::Index => by_index(tract, count),
        ResampleMode::ArcLength => by_arc_length(tract, count),
    };
    Curve::from_points(points)
}

/// Resamples every tract of a bundle, preserving tract order.
///
/// # Arguments
///
/// * `bundle` - Source bundle, left untouched
/// * `count` - Samples per output curve
/// * `mode` - Sample spacing, see [`resample_tract`]
pub fn resample_bundle<F: Float>(
    bundle: &Bundle<F>,
    count: usize,
    mode: ResampleMode,
) -> ResampledBundle<F> {
    trace!(
        "resampling {} tracts ({} points) to {} samples ({:?})",
        bundle.len(),
        bundle.point_count(),
        count,
        mode
    );
    let curves = bundle
        .tracts()
        .iter()
        .map(|tract| resample_tract(tract, count, mode))
        .collect();
    ResampledBundle::new(curves)
}

/// Resamples a whole collection of bundles, preserving bundle order.
pub fn resample_collection<F: Float>(
    bundles: &[Bundle<F>],
    count: usize,
    mode: ResampleMode,
) -> Vec<ResampledBundle<F>> {
    bundles
        .iter()
        .map(|bundle| resample_bundle(bundle, count, mode))
        .collect()
}

/// Copies up to `count` source vertices into a zero-filled curve.
fn copy_with_fill<F: Float>(tract: &[Point3<F>], count: usize) -> Curve<F> {
    let mut curve = Curve::zeros(count);
    for (slot, p) in curve.points_mut().iter_mut().zip(tract) {
        *slot = *p;
    }
    curve
}

/// Samples at fractional source index `k * (m - 1) / (count - 1)`.
///
/// The integer part is computed exactly so samples that land on a vertex
/// reproduce it bit for bit.
fn by_index<F: Float>(tract: &[Point3<F>], count: usize) -> Vec<Point3<F>> {
    let last = tract.len() - 1;
    let steps = count - 1;
    let denom = to_float::<F>(steps);

    (0..count)
        .map(|k| {
            let num = k * last;
            let i = num / steps;
            let rem = num % steps;
            if i >= last {
                tract[last]
            } else if rem == 0 {
                tract[i]
            } else {
                tract[i].lerp(tract[i + 1], to_float::<F>(rem) / denom)
            }
        })
        .collect()
}

/// Samples at equal arc-length spacing, falling back to index spacing for
/// tracts of zero length.
fn by_arc_length<F: Float>(tract: &[Point3<F>], count: usize) -> Vec<Point3<F>> {
    let mut cumulative = Vec::with_capacity(tract.len());
    let mut total = F::zero();
    cumulative.push(total);
    for w in tract.windows(2) {
        total = total + w[0].distance(w[1]);
        cumulative.push(total);
    }

    if !(total > F::zero()) || !total.is_finite() {
        return by_index(tract, count);
    }

    let last = tract.len() - 1;
    let steps = to_float::<F>(count - 1);
    let mut seg = 0;
    let mut points = Vec::with_capacity(count);

    for k in 0..count {
        if k == count - 1 {
            points.push(tract[last]);
            break;
        }
        let target = total * to_float::<F>(k) / steps;
        while seg < last - 1 && cumulative[seg + 1] < target {
            seg += 1;
        }
        let seg_len = cumulative[seg + 1] - cumulative[seg];
        let p = if seg_len > F::zero() {
            let t = ((target - cumulative[seg]) / seg_len).min(F::one()).max(F::zero());
            tract[seg].lerp(tract[seg + 1], t)
        } else {
            tract[seg]
        };
        points.push(p);
    }

    points
}

#[inline]
fn to_float<F: Float>(n: usize) -> F {
    F::from(n).unwrap_or_else(F::max_value)
}
