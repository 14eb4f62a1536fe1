//! Tracts, bundles and their fixed-length curve representations.
//!
//! A [`Bundle`] is the raw input: an ordered set of tracts, each an ordered
//! polyline of arbitrary length. Resampling turns every tract into a
//! [`Curve`] with exactly the configured number of samples, and collects them
//! into a [`ResampledBundle`] that keeps the source ordering.

use crate::primitives::Point3;
use num_traits::Float;

/// A single traced polyline.
pub type Tract<F> = Vec<Point3<F>>;

/// An ordered collection of tracts.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bundle<F> {
    tracts: Vec<Tract<F>>,
}

impl<F: Float> Bundle<F> {
    /// Creates a bundle from its tracts.
    pub fn new(tracts: Vec<Tract<F>>) -> Self {
        Self { tracts }
    }

    /// Creates a bundle with no tracts.
    pub fn empty() -> Self {
        Self { tracts: Vec::new() }
    }

    /// Appends a tract.
    pub fn push(&mut self, tract: Tract<F>) {
        self.tracts.push(tract);
    }

    /// Returns the tracts in order.
    pub fn tracts(&self) -> &[Tract<F>] {
        &self.tracts
    }

    /// Number of tracts.
    pub fn len(&self) -> usize {
        self.tracts.len()
    }

    /// Returns true if the bundle holds no tracts.
    pub fn is_empty(&self) -> bool {
        self.tracts.is_empty()
    }

    /// Total number of vertices across all tracts.
    pub fn point_count(&self) -> usize {
        self.tracts.iter().map(Vec::len).sum()
    }
}

impl<F: Float> From<Vec<Tract<F>>> for Bundle<F> {
    fn from(tracts: Vec<Tract<F>>) -> Self {
        Self::new(tracts)
    }
}

impl<F: Float> FromIterator<Tract<F>> for Bundle<F> {
    fn from_iter<I: IntoIterator<Item = Tract<F>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A fixed-length resampled tract.
///
/// Immutable once built; every curve produced by one resampling pass has the
/// same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve<F> {
    points: Vec<Point3<F>>,
}

impl<F: Float> Curve<F> {
    /// Wraps already-resampled samples.
    pub fn from_points(points: Vec<Point3<F>>) -> Self {
        Self { points }
    }

    /// A curve of `len` samples at the origin.
    pub fn zeros(len: usize) -> Self {
        Self {
            points: vec![Point3::origin(); len],
        }
    }

    /// The samples in order.
    #[inline]
    pub fn points(&self) -> &[Point3<F>] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [Point3<F>] {
        &mut self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First sample, if any.
    pub fn start(&self) -> Option<Point3<F>> {
        self.points.first().copied()
    }

    /// Last sample, if any.
    pub fn end(&self) -> Option<Point3<F>> {
        self.points.last().copied()
    }

    /// Iterates the samples from last to first.
    pub fn iter_reversed(&self) -> impl Iterator<Item = &Point3<F>> + '_ {
        self.points.iter().rev()
    }
}

/// The curves of one bundle, in the bundle's tract order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledBundle<F> {
    curves: Vec<Curve<F>>,
}

impl<F: Float> ResampledBundle<F> {
    pub fn new(curves: Vec<Curve<F>>) -> Self {
        Self { curves }
    }

    pub fn curves(&self) -> &[Curve<F>] {
        &self.curves
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    #[test]
    fn test_bundle_counts() {
        let mut bundle = Bundle::new(vec![vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]]);
        bundle.push(vec![p(2.0, 0.0, 0.0)]);
        bundle.push(Vec::new());
        assert_eq!(bundle.len(), 3);
        assert_eq!(bundle.point_count(), 3);
        assert!(!bundle.is_empty());
        assert!(Bundle::<f64>::empty().is_empty());
    }

    #[test]
    fn test_bundle_from_iter() {
        let bundle: Bundle<f64> = (0..4).map(|i| vec![p(i as f64, 0.0, 0.0)]).collect();
        assert_eq!(bundle.len(), 4);
        assert_eq!(bundle.tracts()[3][0].x, 3.0);
    }

    #[test]
    fn test_curve_endpoints() {
        let curve = Curve::from_points(vec![p(0.0, 0.0, 0.0), p(1.0, 2.0, 3.0), p(4.0, 5.0, 6.0)]);
        assert_eq!(curve.start(), Some(p(0.0, 0.0, 0.0)));
        assert_eq!(curve.end(), Some(p(4.0, 5.0, 6.0)));
        let reversed: Vec<_> = curve.iter_reversed().copied().collect();
        assert_eq!(reversed[0], p(4.0, 5.0, 6.0));
        assert_eq!(reversed[2], p(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_curve_zeros() {
        let curve: Curve<f32> = Curve::zeros(5);
        assert_eq!(curve.len(), 5);
        assert!(curve.points().iter().all(|q| *q == Point3::origin()));
        assert_eq!(Curve::<f32>::zeros(0).start(), None);
    }
}
