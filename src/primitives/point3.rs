//! 3D point type.

use num_traits::Float;

/// A 3D point with x, y, and z coordinates.
///
/// Generic over floating-point types (`f32` or `f64`). Tract vertices and
/// resampled curve samples are both stored as `Point3`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3<F> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Point3<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F, z: F) -> Self {
        Self { x, y, z }
    }

    /// Creates a point at the origin (0, 0, 0).
    ///
    /// This is also the fill value for curve samples with no source point.
    #[inline]
    pub fn origin() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
            z: F::zero(),
        }
    }

    /// Computes the squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> F {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Computes the Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> F {
        self.distance_squared(other).sqrt()
    }

    /// Linearly interpolates between `self` and `other`.
    ///
    /// When `t = 0`, returns `self`. When `t = 1`, returns `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: F) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

impl<F: Float> Default for Point3<F> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<F: Float> From<[F; 3]> for Point3<F> {
    fn from(c: [F; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl<F: Float> From<(F, F, F)> for Point3<F> {
    fn from((x, y, z): (F, F, F)) -> Self {
        Self::new(x, y, z)
    }
}

impl<F: Float> From<Point3<F>> for [F; 3] {
    fn from(p: Point3<F>) -> Self {
        [p.x, p.y, p.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_default() {
        let p: Point3<f64> = Point3::default();
        assert_eq!(p, Point3::origin());
        assert_eq!(p.x, 0.0);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_distance() {
        let a: Point3<f64> = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 3.0, 6.0);
        assert_eq!(a.distance_squared(b), 49.0);
        assert_eq!(a.distance(b), 7.0);
    }

    #[test]
    fn test_lerp() {
        let a: Point3<f64> = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, 20.0, 30.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point3::new(5.0, 10.0, 15.0));
    }

    #[test]
    fn test_conversions() {
        let p: Point3<f32> = [1.0, 2.0, 3.0].into();
        assert_eq!(p, Point3::new(1.0, 2.0, 3.0));
        let q: Point3<f32> = (1.0, 2.0, 3.0).into();
        assert_eq!(p, q);
        let arr: [f32; 3] = q.into();
        assert_eq!(arr, [1.0, 2.0, 3.0]);
    }
}
