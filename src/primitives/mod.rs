//! Floating-point geometric primitives.

mod point3;

pub use point3::Point3;
