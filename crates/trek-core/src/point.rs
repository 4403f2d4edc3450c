//! Real-space 3-component coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A point (or direction vector) in real space.
///
/// Grid spaces keep `z == 0`; sphere spaces store unit vectors.
/// Serializes as a plain `[x, y, z]` array to match the trajectory export.
///
/// # Examples
///
/// ```
/// use trek_core::Point;
///
/// let a = Point::new(0.0, 0.0, 0.0);
/// let b = Point::new(3.0, 4.0, 12.0);
/// assert_eq!(a.distance(b), 13.0);
/// assert_eq!(a.planar_distance(b), 5.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Point = Point::new(0.0, 0.0, 0.0);

    /// Unit +Z axis, the fallback direction for degenerate vectors.
    pub const UNIT_Z: Point = Point::new(0.0, 0.0, 1.0);

    /// Construct a point from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Construct a point on the `z = 0` plane.
    pub const fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Dot product.
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean magnitude.
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// 3D Euclidean distance.
    pub fn distance(self, other: Point) -> f64 {
        (self - other).norm()
    }

    /// Euclidean distance in the XY plane, ignoring `z`.
    pub fn planar_distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// `true` if every component is finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Components as an array.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Point {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Point> for [f64; 3] {
    fn from(p: Point) -> Self {
        p.to_array()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn planar_distance_ignores_z() {
        let a = Point::new(0.0, 0.0, 5.0);
        let b = Point::new(3.0, 4.0, -5.0);
        assert_eq!(a.planar_distance(b), 5.0);
    }

    #[test]
    fn serializes_as_array() {
        let json = serde_json::to_string(&Point::new(1.0, 2.5, 0.0)).unwrap();
        assert_eq!(json, "[1.0,2.5,0.0]");
        let back: Point = serde_json::from_str("[1.0,2.5,0.0]").unwrap();
        assert_eq!(back, Point::new(1.0, 2.5, 0.0));
    }

    #[test]
    fn arithmetic() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Point::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Point::new(0.5, 1.5, 2.5));
        assert_eq!(b * 2.0, Point::new(1.0, 1.0, 1.0));
        assert_eq!(a.dot(b), 3.0);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            ax in -100.0f64..100.0, ay in -100.0f64..100.0, az in -100.0f64..100.0,
            bx in -100.0f64..100.0, by in -100.0f64..100.0, bz in -100.0f64..100.0,
        ) {
            let a = Point::new(ax, ay, az);
            let b = Point::new(bx, by, bz);
            prop_assert_eq!(a.distance(b), b.distance(a));
            prop_assert_eq!(a.planar_distance(b), b.planar_distance(a));
            prop_assert!(a.planar_distance(b) <= a.distance(b) + 1e-12);
        }
    }
}
