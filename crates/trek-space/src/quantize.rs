//! Quantization helpers: unit vectors, angular distance, nearest-index lookup.

use crate::space::IndexedSpace;
use trek_core::Point;

/// The golden angle in radians, `π (3 − √5)`.
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653_3;

/// Magnitudes below this are treated as the zero vector by [`normalize`].
pub const NORMALIZE_EPSILON: f64 = 1e-10;

/// Scale `v` to unit length.
///
/// Degenerate vectors (magnitude below `1e-10`) map to the fixed default
/// axis `(0, 0, 1)` instead of dividing by zero.
///
/// # Examples
///
/// ```
/// use trek_core::Point;
/// use trek_space::normalize;
///
/// assert_eq!(normalize(Point::new(0.0, 0.0, 0.0)), Point::new(0.0, 0.0, 1.0));
/// assert_eq!(normalize(Point::new(0.0, 3.0, 0.0)), Point::new(0.0, 1.0, 0.0));
/// ```
pub fn normalize(v: Point) -> Point {
    let n = v.norm();
    if n < NORMALIZE_EPSILON {
        return Point::UNIT_Z;
    }
    v * (1.0 / n)
}

/// Angle in radians between the direction of `v` and the unit vector `unit`.
pub fn angular_distance(v: Point, unit: Point) -> f64 {
    normalize(v).dot(unit).clamp(-1.0, 1.0).acos()
}

/// Snap a continuous point to the closest index of `space`.
///
/// Sphere spaces compare directions (angular distance), grid spaces compare
/// planar positions (z is ignored). The scan is linear in the number of
/// points and ties resolve to the first index in generation order.
pub fn find_nearest_index(space: &dyn IndexedSpace, point: Point) -> usize {
    space.nearest_index(point)
}
