//! Golden-angle (Fibonacci) point distribution on the unit sphere.
//!
//! # Construction
//!
//! For `i in 0..n`:
//!
//! ```text
//! y      = 1 - 2i / (n - 1)
//! radius = sqrt(1 - y²)
//! theta  = i · GOLDEN_ANGLE
//! p_i    = normalize(radius·cos θ, y, radius·sin θ)
//! ```
//!
//! The sequence runs from the north pole (`y = 1`) to the south pole
//! (`y = -1`). It is low-discrepancy rather than exactly uniform, and fully
//! deterministic in `n`.

use crate::error::SpaceError;
use crate::quantize::{angular_distance, normalize, GOLDEN_ANGLE};
use crate::space::{IndexedSpace, SpaceKind};
use crate::table::PointTable;
use trek_core::{Point, SpaceInstanceId};

/// Generate `n` golden-angle points on the unit sphere.
///
/// `n == 1` yields the single point `(0, 1, 0)`; `n == 0` yields nothing.
pub fn generate_sphere(n: usize) -> Vec<Point> {
    if n == 1 {
        return vec![Point::new(0.0, 1.0, 0.0)];
    }
    let denom = n.saturating_sub(1) as f64;
    (0..n)
        .map(|i| {
            let i = i as f64;
            let y = 1.0 - 2.0 * i / denom;
            // Clamp guards the poles against 1 - y² drifting below zero.
            let radius = (1.0 - y * y).max(0.0).sqrt();
            let theta = i * GOLDEN_ANGLE;
            normalize(Point::new(radius * theta.cos(), y, radius * theta.sin()))
        })
        .collect()
}

/// N points distributed over the unit sphere.
///
/// Used both for orientations (a rotation is the forward direction vector)
/// and for free 3D positions outside maze mode. Distance between indices is
/// the chord length (3D Euclidean distance between the unit vectors);
/// nearest-index lookup minimizes the angle to the query direction.
///
/// # Examples
///
/// ```
/// use trek_space::{IndexedSpace, SphereSpace};
///
/// let sphere = SphereSpace::new(64).unwrap();
/// assert_eq!(sphere.len(), 64);
/// let north = sphere.point(0).unwrap();
/// assert_eq!(sphere.nearest_index(north), 0);
/// ```
#[derive(Debug, Clone)]
pub struct SphereSpace {
    table: PointTable,
    instance_id: SpaceInstanceId,
}

impl SphereSpace {
    /// Generate a sphere space of `n` points.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if `n == 0`.
    pub fn new(n: usize) -> Result<Self, SpaceError> {
        if n == 0 {
            return Err(SpaceError::EmptySpace);
        }
        Ok(Self {
            table: PointTable::new(generate_sphere(n)),
            instance_id: SpaceInstanceId::next(),
        })
    }
}

impl IndexedSpace for SphereSpace {
    fn kind(&self) -> SpaceKind {
        SpaceKind::Sphere
    }

    fn len(&self) -> usize {
        self.table.points().len()
    }

    fn points(&self) -> &[Point] {
        self.table.points()
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        self.table.index_of(point)
    }

    fn nearest_index(&self, point: Point) -> usize {
        let dir = normalize(point);
        self.table.argmin(|candidate| angular_distance(dir, candidate))
    }

    fn distance(&self, a: usize, b: usize) -> Result<f64, SpaceError> {
        let pa = self.point(a).ok_or(SpaceError::IndexOutOfRange {
            index: a,
            len: self.len(),
        })?;
        let pb = self.point(b).ok_or(SpaceError::IndexOutOfRange {
            index: b,
            len: self.len(),
        })?;
        Ok(pa.distance(pb))
    }

    fn instance_id(&self) -> SpaceInstanceId {
        self.instance_id
    }
}
