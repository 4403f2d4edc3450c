//! The core `IndexedSpace` trait and `dyn IndexedSpace` downcast support.

use crate::error::SpaceError;
use std::any::Any;
use std::fmt;
use trek_core::{Point, SpaceInstanceId};

/// Which family of discretization a space belongs to.
///
/// The family decides the metric: sphere spaces compare directions,
/// grid spaces compare planar positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpaceKind {
    /// Points on the unit sphere.
    Sphere,
    /// Points on a planar lattice (`z = 0`).
    Grid,
}

/// A fixed, ordered set of real-space points addressed by contiguous indices.
///
/// Positions and rotations in Trek are stored as indices into an
/// `IndexedSpace`. The number of points is fixed at construction and the
/// points never change afterwards, so spaces are shared read-only between
/// entities, the waypoint sequencer, and trajectory reconstruction.
///
/// # Object Safety
///
/// This trait is designed for use as `dyn IndexedSpace` (typically behind
/// an `Arc`). Use `downcast_ref` to reach backend-specific accessors such
/// as [`GridSpace::width`](crate::GridSpace::width).
pub trait IndexedSpace: Any + Send + Sync + fmt::Debug + 'static {
    /// The discretization family.
    fn kind(&self) -> SpaceKind;

    /// Number of points. Indices are `0..len()`.
    fn len(&self) -> usize;

    /// `true` if the space has no points. Construction rejects empty spaces,
    /// so this is `false` for every backend in this crate.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All points in index order.
    fn points(&self) -> &[Point];

    /// The point at `index`, or `None` if out of range.
    fn point(&self, index: usize) -> Option<Point> {
        self.points().get(index).copied()
    }

    /// Exact reverse lookup: the index whose point is bit-identical to `point`.
    fn index_of(&self, point: Point) -> Option<usize>;

    /// Index of the point closest to `point` under this space's metric.
    ///
    /// Ties resolve to the lowest index.
    fn nearest_index(&self, point: Point) -> usize;

    /// Distance between two indexed points under this space's metric.
    ///
    /// Symmetric, zero on the diagonal, and satisfies the triangle
    /// inequality.
    fn distance(&self, a: usize, b: usize) -> Result<f64, SpaceError>;

    /// Unique instance identifier for this space object.
    fn instance_id(&self) -> SpaceInstanceId;

    /// Check that `index` addresses a point of this space.
    fn check_index(&self, index: usize) -> Result<(), SpaceError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(SpaceError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }
}

impl dyn IndexedSpace {
    /// Attempt to downcast a trait object to a concrete space type.
    pub fn downcast_ref<T: IndexedSpace>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}
