//! Planar lattice of maze positions.

use crate::error::SpaceError;
use crate::space::{IndexedSpace, SpaceKind};
use crate::table::PointTable;
use trek_core::{Point, SpaceInstanceId};

/// Generate the lattice points `(x·spacing, y·spacing, 0)` in row-major order.
///
/// The point for column `x`, row `y` lands at index `y·width + x`.
pub fn generate_grid(width: u32, height: u32, spacing: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height {
        for x in 0..width {
            out.push(Point::planar(x as f64 * spacing, y as f64 * spacing));
        }
    }
    out
}

/// A `width × height` planar lattice with uniform spacing and `z = 0`.
///
/// Distance is planar Euclidean (not Manhattan: entities move in straight
/// lines between lattice points). Nearest-index lookup ignores the query's
/// z component.
///
/// # Examples
///
/// ```
/// use trek_space::{GridSpace, IndexedSpace};
///
/// let grid = GridSpace::new(5, 5, 1.0).unwrap();
/// assert_eq!(grid.len(), 25);
/// assert_eq!(grid.index_at(4, 4), Some(24));
/// assert!((grid.distance(0, 24).unwrap() - 32f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct GridSpace {
    width: u32,
    height: u32,
    spacing: f64,
    table: PointTable,
    instance_id: SpaceInstanceId,
}

impl GridSpace {
    /// Create a `width × height` lattice with the given spacing.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0, or
    /// `Err(SpaceError::InvalidSpacing)` unless `spacing` is finite and
    /// positive.
    pub fn new(width: u32, height: u32, spacing: f64) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(SpaceError::InvalidSpacing { spacing });
        }
        Ok(Self {
            width,
            height,
            spacing,
            table: PointTable::new(generate_grid(width, height, spacing)),
            instance_id: SpaceInstanceId::next(),
        })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance between adjacent lattice points.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Row-major index of column `x`, row `y`, or `None` if out of bounds.
    pub fn index_at(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`index_at`](Self::index_at): `(column, row)` of an index.
    pub fn cell_of(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.len() {
            return None;
        }
        let w = self.width as usize;
        Some(((index % w) as u32, (index / w) as u32))
    }
}

impl IndexedSpace for GridSpace {
    fn kind(&self) -> SpaceKind {
        SpaceKind::Grid
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
        self.table.argmin(|candidate| candidate.planar_distance(point))
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
        Ok(pa.planar_distance(pb))
    }

    fn instance_id(&self) -> SpaceInstanceId {
        self.instance_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    #[test]
    fn row_major_layout() {
        let g = GridSpace::new(3, 2, 2.0).unwrap();
        assert_eq!(g.point(0), Some(Point::planar(0.0, 0.0)));
        assert_eq!(g.point(2), Some(Point::planar(4.0, 0.0)));
        assert_eq!(g.point(3), Some(Point::planar(0.0, 2.0)));
        assert_eq!(g.point(5), Some(Point::planar(4.0, 2.0)));
        assert_eq!(g.point(6), None);
    }

    #[test]
    fn index_at_and_cell_of_agree() {
        let g = GridSpace::new(4, 3, 1.0).unwrap();
        for i in 0..g.len() {
            let (x, y) = g.cell_of(i).unwrap();
            assert_eq!(g.index_at(x, y), Some(i));
        }
        assert_eq!(g.index_at(4, 0), None);
        assert_eq!(g.cell_of(12), None);
    }

    #[test]
    fn opposite_corner_distance() {
        let g = GridSpace::new(5, 5, 1.0).unwrap();
        let d = g.distance(0, 24).unwrap();
        assert!((d - 5.656_854).abs() < 1e-6);
    }

    #[test]
    fn nearest_ignores_z() {
        let g = GridSpace::new(5, 5, 1.0).unwrap();
        assert_eq!(g.nearest_index(Point::new(2.1, 2.9, 40.0)), 17);
    }

    #[test]
    fn nearest_tie_breaks_to_first_index() {
        let g = GridSpace::new(2, 1, 1.0).unwrap();
        assert_eq!(g.nearest_index(Point::planar(0.5, 0.0)), 0);
    }

    #[test]
    fn nearest_clamps_outside_points() {
        let g = GridSpace::new(3, 3, 1.0).unwrap();
        assert_eq!(g.nearest_index(Point::planar(-10.0, -10.0)), 0);
        assert_eq!(g.nearest_index(Point::planar(10.0, 10.0)), 8);
    }

    #[test]
    fn index_of_reverse_lookup() {
        let g = GridSpace::new(3, 3, 0.5).unwrap();
        assert_eq!(g.index_of(Point::planar(1.0, 0.5)), Some(5));
        assert_eq!(g.index_of(Point::planar(0.25, 0.0)), None);
    }

    #[test]
    fn constructor_rejects_bad_parameters() {
        assert!(matches!(GridSpace::new(0, 3, 1.0), Err(SpaceError::EmptySpace)));
        assert!(matches!(GridSpace::new(3, 0, 1.0), Err(SpaceError::EmptySpace)));
        assert!(matches!(
            GridSpace::new(3, 3, 0.0),
            Err(SpaceError::InvalidSpacing { .. })
        ));
        assert!(matches!(
            GridSpace::new(3, 3, f64::NAN),
            Err(SpaceError::InvalidSpacing { .. })
        ));
    }

    #[test]
    fn compliance_square() {
        compliance::run_full_compliance(&GridSpace::new(6, 6, 1.0).unwrap());
    }

    #[test]
    fn compliance_strip() {
        compliance::run_full_compliance(&GridSpace::new(9, 1, 0.25).unwrap());
    }

    proptest! {
        #[test]
        fn distance_is_metric(
            w in 1u32..8, h in 1u32..8,
            a in 0usize..64, b in 0usize..64, c in 0usize..64,
        ) {
            let g = GridSpace::new(w, h, 1.5).unwrap();
            let n = g.len();
            let (a, b, c) = (a % n, b % n, c % n);
            let dab = g.distance(a, b).unwrap();
            prop_assert_eq!(g.distance(a, a).unwrap(), 0.0);
            prop_assert_eq!(dab, g.distance(b, a).unwrap());
            prop_assert!(g.distance(a, c).unwrap() <= dab + g.distance(b, c).unwrap() + 1e-9);
        }

        #[test]
        fn nearest_of_own_point_is_identity(w in 1u32..12, h in 1u32..12, pick in 0usize..144) {
            let g = GridSpace::new(w, h, 0.75).unwrap();
            let i = pick % g.len();
            prop_assert_eq!(g.nearest_index(g.point(i).unwrap()), i);
        }
    }
}
