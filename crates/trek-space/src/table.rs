//! Point storage with exact reverse lookup, shared by both backends.

use indexmap::IndexMap;
use trek_core::Point;

/// Bit-exact hash key for a point. `-0.0` is folded into `+0.0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PointKey([u64; 3]);

impl PointKey {
    fn of(p: Point) -> Self {
        // Adding +0.0 maps -0.0 to +0.0 and leaves every other value alone.
        Self([
            (p.x + 0.0).to_bits(),
            (p.y + 0.0).to_bits(),
            (p.z + 0.0).to_bits(),
        ])
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PointTable {
    points: Vec<Point>,
    lookup: IndexMap<PointKey, usize>,
}

impl PointTable {
    pub(crate) fn new(points: Vec<Point>) -> Self {
        let mut lookup = IndexMap::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            // First occurrence wins so lookups agree with generation order.
            lookup.entry(PointKey::of(*p)).or_insert(i);
        }
        Self { points, lookup }
    }

    pub(crate) fn points(&self) -> &[Point] {
        &self.points
    }

    pub(crate) fn index_of(&self, point: Point) -> Option<usize> {
        self.lookup.get(&PointKey::of(point)).copied()
    }

    /// Linear scan for the index minimizing `metric`, first minimum wins.
    pub(crate) fn argmin(&self, mut metric: impl FnMut(Point) -> f64) -> usize {
        let mut best = 0;
        let mut best_d = f64::INFINITY;
        for (i, p) in self.points.iter().enumerate() {
            let d = metric(*p);
            if d < best_d {
                best = i;
                best_d = d;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_matches_positive_zero() {
        let table = PointTable::new(vec![Point::new(0.0, 1.0, 0.0)]);
        assert_eq!(table.index_of(Point::new(-0.0, 1.0, -0.0)), Some(0));
    }

    #[test]
    fn argmin_prefers_first_on_ties() {
        let table = PointTable::new(vec![
            Point::planar(-1.0, 0.0),
            Point::planar(1.0, 0.0),
        ]);
        assert_eq!(table.argmin(|p| p.planar_distance(Point::ORIGIN)), 0);
    }
}
