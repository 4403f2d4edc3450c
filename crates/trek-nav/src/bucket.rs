//! Uniform bucket grid over face bounding boxes for point location.
//!
//! Every face is registered in each bucket its inflated XY bounding box
//! overlaps, in ascending face order. Any face containing a point therefore
//! sits in that point's bucket, so scanning the bucket in order yields the
//! same "first containing face" as a full linear scan.
//!
//! The barycentric tolerance of [`contains_xy`](crate::geometry::contains_xy)
//! grows each triangle by a factor of `1 + 3ε` about its centroid, so the
//! padding scales with the face's own extent rather than being absolute.

use crate::geometry::CONTAINS_EPSILON;
use trek_core::Point;

/// Upper bound on buckets per face, keeps memory linear in face count.
const MAX_BUCKETS_PER_FACE: usize = 4;

#[derive(Clone, Debug)]
pub(crate) struct FaceBuckets {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    pad: f64,
    cell: f64,
    nx: usize,
    ny: usize,
    buckets: Vec<Vec<usize>>,
}

impl FaceBuckets {
    /// Build buckets for faces given as vertex triples.
    pub(crate) fn build(vertices: &[Point], faces: &[[usize; 3]]) -> Self {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for face in faces {
            for &v in face {
                let p = vertices[v];
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
        }
        let pad = faces
            .iter()
            .map(|face| face_pad(&face.map(|v| vertices[v])))
            .fold(0.0, f64::max);
        let extent_x = (max_x - min_x).max(CONTAINS_EPSILON);
        let extent_y = (max_y - min_y).max(CONTAINS_EPSILON);

        // Aim for roughly one bucket per face pair, bounded either way.
        let target = (faces.len() / 2).clamp(1, faces.len() * MAX_BUCKETS_PER_FACE);
        let cell = ((extent_x * extent_y) / target as f64).sqrt().max(CONTAINS_EPSILON);
        let nx = ((extent_x / cell).floor() as usize + 1).max(1);
        let ny = ((extent_y / cell).floor() as usize + 1).max(1);

        let mut grid = Self {
            min_x,
            min_y,
            max_x,
            max_y,
            pad,
            cell,
            nx,
            ny,
            buckets: vec![Vec::new(); nx * ny],
        };
        for (f, face) in faces.iter().enumerate() {
            let pts = face.map(|v| vertices[v]);
            let fx0 = pts.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
            let fy0 = pts.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
            let fx1 = pts.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
            let fy1 = pts.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
            let pad = face_pad(&pts);
            let (ix0, iy0) = grid.clamped_cell(fx0 - pad, fy0 - pad);
            let (ix1, iy1) = grid.clamped_cell(fx1 + pad, fy1 + pad);
            for iy in iy0..=iy1 {
                for ix in ix0..=ix1 {
                    grid.buckets[iy * nx + ix].push(f);
                }
            }
        }
        grid
    }

    fn clamped_cell(&self, x: f64, y: f64) -> (usize, usize) {
        let ix = ((x - self.min_x) / self.cell).floor().max(0.0) as usize;
        let iy = ((y - self.min_y) / self.cell).floor().max(0.0) as usize;
        (ix.min(self.nx - 1), iy.min(self.ny - 1))
    }

    /// Candidate faces for `p` in ascending order, or an empty slice when
    /// `p` lies outside the mesh bounds.
    pub(crate) fn candidates(&self, p: Point) -> &[usize] {
        let tol = self.pad;
        if !p.x.is_finite()
            || !p.y.is_finite()
            || p.x < self.min_x - tol
            || p.x > self.max_x + tol
            || p.y < self.min_y - tol
            || p.y > self.max_y + tol
        {
            return &[];
        }
        let (ix, iy) = self.clamped_cell(p.x, p.y);
        &self.buckets[iy * self.nx + ix]
    }
}

/// How far point location may reach outside a face's bounding box.
fn face_pad(pts: &[Point; 3]) -> f64 {
    let span = |coord: fn(&Point) -> f64| {
        let values = pts.map(|p| coord(&p));
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            - values.iter().copied().fold(f64::INFINITY, f64::min)
    };
    4.0 * CONTAINS_EPSILON * (span(|p| p.x) + span(|p| p.y)).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::contains_xy;

    #[test]
    fn every_face_is_found_from_its_centroid() {
        let vertices = vec![
            Point::planar(0.0, 0.0),
            Point::planar(2.0, 0.0),
            Point::planar(2.0, 2.0),
            Point::planar(0.0, 2.0),
        ];
        let faces = vec![[0, 1, 2], [0, 2, 3]];
        let b = FaceBuckets::build(&vertices, &faces);
        assert!(b.candidates(Point::planar(1.5, 0.5)).contains(&0));
        assert!(b.candidates(Point::planar(0.5, 1.5)).contains(&1));
    }

    #[test]
    fn outside_points_have_no_candidates() {
        let vertices = vec![
            Point::planar(0.0, 0.0),
            Point::planar(1.0, 0.0),
            Point::planar(0.0, 1.0),
        ];
        let b = FaceBuckets::build(&vertices, &[[0, 1, 2]]);
        assert!(b.candidates(Point::planar(5.0, 0.5)).is_empty());
        assert!(b.candidates(Point::planar(f64::NAN, 0.5)).is_empty());
    }

    #[test]
    fn tolerance_scales_with_face_size() {
        // A 1e6 triangle accepts points 1e-4 outside its legs, well past
        // any fixed absolute slack.
        let vertices = vec![
            Point::planar(0.0, 0.0),
            Point::planar(1e6, 0.0),
            Point::planar(0.0, 1e6),
            Point::planar(2e6, 2e6),
            Point::planar(2e6 + 1.0, 2e6),
            Point::planar(2e6, 2e6 + 1.0),
        ];
        let faces = vec![[0, 1, 2], [3, 4, 5]];
        let b = FaceBuckets::build(&vertices, &faces);
        for p in [Point::planar(-1e-4, 5e5), Point::planar(5e5, -1e-4)] {
            let [a, v, c] = faces[0].map(|i| vertices[i]);
            assert!(contains_xy(a, v, c, p));
            assert!(b.candidates(p).contains(&0), "{p} lost its face");
        }
    }
}
