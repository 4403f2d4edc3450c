//! Bounded A* over walkable faces and line-of-sight path smoothing.

use crate::error::{NavError, PathFailure};
use crate::geometry::signed_area2;
use crate::mesh::NavMesh;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use trek_core::Point;

/// Slack when clipping a segment against a face, relative to the edge and
/// segment lengths. Shared edges count as inside both faces.
const CLIP_EPSILON: f64 = 1e-9;

/// Stretches of a segment shorter than this fraction of it are contacts,
/// not crossings.
const TOUCH_EPSILON: f64 = 1e-7;

/// Open-set entry. Ordered so that `BinaryHeap` pops the lowest `f`,
/// breaking ties on the lower face index.
#[derive(Clone, Copy, Debug)]
struct HeapNode {
    face: usize,
    f: f64,
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapNode {}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.face.cmp(&self.face))
    }
}

impl NavMesh {
    /// Find a walkable path from `from` to `to`.
    ///
    /// The result starts with `from`, ends with `to`, and in between holds
    /// the face centroids that survive line-of-sight smoothing. Expansion is
    /// capped at twice the face count.
    ///
    /// # Errors
    ///
    /// [`NavError::PathNotFound`] when either endpoint is off the mesh or on
    /// an unwalkable face, or when the search fails to reach the goal face.
    ///
    /// # Examples
    ///
    /// ```
    /// use trek_core::Point;
    /// use trek_nav::NavMesh;
    ///
    /// let mesh = NavMesh::from_grid(3, 3, 1.0, &[]).unwrap();
    /// let path = mesh
    ///     .find_path(Point::planar(0.5, 0.5), Point::planar(1.5, 0.5))
    ///     .unwrap();
    /// assert_eq!(path, vec![Point::planar(0.5, 0.5), Point::planar(1.5, 0.5)]);
    /// ```
    pub fn find_path(&self, from: Point, to: Point) -> Result<Vec<Point>, NavError> {
        self.find_path_bounded(from, to, self.face_count().saturating_mul(2))
    }

    /// [`find_path`](Self::find_path) with an explicit expansion budget.
    pub fn find_path_bounded(
        &self,
        from: Point,
        to: Point,
        max_expansions: usize,
    ) -> Result<Vec<Point>, NavError> {
        let corridor = self.find_corridor(from, to, max_expansions)?;
        let mut raw = Vec::with_capacity(corridor.len() + 2);
        raw.push(from);
        raw.extend(corridor.iter().map(|&f| self.centroid_unchecked(f)));
        raw.push(to);
        let path = self.smooth(&raw);
        tracing::debug!(
            corridor = corridor.len(),
            points = path.len(),
            "navmesh path found"
        );
        Ok(path)
    }

    /// A* over face centroids. Returns the intermediate faces strictly
    /// between the start and goal faces, in travel order.
    fn find_corridor(
        &self,
        from: Point,
        to: Point,
        max_expansions: usize,
    ) -> Result<Vec<usize>, PathFailure> {
        let start = self.find_face(from).ok_or(PathFailure::SourceOffMesh)?;
        let goal = self.find_face(to).ok_or(PathFailure::TargetOffMesh)?;
        if !self.face_walkable_unchecked(start) {
            return Err(PathFailure::SourceUnwalkable);
        }
        if !self.face_walkable_unchecked(goal) {
            return Err(PathFailure::TargetUnwalkable);
        }
        if start == goal {
            return Ok(Vec::new());
        }

        let n = self.face_count();
        let goal_centroid = self.centroid_unchecked(goal);
        let heuristic = |face: usize| self.centroid_unchecked(face).distance(goal_centroid);

        let mut g = vec![f64::INFINITY; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut closed = vec![false; n];
        let mut open = BinaryHeap::new();

        g[start] = 0.0;
        open.push(HeapNode {
            face: start,
            f: heuristic(start),
        });

        let mut expansions = 0usize;
        while let Some(HeapNode { face, .. }) = open.pop() {
            if closed[face] {
                continue;
            }
            if face == goal {
                let mut corridor = Vec::new();
                let mut cursor = parent[goal];
                while let Some(f) = cursor {
                    if f == start {
                        break;
                    }
                    corridor.push(f);
                    cursor = parent[f];
                }
                corridor.reverse();
                tracing::trace!(start, goal, expansions, "A* reached goal face");
                return Ok(corridor);
            }
            if expansions >= max_expansions {
                tracing::debug!(start, goal, expansions, "A* budget exceeded");
                return Err(PathFailure::BudgetExceeded { expansions });
            }
            expansions += 1;
            closed[face] = true;

            let here = self.centroid_unchecked(face);
            for &next in self.neighbours(face) {
                if closed[next] || !self.face_walkable_unchecked(next) {
                    continue;
                }
                let tentative = g[face] + here.distance(self.centroid_unchecked(next));
                if tentative < g[next] {
                    g[next] = tentative;
                    parent[next] = Some(face);
                    open.push(HeapNode {
                        face: next,
                        f: tentative + heuristic(next),
                    });
                }
            }
        }
        tracing::debug!(start, goal, expansions, "A* exhausted open set");
        Err(PathFailure::Exhausted)
    }

    /// Greedy forward-scan smoothing: from each kept point, jump to the
    /// furthest later point still in line of sight.
    fn smooth(&self, raw: &[Point]) -> Vec<Point> {
        if raw.len() <= 2 {
            return raw.to_vec();
        }
        let last = raw.len() - 1;
        let mut out = vec![raw[0]];
        let mut i = 0;
        while i < last {
            let mut j = i + 1;
            while j < last && self.segment_walkable(raw[i], raw[j + 1]) {
                j += 1;
            }
            out.push(raw[j]);
            i = j;
        }
        out
    }

    /// Whether the XY segment `a → b` stays on walkable faces.
    ///
    /// Walks the segment face by face from the face holding `a`, stepping
    /// into whichever face around the current one carries it furthest. Any
    /// stretch of the segment inside an unwalkable face blocks it, as does
    /// leaving the mesh; grazing an unwalkable face at a single point does
    /// not. The cost grows with the faces crossed, not with the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use trek_core::Point;
    /// use trek_nav::NavMesh;
    ///
    /// let mesh = NavMesh::from_grid(4, 4, 1.0, &[(1, 1)]).unwrap();
    /// // Clips the lower-right corner of the blocked cell.
    /// assert!(!mesh.segment_walkable(Point::planar(1.2, 0.25), Point::planar(3.5, 2.55)));
    /// assert!(mesh.segment_walkable(Point::planar(0.5, 0.5), Point::planar(3.5, 0.5)));
    /// ```
    pub fn segment_walkable(&self, a: Point, b: Point) -> bool {
        if !a.is_finite() || !b.is_finite() || !self.walkable(b) {
            return false;
        }
        let Some(mut face) = self.find_face(a) else {
            return false;
        };
        if !self.face_walkable_unchecked(face) {
            return false;
        }
        if a.planar_distance(b) == 0.0 {
            return true;
        }

        let mut reached = 0.0;
        for _ in 0..self.face_count() {
            let exit = self
                .clip_segment(face, a, b)
                .map_or(reached, |(_, hi)| hi.max(reached));
            let mut next: Option<(usize, f64)> = None;
            for other in self.faces_around(face) {
                let Some((lo, hi)) = self.clip_segment(other, a, b) else {
                    continue;
                };
                if !self.face_walkable_unchecked(other) {
                    if hi - lo > TOUCH_EPSILON {
                        return false;
                    }
                } else if lo <= exit + TOUCH_EPSILON
                    && hi > exit + TOUCH_EPSILON
                    && next.map_or(true, |(_, best)| hi > best)
                {
                    next = Some((other, hi));
                }
            }
            if exit >= 1.0 {
                return true;
            }
            match next {
                Some((to, _)) => {
                    face = to;
                    reached = exit;
                }
                None => return false,
            }
        }
        false
    }

    /// Parameter range `[lo, hi]` within `[0, 1]` of the XY segment
    /// `a → b` that lies on `face`, or `None` when they do not meet.
    fn clip_segment(&self, face: usize, a: Point, b: Point) -> Option<(f64, f64)> {
        let corners = self.faces()[face].map(|v| self.vertices()[v]);
        let orientation = signed_area2(corners[0], corners[1], corners[2]).signum();
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let length = dx.hypot(dy);

        let (mut lo, mut hi) = (0.0f64, 1.0f64);
        for k in 0..3 {
            let (p, q) = (corners[k], corners[(k + 1) % 3]);
            let (ex, ey) = (q.x - p.x, q.y - p.y);
            let edge = ex.hypot(ey);
            // inside(t) = offset + t * rate >= 0 on the face side of edge k.
            let offset = orientation * (ex * (a.y - p.y) - ey * (a.x - p.x))
                + CLIP_EPSILON * edge * (edge + length);
            let rate = orientation * (ex * dy - ey * dx);
            if rate == 0.0 {
                if offset < 0.0 {
                    return None;
                }
            } else if rate > 0.0 {
                lo = lo.max(-offset / rate);
            } else {
                hi = hi.min(-offset / rate);
            }
        }
        (lo <= hi).then_some((lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::MeshDescription;
    use proptest::prelude::*;
    use std::time::{Duration, Instant};

    fn open3() -> NavMesh {
        NavMesh::from_grid(3, 3, 1.0, &[]).unwrap()
    }

    /// Whether `p` lies strictly inside some unwalkable face.
    fn inside_obstacle(mesh: &NavMesh, p: Point) -> bool {
        mesh.faces().iter().enumerate().any(|(f, tri)| {
            let [a, b, c] = tri.map(|v| mesh.vertices()[v]);
            let side = signed_area2(a, b, c).signum();
            !mesh.is_face_walkable(f)
                && [(a, b), (b, c), (c, a)]
                    .iter()
                    .all(|&(u, v)| side * signed_area2(u, v, p) > 1e-9)
        })
    }

    /// Every leg passes the exact check and a dense sweep finds no point on
    /// or inside an obstacle.
    fn assert_legs_walkable(mesh: &NavMesh, path: &[Point]) {
        for leg in path.windows(2) {
            let (a, b) = (leg[0], leg[1]);
            assert!(mesh.segment_walkable(a, b), "leg {a} -> {b} is blocked");
            for k in 0..=200 {
                let p = a + (b - a) * (k as f64 / 200.0);
                assert!(mesh.find_face(p).is_some(), "{p} on leg {a} -> {b} is off the mesh");
                assert!(!inside_obstacle(mesh, p), "{p} on leg {a} -> {b} is blocked");
            }
        }
    }

    /// Two unit squares side by side with a third on top of the left one.
    fn l_shape() -> NavMesh {
        let vertices = vec![
            Point::planar(0.0, 0.0),
            Point::planar(1.0, 0.0),
            Point::planar(2.0, 0.0),
            Point::planar(0.0, 1.0),
            Point::planar(1.0, 1.0),
            Point::planar(2.0, 1.0),
            Point::planar(0.0, 2.0),
            Point::planar(1.0, 2.0),
        ];
        let faces = vec![
            [0, 1, 4],
            [0, 4, 3],
            [1, 2, 5],
            [1, 5, 4],
            [3, 4, 7],
            [3, 7, 6],
        ];
        NavMesh::from_description(&MeshDescription {
            vertices,
            faces,
            walkable: None,
        })
        .unwrap()
    }

    #[test]
    fn adjacent_cells_give_two_point_path() {
        let from = Point::planar(0.5, 0.5);
        let to = Point::planar(1.5, 0.5);
        let path = open3().find_path(from, to).unwrap();
        assert_eq!(path, vec![from, to]);
    }

    #[test]
    fn same_face_gives_two_point_path() {
        let from = Point::planar(0.8, 0.1);
        let to = Point::planar(0.9, 0.2);
        assert_eq!(open3().find_path(from, to).unwrap(), vec![from, to]);
    }

    #[test]
    fn unwalkable_target_is_path_not_found() {
        let mesh = NavMesh::from_grid(3, 3, 1.0, &[(2, 2)]).unwrap();
        let err = mesh
            .find_path(Point::planar(0.5, 0.5), Point::planar(2.5, 2.5))
            .unwrap_err();
        assert_eq!(err, NavError::PathNotFound(PathFailure::TargetUnwalkable));
    }

    #[test]
    fn unwalkable_source_is_path_not_found() {
        let mesh = NavMesh::from_grid(3, 3, 1.0, &[(0, 0)]).unwrap();
        let err = mesh
            .find_path(Point::planar(0.2, 0.8), Point::planar(2.5, 2.5))
            .unwrap_err();
        assert_eq!(err, NavError::PathNotFound(PathFailure::SourceUnwalkable));
    }

    #[test]
    fn off_mesh_endpoints_are_path_not_found() {
        let mesh = open3();
        assert_eq!(
            mesh.find_path(Point::planar(-1.0, 0.5), Point::planar(1.5, 0.5))
                .unwrap_err(),
            NavError::PathNotFound(PathFailure::SourceOffMesh)
        );
        assert_eq!(
            mesh.find_path(Point::planar(0.5, 0.5), Point::planar(1.5, 9.0))
                .unwrap_err(),
            NavError::PathNotFound(PathFailure::TargetOffMesh)
        );
    }

    #[test]
    fn wall_exhausts_search() {
        let wall = [(1, 0), (1, 1), (1, 2)];
        let mesh = NavMesh::from_grid(3, 3, 1.0, &wall).unwrap();
        let err = mesh
            .find_path(Point::planar(0.5, 0.5), Point::planar(2.5, 0.5))
            .unwrap_err();
        assert_eq!(err, NavError::PathNotFound(PathFailure::Exhausted));
    }

    #[test]
    fn tiny_budget_is_exceeded() {
        let mesh = NavMesh::from_grid(5, 5, 1.0, &[]).unwrap();
        let err = mesh
            .find_path_bounded(Point::planar(0.5, 0.5), Point::planar(4.5, 4.5), 2)
            .unwrap_err();
        assert_eq!(
            err,
            NavError::PathNotFound(PathFailure::BudgetExceeded { expansions: 2 })
        );
    }

    #[test]
    fn detour_around_obstacle_keeps_corner_points() {
        // Block the lower two cells of the middle column; the path must climb
        // to the top row and come back down.
        let mesh = NavMesh::from_grid(3, 3, 1.0, &[(1, 0), (1, 1)]).unwrap();
        let from = Point::planar(0.5, 0.5);
        let to = Point::planar(2.5, 0.5);
        let path = mesh.find_path(from, to).unwrap();
        assert!(path.len() > 2, "expected a detour, got {path:?}");
        assert_eq!(path.first(), Some(&from));
        assert_eq!(path.last(), Some(&to));
        for p in &path {
            assert!(mesh.walkable(*p), "{p} is not walkable");
        }
        assert!(path[1..path.len() - 1].iter().any(|p| p.y > 2.0));
        assert_legs_walkable(&mesh, &path);
    }

    #[test]
    fn segment_through_obstacle_is_blocked() {
        let mesh = NavMesh::from_grid(3, 1, 1.0, &[(1, 0)]).unwrap();
        assert!(!mesh.segment_walkable(Point::planar(0.5, 0.5), Point::planar(2.5, 0.5)));
        assert!(mesh.segment_walkable(Point::planar(0.1, 0.5), Point::planar(0.9, 0.5)));
    }

    #[test]
    fn shallow_corner_clip_is_blocked() {
        // Enters cell (1, 1) for a stretch much shorter than any mesh edge.
        let mesh = NavMesh::from_grid(4, 4, 1.0, &[(1, 1)]).unwrap();
        let (a, b) = (Point::planar(1.2, 0.25), Point::planar(3.5, 2.55));
        assert!(mesh.walkable(a) && mesh.walkable(b));
        assert!(!mesh.walkable(Point::planar(1.9504, 1.0004)));
        assert!(!mesh.segment_walkable(a, b));
        // The same direction shifted just below the corner stays open.
        assert!(mesh.segment_walkable(Point::planar(1.2, 0.15), Point::planar(3.5, 2.45)));
    }

    #[test]
    fn grazing_an_obstacle_corner_is_allowed() {
        let mesh = NavMesh::from_grid(3, 3, 1.0, &[(1, 1)]).unwrap();
        assert!(mesh.segment_walkable(Point::planar(0.5, 1.5), Point::planar(1.5, 0.5)));
    }

    #[test]
    fn running_along_an_obstacle_edge_is_blocked() {
        let mesh = NavMesh::from_grid(3, 3, 1.0, &[(1, 1)]).unwrap();
        assert!(!mesh.segment_walkable(Point::planar(0.5, 1.0), Point::planar(2.5, 1.0)));
    }

    #[test]
    fn segment_across_a_notch_leaves_the_mesh() {
        let mesh = l_shape();
        let (a, b) = (Point::planar(1.8, 0.5), Point::planar(0.5, 1.8));
        assert!(mesh.walkable(a) && mesh.walkable(b));
        assert!(!mesh.walkable(Point::planar(1.15, 1.15)));
        assert!(!mesh.segment_walkable(a, b));
        assert!(mesh.segment_walkable(Point::planar(1.8, 0.5), Point::planar(0.5, 1.2)));
    }

    #[test]
    fn degenerate_segments() {
        let mesh = NavMesh::from_grid(3, 3, 1.0, &[(1, 1)]).unwrap();
        let p = Point::planar(0.5, 0.5);
        assert!(mesh.segment_walkable(p, p));
        assert!(!mesh.segment_walkable(Point::planar(1.5, 1.5), Point::planar(1.5, 1.5)));
        assert!(!mesh.segment_walkable(p, Point::planar(f64::NAN, 0.5)));
        assert!(!mesh.segment_walkable(p, Point::planar(5.0, 0.5)));
    }

    #[test]
    fn sliver_face_does_not_slow_search() {
        // Three 100-unit squares in a row plus a detached triangle whose
        // edges are a millionth of a unit long.
        let mut vertices: Vec<Point> = (0..4)
            .map(|i| Point::planar(i as f64 * 100.0, 0.0))
            .collect();
        vertices.extend((0..4).map(|i| Point::planar(i as f64 * 100.0, 100.0)));
        vertices.extend([
            Point::planar(400.0, 400.0),
            Point::planar(400.000001, 400.0),
            Point::planar(400.0, 400.000001),
        ]);
        let mut faces: Vec<[usize; 3]> = (0..3)
            .flat_map(|i| [[i, i + 1, i + 5], [i, i + 5, i + 4]])
            .collect();
        faces.push([8, 9, 10]);
        let mesh = NavMesh::from_description(&MeshDescription {
            vertices,
            faces,
            walkable: None,
        })
        .unwrap();

        let (from, to) = (Point::planar(10.0, 50.0), Point::planar(290.0, 50.0));
        let started = Instant::now();
        assert_eq!(mesh.find_path(from, to).unwrap(), vec![from, to]);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn heap_pops_lowest_f_then_lowest_face() {
        let mut heap = BinaryHeap::new();
        heap.push(HeapNode { face: 3, f: 1.0 });
        heap.push(HeapNode { face: 1, f: 2.0 });
        heap.push(HeapNode { face: 2, f: 1.0 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|n| n.face)).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    proptest! {
        #[test]
        fn open_grid_paths_are_straight(
            w in 1u32..8,
            h in 1u32..8,
            fx in 0.0f64..1.0, fy in 0.0f64..1.0,
            tx in 0.0f64..1.0, ty in 0.0f64..1.0,
        ) {
            let mesh = NavMesh::from_grid(w, h, 1.0, &[]).unwrap();
            let from = Point::planar(fx * w as f64, fy * h as f64);
            let to = Point::planar(tx * w as f64, ty * h as f64);
            let path = mesh.find_path(from, to).unwrap();
            prop_assert_eq!(path, vec![from, to]);
        }

        #[test]
        fn maze_path_legs_avoid_obstacles(
            blocked in prop::collection::vec(prop::bool::weighted(0.25), 64),
            from in (0u32..8, 0u32..8),
            to in (0u32..8, 0u32..8),
        ) {
            let obstacles: Vec<(u32, u32)> = blocked
                .iter()
                .enumerate()
                .filter(|(_, b)| **b)
                .map(|(i, _)| ((i % 8) as u32, (i / 8) as u32))
                .collect();
            let mesh = NavMesh::from_grid_centered(8, 8, 1.0, &obstacles).unwrap();
            let from = Point::planar(from.0 as f64, from.1 as f64);
            let to = Point::planar(to.0 as f64, to.1 as f64);
            if let Ok(path) = mesh.find_path(from, to) {
                prop_assert_eq!(path.first(), Some(&from));
                prop_assert_eq!(path.last(), Some(&to));
                assert_legs_walkable(&mesh, &path);
            }
        }
    }
}
