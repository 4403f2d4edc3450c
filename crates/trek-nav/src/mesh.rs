//! Navmesh construction, point location and walkability queries.

use crate::bucket::FaceBuckets;
use crate::description::MeshDescription;
use crate::error::NavError;
use crate::geometry::{centroid, contains_xy, signed_area2};
use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use trek_core::Point;

/// Face neighbour list. Triangles share at most three edges.
pub type FaceNeighbours = SmallVec<[usize; 3]>;

/// Faces touching one vertex, ascending.
type VertexFaces = SmallVec<[usize; 6]>;

/// A triangular navigation mesh over the XY plane.
///
/// Faces carry a walkability flag; adjacency links faces that share an
/// edge. The mesh is immutable after construction.
///
/// # Grid meshes
///
/// [`from_grid`](Self::from_grid) emits two triangles per cell, split along
/// the cell's lower-left to upper-right diagonal:
///
/// ```text
///  v01 ---- v11
///   |  B  /  |      face 2c     = A = (v00, v10, v11)
///   |   /  A |      face 2c + 1 = B = (v00, v11, v01)
///  v00 ---- v10     c = y * width + x
/// ```
///
/// Each interior face has three neighbours: its cell twin across the
/// diagonal and the faces across the two cell borders it touches.
#[derive(Clone, Debug)]
pub struct NavMesh {
    vertices: Vec<Point>,
    faces: Vec<[usize; 3]>,
    walkable: Vec<bool>,
    adjacency: Vec<FaceNeighbours>,
    centroids: Vec<Point>,
    vertex_faces: Vec<VertexFaces>,
    buckets: FaceBuckets,
}

impl NavMesh {
    /// Build a mesh over a `width × height` grid of square cells whose
    /// lower-left corner is the origin.
    ///
    /// Obstacles are `(column, row)` cells; both of their faces are
    /// unwalkable. Cell `(x, y)` spans `[x·s, (x+1)·s] × [y·s, (y+1)·s]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trek_core::Point;
    /// use trek_nav::NavMesh;
    ///
    /// let mesh = NavMesh::from_grid(3, 3, 1.0, &[(1, 1)]).unwrap();
    /// assert_eq!(mesh.face_count(), 18);
    /// assert!(mesh.walkable(Point::planar(0.5, 0.5)));
    /// assert!(!mesh.walkable(Point::planar(1.5, 1.5)));
    /// ```
    pub fn from_grid(
        width: u32,
        height: u32,
        cell_size: f64,
        obstacles: &[(u32, u32)],
    ) -> Result<Self, NavError> {
        Self::grid_with_origin(width, height, cell_size, obstacles, Point::ORIGIN)
    }

    /// Like [`from_grid`](Self::from_grid) but shifted by half a cell so
    /// that the lattice point `(x·s, y·s)` is the centre of cell `(x, y)`.
    ///
    /// This lines the mesh up with a `GridSpace` of the same dimensions:
    /// every grid position index owns exactly one cell, and an obstacle
    /// cell makes exactly that position unwalkable.
    pub fn from_grid_centered(
        width: u32,
        height: u32,
        cell_size: f64,
        obstacles: &[(u32, u32)],
    ) -> Result<Self, NavError> {
        let half = -cell_size / 2.0;
        Self::grid_with_origin(
            width,
            height,
            cell_size,
            obstacles,
            Point::planar(half, half),
        )
    }

    fn grid_with_origin(
        width: u32,
        height: u32,
        cell_size: f64,
        obstacles: &[(u32, u32)],
        origin: Point,
    ) -> Result<Self, NavError> {
        if width == 0 || height == 0 {
            return Err(NavError::EmptyGrid);
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(NavError::InvalidCellSize { cell_size });
        }
        let blocked: IndexSet<(u32, u32)> = obstacles.iter().copied().collect();
        if let Some(&(x, y)) = blocked.iter().find(|(x, y)| *x >= width || *y >= height) {
            return Err(NavError::ObstacleOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }

        let vw = width as usize + 1;
        let mut vertices = Vec::with_capacity(vw * (height as usize + 1));
        for vy in 0..=height {
            for vx in 0..=width {
                vertices.push(
                    origin + Point::planar(vx as f64 * cell_size, vy as f64 * cell_size),
                );
            }
        }

        let cells = (width as usize) * (height as usize);
        let mut faces = Vec::with_capacity(cells * 2);
        let mut walkable = Vec::with_capacity(cells * 2);
        for y in 0..height as usize {
            for x in 0..width as usize {
                let v00 = y * vw + x;
                let v10 = v00 + 1;
                let v01 = v00 + vw;
                let v11 = v01 + 1;
                let open = !blocked.contains(&(x as u32, y as u32));
                faces.push([v00, v10, v11]);
                faces.push([v00, v11, v01]);
                walkable.push(open);
                walkable.push(open);
            }
        }

        tracing::debug!(
            width,
            height,
            cell_size,
            obstacles = blocked.len(),
            faces = faces.len(),
            "built grid navmesh"
        );
        Ok(Self::assemble(vertices, faces, walkable))
    }

    /// Import an externally produced mesh.
    ///
    /// Validates vertex references, finite coordinates, non-degenerate faces
    /// and the mask length; adjacency is derived from shared edges exactly
    /// as for grid meshes.
    pub fn from_description(desc: &MeshDescription) -> Result<Self, NavError> {
        if desc.faces.is_empty() {
            return Err(NavError::NoFaces);
        }
        if let Some(vertex) = desc.vertices.iter().position(|p| !p.is_finite()) {
            return Err(NavError::NonFiniteVertex { vertex });
        }
        let vertex_count = desc.vertices.len();
        for (face, tri) in desc.faces.iter().enumerate() {
            if let Some(&vertex) = tri.iter().find(|&&v| v >= vertex_count) {
                return Err(NavError::InvalidFace {
                    face,
                    vertex,
                    vertex_count,
                });
            }
            let [a, b, c] = tri.map(|v| desc.vertices[v]);
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] || signed_area2(a, b, c) == 0.0
            {
                return Err(NavError::DegenerateFace { face });
            }
        }
        let walkable = match &desc.walkable {
            Some(mask) if mask.len() != desc.faces.len() => {
                return Err(NavError::WalkableMaskLength {
                    expected: desc.faces.len(),
                    found: mask.len(),
                });
            }
            Some(mask) => mask.clone(),
            None => vec![true; desc.faces.len()],
        };
        tracing::debug!(
            vertices = vertex_count,
            faces = desc.faces.len(),
            "imported navmesh"
        );
        Ok(Self::assemble(desc.vertices.clone(), desc.faces.clone(), walkable))
    }

    fn assemble(vertices: Vec<Point>, faces: Vec<[usize; 3]>, walkable: Vec<bool>) -> Self {
        let adjacency = derive_adjacency(&faces);
        let centroids = faces
            .iter()
            .map(|&[a, b, c]| centroid(vertices[a], vertices[b], vertices[c]))
            .collect();
        let mut vertex_faces = vec![VertexFaces::new(); vertices.len()];
        for (f, face) in faces.iter().enumerate() {
            for &v in face {
                vertex_faces[v].push(f);
            }
        }
        let buckets = FaceBuckets::build(&vertices, &faces);
        Self {
            vertices,
            faces,
            walkable,
            adjacency,
            centroids,
            vertex_faces,
            buckets,
        }
    }

    /// All vertices.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// All faces as vertex index triples.
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of walkable faces.
    pub fn walkable_face_count(&self) -> usize {
        self.walkable.iter().filter(|w| **w).count()
    }

    /// Walkability flag of a face; `false` for unknown faces.
    pub fn is_face_walkable(&self, face: usize) -> bool {
        self.walkable.get(face).copied().unwrap_or(false)
    }

    /// Faces sharing an edge with `face`, ascending. Includes unwalkable faces.
    pub fn neighbours(&self, face: usize) -> &[usize] {
        self.adjacency.get(face).map(|n| n.as_slice()).unwrap_or(&[])
    }

    /// Centroid of a face.
    pub fn centroid(&self, face: usize) -> Option<Point> {
        self.centroids.get(face).copied()
    }

    /// The lowest-index face whose XY projection contains `point`.
    pub fn find_face(&self, point: Point) -> Option<usize> {
        self.buckets.candidates(point).iter().copied().find(|&f| {
            let [a, b, c] = self.faces[f];
            contains_xy(self.vertices[a], self.vertices[b], self.vertices[c], point)
        })
    }

    /// Whether `point` lies on a walkable face. Off-mesh points are not walkable.
    pub fn walkable(&self, point: Point) -> bool {
        self.find_face(point)
            .map(|f| self.walkable[f])
            .unwrap_or(false)
    }

    /// `point` itself if walkable, otherwise the centroid of the nearest
    /// walkable face (3D Euclidean, first face wins ties).
    ///
    /// Returns `None` only when the mesh has no walkable faces.
    pub fn get_nearest_walkable(&self, point: Point) -> Option<Point> {
        if self.walkable(point) {
            return Some(point);
        }
        let mut best: Option<(f64, Point)> = None;
        for (f, c) in self.centroids.iter().enumerate() {
            if !self.walkable[f] {
                continue;
            }
            let d = c.distance(point);
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, *c));
            }
        }
        best.map(|(_, c)| c)
    }

    pub(crate) fn face_walkable_unchecked(&self, face: usize) -> bool {
        self.walkable[face]
    }

    pub(crate) fn centroid_unchecked(&self, face: usize) -> Point {
        self.centroids[face]
    }

    /// Faces other than `face` that share at least one vertex with it, ascending.
    pub(crate) fn faces_around(&self, face: usize) -> SmallVec<[usize; 16]> {
        let mut around: SmallVec<[usize; 16]> = self.faces[face]
            .iter()
            .flat_map(|&v| self.vertex_faces[v].iter().copied())
            .filter(|&f| f != face)
            .collect();
        around.sort_unstable();
        around.dedup();
        around
    }
}

/// Link every pair of faces that share an undirected edge.
fn derive_adjacency(faces: &[[usize; 3]]) -> Vec<FaceNeighbours> {
    let mut edges: IndexMap<(usize, usize), SmallVec<[usize; 2]>> = IndexMap::new();
    for (f, &[a, b, c]) in faces.iter().enumerate() {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            let key = if u < v { (u, v) } else { (v, u) };
            edges.entry(key).or_default().push(f);
        }
    }
    let mut adjacency = vec![FaceNeighbours::new(); faces.len()];
    for sharing in edges.values() {
        for (i, &f) in sharing.iter().enumerate() {
            for &g in &sharing[i + 1..] {
                if f != g {
                    adjacency[f].push(g);
                    adjacency[g].push(f);
                }
            }
        }
    }
    for list in &mut adjacency {
        list.sort_unstable();
        list.dedup();
    }
    adjacency
}
