//! Navigation meshes for Trek.
//!
//! A [`NavMesh`] is a set of triangular faces over the XY plane with a
//! per-face walkability flag and shared-edge adjacency. It answers three
//! questions for the locomotion layer:
//!
//! - [`NavMesh::walkable`]: is this point on a walkable face?
//! - [`NavMesh::find_path`]: bounded A* over walkable faces, followed by
//!   line-of-sight smoothing of the face-centroid corridor
//! - [`NavMesh::get_nearest_walkable`]: snap a point back onto the mesh
//!
//! Meshes are built from maze grids ([`NavMesh::from_grid`],
//! [`NavMesh::from_grid_centered`]) or imported from an external
//! [`MeshDescription`]. They are immutable once built; a changed maze means
//! a new mesh.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod description;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod search;

mod bucket;

pub use description::MeshDescription;
pub use error::{NavError, PathFailure};
pub use mesh::NavMesh;
