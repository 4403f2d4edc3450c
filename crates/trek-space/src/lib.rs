//! Indexed point spaces for Trek.
//!
//! This crate defines the [`IndexedSpace`] trait, the discretization through
//! which every position and rotation in Trek is expressed, along with the
//! two concrete backends and the quantization helpers that map continuous
//! coordinates onto them.
//!
//! # Backends
//!
//! - [`SphereSpace`]: N golden-angle points on the unit sphere, used for
//!   orientations and for free 3D positions
//! - [`GridSpace`]: a planar `width × height` lattice with `z = 0`, used for
//!   maze navigation
//!
//! # Quantization
//!
//! [`find_nearest_index`] snaps a continuous point to the closest index of a
//! space (angular distance on spheres, planar distance on grids) and
//! [`normalize`] produces unit vectors with a fixed fallback axis.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod quantize;
pub mod space;
pub mod sphere;

mod table;

#[cfg(test)]
pub(crate) mod compliance;

pub use error::SpaceError;
pub use grid::{generate_grid, GridSpace};
pub use quantize::{find_nearest_index, normalize, GOLDEN_ANGLE};
pub use space::{IndexedSpace, SpaceKind};
pub use sphere::{generate_sphere, SphereSpace};
