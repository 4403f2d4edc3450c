//! Error types for navmesh construction and search.

use std::fmt;

/// Why a path search failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFailure {
    /// The start point lies outside every face.
    SourceOffMesh,
    /// The goal point lies outside every face.
    TargetOffMesh,
    /// The start point lies on an unwalkable face.
    SourceUnwalkable,
    /// The goal point lies on an unwalkable face.
    TargetUnwalkable,
    /// The open set emptied without reaching the goal face.
    Exhausted,
    /// The expansion budget (twice the face count) ran out.
    BudgetExceeded {
        /// Faces expanded before giving up.
        expansions: usize,
    },
}

impl fmt::Display for PathFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceOffMesh => write!(f, "source point is off the mesh"),
            Self::TargetOffMesh => write!(f, "target point is off the mesh"),
            Self::SourceUnwalkable => write!(f, "source face is unwalkable"),
            Self::TargetUnwalkable => write!(f, "target face is unwalkable"),
            Self::Exhausted => write!(f, "search exhausted without reaching target"),
            Self::BudgetExceeded { expansions } => {
                write!(f, "search budget exceeded after {expansions} expansions")
            }
        }
    }
}

/// Errors arising from mesh construction or path search.
#[derive(Debug, Clone, PartialEq)]
pub enum NavError {
    /// A grid mesh was requested with a zero dimension.
    EmptyGrid,
    /// Cell size must be finite and strictly positive.
    InvalidCellSize {
        /// The rejected cell size.
        cell_size: f64,
    },
    /// An obstacle names a cell outside the grid.
    ObstacleOutOfBounds {
        /// Obstacle column.
        x: u32,
        /// Obstacle row.
        y: u32,
        /// Grid width in cells.
        width: u32,
        /// Grid height in cells.
        height: u32,
    },
    /// An imported mesh has no faces.
    NoFaces,
    /// A face references a vertex that does not exist.
    InvalidFace {
        /// The face index.
        face: usize,
        /// The offending vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// A face has zero area in the XY plane or repeats a vertex.
    DegenerateFace {
        /// The face index.
        face: usize,
    },
    /// A vertex has a non-finite coordinate.
    NonFiniteVertex {
        /// The vertex index.
        vertex: usize,
    },
    /// The walkability mask does not have one entry per face.
    WalkableMaskLength {
        /// Number of faces.
        expected: usize,
        /// Number of mask entries.
        found: usize,
    },
    /// Path search failed.
    PathNotFound(PathFailure),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid mesh must have at least one cell"),
            Self::InvalidCellSize { cell_size } => {
                write!(f, "cell size must be finite and positive, got {cell_size}")
            }
            Self::ObstacleOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(f, "obstacle ({x}, {y}) outside {width}x{height} grid"),
            Self::NoFaces => write!(f, "mesh has no faces"),
            Self::InvalidFace {
                face,
                vertex,
                vertex_count,
            } => write!(
                f,
                "face {face} references vertex {vertex} but mesh has {vertex_count} vertices"
            ),
            Self::DegenerateFace { face } => write!(f, "face {face} is degenerate"),
            Self::NonFiniteVertex { vertex } => {
                write!(f, "vertex {vertex} has a non-finite coordinate")
            }
            Self::WalkableMaskLength { expected, found } => {
                write!(f, "walkable mask has {found} entries, expected {expected}")
            }
            Self::PathNotFound(reason) => write!(f, "path not found: {reason}"),
        }
    }
}

impl std::error::Error for NavError {}

impl From<PathFailure> for NavError {
    fn from(reason: PathFailure) -> Self {
        Self::PathNotFound(reason)
    }
}
