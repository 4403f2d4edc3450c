//! Error types for space operations.

use std::fmt;

/// Errors arising from space construction or index queries.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// An index does not address a point of the space.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of points in the space.
        len: usize,
    },
    /// Grid spacing must be finite and strictly positive.
    InvalidSpacing {
        /// The rejected spacing.
        spacing: f64,
    },
    /// Attempted to construct a space with zero points.
    EmptySpace,
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for space of {len} points")
            }
            Self::InvalidSpacing { spacing } => {
                write!(f, "grid spacing must be finite and positive, got {spacing}")
            }
            Self::EmptySpace => write!(f, "space must have at least one point"),
        }
    }
}

impl std::error::Error for SpaceError {}
