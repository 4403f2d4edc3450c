//! Error types for trajectory reconstruction.

use std::error::Error;
use std::fmt;

use trek_core::{CommandError, IndexKind};

/// Errors that stop a reconstruction.
///
/// Both variants mean the action list does not belong to the initial state
/// it was replayed against.
#[derive(Clone, Debug, PartialEq)]
pub enum ReplayError {
    /// Applying an action's effect failed.
    Apply {
        /// Zero-based position of the action after ordering.
        step: usize,
        /// The action, rendered for diagnostics.
        action: String,
        /// The underlying failure.
        error: CommandError,
    },
    /// A snapshot referenced an index its space does not contain.
    MissingPoint {
        /// The step being captured.
        step: usize,
        /// Which space the index belongs to.
        kind: IndexKind,
        /// The offending index.
        index: usize,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apply {
                step,
                action,
                error,
            } => write!(f, "step {step}: cannot replay {action}: {error}"),
            Self::MissingPoint { step, kind, index } => {
                write!(f, "step {step}: {kind} index {index} has no point")
            }
        }
    }
}

impl Error for ReplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Apply { error, .. } => Some(error),
            Self::MissingPoint { .. } => None,
        }
    }
}
