//! Error taxonomy for locomotion commands.
//!
//! Four classes, from most to least recoverable:
//!
//! - [`ValidationError`]: the request itself is malformed (unknown ids,
//!   indices out of range, a mode that cannot move, zero speed).
//! - [`ConstraintViolation`]: the request is well-formed but the world
//!   forbids it (upward movement in a maze, unwalkable endpoints).
//! - [`PathNotFound`]: the navmesh has no route between the endpoints.
//! - [`CommandError::StateInconsistency`]: an internal invariant broke.
//!   This is the only fatal class; planners should abort the solve rather
//!   than backtrack.

use crate::id::{EntityId, WaypointId};
use crate::movement::MovementType;
use std::error::Error;
use std::fmt;

/// Which indexed space an index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexKind {
    /// The position space.
    Position,
    /// The rotation space.
    Rotation,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position => f.write_str("position"),
            Self::Rotation => f.write_str("rotation"),
        }
    }
}

/// A request or input failed validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    /// The entity is not part of the state.
    UnknownEntity {
        /// The unknown id.
        entity: EntityId,
    },
    /// The waypoint is not part of the state.
    UnknownWaypoint {
        /// The unknown id.
        waypoint: WaypointId,
    },
    /// An index does not address a point in its space.
    IndexOutOfRange {
        /// Position or rotation space.
        kind: IndexKind,
        /// The offending index.
        index: usize,
        /// Number of points in the space.
        len: usize,
    },
    /// The entity's movement type does not allow translation.
    DisallowedMovementType {
        /// The entity asked to move.
        entity: EntityId,
        /// Its current movement type.
        movement_type: MovementType,
    },
    /// A move was requested for an entity whose speed is zero.
    NonPositiveSpeed {
        /// The entity asked to move.
        entity: EntityId,
        /// Its speed.
        speed: f64,
    },
    /// An entity was declared with a negative or non-finite speed.
    InvalidSpeed {
        /// The entity.
        entity: EntityId,
        /// The rejected speed.
        speed: f64,
    },
    /// A maze-mode waypoint resolved to a point off the `z = 0` plane.
    MalformedWaypoint {
        /// The waypoint.
        waypoint: WaypointId,
        /// The z component of its position point.
        z: f64,
    },
    /// Two entities share an id.
    DuplicateEntity {
        /// The repeated id.
        entity: EntityId,
    },
    /// Two waypoints share an id.
    DuplicateWaypoint {
        /// The repeated id.
        waypoint: WaypointId,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEntity { entity } => write!(f, "unknown entity '{entity}'"),
            Self::UnknownWaypoint { waypoint } => write!(f, "unknown waypoint '{waypoint}'"),
            Self::IndexOutOfRange { kind, index, len } => {
                write!(f, "{kind} index {index} out of range for space of {len} points")
            }
            Self::DisallowedMovementType {
                entity,
                movement_type,
            } => write!(f, "entity '{entity}' cannot translate while {movement_type}"),
            Self::NonPositiveSpeed { entity, speed } => {
                write!(f, "entity '{entity}' has non-positive speed {speed}")
            }
            Self::InvalidSpeed { entity, speed } => {
                write!(f, "entity '{entity}' declared with invalid speed {speed}")
            }
            Self::MalformedWaypoint { waypoint, z } => {
                write!(f, "waypoint '{waypoint}' lies off the maze plane (z = {z})")
            }
            Self::DuplicateEntity { entity } => write!(f, "duplicate entity id '{entity}'"),
            Self::DuplicateWaypoint { waypoint } => {
                write!(f, "duplicate waypoint id '{waypoint}'")
            }
        }
    }
}

impl Error for ValidationError {}

/// A well-formed request that the world forbids.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstraintViolation {
    /// A maze-mode move would raise the entity's z.
    UpwardMovement {
        /// The entity asked to move.
        entity: EntityId,
        /// Current z.
        from_z: f64,
        /// Target z.
        to_z: f64,
    },
    /// The entity's current position is not on a walkable face.
    SourceUnwalkable {
        /// The entity asked to move.
        entity: EntityId,
        /// Its current position index.
        index: usize,
    },
    /// The requested position is not on a walkable face.
    TargetUnwalkable {
        /// The entity asked to move.
        entity: EntityId,
        /// The requested position index.
        index: usize,
    },
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpwardMovement {
                entity,
                from_z,
                to_z,
            } => write!(f, "entity '{entity}' cannot move upward from z={from_z} to z={to_z}"),
            Self::SourceUnwalkable { entity, index } => {
                write!(f, "entity '{entity}' stands on unwalkable position {index}")
            }
            Self::TargetUnwalkable { entity, index } => {
                write!(f, "position {index} is unwalkable for entity '{entity}'")
            }
        }
    }
}

impl Error for ConstraintViolation {}

/// The navmesh offers no route between two positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathNotFound {
    /// The entity asked to move.
    pub entity: EntityId,
    /// Source position index.
    pub from: usize,
    /// Target position index.
    pub to: usize,
    /// Why the search failed.
    pub reason: String,
}

impl fmt::Display for PathNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no path for entity '{}' from position {} to {}: {}",
            self.entity, self.from, self.to, self.reason
        )
    }
}

impl Error for PathNotFound {}

/// Error returned by a rejected command.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandError {
    /// Input validation failed.
    Validation(ValidationError),
    /// A world constraint was violated.
    Constraint(ConstraintViolation),
    /// The navmesh search failed.
    PathNotFound(PathNotFound),
    /// An internal invariant is broken. Not recoverable by backtracking.
    StateInconsistency {
        /// Description of the broken invariant.
        reason: String,
    },
}

impl CommandError {
    /// `true` for the classes a planner must not recover from.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StateInconsistency { .. })
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "validation: {e}"),
            Self::Constraint(e) => write!(f, "constraint violation: {e}"),
            Self::PathNotFound(e) => write!(f, "path not found: {e}"),
            Self::StateInconsistency { reason } => write!(f, "state inconsistency: {reason}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Constraint(e) => Some(e),
            Self::PathNotFound(e) => Some(e),
            Self::StateInconsistency { .. } => None,
        }
    }
}

impl From<ValidationError> for CommandError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<ConstraintViolation> for CommandError {
    fn from(e: ConstraintViolation) -> Self {
        Self::Constraint(e)
    }
}

impl From<PathNotFound> for CommandError {
    fn from(e: PathNotFound) -> Self {
        Self::PathNotFound(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_state_inconsistency_is_fatal() {
        let unknown: CommandError = ValidationError::UnknownEntity {
            entity: "e".into(),
        }
        .into();
        assert!(!unknown.is_fatal());
        let broken = CommandError::StateInconsistency {
            reason: "space shrank".into(),
        };
        assert!(broken.is_fatal());
    }

    #[test]
    fn display_includes_context() {
        let e: CommandError = ValidationError::IndexOutOfRange {
            kind: IndexKind::Position,
            index: 30,
            len: 25,
        }
        .into();
        assert_eq!(
            e.to_string(),
            "validation: position index 30 out of range for space of 25 points"
        );
        assert!(e.source().is_some());
    }
}
