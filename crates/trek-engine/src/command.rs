//! Atomic locomotion commands: preconditions, effects, durations.
//!
//! Every command is a variant of the closed [`Action`] enum. [`Action::apply`]
//! checks preconditions against a state and, if they hold, returns a
//! [`Transition`] carrying the successor state and the time the command
//! takes. The input state is never modified.
//!
//! | Action | Duration |
//! |---|---|
//! | `MoveTo` | distance / speed |
//! | `RotateTo` | configured rotation duration |
//! | `MoveAndRotate` | max of the two |
//! | `MarkWaypointReached` | 0 |

use std::fmt;

use serde::{Deserialize, Serialize};
use trek_core::{
    CommandError, ConstraintViolation, EntityId, IndexKind, PathNotFound, ValidationError,
    WaypointId,
};

use crate::state::{EntityState, LocomotionState};

/// A primitive locomotion command.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Translate to a position index.
    MoveTo {
        /// Entity to move.
        entity: EntityId,
        /// Target position index.
        target: usize,
    },
    /// Turn to a rotation index.
    RotateTo {
        /// Entity to turn.
        entity: EntityId,
        /// Target rotation index.
        target: usize,
    },
    /// Translate and turn at once.
    MoveAndRotate {
        /// Entity to move.
        entity: EntityId,
        /// Target position index.
        position: usize,
        /// Target rotation index.
        rotation: usize,
    },
    /// Record that the entity has reached a waypoint.
    MarkWaypointReached {
        /// The entity.
        entity: EntityId,
        /// The waypoint.
        waypoint: WaypointId,
    },
}

/// Result of a successful command.
#[derive(Clone, Debug)]
pub struct Transition {
    /// The successor state.
    pub state: LocomotionState,
    /// Seconds the command takes.
    pub duration: f64,
}

impl Transition {
    /// Duration in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration * 1000.0
    }
}

impl Action {
    /// The entity this action concerns.
    pub fn entity(&self) -> &EntityId {
        match self {
            Self::MoveTo { entity, .. }
            | Self::RotateTo { entity, .. }
            | Self::MoveAndRotate { entity, .. }
            | Self::MarkWaypointReached { entity, .. } => entity,
        }
    }

    /// Snake-case action name, as used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MoveTo { .. } => "move_to",
            Self::RotateTo { .. } => "rotate_to",
            Self::MoveAndRotate { .. } => "move_and_rotate",
            Self::MarkWaypointReached { .. } => "mark_waypoint_reached",
        }
    }

    /// Check preconditions without applying anything.
    pub fn check(&self, state: &LocomotionState) -> Result<(), CommandError> {
        match self {
            Self::MoveTo { entity, target } => check_move(state, entity, *target),
            Self::RotateTo { entity, target } => check_rotate(state, entity, *target),
            Self::MoveAndRotate {
                entity,
                position,
                rotation,
            } => {
                check_move(state, entity, *position)?;
                check_rotate(state, entity, *rotation)
            }
            Self::MarkWaypointReached { entity, waypoint } => {
                known_entity(state, entity)?;
                if state.waypoint(waypoint).is_none() {
                    return Err(ValidationError::UnknownWaypoint {
                        waypoint: waypoint.clone(),
                    }
                    .into());
                }
                Ok(())
            }
        }
    }

    /// Check preconditions and, if they hold, return the successor state.
    pub fn apply(&self, state: &LocomotionState) -> Result<Transition, CommandError> {
        if let Err(e) = self.check(state) {
            tracing::debug!(action = %self, error = %e, "command rejected");
            return Err(e);
        }
        let mut next = state.clone();
        let duration = self.apply_effect(&mut next)?;
        Ok(Transition {
            state: next,
            duration,
        })
    }

    /// Apply the effect in place without checking preconditions.
    ///
    /// Returns the duration in seconds and records it as the state's last
    /// duration. Fails only when the entity or waypoint is missing from
    /// `state`, which is a [`CommandError::StateInconsistency`].
    pub fn apply_effect(&self, state: &mut LocomotionState) -> Result<f64, CommandError> {
        let duration = match self {
            Self::MoveTo { entity, target } => {
                let duration = move_duration(state, entity, *target)?;
                state.set_position(entity, *target)?;
                duration
            }
            Self::RotateTo { entity, target } => {
                state.set_rotation(entity, *target)?;
                state.rotation_duration()
            }
            Self::MoveAndRotate {
                entity,
                position,
                rotation,
            } => {
                let duration = move_duration(state, entity, *position)?;
                state.set_position(entity, *position)?;
                state.set_rotation(entity, *rotation)?;
                duration.max(state.rotation_duration())
            }
            Self::MarkWaypointReached { entity, waypoint } => {
                state.set_reached(entity, waypoint)?;
                0.0
            }
        };
        state.set_last_duration(duration);
        Ok(duration)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo { entity, target } | Self::RotateTo { entity, target } => {
                write!(f, "{}({entity}, {target})", self.name())
            }
            Self::MoveAndRotate {
                entity,
                position,
                rotation,
            } => write!(f, "{}({entity}, {position}, {rotation})", self.name()),
            Self::MarkWaypointReached { entity, waypoint } => {
                write!(f, "{}({entity}, {waypoint})", self.name())
            }
        }
    }
}

// ── Free-function commands ─────────────────────────────────────────

/// Move `entity` to position index `target`.
///
/// Requires a known entity whose movement type can translate, positive
/// speed, and an in-range target. In maze mode the target may not be higher
/// than the current position; with a navmesh both endpoints must be
/// walkable and connected.
pub fn move_to(
    state: &LocomotionState,
    entity: &EntityId,
    target: usize,
) -> Result<Transition, CommandError> {
    Action::MoveTo {
        entity: entity.clone(),
        target,
    }
    .apply(state)
}

/// Turn `entity` to rotation index `target`.
pub fn rotate_to(
    state: &LocomotionState,
    entity: &EntityId,
    target: usize,
) -> Result<Transition, CommandError> {
    Action::RotateTo {
        entity: entity.clone(),
        target,
    }
    .apply(state)
}

/// Move and turn `entity` at once.
pub fn move_and_rotate(
    state: &LocomotionState,
    entity: &EntityId,
    position: usize,
    rotation: usize,
) -> Result<Transition, CommandError> {
    Action::MoveAndRotate {
        entity: entity.clone(),
        position,
        rotation,
    }
    .apply(state)
}

/// Mark `waypoint` as reached by `entity`.
pub fn mark_waypoint_reached(
    state: &LocomotionState,
    entity: &EntityId,
    waypoint: &WaypointId,
) -> Result<Transition, CommandError> {
    Action::MarkWaypointReached {
        entity: entity.clone(),
        waypoint: waypoint.clone(),
    }
    .apply(state)
}

// ── Preconditions ──────────────────────────────────────────────────

fn known_entity<'a>(
    state: &'a LocomotionState,
    entity: &EntityId,
) -> Result<&'a EntityState, ValidationError> {
    state
        .entity(entity)
        .ok_or_else(|| ValidationError::UnknownEntity {
            entity: entity.clone(),
        })
}

fn check_move(
    state: &LocomotionState,
    entity: &EntityId,
    target: usize,
) -> Result<(), CommandError> {
    let current = *known_entity(state, entity)?;
    if !current.movement_type.can_translate() {
        return Err(ValidationError::DisallowedMovementType {
            entity: entity.clone(),
            movement_type: current.movement_type,
        }
        .into());
    }
    if !(current.speed > 0.0) {
        return Err(ValidationError::NonPositiveSpeed {
            entity: entity.clone(),
            speed: current.speed,
        }
        .into());
    }
    let space = state.position_space();
    let (Some(from), Some(to)) = (space.point(current.position_index), space.point(target))
    else {
        if target >= space.len() {
            return Err(ValidationError::IndexOutOfRange {
                kind: IndexKind::Position,
                index: target,
                len: space.len(),
            }
            .into());
        }
        return Err(CommandError::StateInconsistency {
            reason: format!(
                "entity '{entity}' holds position {} outside a space of {} points",
                current.position_index,
                space.len()
            ),
        });
    };

    if state.is_maze_mode() && to.z > from.z {
        return Err(ConstraintViolation::UpwardMovement {
            entity: entity.clone(),
            from_z: from.z,
            to_z: to.z,
        }
        .into());
    }

    if let Some(mesh) = state.navmesh() {
        if !mesh.walkable(from) {
            return Err(ConstraintViolation::SourceUnwalkable {
                entity: entity.clone(),
                index: current.position_index,
            }
            .into());
        }
        if !mesh.walkable(to) {
            return Err(ConstraintViolation::TargetUnwalkable {
                entity: entity.clone(),
                index: target,
            }
            .into());
        }
        if let Err(e) = mesh.find_path(from, to) {
            return Err(PathNotFound {
                entity: entity.clone(),
                from: current.position_index,
                to: target,
                reason: e.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn check_rotate(
    state: &LocomotionState,
    entity: &EntityId,
    target: usize,
) -> Result<(), CommandError> {
    known_entity(state, entity)?;
    let len = state.rotation_space().len();
    if target >= len {
        return Err(ValidationError::IndexOutOfRange {
            kind: IndexKind::Rotation,
            index: target,
            len,
        }
        .into());
    }
    Ok(())
}

/// Straight-line travel time to `target`; zero for an entity that cannot move.
fn move_duration(
    state: &LocomotionState,
    entity: &EntityId,
    target: usize,
) -> Result<f64, CommandError> {
    let current = state
        .entity(entity)
        .ok_or_else(|| CommandError::StateInconsistency {
            reason: format!("entity '{entity}' vanished from state"),
        })?;
    let distance = state
        .distance(current.position_index, target)
        .map_err(|e| CommandError::StateInconsistency {
            reason: format!("move of '{entity}' to {target}: {e}"),
        })?;
    Ok(if current.speed > 0.0 {
        distance / current.speed
    } else {
        0.0
    })
}
