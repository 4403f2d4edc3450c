//! Compound locomotion tasks and their decomposition methods.
//!
//! A planner expands a [`Task`] by calling [`Task::decompose`], which returns
//! an ordered list of [`Step`]s: more tasks to expand or primitive
//! [`Action`]s to apply. Decomposition reads the state but never fails;
//! requests naming unknown entities or waypoints degrade to a primitive
//! action that the command layer will reject with a precise error.
//!
//! Sequences (`NavigatePath`, `FollowPath`) are emitted flat, one step per
//! element, so expansion depth stays constant regardless of length.

use serde::{Deserialize, Serialize};
use trek_core::{EntityId, WaypointId};
use trek_space::find_nearest_index;

use crate::command::Action;
use crate::state::LocomotionState;

/// A compound locomotion goal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum Task {
    /// Reach a waypoint, face its rotation, and mark it reached.
    NavigateTo {
        /// The entity.
        entity: EntityId,
        /// The waypoint.
        waypoint: WaypointId,
    },
    /// Visit waypoints in order.
    NavigatePath {
        /// The entity.
        entity: EntityId,
        /// Waypoints in visiting order.
        waypoints: Vec<WaypointId>,
    },
    /// Visit waypoints in order, then return to where the patrol began.
    Patrol {
        /// The entity.
        entity: EntityId,
        /// Waypoints in visiting order.
        waypoints: Vec<WaypointId>,
    },
    /// Move back to a remembered position.
    ReturnToStart {
        /// The entity.
        entity: EntityId,
        /// Position index captured when the patrol was expanded.
        start: usize,
    },
    /// Reach a position, routing through the navmesh when there is one.
    GlobalPathfind {
        /// The entity.
        entity: EntityId,
        /// Target position index.
        target: usize,
    },
    /// Move through intermediate positions, then to the target.
    FollowPath {
        /// The entity.
        entity: EntityId,
        /// Intermediate position indices, in order.
        path: Vec<usize>,
        /// Final position index.
        target: usize,
    },
}

/// One element of a decomposition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    /// A compound task to expand further.
    Task(Task),
    /// A primitive to apply.
    Action(Action),
}

impl From<Task> for Step {
    fn from(t: Task) -> Self {
        Self::Task(t)
    }
}

impl From<Action> for Step {
    fn from(a: Action) -> Self {
        Self::Action(a)
    }
}

impl Task {
    /// The entity this task concerns.
    pub fn entity(&self) -> &EntityId {
        match self {
            Self::NavigateTo { entity, .. }
            | Self::NavigatePath { entity, .. }
            | Self::Patrol { entity, .. }
            | Self::ReturnToStart { entity, .. }
            | Self::GlobalPathfind { entity, .. }
            | Self::FollowPath { entity, .. } => entity,
        }
    }

    /// Expand this task against `state`.
    pub fn decompose(&self, state: &LocomotionState) -> Vec<Step> {
        let steps = match self {
            Self::NavigateTo { entity, waypoint } => navigate_to(state, entity, waypoint),
            Self::NavigatePath { entity, waypoints } => waypoints
                .iter()
                .map(|w| {
                    Step::Task(Self::NavigateTo {
                        entity: entity.clone(),
                        waypoint: w.clone(),
                    })
                })
                .collect(),
            Self::Patrol { entity, waypoints } => {
                let start = state.quantized_position(entity);
                waypoints
                    .iter()
                    .map(|w| {
                        Step::Task(Self::NavigateTo {
                            entity: entity.clone(),
                            waypoint: w.clone(),
                        })
                    })
                    .chain(std::iter::once(Step::Task(Self::ReturnToStart {
                        entity: entity.clone(),
                        start,
                    })))
                    .collect()
            }
            Self::ReturnToStart { entity, start } => {
                if state.entity(entity).is_some() && state.quantized_position(entity) == *start {
                    Vec::new()
                } else {
                    vec![move_to(entity, *start)]
                }
            }
            Self::GlobalPathfind { entity, target } => global_pathfind(state, entity, *target),
            Self::FollowPath {
                entity,
                path,
                target,
            } => path
                .iter()
                .chain(std::iter::once(target))
                .map(|&i| move_to(entity, i))
                .collect(),
        };
        tracing::trace!(task = ?self, steps = steps.len(), "task decomposed");
        steps
    }
}

fn move_to(entity: &EntityId, target: usize) -> Step {
    Step::Action(Action::MoveTo {
        entity: entity.clone(),
        target,
    })
}

fn navigate_to(state: &LocomotionState, entity: &EntityId, waypoint: &WaypointId) -> Vec<Step> {
    let mark = Step::Action(Action::MarkWaypointReached {
        entity: entity.clone(),
        waypoint: waypoint.clone(),
    });
    let (Some(_), Some(wp)) = (state.entity(entity), state.waypoint(waypoint)) else {
        return vec![mark];
    };
    if state.waypoint_reached(entity, waypoint) {
        return Vec::new();
    }
    let rotate = Step::Action(Action::RotateTo {
        entity: entity.clone(),
        target: wp.rotation_index,
    });
    if state.quantized_position(entity) == wp.position_index {
        if state.quantized_rotation(entity) == wp.rotation_index {
            vec![mark]
        } else {
            vec![rotate, mark]
        }
    } else {
        vec![
            Step::Task(Task::GlobalPathfind {
                entity: entity.clone(),
                target: wp.position_index,
            }),
            rotate,
            mark,
        ]
    }
}

fn global_pathfind(state: &LocomotionState, entity: &EntityId, target: usize) -> Vec<Step> {
    let Some(current) = state.entity(entity).map(|e| e.position_index) else {
        return vec![move_to(entity, target)];
    };
    if current == target {
        return Vec::new();
    }
    let Some(mesh) = state.navmesh() else {
        return vec![move_to(entity, target)];
    };
    let space = state.position_space();
    let (Some(from), Some(to)) = (space.point(current), space.point(target)) else {
        return vec![move_to(entity, target)];
    };
    let points = match mesh.find_path(from, to) {
        Ok(points) if points.len() > 2 => points,
        _ => return vec![move_to(entity, target)],
    };

    let mut path: Vec<usize> = Vec::with_capacity(points.len() - 2);
    for p in &points[1..points.len() - 1] {
        let index = find_nearest_index(space, *p);
        if path.last() != Some(&index) {
            path.push(index);
        }
    }
    // Corners may quantize onto either endpoint.
    while path.first() == Some(&current) {
        path.remove(0);
    }
    while path.last() == Some(&target) {
        path.pop();
    }
    if path.is_empty() {
        return vec![move_to(entity, target)];
    }
    vec![Step::Task(Task::FollowPath {
        entity: entity.clone(),
        path,
        target,
    })]
}
