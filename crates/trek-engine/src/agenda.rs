//! Sequential agenda driver.
//!
//! [`run_agenda`] expands steps strictly left to right: tasks are replaced
//! in place by their decomposition, actions are applied in order, and the
//! first rejected action ends the run. There is no search and no
//! backtracking; a planner that needs either drives [`Task::decompose`] and
//! [`Action::apply`] itself.
//!
//! The output is a flat list of [`PlannedAction`]s stamped with start times,
//! the same shape trajectory replay consumes.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use trek_core::{CommandError, EntityId, WaypointId};

use crate::command::Action;
use crate::state::LocomotionState;
use crate::task::{Step, Task};

/// An action together with its timing, as produced by a planner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedAction {
    /// The primitive that was applied.
    pub action: Action,
    /// How long it takes, in milliseconds.
    pub duration_ms: f64,
    /// When it starts, in milliseconds from the beginning of the plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_ms: Option<f64>,
}

impl PlannedAction {
    /// An action with no recorded start time.
    pub fn new(action: Action, duration_ms: f64) -> Self {
        Self {
            action,
            duration_ms,
            start_ms: None,
        }
    }

    /// Set the start time.
    pub fn starting_at(mut self, start_ms: f64) -> Self {
        self.start_ms = Some(start_ms);
        self
    }
}

/// A completed agenda run.
#[derive(Clone, Debug)]
pub struct Plan {
    /// Applied actions in order.
    pub actions: Vec<PlannedAction>,
    /// State after the last action.
    pub state: LocomotionState,
}

impl Plan {
    /// Total plan duration in seconds.
    pub fn total_seconds(&self) -> f64 {
        self.actions
            .last()
            .map_or(0.0, |a| (a.start_ms.unwrap_or(0.0) + a.duration_ms) / 1000.0)
    }
}

/// An agenda run that stopped at a rejected action.
#[derive(Clone, Debug)]
pub struct AgendaError {
    /// Why the action was rejected.
    pub error: CommandError,
    /// The rejected action.
    pub action: Action,
    /// Everything applied before it.
    pub completed: Vec<PlannedAction>,
    /// State after the last completed action.
    pub state: LocomotionState,
}

impl fmt::Display for AgendaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rejected after {} actions: {}",
            self.action,
            self.completed.len(),
            self.error
        )
    }
}

impl Error for AgendaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Expand and apply `steps` in order against `state`.
///
/// # Examples
///
/// ```
/// use trek_core::Point;
/// use trek_engine::{run_agenda, EntitySpec, LocomotionState, SolveConfig, Step, Task, Waypoint};
///
/// let robot = EntitySpec::new("robot", Point::ORIGIN);
/// let goal = Waypoint::new("goal", 24, 0);
/// let state = LocomotionState::initialize(&[robot], &[goal], &SolveConfig::maze(5, 5)).unwrap();
///
/// let task = Task::NavigateTo { entity: "robot".into(), waypoint: "goal".into() };
/// let plan = run_agenda(&state, vec![Step::Task(task)]).unwrap();
/// assert!(plan.state.waypoint_reached(&"robot".into(), &"goal".into()));
/// ```
pub fn run_agenda(state: &LocomotionState, steps: Vec<Step>) -> Result<Plan, AgendaError> {
    // Reversed so the next step is always at the end.
    let mut pending: Vec<Step> = steps.into_iter().rev().collect();
    let mut current = state.clone();
    let mut actions = Vec::new();
    let mut clock_ms = 0.0;

    while let Some(step) = pending.pop() {
        match step {
            Step::Task(task) => {
                pending.extend(task.decompose(&current).into_iter().rev());
            }
            Step::Action(action) => match action.apply(&current) {
                Ok(transition) => {
                    let duration_ms = transition.duration_ms();
                    actions.push(PlannedAction::new(action, duration_ms).starting_at(clock_ms));
                    clock_ms += duration_ms;
                    current = transition.state;
                }
                Err(error) => {
                    tracing::debug!(%action, %error, completed = actions.len(), "agenda stopped");
                    return Err(AgendaError {
                        error,
                        action,
                        completed: actions,
                        state: current,
                    });
                }
            },
        }
    }
    tracing::info!(
        actions = actions.len(),
        total_ms = clock_ms,
        "agenda completed"
    );
    Ok(Plan {
        actions,
        state: current,
    })
}

/// The steps for a single entity's tour: one `NavigateTo` per waypoint, in order.
pub fn tour_steps(entity: &EntityId, order: &[WaypointId]) -> Vec<Step> {
    vec![Step::Task(Task::NavigatePath {
        entity: entity.clone(),
        waypoints: order.to_vec(),
    })]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolveConfig;
    use crate::state::EntitySpec;
    use crate::waypoint::Waypoint;
    use trek_core::{Point, ValidationError};

    fn robot() -> EntityId {
        "robot".into()
    }

    fn maze_state(obstacles: Vec<(u32, u32)>, waypoints: &[Waypoint]) -> LocomotionState {
        let cfg = SolveConfig {
            obstacles,
            ..SolveConfig::maze(5, 5)
        };
        let spec = EntitySpec::new("robot", Point::ORIGIN).with_speed(2.0);
        LocomotionState::initialize(&[spec], waypoints, &cfg).unwrap()
    }

    #[test]
    fn navigate_open_maze() {
        let state = maze_state(vec![], &[Waypoint::new("far", 24, 1)]);
        let steps = tour_steps(&robot(), &["far".into()]);
        let plan = run_agenda(&state, steps).unwrap();

        let names: Vec<&str> = plan.actions.iter().map(|a| a.action.name()).collect();
        assert_eq!(names, ["move_to", "rotate_to", "mark_waypoint_reached"]);
        assert!((plan.actions[0].duration_ms - 2828.427).abs() < 1e-2);
        assert_eq!(plan.actions[1].start_ms, Some(plan.actions[0].duration_ms));
        assert!(plan.state.waypoint_reached(&robot(), &"far".into()));
        assert!((plan.total_seconds() - (2.828427 + 0.5)).abs() < 1e-5);
    }

    #[test]
    fn navigate_around_wall_visits_corners() {
        let wall: Vec<(u32, u32)> = (0..4).map(|y| (2, y)).collect();
        let state = maze_state(wall, &[Waypoint::new("beyond", 4, 0)]);
        let plan = run_agenda(&state, tour_steps(&robot(), &["beyond".into()])).unwrap();
        let moves = plan
            .actions
            .iter()
            .filter(|a| matches!(a.action, Action::MoveTo { .. }))
            .count();
        assert!(moves >= 2, "expected a multi-leg route, got {:?}", plan.actions);
        assert_eq!(plan.state.quantized_position(&robot()), 4);
    }

    #[test]
    fn start_times_are_cumulative() {
        let state = maze_state(
            vec![],
            &[Waypoint::new("a", 2, 0), Waypoint::new("b", 12, 0)],
        );
        let plan = run_agenda(&state, tour_steps(&robot(), &["a".into(), "b".into()])).unwrap();
        let mut clock = 0.0;
        for a in &plan.actions {
            assert_eq!(a.start_ms, Some(clock));
            clock += a.duration_ms;
        }
    }

    #[test]
    fn rejection_returns_partial_record() {
        let state = maze_state(vec![], &[Waypoint::new("a", 2, 0)]);
        let steps = vec![
            Step::Action(Action::MoveTo {
                entity: robot(),
                target: 1,
            }),
            Step::Action(Action::MoveTo {
                entity: robot(),
                target: 99,
            }),
            Step::Action(Action::MoveTo {
                entity: robot(),
                target: 2,
            }),
        ];
        let err = run_agenda(&state, steps).unwrap_err();
        assert_eq!(err.completed.len(), 1);
        assert_eq!(err.state.quantized_position(&robot()), 1);
        assert!(matches!(
            err.error,
            CommandError::Validation(ValidationError::IndexOutOfRange { index: 99, .. })
        ));
        assert!(err.to_string().starts_with("move_to(robot, 99)"));
    }

    #[test]
    fn planned_action_json_omits_missing_start() {
        let a = PlannedAction::new(
            Action::RotateTo {
                entity: robot(),
                target: 2,
            },
            500.0,
        );
        let json = serde_json::to_value(&a).unwrap();
        assert!(json.get("start_ms").is_none());
        assert_eq!(json["action"]["action"], "rotate_to");
    }
}
