//! Replay of planned actions into per-step snapshots.

use trek_core::{IndexKind, Point};
use trek_engine::{LocomotionState, PlannedAction};

use crate::error::ReplayError;
use crate::types::{EntitySnapshot, TrajectoryStep, WaypointSnapshot};

/// Playback order for `actions`.
///
/// Sorted by start time when every action carries a finite one, otherwise
/// left in the order given. The sort is stable, so actions starting at the
/// same instant keep their relative order.
pub fn order_actions(actions: &[PlannedAction]) -> Vec<&PlannedAction> {
    let mut ordered: Vec<&PlannedAction> = actions.iter().collect();
    let all_timed = actions
        .iter()
        .all(|a| a.start_ms.is_some_and(f64::is_finite));
    if all_timed {
        ordered.sort_by(|a, b| {
            let (a, b) = (a.start_ms.unwrap_or(0.0), b.start_ms.unwrap_or(0.0));
            a.total_cmp(&b)
        });
    }
    ordered
}

/// Replay `actions` from `initial`, capturing the world after each one.
///
/// Step `i` is the state after the `i`-th action in playback order, stamped
/// with the running sum of durations up to and including it. Effects are
/// applied without precondition checks; the only failures are actions or
/// indices that do not exist in `initial`.
///
/// # Examples
///
/// ```
/// use trek_core::Point;
/// use trek_engine::{Action, EntitySpec, LocomotionState, PlannedAction, SolveConfig};
/// use trek_replay::reconstruct;
///
/// let robot = EntitySpec::new("robot", Point::ORIGIN);
/// let state = LocomotionState::initialize(&[robot], &[], &SolveConfig::maze(3, 3)).unwrap();
/// let step = PlannedAction::new(Action::MoveTo { entity: "robot".into(), target: 2 }, 2000.0);
///
/// let steps = reconstruct(&state, &[step]).unwrap();
/// assert_eq!(steps.len(), 1);
/// assert_eq!(steps[0].time, 2.0);
/// assert_eq!(steps[0].entities[0].position, [2.0, 0.0, 0.0]);
/// ```
pub fn reconstruct(
    initial: &LocomotionState,
    actions: &[PlannedAction],
) -> Result<Vec<TrajectoryStep>, ReplayError> {
    let ordered = order_actions(actions);
    let mut state = initial.clone();
    let mut elapsed = 0.0;
    let mut steps = Vec::with_capacity(ordered.len());

    for (step, planned) in ordered.into_iter().enumerate() {
        planned
            .action
            .apply_effect(&mut state)
            .map_err(|error| ReplayError::Apply {
                step,
                action: planned.action.to_string(),
                error,
            })?;
        elapsed += planned.duration_ms / 1000.0;
        steps.push(snapshot(&state, step, elapsed)?);
    }

    tracing::info!(
        steps = steps.len(),
        total_time = elapsed,
        entities = initial.entity_count(),
        "trajectory reconstructed"
    );
    Ok(steps)
}

/// Capture every entity and waypoint of `state` as step `step` at `time`.
pub fn snapshot(
    state: &LocomotionState,
    step: usize,
    time: f64,
) -> Result<TrajectoryStep, ReplayError> {
    let position = |index: usize| lookup(state, step, IndexKind::Position, index);
    let rotation = |index: usize| lookup(state, step, IndexKind::Rotation, index);

    let entities = state
        .entities()
        .map(|(id, e)| {
            Ok(EntitySnapshot {
                id: id.clone(),
                position: position(e.position_index)?.to_array(),
                position_index: e.position_index,
                rotation: rotation(e.rotation_index)?.to_array(),
                rotation_index: e.rotation_index,
                speed: e.speed,
                movement_type: e.movement_type,
            })
        })
        .collect::<Result<Vec<_>, ReplayError>>()?;

    let waypoints = state
        .waypoints()
        .map(|w| {
            Ok(WaypointSnapshot {
                id: w.id.clone(),
                position: position(w.position_index)?.to_array(),
                position_index: w.position_index,
                rotation: rotation(w.rotation_index)?.to_array(),
                rotation_index: w.rotation_index,
                reached_by: state.reached_by(&w.id).into_iter().cloned().collect(),
            })
        })
        .collect::<Result<Vec<_>, ReplayError>>()?;

    Ok(TrajectoryStep {
        step,
        time,
        entities,
        waypoints,
    })
}

fn lookup(
    state: &LocomotionState,
    step: usize,
    kind: IndexKind,
    index: usize,
) -> Result<Point, ReplayError> {
    let space = match kind {
        IndexKind::Position => state.position_space(),
        IndexKind::Rotation => state.rotation_space(),
    };
    space
        .point(index)
        .ok_or(ReplayError::MissingPoint { step, kind, index })
}
