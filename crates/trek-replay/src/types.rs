//! Snapshot and export document types.
//!
//! Field names are part of the export format; renaming one breaks every
//! consumer of saved trajectories.

use serde::{Deserialize, Serialize};
use trek_core::{EntityId, MovementType, WaypointId};

/// One entity at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Entity id.
    pub id: EntityId,
    /// Real-space position.
    pub position: [f64; 3],
    /// Index into the position space.
    pub position_index: usize,
    /// Facing direction.
    pub rotation: [f64; 3],
    /// Index into the rotation space.
    pub rotation_index: usize,
    /// Translation speed.
    pub speed: f64,
    /// Locomotion mode.
    pub movement_type: MovementType,
}

/// One waypoint at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaypointSnapshot {
    /// Waypoint id.
    pub id: WaypointId,
    /// Real-space position.
    pub position: [f64; 3],
    /// Index into the position space.
    pub position_index: usize,
    /// Required facing.
    pub rotation: [f64; 3],
    /// Index into the rotation space.
    pub rotation_index: usize,
    /// Entities that have reached it so far, in entity order.
    pub reached_by: Vec<EntityId>,
}

/// The world after one action completes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryStep {
    /// Zero-based step number.
    pub step: usize,
    /// Seconds from the start of the trajectory to the end of this step.
    pub time: f64,
    /// Every entity, in initialization order.
    pub entities: Vec<EntitySnapshot>,
    /// Every waypoint, in initialization order.
    pub waypoints: Vec<WaypointSnapshot>,
}

/// Summary of an exported trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Number of steps.
    pub total_steps: usize,
    /// Time of the last step in seconds, zero when there are none.
    pub total_time: f64,
}

/// The complete export document.
///
/// # Examples
///
/// ```
/// use trek_replay::TrajectoryExport;
///
/// let export = TrajectoryExport::new(Vec::new());
/// assert_eq!(export.metadata.total_steps, 0);
/// assert_eq!(export.metadata.total_time, 0.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryExport {
    /// Summary.
    pub metadata: ExportMetadata,
    /// Steps in playback order.
    pub steps: Vec<TrajectoryStep>,
}

impl TrajectoryExport {
    /// Wrap `steps`, deriving the metadata from them.
    pub fn new(steps: Vec<TrajectoryStep>) -> Self {
        let metadata = ExportMetadata {
            total_steps: steps.len(),
            total_time: steps.last().map_or(0.0, |s| s.time),
        };
        Self { metadata, steps }
    }

    /// Snapshot of `entity` at every step, for per-entity playback.
    pub fn track<'a>(
        &'a self,
        entity: &'a EntityId,
    ) -> impl Iterator<Item = (f64, &'a EntitySnapshot)> + 'a {
        self.steps.iter().filter_map(move |s| {
            s.entities
                .iter()
                .find(|e| &e.id == entity)
                .map(|e| (s.time, e))
        })
    }
}

impl From<Vec<TrajectoryStep>> for TrajectoryExport {
    fn from(steps: Vec<TrajectoryStep>) -> Self {
        Self::new(steps)
    }
}
