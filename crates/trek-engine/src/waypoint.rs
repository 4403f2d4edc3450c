//! Waypoints and deterministic waypoint generation.

use serde::{Deserialize, Serialize};
use trek_core::WaypointId;
use trek_nav::NavMesh;
use trek_space::IndexedSpace;

/// A target pose: a position index plus the rotation to face on arrival.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Waypoint {
    /// Unique id.
    pub id: WaypointId,
    /// Index into the position space.
    pub position_index: usize,
    /// Index into the rotation space.
    pub rotation_index: usize,
}

impl Waypoint {
    /// Create a waypoint.
    pub fn new(id: impl Into<WaypointId>, position_index: usize, rotation_index: usize) -> Self {
        Self {
            id: id.into(),
            position_index,
            rotation_index,
        }
    }
}

/// Generate `count` waypoints named `wp_0`, `wp_1`, ...
///
/// Positions are taken at the midpoints of `count` equal strides over the
/// candidate positions; when a navmesh is given, unwalkable positions are
/// not candidates. Rotations stride over the rotation space the same way.
/// Returns fewer than `count` waypoints only when there are no candidate
/// positions at all.
pub fn generate_waypoints(
    count: usize,
    position_space: &dyn IndexedSpace,
    rotation_space: &dyn IndexedSpace,
    navmesh: Option<&NavMesh>,
) -> Vec<Waypoint> {
    let candidates: Vec<usize> = position_space
        .points()
        .iter()
        .enumerate()
        .filter(|(_, p)| navmesh.map_or(true, |m| m.walkable(**p)))
        .map(|(i, _)| i)
        .collect();
    if candidates.is_empty() || count == 0 {
        return Vec::new();
    }
    let rotations = rotation_space.len().max(1);
    (0..count)
        .map(|i| {
            let slot = (2 * i + 1) * candidates.len() / (2 * count);
            Waypoint::new(
                format!("wp_{i}"),
                candidates[slot],
                (i * rotations / count) % rotations,
            )
        })
        .collect()
}
