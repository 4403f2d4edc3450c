//! Test fixtures for Trek development.
//!
//! Provides canned mazes, entity specs and a [`ScenarioBuilder`] for
//! assembling a [`LocomotionState`] in a line or two. Fixtures panic on
//! invalid input; they are meant for tests and benches only.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{serpentine_obstacles, wall_with_gap, ScenarioBuilder};

use trek_core::{EntityId, Point, WaypointId};
use trek_engine::{LocomotionState, Waypoint};

/// Shorthand for an entity id.
pub fn eid(name: &str) -> EntityId {
    EntityId::from(name)
}

/// Shorthand for a waypoint id.
pub fn wid(name: &str) -> WaypointId {
    WaypointId::from(name)
}

/// Waypoints named `wp_0..` at the given position indices, facing rotation 0.
pub fn waypoints_at(indices: &[usize]) -> Vec<Waypoint> {
    indices
        .iter()
        .enumerate()
        .map(|(i, &p)| Waypoint::new(format!("wp_{i}"), p, 0))
        .collect()
}

/// The planar point of grid cell `(x, y)` at unit spacing.
pub fn cell(x: u32, y: u32) -> Point {
    Point::planar(x as f64, y as f64)
}

/// Panic unless `entity` sits on a walkable face of the state's navmesh.
pub fn assert_on_walkable(state: &LocomotionState, entity: &EntityId) {
    let mesh = state.navmesh().expect("state has no navmesh");
    let p = state
        .position_point(entity)
        .unwrap_or_else(|| panic!("unknown entity {entity}"));
    assert!(mesh.walkable(p), "{entity} at {p:?} is not on a walkable face");
}
