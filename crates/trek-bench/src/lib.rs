//! Benchmark profiles for the Trek workspace.
//!
//! - [`comb_obstacles`]: a connected maze of vertical walls with alternating gaps
//! - [`maze_profile`]: a maze-mode config over a comb maze
//! - [`sphere_profile`]: a sphere-mode config
//! - [`profile_state`]: one walker plus generated waypoints for a config

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use trek_core::Point;
use trek_engine::{generate_waypoints, EntitySpec, InitError, LocomotionState, SolveConfig};

/// Walls on every fourth column from `x = 2`, each open at one end.
///
/// Gaps alternate between the top and bottom rows, so the whole grid stays
/// connected and a corner-to-corner path has to snake through every wall.
pub fn comb_obstacles(width: u32, height: u32) -> Vec<(u32, u32)> {
    let mut walls = Vec::new();
    let mut gap_top = true;
    let mut x = 2;
    while x + 1 < width {
        let gap = if gap_top { height.saturating_sub(1) } else { 0 };
        walls.extend((0..height).filter(|&y| y != gap).map(|y| (x, y)));
        gap_top = !gap_top;
        x += 4;
    }
    walls
}

/// A `size × size` comb maze in maze mode.
pub fn maze_profile(size: u32) -> SolveConfig {
    SolveConfig {
        obstacles: comb_obstacles(size, size),
        ..SolveConfig::maze(size, size)
    }
}

/// A sphere-mode config with `points` positions.
pub fn sphere_profile(points: usize) -> SolveConfig {
    SolveConfig::sphere(points)
}

/// Initialize one walker at the origin plus `config.waypoint_count`
/// generated waypoints.
pub fn profile_state(config: &SolveConfig) -> Result<LocomotionState, InitError> {
    let start = if config.maze_mode {
        Point::ORIGIN
    } else {
        Point::UNIT_Z
    };
    let walker = EntitySpec::new("walker", start);
    let bare = LocomotionState::initialize(&[], &[], config)?;
    let waypoints = generate_waypoints(
        config.waypoint_count,
        bare.position_space(),
        bare.rotation_space(),
        bare.navmesh(),
    );
    LocomotionState::initialize_with_spaces(&[walker], &waypoints, config, bare.spaces().clone())
}
