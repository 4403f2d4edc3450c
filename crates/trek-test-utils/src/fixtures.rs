//! Canned mazes and a scenario builder.
//!
//! - [`serpentine_obstacles`]: horizontal walls with alternating end gaps
//! - [`wall_with_gap`]: one vertical wall with a single opening
//! - [`ScenarioBuilder`]: config, entities and waypoints in one chain

use trek_core::{MovementType, Point};
use trek_engine::{EntitySpec, LocomotionState, SolveConfig, Waypoint};

/// Walls on every other row from `y = 2`, leaving the top rows open.
///
/// The first wall is open at `x = 0`, the next at `x = width - 1`, and so
/// on, so the only route from the bottom row to the top snakes through
/// every gap. For a 7x7 grid:
///
/// ```text
/// y=6  . . . . . . .
/// y=5  . . . . . . .
/// y=4  # # # # # # .
/// y=3  . . . . . . .
/// y=2  . # # # # # #
/// y=1  . . . . . . .
/// y=0  . . . . . . .
/// ```
pub fn serpentine_obstacles(width: u32, height: u32) -> Vec<(u32, u32)> {
    let mut walls = Vec::new();
    let mut gap_left = true;
    let mut y = 2;
    while y + 2 <= height {
        let gap = if gap_left { 0 } else { width.saturating_sub(1) };
        walls.extend((0..width).filter(|&x| x != gap).map(|x| (x, y)));
        gap_left = !gap_left;
        y += 2;
    }
    walls
}

/// A vertical wall at column `x`, open only at row `gap_y`.
pub fn wall_with_gap(x: u32, height: u32, gap_y: u32) -> Vec<(u32, u32)> {
    (0..height).filter(|&y| y != gap_y).map(|y| (x, y)).collect()
}

/// Builder for a [`LocomotionState`] under test.
///
/// ```ignore
/// let state = ScenarioBuilder::maze(5, 5)
///     .entity("robot", cell(0, 0))
///     .waypoint("goal", 24)
///     .build();
/// ```
pub struct ScenarioBuilder {
    config: SolveConfig,
    entities: Vec<EntitySpec>,
    waypoints: Vec<Waypoint>,
}

impl ScenarioBuilder {
    /// Start from an arbitrary config.
    pub fn with_config(config: SolveConfig) -> Self {
        Self {
            config,
            entities: Vec::new(),
            waypoints: Vec::new(),
        }
    }

    /// An open `width × height` maze.
    pub fn maze(width: u32, height: u32) -> Self {
        Self::with_config(SolveConfig::maze(width, height))
    }

    /// A sphere-mode world with `points` positions.
    pub fn sphere(points: usize) -> Self {
        Self::with_config(SolveConfig::sphere(points))
    }

    /// Add blocked cells.
    pub fn obstacles(mut self, cells: impl IntoIterator<Item = (u32, u32)>) -> Self {
        self.config.obstacles.extend(cells);
        self
    }

    /// Add a walking entity at `position` with default speed.
    pub fn entity(self, id: &str, position: Point) -> Self {
        self.spec(EntitySpec::new(id, position))
    }

    /// Add an entity with the given speed and movement type.
    pub fn mover(self, id: &str, position: Point, speed: f64, movement: MovementType) -> Self {
        self.spec(
            EntitySpec::new(id, position)
                .with_speed(speed)
                .with_movement_type(movement),
        )
    }

    /// Add a fully specified entity.
    pub fn spec(mut self, spec: EntitySpec) -> Self {
        self.entities.push(spec);
        self
    }

    /// Add a waypoint facing rotation 0.
    pub fn waypoint(self, id: &str, position_index: usize) -> Self {
        self.oriented_waypoint(id, position_index, 0)
    }

    /// Add a waypoint with an explicit rotation.
    pub fn oriented_waypoint(mut self, id: &str, position_index: usize, rotation: usize) -> Self {
        self.waypoints
            .push(Waypoint::new(id, position_index, rotation));
        self
    }

    /// Mutate the config before building.
    pub fn configure(mut self, f: impl FnOnce(&mut SolveConfig)) -> Self {
        f(&mut self.config);
        self
    }

    /// The config as it stands.
    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    /// Initialize the state, panicking on any error.
    pub fn build(self) -> LocomotionState {
        LocomotionState::initialize(&self.entities, &self.waypoints, &self.config)
            .unwrap_or_else(|e| panic!("scenario failed to initialize: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serpentine_seven_by_seven() {
        let walls = serpentine_obstacles(7, 7);
        assert_eq!(walls.len(), 12);
        assert!(!walls.contains(&(0, 2)));
        assert!(walls.contains(&(6, 2)));
        assert!(!walls.contains(&(6, 4)));
        assert!(walls.contains(&(0, 4)));
        assert!(walls.iter().all(|&(_, y)| y == 2 || y == 4));
    }

    #[test]
    fn wall_gap_is_open() {
        let wall = wall_with_gap(2, 5, 4);
        assert_eq!(wall, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn builder_produces_state() {
        let state = ScenarioBuilder::maze(5, 5)
            .obstacles([(2, 2)])
            .entity("robot", Point::ORIGIN)
            .waypoint("goal", 24)
            .build();
        assert_eq!(state.entity_count(), 1);
        assert!(state.navmesh().is_some());
    }
}
