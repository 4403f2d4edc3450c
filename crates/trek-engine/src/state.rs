//! Per-entity locomotion state and its read-side predicates.
//!
//! [`LocomotionState`] is a value: commands take it by reference and return
//! a modified clone, so a planner can branch and backtrack freely. The
//! spaces and navmesh it points at are shared through [`Arc`] and never
//! change after initialization.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use trek_core::{
    CommandError, EntityId, IndexKind, MovementType, Point, ValidationError, WaypointId,
};
use trek_nav::{NavError, NavMesh};
use trek_space::{GridSpace, IndexedSpace, SpaceError, SphereSpace};

use crate::config::{ConfigError, NavMeshSource, SolveConfig};
use crate::waypoint::Waypoint;

/// Speed reported for unknown entities, and the default for new ones.
pub const DEFAULT_SPEED: f64 = 1.0;

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

fn default_rotation() -> Point {
    Point::UNIT_Z
}

// ── EntitySpec ─────────────────────────────────────────────────────

/// Initialization input for one entity, in continuous coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    /// Unique id.
    pub id: EntityId,
    /// Starting position.
    pub position: Point,
    /// Facing direction. Need not be normalized. Default: `+z`.
    #[serde(default = "default_rotation")]
    pub rotation: Point,
    /// Translation speed in distance units per second. Default: 1.0.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Locomotion mode. Default: walking.
    #[serde(default)]
    pub movement_type: MovementType,
}

impl EntitySpec {
    /// A walking entity at `position` facing `+z` with unit speed.
    pub fn new(id: impl Into<EntityId>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
            rotation: default_rotation(),
            speed: DEFAULT_SPEED,
            movement_type: MovementType::default(),
        }
    }

    /// Set the facing direction.
    pub fn with_rotation(mut self, rotation: Point) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Set the movement type.
    pub fn with_movement_type(mut self, movement_type: MovementType) -> Self {
        self.movement_type = movement_type;
        self
    }
}

/// Quantized state of one entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityState {
    /// Index into the position space.
    pub position_index: usize,
    /// Index into the rotation space.
    pub rotation_index: usize,
    /// Translation speed, never negative.
    pub speed: f64,
    /// Locomotion mode.
    pub movement_type: MovementType,
}

// ── Spaces ─────────────────────────────────────────────────────────

/// The shared, read-only geometry a state operates in.
#[derive(Clone, Debug)]
pub struct Spaces {
    /// Where entities and waypoints can be.
    pub position: Arc<dyn IndexedSpace>,
    /// Which way they can face.
    pub rotation: Arc<dyn IndexedSpace>,
    /// Walkability and path constraints, maze mode only.
    pub navmesh: Option<Arc<NavMesh>>,
}

impl Spaces {
    /// Build the spaces a config describes.
    ///
    /// Maze mode: a grid position space, a `rotation_points` sphere for
    /// rotations, and a navmesh per [`NavMeshSource`]. Otherwise a single
    /// `sphere_points` sphere serves both roles and there is no navmesh.
    pub fn from_config(config: &SolveConfig) -> Result<Self, InitError> {
        if !config.maze_mode {
            let sphere: Arc<dyn IndexedSpace> = Arc::new(SphereSpace::new(config.sphere_points)?);
            return Ok(Self {
                position: Arc::clone(&sphere),
                rotation: sphere,
                navmesh: None,
            });
        }
        let grid = GridSpace::new(config.grid_width, config.grid_height, config.grid_spacing)?;
        let rotation = SphereSpace::new(config.rotation_points)?;
        let navmesh = match &config.navmesh {
            NavMeshSource::Build => Some(NavMesh::from_grid_centered(
                config.grid_width,
                config.grid_height,
                config.grid_spacing,
                &config.obstacles,
            )?),
            NavMeshSource::Import { mesh } => Some(NavMesh::from_description(mesh)?),
            NavMeshSource::None => None,
        };
        Ok(Self {
            position: Arc::new(grid),
            rotation: Arc::new(rotation),
            navmesh: navmesh.map(Arc::new),
        })
    }
}

// ── InitError ──────────────────────────────────────────────────────

/// Errors detected while building a [`LocomotionState`].
#[derive(Clone, Debug, PartialEq)]
pub enum InitError {
    /// The config failed validation.
    Config(ConfigError),
    /// A space could not be built.
    Space(SpaceError),
    /// The navmesh could not be built or imported.
    Nav(NavError),
    /// An entity or waypoint was rejected.
    Validation(ValidationError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Space(e) => write!(f, "space: {e}"),
            Self::Nav(e) => write!(f, "navmesh: {e}"),
            Self::Validation(e) => write!(f, "validation: {e}"),
        }
    }
}

impl Error for InitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Space(e) => Some(e),
            Self::Nav(e) => Some(e),
            Self::Validation(e) => Some(e),
        }
    }
}

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SpaceError> for InitError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<NavError> for InitError {
    fn from(e: NavError) -> Self {
        Self::Nav(e)
    }
}

impl From<ValidationError> for InitError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ── LocomotionState ────────────────────────────────────────────────

/// Quantized pose of every entity plus waypoint progress.
///
/// Entities and waypoints are fixed at initialization; only their indices,
/// the reached flags and the last transition duration change, and only
/// through [`Action`](crate::command::Action).
///
/// # Examples
///
/// ```
/// use trek_core::{EntityId, Point};
/// use trek_engine::{EntitySpec, LocomotionState, SolveConfig, Waypoint};
///
/// let robot = EntitySpec::new("robot", Point::planar(0.0, 0.0)).with_speed(2.0);
/// let goal = Waypoint::new("goal", 24, 0);
/// let state = LocomotionState::initialize(&[robot], &[goal], &SolveConfig::maze(5, 5)).unwrap();
///
/// let robot = EntityId::from("robot");
/// assert_eq!(state.quantized_position(&robot), 0);
/// assert_eq!(state.entity_speed(&robot), 2.0);
/// assert!(!state.waypoint_reached(&robot, &"goal".into()));
/// ```
#[derive(Clone, Debug)]
pub struct LocomotionState {
    entities: IndexMap<EntityId, EntityState>,
    waypoints: IndexMap<WaypointId, Waypoint>,
    /// waypoint → entity → reached, every pair present.
    reached: IndexMap<WaypointId, IndexMap<EntityId, bool>>,
    spaces: Spaces,
    maze_mode: bool,
    rotation_duration: f64,
    last_duration: f64,
}

impl LocomotionState {
    /// Validate `config`, build its spaces, and quantize the inputs.
    pub fn initialize(
        entities: &[EntitySpec],
        waypoints: &[Waypoint],
        config: &SolveConfig,
    ) -> Result<Self, InitError> {
        config.validate()?;
        let spaces = Spaces::from_config(config)?;
        Self::initialize_with_spaces(entities, waypoints, config, spaces)
    }

    /// Like [`initialize`](Self::initialize) but with caller-supplied spaces.
    ///
    /// Only `maze_mode`, `rotation_duration` and `entity_speeds` are read
    /// from `config`; the geometry fields are ignored in favour of `spaces`.
    pub fn initialize_with_spaces(
        entities: &[EntitySpec],
        waypoints: &[Waypoint],
        config: &SolveConfig,
        spaces: Spaces,
    ) -> Result<Self, InitError> {
        let mut entity_map = IndexMap::with_capacity(entities.len());
        for spec in entities {
            let speed = config
                .entity_speeds
                .get(&spec.id)
                .copied()
                .unwrap_or(spec.speed);
            if !speed.is_finite() || speed < 0.0 {
                return Err(ValidationError::InvalidSpeed {
                    entity: spec.id.clone(),
                    speed,
                }
                .into());
            }
            let state = EntityState {
                position_index: spaces.position.nearest_index(spec.position),
                rotation_index: spaces.rotation.nearest_index(spec.rotation),
                speed,
                movement_type: spec.movement_type,
            };
            if entity_map.insert(spec.id.clone(), state).is_some() {
                return Err(ValidationError::DuplicateEntity {
                    entity: spec.id.clone(),
                }
                .into());
            }
        }

        let mut waypoint_map = IndexMap::with_capacity(waypoints.len());
        for wp in waypoints {
            check_range(&*spaces.position, IndexKind::Position, wp.position_index)?;
            check_range(&*spaces.rotation, IndexKind::Rotation, wp.rotation_index)?;
            if config.maze_mode {
                let z = spaces
                    .position
                    .point(wp.position_index)
                    .map_or(0.0, |p| p.z);
                if z != 0.0 {
                    return Err(ValidationError::MalformedWaypoint {
                        waypoint: wp.id.clone(),
                        z,
                    }
                    .into());
                }
            }
            if waypoint_map.insert(wp.id.clone(), wp.clone()).is_some() {
                return Err(ValidationError::DuplicateWaypoint {
                    waypoint: wp.id.clone(),
                }
                .into());
            }
        }

        let reached = waypoint_map
            .keys()
            .map(|w| {
                let row = entity_map.keys().map(|e| (e.clone(), false)).collect();
                (w.clone(), row)
            })
            .collect();

        tracing::info!(
            entities = entity_map.len(),
            waypoints = waypoint_map.len(),
            positions = spaces.position.len(),
            rotations = spaces.rotation.len(),
            maze_mode = config.maze_mode,
            navmesh = spaces.navmesh.is_some(),
            "locomotion state initialized"
        );
        Ok(Self {
            entities: entity_map,
            waypoints: waypoint_map,
            reached,
            spaces,
            maze_mode: config.maze_mode,
            rotation_duration: config.rotation_duration,
            last_duration: 0.0,
        })
    }

    // ── Predicates ─────────────────────────────────────────────────

    /// Position index of `entity`, 0 if unknown.
    pub fn quantized_position(&self, entity: &EntityId) -> usize {
        self.entities.get(entity).map_or(0, |e| e.position_index)
    }

    /// Rotation index of `entity`, 0 if unknown.
    pub fn quantized_rotation(&self, entity: &EntityId) -> usize {
        self.entities.get(entity).map_or(0, |e| e.rotation_index)
    }

    /// Speed of `entity`, [`DEFAULT_SPEED`] if unknown.
    pub fn entity_speed(&self, entity: &EntityId) -> f64 {
        self.entities.get(entity).map_or(DEFAULT_SPEED, |e| e.speed)
    }

    /// Movement type of `entity`, walking if unknown.
    pub fn movement_type(&self, entity: &EntityId) -> MovementType {
        self.entities
            .get(entity)
            .map_or(MovementType::default(), |e| e.movement_type)
    }

    /// Whether `entity` has reached `waypoint`; false for unknown pairs.
    pub fn waypoint_reached(&self, entity: &EntityId, waypoint: &WaypointId) -> bool {
        self.reached
            .get(waypoint)
            .and_then(|row| row.get(entity))
            .copied()
            .unwrap_or(false)
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Quantized state of `entity`.
    pub fn entity(&self, entity: &EntityId) -> Option<&EntityState> {
        self.entities.get(entity)
    }

    /// Entities in initialization order.
    pub fn entities(&self) -> impl Iterator<Item = (&EntityId, &EntityState)> {
        self.entities.iter()
    }

    /// Number of entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Look up a waypoint.
    pub fn waypoint(&self, id: &WaypointId) -> Option<&Waypoint> {
        self.waypoints.get(id)
    }

    /// Waypoints in initialization order.
    pub fn waypoints(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.values()
    }

    /// Entities that have reached `waypoint`, in initialization order.
    pub fn reached_by(&self, waypoint: &WaypointId) -> Vec<&EntityId> {
        self.reached
            .get(waypoint)
            .map(|row| row.iter().filter(|(_, r)| **r).map(|(e, _)| e).collect())
            .unwrap_or_default()
    }

    /// Real-space position of `entity`.
    pub fn position_point(&self, entity: &EntityId) -> Option<Point> {
        let e = self.entities.get(entity)?;
        self.spaces.position.point(e.position_index)
    }

    /// Real-space facing direction of `entity`.
    pub fn rotation_point(&self, entity: &EntityId) -> Option<Point> {
        let e = self.entities.get(entity)?;
        self.spaces.rotation.point(e.rotation_index)
    }

    /// Distance between two position indices in the position space's metric.
    pub fn distance(&self, a: usize, b: usize) -> Result<f64, SpaceError> {
        self.spaces.position.distance(a, b)
    }

    /// The shared geometry.
    pub fn spaces(&self) -> &Spaces {
        &self.spaces
    }

    /// The position space.
    pub fn position_space(&self) -> &dyn IndexedSpace {
        &*self.spaces.position
    }

    /// The rotation space.
    pub fn rotation_space(&self) -> &dyn IndexedSpace {
        &*self.spaces.rotation
    }

    /// The navmesh, if any.
    pub fn navmesh(&self) -> Option<&NavMesh> {
        self.spaces.navmesh.as_deref()
    }

    /// Whether moves are constrained to the maze plane.
    pub fn is_maze_mode(&self) -> bool {
        self.maze_mode
    }

    /// Seconds taken by every rotation.
    pub fn rotation_duration(&self) -> f64 {
        self.rotation_duration
    }

    /// Duration of the most recently applied transition, in seconds.
    pub fn last_duration(&self) -> f64 {
        self.last_duration
    }

    // ── Mutation (commands and replay only) ────────────────────────

    fn entity_mut(&mut self, entity: &EntityId) -> Result<&mut EntityState, CommandError> {
        self.entities
            .get_mut(entity)
            .ok_or_else(|| CommandError::StateInconsistency {
                reason: format!("entity '{entity}' vanished from state"),
            })
    }

    pub(crate) fn set_position(
        &mut self,
        entity: &EntityId,
        index: usize,
    ) -> Result<(), CommandError> {
        self.entity_mut(entity)?.position_index = index;
        Ok(())
    }

    pub(crate) fn set_rotation(
        &mut self,
        entity: &EntityId,
        index: usize,
    ) -> Result<(), CommandError> {
        self.entity_mut(entity)?.rotation_index = index;
        Ok(())
    }

    pub(crate) fn set_reached(
        &mut self,
        entity: &EntityId,
        waypoint: &WaypointId,
    ) -> Result<(), CommandError> {
        let flag = self
            .reached
            .get_mut(waypoint)
            .and_then(|row| row.get_mut(entity))
            .ok_or_else(|| CommandError::StateInconsistency {
                reason: format!("no reached flag for entity '{entity}' at waypoint '{waypoint}'"),
            })?;
        *flag = true;
        Ok(())
    }

    pub(crate) fn set_last_duration(&mut self, seconds: f64) {
        self.last_duration = seconds;
    }
}

fn check_range(
    space: &dyn IndexedSpace,
    kind: IndexKind,
    index: usize,
) -> Result<(), ValidationError> {
    if index < space.len() {
        Ok(())
    } else {
        Err(ValidationError::IndexOutOfRange {
            kind,
            index,
            len: space.len(),
        })
    }
}
