//! Solve configuration, validation, and error types.
//!
//! [`SolveConfig`] carries every knob the locomotion layer reads at
//! initialization. [`validate()`](SolveConfig::validate) checks structural
//! invariants up front so that [`LocomotionState::initialize`] can assume a
//! well-formed config.
//!
//! [`LocomotionState::initialize`]: crate::state::LocomotionState::initialize

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use trek_core::EntityId;
use trek_nav::MeshDescription;

/// Rotation duration applied when none is configured, in seconds.
pub const DEFAULT_ROTATION_DURATION: f64 = 0.5;

/// Rotation directions used in maze mode when none are configured.
pub const DEFAULT_ROTATION_POINTS: usize = 8;

// ── NavMeshSource ──────────────────────────────────────────────────

/// Where maze mode gets its navigation mesh from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum NavMeshSource {
    /// Build a centred grid mesh from the maze dimensions and obstacles.
    #[default]
    Build,
    /// Use an externally produced mesh.
    Import {
        /// The mesh to import.
        mesh: MeshDescription,
    },
    /// No mesh; moves are checked against the grid only.
    None,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SolveConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Maze mode with a zero grid dimension.
    EmptyGrid {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// Grid spacing is NaN, infinite, zero or negative.
    InvalidSpacing {
        /// The invalid value.
        value: f64,
    },
    /// Sphere mode with zero sphere points.
    EmptySphere,
    /// Zero rotation directions.
    NoRotationPoints,
    /// Rotation duration is NaN, infinite or negative.
    InvalidRotationDuration {
        /// The invalid value.
        value: f64,
    },
    /// An obstacle lies outside the maze grid.
    ObstacleOutOfBounds {
        /// Obstacle column.
        x: u32,
        /// Obstacle row.
        y: u32,
    },
    /// A per-entity speed override is negative or non-finite.
    InvalidEntitySpeed {
        /// The entity.
        entity: EntityId,
        /// The invalid value.
        speed: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "maze grid {width}x{height} has no cells")
            }
            Self::InvalidSpacing { value } => {
                write!(f, "grid_spacing must be finite and positive, got {value}")
            }
            Self::EmptySphere => write!(f, "sphere_points must be at least 1"),
            Self::NoRotationPoints => write!(f, "rotation_points must be at least 1"),
            Self::InvalidRotationDuration { value } => {
                write!(f, "rotation_duration must be finite and non-negative, got {value}")
            }
            Self::ObstacleOutOfBounds { x, y } => {
                write!(f, "obstacle ({x}, {y}) lies outside the maze grid")
            }
            Self::InvalidEntitySpeed { entity, speed } => {
                write!(f, "speed override {speed} for entity '{entity}' is invalid")
            }
        }
    }
}

impl Error for ConfigError {}

// ── SolveConfig ────────────────────────────────────────────────────

/// Complete configuration for one locomotion solve.
///
/// Every field has a default, so partial documents deserialize:
///
/// ```
/// use trek_engine::SolveConfig;
///
/// let cfg: SolveConfig = serde_json::from_str(
///     r#"{ "maze_mode": true, "grid_width": 4, "grid_height": 4, "obstacles": [[1, 2]] }"#,
/// )
/// .unwrap();
/// assert!(cfg.maze_mode);
/// assert_eq!(cfg.rotation_points, 8);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveConfig {
    /// Number of waypoints to generate when the caller supplies none. Default: 5.
    pub waypoint_count: usize,
    /// Planar grid navigation instead of sphere space. Default: false.
    pub maze_mode: bool,
    /// Maze grid width in cells. Default: 10.
    pub grid_width: u32,
    /// Maze grid height in cells. Default: 10.
    pub grid_height: u32,
    /// Distance between adjacent grid positions. Default: 1.0.
    pub grid_spacing: f64,
    /// Points on the position sphere outside maze mode. Default: 100.
    pub sphere_points: usize,
    /// Blocked maze cells as `(column, row)`.
    pub obstacles: Vec<(u32, u32)>,
    /// Per-entity speed overrides, applied at initialization.
    pub entity_speeds: IndexMap<EntityId, f64>,
    /// Seconds taken by every rotation. Default: 0.5.
    pub rotation_duration: f64,
    /// Rotation directions in maze mode. Default: 8.
    pub rotation_points: usize,
    /// Maze-mode navmesh source. Default: build from the grid.
    pub navmesh: NavMeshSource,
    /// Trajectory destination for the CLI layer. Unused by the core.
    pub output_path: Option<PathBuf>,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            waypoint_count: 5,
            maze_mode: false,
            grid_width: 10,
            grid_height: 10,
            grid_spacing: 1.0,
            sphere_points: 100,
            obstacles: Vec::new(),
            entity_speeds: IndexMap::new(),
            rotation_duration: DEFAULT_ROTATION_DURATION,
            rotation_points: DEFAULT_ROTATION_POINTS,
            navmesh: NavMeshSource::default(),
            output_path: None,
        }
    }
}

impl SolveConfig {
    /// A maze-mode config over a `width × height` grid with unit spacing.
    pub fn maze(width: u32, height: u32) -> Self {
        Self {
            maze_mode: true,
            grid_width: width,
            grid_height: height,
            ..Self::default()
        }
    }

    /// A sphere-mode config with `points` positions.
    pub fn sphere(points: usize) -> Self {
        Self {
            sphere_points: points,
            ..Self::default()
        }
    }

    /// Validate all structural invariants.
    ///
    /// Grid parameters are only checked in maze mode and the sphere size
    /// only outside it; the unused half of the config may hold anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.maze_mode {
            if self.grid_width == 0 || self.grid_height == 0 {
                return Err(ConfigError::EmptyGrid {
                    width: self.grid_width,
                    height: self.grid_height,
                });
            }
            if !self.grid_spacing.is_finite() || self.grid_spacing <= 0.0 {
                return Err(ConfigError::InvalidSpacing {
                    value: self.grid_spacing,
                });
            }
            if let Some(&(x, y)) = self
                .obstacles
                .iter()
                .find(|(x, y)| *x >= self.grid_width || *y >= self.grid_height)
            {
                return Err(ConfigError::ObstacleOutOfBounds { x, y });
            }
        } else if self.sphere_points == 0 {
            return Err(ConfigError::EmptySphere);
        }
        if self.rotation_points == 0 {
            return Err(ConfigError::NoRotationPoints);
        }
        if !self.rotation_duration.is_finite() || self.rotation_duration < 0.0 {
            return Err(ConfigError::InvalidRotationDuration {
                value: self.rotation_duration,
            });
        }
        if let Some((entity, &speed)) = self
            .entity_speeds
            .iter()
            .find(|(_, s)| !s.is_finite() || **s < 0.0)
        {
            return Err(ConfigError::InvalidEntitySpeed {
                entity: entity.clone(),
                speed,
            });
        }
        Ok(())
    }
}
