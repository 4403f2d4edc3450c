//! Trek: quantized locomotion, navmesh search and trajectory replay.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Trek sub-crates. For most users, adding `trek` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use trek::prelude::*;
//!
//! // A 5×5 maze with one blocked cell and a robot in the corner.
//! let config = SolveConfig {
//!     obstacles: vec![(2, 2)],
//!     ..SolveConfig::maze(5, 5)
//! };
//! let robot = EntitySpec::new("robot", Point::ORIGIN).with_speed(2.0);
//! let goal = Waypoint::new("goal", 24, 0);
//! let state = LocomotionState::initialize(&[robot], &[goal], &config).unwrap();
//!
//! // Expand and apply a tour, then replay it into an animation track.
//! let (robot, goal) = (EntityId::from("robot"), WaypointId::from("goal"));
//! let plan = run_agenda(&state, tour_steps(&robot, &[goal.clone()])).unwrap();
//! let export = TrajectoryExport::new(reconstruct(&state, &plan.actions).unwrap());
//!
//! assert_eq!(export.metadata.total_steps, plan.actions.len());
//! assert!(plan.state.waypoint_reached(&robot, &goal));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `trek-core` | Points, ids, movement types, error taxonomy |
//! | [`space`] | `trek-space` | Sphere and grid spaces, quantization |
//! | [`nav`] | `trek-nav` | Navmesh construction, import and path search |
//! | [`engine`] | `trek-engine` | State, commands, tasks, sequencing, agenda driver |
//! | [`replay`] | `trek-replay` | Trajectory reconstruction and export |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`trek-core`).
///
/// [`types::Point`], the id newtypes, [`types::MovementType`] and the
/// [`types::CommandError`] taxonomy.
pub use trek_core as types;

/// Indexed point spaces (`trek-space`).
///
/// The [`space::IndexedSpace`] trait with [`space::SphereSpace`] and
/// [`space::GridSpace`] backends.
pub use trek_space as space;

/// Navigation meshes (`trek-nav`).
///
/// Build a [`nav::NavMesh`] from a grid or import one from a
/// [`nav::MeshDescription`], then search it with `find_path`.
pub use trek_nav as nav;

/// Locomotion engine (`trek-engine`).
///
/// [`engine::LocomotionState`], [`engine::Action`] and [`engine::Task`]
/// form the callback surface an external planner drives.
pub use trek_engine as engine;

/// Trajectory replay (`trek-replay`).
pub use trek_replay as replay;

/// Common imports for typical Trek usage.
///
/// ```rust
/// use trek::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use trek_core::{EntityId, MovementType, Point, WaypointId};

    // Errors
    pub use trek_core::{CommandError, ConstraintViolation, PathNotFound, ValidationError};

    // Space
    pub use trek_space::{find_nearest_index, GridSpace, IndexedSpace, SphereSpace};

    // Navigation
    pub use trek_nav::{MeshDescription, NavMesh, PathFailure};

    // Engine
    pub use trek_engine::{
        generate_waypoints, plan_tour, run_agenda, tour_steps, Action, EntitySpec,
        LocomotionState, PlannedAction, SolveConfig, Step, Task, Transition, Waypoint,
    };

    // Replay
    pub use trek_replay::{reconstruct, TrajectoryExport, TrajectoryStep};
}
