//! Locomotion engine for Trek.
//!
//! Holds the per-entity [`LocomotionState`], the closed set of primitive
//! [`Action`]s with their preconditions and durations, the compound
//! [`Task`]s an HTN planner expands, and the greedy waypoint
//! [`sequencer`].
//!
//! # Planner interface
//!
//! An external planner needs two callbacks:
//!
//! - method map: [`Task::decompose`] turns a task into ordered [`Step`]s
//! - action map: [`Action::apply`] returns a [`Transition`] (successor
//!   state plus duration) or a [`CommandError`](trek_core::CommandError)
//!
//! Both are pure with respect to their input state. [`run_agenda`] is a
//! minimal left-to-right driver over the same callbacks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agenda;
pub mod command;
pub mod config;
pub mod sequencer;
pub mod state;
pub mod task;
pub mod waypoint;

pub use agenda::{run_agenda, tour_steps, AgendaError, Plan, PlannedAction};
pub use command::{
    mark_waypoint_reached, move_and_rotate, move_to, rotate_to, Action, Transition,
};
pub use config::{ConfigError, NavMeshSource, SolveConfig};
pub use sequencer::{order_waypoints, plan_tour, total_distance, Tour};
pub use state::{EntitySpec, EntityState, InitError, LocomotionState, Spaces, DEFAULT_SPEED};
pub use task::{Step, Task};
pub use waypoint::{generate_waypoints, Waypoint};
