//! Trajectory reconstruction for Trek.
//!
//! Replays a flat list of [`PlannedAction`](trek_engine::PlannedAction)s
//! against an initial [`LocomotionState`](trek_engine::LocomotionState) and
//! captures one time-stamped snapshot of every entity and waypoint after
//! each action. The result is an animation track a renderer can play back.
//!
//! # Architecture
//!
//! - [`reconstruct`] orders the actions, applies each effect to a working
//!   copy of the state, and records a [`TrajectoryStep`] per action
//! - [`TrajectoryExport`] wraps the steps with summary metadata in the
//!   document shape external tools consume
//!
//! Effects are applied without precondition checks: the actions are assumed
//! to come from a plan that already validated them. Writing the document to
//! disk is left to the caller.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod reconstruct;
pub mod types;

pub use error::ReplayError;
pub use reconstruct::{order_actions, reconstruct, snapshot};
pub use types::{
    EntitySnapshot, ExportMetadata, TrajectoryExport, TrajectoryStep, WaypointSnapshot,
};
