//! Core types for the Trek locomotion framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary shared by every other Trek crate:
//! real-space [`Point`]s, entity and waypoint identifiers, the closed
//! [`MovementType`] set, and the command error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod movement;
pub mod point;

pub use error::{CommandError, ConstraintViolation, IndexKind, PathNotFound, ValidationError};
pub use id::{EntityId, SpaceInstanceId, WaypointId};
pub use movement::{MovementType, ParseMovementTypeError};
pub use point::Point;
