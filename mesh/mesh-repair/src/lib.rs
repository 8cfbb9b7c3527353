//! Orientation repair for triangle meshes.
//!
//! This crate finds faces whose winding points them the wrong way and fixes
//! them. [`repair_orientation`] runs the whole pipeline:
//! - Topology validation
//! - Vertex welding (merge coincident vertices, drop collapsed faces)
//! - A normal snapshot keyed by winding-independent [`FaceKey`]
//! - Winding propagation across shared edges
//! - Outward orientation per connected component
//! - A before/after normal diff producing per-face inversion flags
//!
//! Each step is also exposed on its own.
//!
//! [`FaceKey`]: mesh_types::FaceKey
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_repair::{repair_orientation, OrientParams};
//!
//! // A cube with one face wound backwards
//! let mut cube = unit_cube();
//! cube.flip_face(7);
//!
//! let outcome = repair_orientation(&cube, &OrientParams::default()).unwrap();
//! assert_eq!(outcome.inverted_count(), 1);
//! assert!(outcome.inverted[7]);
//! println!("{}", outcome.report);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod error;
pub mod orient;
mod orientation;
mod snapshot;
mod validate;
mod weld;
pub mod winding;

pub use adjacency::{EdgeKey, FaceAdjacency, Neighbor, face_edges, normalize_edge};
pub use error::{Malformation, RepairError, RepairResult};
pub use orient::{ComponentOrientation, OrientSummary, orient_outward};
pub use orientation::{OrientParams, OrientationOutcome, OrientationReport, repair_orientation};
pub use snapshot::NormalSnapshot;
pub use validate::{check_topology, mesh_from_flat};
pub use weld::{WeldSummary, weld_vertices};
pub use winding::{WindingOutcome, propagate_winding};
