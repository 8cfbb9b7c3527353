//! Core mesh types for the mesh audit workspace.
//!
//! This crate provides the foundational types shared by every other crate:
//!
//! - [`Vertex`] - A point in 3D space with optional normal and color
//! - [`VertexColor`] - 8-bit RGB color used for per-vertex painting
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`FaceKey`] - Winding-independent identity of a face
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**, so normals point
//! outward by the right-hand rule.
//!
//! # Units
//!
//! All coordinates are `f64` and unit-agnostic. Game assets are usually
//! authored in meters, which is what the budget densities assume.
//!
//! # Example
//!
//! ```
//! use mesh_types::{FaceKey, IndexedMesh, MeshTopology, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert_eq!(FaceKey::from_face([2, 0, 1]), FaceKey::from_face([0, 1, 2]));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod face_key;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use face_key::FaceKey;
pub use mesh::{IndexedMesh, unit_cube};
pub use traits::MeshTopology;
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexAttributes, VertexColor};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
