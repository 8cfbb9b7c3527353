//! Loaded asset shapes and scene flattening.
//!
//! File loaders hand back a [`RawAsset`]: a single mesh, a scene of named
//! geometries, a composite list of parts, or a bare point cloud.
//! [`flatten`] turns any of these into the one [`IndexedMesh`] the rest of
//! the pipeline works on, or fails with a [`SceneError`].
//!
//! [`IndexedMesh`]: mesh_types::IndexedMesh
//!
//! # Example
//!
//! ```
//! use mesh_scene::{flatten, RawAsset, SceneError, Scene};
//!
//! let empty = RawAsset::Scene(Scene::new());
//! assert_eq!(flatten(empty), Err(SceneError::EmptyScene));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod asset;
mod error;
mod flatten;

pub use asset::{Part, RawAsset, Scene};
pub use error::{SceneError, SceneResult};
pub use flatten::flatten;
