//! Per-face recolouring for visual inspection.
//!
//! Vertex colours bind to vertices, not faces, so every painter here that
//! colours faces individually first explodes the mesh with
//! [`explode_with_face_colors`]: face `i` gets vertices `3i..3i + 3`.
//!
//! - [`paint_inversions`] highlights flagged faces.
//! - [`paint_uniform`] tints a whole mesh without changing topology.
//! - [`paint_area_heatmap`] ramps faces by relative area.
//!
//! # Example
//!
//! ```
//! use mesh_paint::{paint_inversions, FacePalette};
//! use mesh_types::unit_cube;
//!
//! let cube = unit_cube();
//! let flags = vec![false; 12];
//! let painted = paint_inversions(&cube, &flags, &FacePalette::default()).unwrap();
//!
//! assert_eq!(painted.vertices.len(), 36);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod explode;
mod heatmap;
mod paint;
mod palette;

pub use error::{PaintError, PaintResult};
pub use explode::explode_with_face_colors;
pub use heatmap::{paint_area_heatmap, paint_area_heatmap_with, relative_area_scores};
pub use paint::{paint_inversions, paint_uniform};
pub use palette::{FacePalette, HeatmapPalette};
