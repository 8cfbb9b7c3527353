//! Mesh asset loading and colour-preserving output.
//!
//! Loaders turn a file into a [`RawAsset`] without deciding how it becomes
//! one mesh; see [`mesh_scene::flatten`] for that.
//!
//! - **STL** - binary and ASCII, loaded as a triangle soup
//! - **OBJ** - `o`/`g` groups load as a scene
//! - **PLY** - binary and ASCII; files without faces load as a point cloud
//! - **glTF / GLB** - meshes load as a scene, point and line primitives as a
//!   composite
//!
//! Output is limited to what painted meshes need: [`save_colored_ply`] and
//! [`save_colored_obj`] keep per-vertex colours.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_asset, save_colored_ply};
//! use mesh_scene::flatten;
//!
//! let mesh = flatten(load_asset("model.glb").unwrap()).unwrap();
//! save_colored_ply(&mesh, "model_checked.ply", true).unwrap();
//! ```
//!
//! # Format Detection
//!
//! [`load_asset`] picks the format from the file extension. Buffers that
//! did not come from a file go through [`load_asset_from_bytes`] with an
//! explicit [`MeshFormat`].

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod gltf_asset;
mod obj;
mod ply;
mod polygon;
mod stl;

pub use error::{IoError, IoResult};
pub use obj::{save_colored_obj, write_colored_obj};
pub use ply::{save_colored_ply, write_colored_ply};

use std::fmt;
use std::path::Path;

use mesh_scene::RawAsset;
use tracing::debug;

/// Supported asset formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography), binary or ASCII.
    Stl,
    /// Wavefront OBJ.
    Obj,
    /// PLY (Polygon File Format), binary or ASCII.
    Ply,
    /// glTF 2.0 JSON.
    Gltf,
    /// glTF 2.0 binary container.
    Glb,
}

impl MeshFormat {
    /// Detect format from file extension, ignoring case.
    ///
    /// Returns `None` if the extension is missing or not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "stl" => Some(Self::Stl),
            "obj" => Some(Self::Obj),
            "ply" => Some(Self::Ply),
            "gltf" => Some(Self::Gltf),
            "glb" => Some(Self::Glb),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
            Self::Ply => "ply",
            Self::Gltf => "gltf",
            Self::Glb => "glb",
        }
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Load an asset from a file, detecting format from extension.
///
/// glTF buffers referenced by relative URI are resolved against the file's
/// directory.
///
/// # Errors
///
/// Returns an error if:
/// - The extension is not a supported format ([`IoError::UnknownFormat`])
/// - The file cannot be read ([`IoError::FileNotFound`], [`IoError::Io`])
/// - The content does not parse as the detected format
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_asset;
///
/// let asset = load_asset("model.obj").unwrap();
/// println!("loaded a {}", asset.kind());
/// ```
pub fn load_asset<P: AsRef<Path>>(path: P) -> IoResult<RawAsset> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;
    debug!(path = %path.display(), %format, bytes = bytes.len(), "loading asset");

    match format {
        MeshFormat::Gltf | MeshFormat::Glb => gltf_asset::read_gltf(&bytes, path.parent()),
        _ => load_asset_from_bytes(&bytes, format),
    }
}

/// Load an asset from an in-memory buffer.
///
/// glTF documents must embed their buffers (GLB binary chunk or data URIs).
///
/// # Errors
///
/// Returns an error if the content does not parse as `format`.
///
/// # Example
///
/// ```
/// use mesh_io::{load_asset_from_bytes, MeshFormat};
/// use mesh_scene::RawAsset;
///
/// let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
/// let asset = load_asset_from_bytes(obj, MeshFormat::Obj).unwrap();
/// assert!(matches!(asset, RawAsset::Mesh(_)));
/// ```
pub fn load_asset_from_bytes(bytes: &[u8], format: MeshFormat) -> IoResult<RawAsset> {
    match format {
        MeshFormat::Stl => stl::read_stl(bytes).map(RawAsset::Mesh),
        MeshFormat::Obj => obj::read_obj(bytes),
        MeshFormat::Ply => ply::read_ply(bytes),
        MeshFormat::Gltf | MeshFormat::Glb => gltf_asset::read_gltf(bytes, None),
    }
}
