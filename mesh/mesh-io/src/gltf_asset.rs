//! glTF 2.0 and GLB support.
//!
//! Each glTF mesh becomes one scene geometry in its own local coordinates;
//! node transforms are not applied. Triangle lists, strips and fans are
//! converted to triangle lists. If any primitive draws points or lines the
//! document loads as a composite instead, one part per primitive, so the
//! non-triangle parts stay visible to whoever flattens it.

use std::path::Path;

use gltf::Gltf;
use gltf::mesh::Mode;
use mesh_scene::{Part, RawAsset, Scene};
use mesh_types::{IndexedMesh, Vertex};
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::polygon::check_indices;

/// One decoded primitive.
enum Primitive {
    Triangles(IndexedMesh),
    Lines(Vec<Vertex>, Vec<[u32; 2]>),
    Points(Vec<Vertex>),
}

/// Parse a glTF (JSON) or GLB (binary) buffer.
///
/// `base` resolves relative buffer URIs; without it only embedded and
/// data-URI buffers can be read.
pub(crate) fn read_gltf(bytes: &[u8], base: Option<&Path>) -> IoResult<RawAsset> {
    let Gltf { document, blob } = Gltf::from_slice(bytes)
        .map_err(|e| IoError::invalid_content(format!("failed to parse glTF: {e}")))?;
    let buffers = gltf::import_buffers(&document, base, blob)
        .map_err(|e| IoError::invalid_content(format!("failed to load glTF buffers: {e}")))?;

    let mut named: Vec<(String, Vec<Primitive>)> = Vec::new();
    for mesh in document.meshes() {
        let name = mesh
            .name()
            .map_or_else(|| format!("mesh_{}", mesh.index()), str::to_string);
        let mut primitives = Vec::new();
        for primitive in mesh.primitives() {
            let reader =
                primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
            let positions: Vec<Vertex> = reader
                .read_positions()
                .ok_or_else(|| {
                    IoError::invalid_content(format!(
                        "glTF mesh `{name}` has a primitive without positions"
                    ))
                })?
                .map(|[x, y, z]| Vertex::from_coords(f64::from(x), f64::from(y), f64::from(z)))
                .collect();
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                #[allow(clippy::cast_possible_truncation)]
                None => (0..positions.len() as u32).collect(),
            };
            primitives.push(decode(primitive.mode(), positions, &indices, &name)?);
        }
        named.push((name, primitives));
    }

    let has_non_triangles = named
        .iter()
        .flat_map(|(_, prims)| prims)
        .any(|p| !matches!(p, Primitive::Triangles(_)));

    if has_non_triangles {
        let parts: Vec<Part> = named
            .into_iter()
            .flat_map(|(_, prims)| prims)
            .map(|p| match p {
                Primitive::Triangles(mesh) => Part::Mesh(mesh),
                Primitive::Lines(vertices, segments) => Part::Lines { vertices, segments },
                Primitive::Points(points) => Part::Points(points),
            })
            .collect();
        debug!(parts = parts.len(), "glTF with non-triangle primitives");
        return Ok(RawAsset::Composite(parts));
    }

    let mut scene = Scene::new();
    for (name, prims) in named {
        let mut combined = IndexedMesh::new();
        for prim in prims {
            if let Primitive::Triangles(mesh) = prim {
                combined.append(&mesh);
            }
        }
        if !combined.faces.is_empty() {
            scene.insert_unique(&name, combined);
        }
    }
    debug!(geometries = scene.len(), "glTF meshes");
    Ok(RawAsset::Scene(scene))
}

fn decode(mode: Mode, positions: Vec<Vertex>, indices: &[u32], name: &str) -> IoResult<Primitive> {
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
        return Err(IoError::invalid_content(format!(
            "glTF mesh `{name}` indexes vertex {bad} of {}",
            positions.len()
        )));
    }

    let n = indices.len();
    let primitive = match mode {
        Mode::Triangles => {
            let faces = indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect();
            Primitive::Triangles(IndexedMesh::from_parts(positions, faces))
        }
        Mode::TriangleStrip => {
            let faces = (0..n.saturating_sub(2))
                .map(|i| {
                    if i % 2 == 0 {
                        [indices[i], indices[i + 1], indices[i + 2]]
                    } else {
                        [indices[i], indices[i + 2], indices[i + 1]]
                    }
                })
                .collect();
            Primitive::Triangles(IndexedMesh::from_parts(positions, faces))
        }
        Mode::TriangleFan => {
            let faces = (1..n.saturating_sub(1))
                .map(|i| [indices[i], indices[i + 1], indices[0]])
                .collect();
            Primitive::Triangles(IndexedMesh::from_parts(positions, faces))
        }
        Mode::Lines => {
            let segments = indices.chunks_exact(2).map(|s| [s[0], s[1]]).collect();
            Primitive::Lines(positions, segments)
        }
        Mode::LineStrip | Mode::LineLoop => {
            let mut segments: Vec<[u32; 2]> = indices.windows(2).map(|s| [s[0], s[1]]).collect();
            if mode == Mode::LineLoop && n > 2 {
                segments.push([indices[n - 1], indices[0]]);
            }
            Primitive::Lines(positions, segments)
        }
        Mode::Points => {
            let points = indices.iter().map(|&i| positions[i as usize].clone()).collect();
            Primitive::Points(points)
        }
    };

    if let Primitive::Triangles(mesh) = &primitive {
        check_indices(mesh, "glTF")?;
    }
    Ok(primitive)
}
