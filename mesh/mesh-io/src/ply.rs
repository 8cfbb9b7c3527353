//! PLY (Polygon File Format) support.
//!
//! Reading accepts ASCII and both binary encodings through `ply-rs`.
//! Vertex positions may be `float` or `double`; `red`/`green`/`blue`
//! properties become vertex colours. Polygons are fan-triangulated. A file
//! with vertices but no faces is a point cloud.
//!
//! Writing always includes per-vertex `red`/`green`/`blue` `uchar`
//! properties, so painted meshes keep their colours.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::save_colored_ply;
//! use mesh_types::unit_cube;
//!
//! save_colored_ply(&unit_cube(), "cube.ply", true).unwrap();
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_scene::RawAsset;
use mesh_types::{IndexedMesh, Vertex, VertexColor};
use ply_rs::parser::Parser;
use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::polygon::{check_indices, fan_triangulate};

/// Parse a PLY buffer.
pub(crate) fn read_ply(bytes: &[u8]) -> IoResult<RawAsset> {
    let mut reader = bytes;

    let parser = Parser::<DefaultElement>::new();
    let header = parser
        .read_header(&mut reader)
        .map_err(|e| IoError::invalid_content(format!("failed to parse PLY header: {e}")))?;
    let payload = parser
        .read_payload(&mut reader, &header)
        .map_err(|e| IoError::invalid_content(format!("failed to read PLY payload: {e}")))?;

    let mut vertices = Vec::new();
    if let Some(vertex_elements) = payload.get("vertex") {
        vertices.reserve(vertex_elements.len());
        for (i, element) in vertex_elements.iter().enumerate() {
            vertices.push(read_vertex(element, i)?);
        }
    }

    let mut faces = Vec::new();
    if let Some(face_elements) = payload.get("face") {
        faces.reserve(face_elements.len());
        for element in face_elements {
            fan_triangulate(&index_list(element), &mut faces);
        }
    }

    if faces.is_empty() {
        debug!(points = vertices.len(), "PLY without faces");
        return Ok(RawAsset::PointCloud(vertices));
    }

    let mesh = IndexedMesh::from_parts(vertices, faces);
    check_indices(&mesh, "PLY")?;
    Ok(RawAsset::Mesh(mesh))
}

fn read_vertex(element: &DefaultElement, index: usize) -> IoResult<Vertex> {
    let coord = |key: &str| {
        float_property(element, key).ok_or_else(|| {
            IoError::invalid_content(format!("PLY vertex {index} has no numeric `{key}`"))
        })
    };
    let mut vertex = Vertex::from_coords(coord("x")?, coord("y")?, coord("z")?);

    if let (Some(r), Some(g), Some(b)) = (
        color_property(element, "red"),
        color_property(element, "green"),
        color_property(element, "blue"),
    ) {
        vertex.attributes.color = Some(VertexColor::new(r, g, b));
    }

    Ok(vertex)
}

fn float_property(element: &DefaultElement, key: &str) -> Option<f64> {
    match element.get(key)? {
        Property::Float(v) => Some(f64::from(*v)),
        Property::Double(v) => Some(*v),
        _ => None,
    }
}

fn color_property(element: &DefaultElement, key: &str) -> Option<u8> {
    match element.get(key)? {
        Property::UChar(v) => Some(*v),
        _ => None,
    }
}

/// Extract vertex index list from a face element.
fn index_list(element: &DefaultElement) -> Vec<u32> {
    for key in &["vertex_indices", "vertex_index"] {
        if let Some(prop) = element.get(*key) {
            return match prop {
                Property::ListInt(v) =>
                {
                    #[allow(clippy::cast_sign_loss)]
                    v.iter().map(|&i| i as u32).collect()
                }
                Property::ListUInt(v) => v.clone(),
                Property::ListUChar(v) => v.iter().map(|&i| u32::from(i)).collect(),
                Property::ListUShort(v) => v.iter().map(|&i| u32::from(i)).collect(),
                Property::ListShort(v) =>
                {
                    #[allow(clippy::cast_sign_loss)]
                    v.iter().map(|&i| i as u32).collect()
                }
                _ => continue,
            };
        }
    }
    Vec::new()
}

/// Save a mesh as PLY with per-vertex colours.
///
/// Positions are written as `double`. Vertices without a colour are written
/// white.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
/// * `binary` - If true, save as binary little-endian; if false, save as ASCII
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_colored_ply<P: AsRef<Path>>(mesh: &IndexedMesh, path: P, binary: bool) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_colored_ply(mesh, &mut writer, binary)?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh as PLY with per-vertex colours to any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_colored_ply<W: Write>(mesh: &IndexedMesh, writer: &mut W, binary: bool) -> IoResult<()> {
    if binary {
        write_ply_binary(mesh, writer)
    } else {
        write_ply_ascii(mesh, writer)
    }
}

fn color_of(vertex: &Vertex) -> VertexColor {
    vertex.color().unwrap_or_default()
}

/// Binary little-endian, written by hand: `ply-rs` writes the element count
/// instead of the list length for binary list properties.
fn write_ply_binary<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "ply")?;
    writeln!(writer, "format binary_little_endian 1.0")?;
    writeln!(writer, "comment written by mesh-io")?;
    writeln!(writer, "element vertex {}", mesh.vertices.len())?;
    writeln!(writer, "property double x")?;
    writeln!(writer, "property double y")?;
    writeln!(writer, "property double z")?;
    writeln!(writer, "property uchar red")?;
    writeln!(writer, "property uchar green")?;
    writeln!(writer, "property uchar blue")?;
    writeln!(writer, "element face {}", mesh.faces.len())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for v in &mesh.vertices {
        writer.write_all(&v.position.x.to_le_bytes())?;
        writer.write_all(&v.position.y.to_le_bytes())?;
        writer.write_all(&v.position.z.to_le_bytes())?;
        let c = color_of(v);
        writer.write_all(&[c.r, c.g, c.b])?;
    }

    for &[i0, i1, i2] in &mesh.faces {
        writer.write_all(&[3u8])?;
        #[allow(clippy::cast_possible_wrap)]
        {
            writer.write_all(&(i0 as i32).to_le_bytes())?;
            writer.write_all(&(i1 as i32).to_le_bytes())?;
            writer.write_all(&(i2 as i32).to_le_bytes())?;
        }
    }

    Ok(())
}

fn write_ply_ascii<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;
    ply.header.comments.push("written by mesh-io".to_string());

    let mut vertex_def = ElementDef::new("vertex".to_string());
    for key in ["x", "y", "z"] {
        vertex_def.properties.add(PropertyDef::new(
            key.to_string(),
            PropertyType::Scalar(ScalarType::Double),
        ));
    }
    for key in ["red", "green", "blue"] {
        vertex_def.properties.add(PropertyDef::new(
            key.to_string(),
            PropertyType::Scalar(ScalarType::UChar),
        ));
    }
    vertex_def.count = mesh.vertices.len();
    ply.header.elements.add(vertex_def);

    let mut face_def = ElementDef::new("face".to_string());
    face_def.properties.add(PropertyDef::new(
        "vertex_indices".to_string(),
        PropertyType::List(ScalarType::UChar, ScalarType::Int),
    ));
    face_def.count = mesh.faces.len();
    ply.header.elements.add(face_def);

    let mut vertex_elements = Vec::with_capacity(mesh.vertices.len());
    for v in &mesh.vertices {
        let c = color_of(v);
        let mut element = DefaultElement::new();
        element.insert("x".to_string(), Property::Double(v.position.x));
        element.insert("y".to_string(), Property::Double(v.position.y));
        element.insert("z".to_string(), Property::Double(v.position.z));
        element.insert("red".to_string(), Property::UChar(c.r));
        element.insert("green".to_string(), Property::UChar(c.g));
        element.insert("blue".to_string(), Property::UChar(c.b));
        vertex_elements.push(element);
    }
    ply.payload.insert("vertex".to_string(), vertex_elements);

    let mut face_elements = Vec::with_capacity(mesh.faces.len());
    for &[i0, i1, i2] in &mesh.faces {
        let mut element = DefaultElement::new();
        #[allow(clippy::cast_possible_wrap)]
        let indices = vec![i0 as i32, i1 as i32, i2 as i32];
        element.insert("vertex_indices".to_string(), Property::ListInt(indices));
        face_elements.push(element);
    }
    ply.payload.insert("face".to_string(), face_elements);

    Writer::new()
        .write_ply(writer, &mut ply)
        .map_err(|e| IoError::invalid_content(format!("failed to write PLY: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{MeshTopology, unit_cube};

    fn painted_cube() -> IndexedMesh {
        let mut cube = unit_cube();
        for (i, v) in cube.vertices.iter_mut().enumerate() {
            let shade = u8::try_from(i * 30).unwrap();
            v.attributes.color = Some(VertexColor::new(shade, 255 - shade, 7));
        }
        cube
    }

    fn expect_mesh(asset: RawAsset) -> IndexedMesh {
        match asset {
            RawAsset::Mesh(mesh) => mesh,
            other => panic!("expected a mesh, got a {}", other.kind()),
        }
    }

    #[test]
    fn binary_keeps_positions_and_colours() {
        let original = painted_cube();
        let mut bytes = Vec::new();
        write_colored_ply(&original, &mut bytes, true).unwrap();

        let loaded = expect_mesh(read_ply(&bytes).unwrap());
        assert_eq!(loaded.faces, original.faces);
        for (a, b) in original.vertices.iter().zip(&loaded.vertices) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.color(), b.color());
        }
    }

    #[test]
    fn ascii_keeps_topology_and_colours() {
        let original = painted_cube();
        let mut bytes = Vec::new();
        write_colored_ply(&original, &mut bytes, false).unwrap();

        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("property uchar red"));

        let loaded = expect_mesh(read_ply(&bytes).unwrap());
        assert_eq!(loaded.faces, original.faces);
        for (a, b) in original.vertices.iter().zip(&loaded.vertices) {
            assert!((a.position - b.position).norm() < 1e-9);
            assert_eq!(a.color(), b.color());
        }
    }

    #[test]
    fn uncoloured_vertices_are_written_white() {
        let mut bytes = Vec::new();
        write_colored_ply(&unit_cube(), &mut bytes, true).unwrap();
        let loaded = expect_mesh(read_ply(&bytes).unwrap());
        assert!(loaded.vertices.iter().all(|v| v.color() == Some(VertexColor::WHITE)));
    }

    #[test]
    fn quads_are_fan_triangulated() {
        let text = b"ply\nformat ascii 1.0\nelement vertex 4\nproperty float x\nproperty float y\nproperty float z\nelement face 1\nproperty list uchar int vertex_indices\nend_header\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n";
        let mesh = expect_mesh(read_ply(text).unwrap());
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
        assert!((mesh.surface_area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn vertices_only_is_a_point_cloud() {
        let text = b"ply\nformat ascii 1.0\nelement vertex 2\nproperty float x\nproperty float y\nproperty float z\nend_header\n0 0 0\n1 2 3\n";
        match read_ply(text).unwrap() {
            RawAsset::PointCloud(points) => {
                assert_eq!(points.len(), 2);
                assert!((points[1].position.z - 3.0).abs() < 1e-12);
            }
            other => panic!("expected a point cloud, got a {}", other.kind()),
        }
    }

    #[test]
    fn bad_face_index_is_invalid_content() {
        let text = b"ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\nproperty float y\nproperty float z\nelement face 1\nproperty list uchar int vertex_indices\nend_header\n0 0 0\n1 0 0\n0 1 0\n3 0 1 9\n";
        assert!(read_ply(text).unwrap_err().is_invalid_content());
    }

    #[test]
    fn garbage_is_invalid_content() {
        assert!(read_ply(b"not a ply file").unwrap_err().is_invalid_content());
    }

    #[test]
    fn save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.ply");
        save_colored_ply(&painted_cube(), &path, true).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let loaded = expect_mesh(read_ply(&bytes).unwrap());
        assert_eq!(loaded.vertex_count(), 8);
        assert_eq!(loaded.face_count(), 12);
    }
}
