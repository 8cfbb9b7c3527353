//! STL (Stereolithography) reading.
//!
//! Both ASCII and binary STL are accepted. STL stores every triangle with
//! its own three corners, so the result is a triangle soup: face `i` is
//! `[3i, 3i + 1, 3i + 2]`. Welding happens later, in orientation repair.
//!
//! # Format Detection
//!
//! A buffer is binary when its length is exactly what the face count after
//! the 80-byte header implies. Otherwise it is ASCII if it starts with
//! `solid`, and binary (and most likely truncated) if it does not. Binary
//! files whose header happens to start with `solid` are therefore still
//! read correctly.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (ignored)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count
//! end
//! ```

use std::io::BufRead;

use mesh_types::{IndexedMesh, Vertex};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Parse an STL buffer, detecting ASCII vs binary.
pub(crate) fn read_stl(bytes: &[u8]) -> IoResult<IndexedMesh> {
    if bytes.len() < 6 {
        return Err(IoError::invalid_content("file too small to be valid STL"));
    }

    if declared_binary_length(bytes) == Some(bytes.len()) {
        return read_stl_binary(bytes);
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(HEADER_SIZE)]);
    if head.trim_start().starts_with("solid") {
        read_stl_ascii(bytes)
    } else {
        read_stl_binary(bytes)
    }
}

/// Buffer length implied by the face count in a binary header.
fn declared_binary_length(bytes: &[u8]) -> Option<usize> {
    let count = face_count(bytes)?;
    (count as usize)
        .checked_mul(TRIANGLE_SIZE)?
        .checked_add(HEADER_SIZE + 4)
}

fn face_count(bytes: &[u8]) -> Option<u32> {
    let raw = bytes.get(HEADER_SIZE..HEADER_SIZE + 4)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

fn read_stl_binary(bytes: &[u8]) -> IoResult<IndexedMesh> {
    let face_count = face_count(bytes).ok_or(IoError::InvalidHeader {
        expected: HEADER_SIZE + 4,
        got: bytes.len(),
    })?;

    let body = &bytes[HEADER_SIZE + 4..];
    let complete = body.len() / TRIANGLE_SIZE;
    if complete < face_count as usize {
        #[allow(clippy::cast_possible_truncation)]
        // Fewer than face_count triangles, so it fits in u32
        return Err(IoError::InvalidFaceCount {
            expected: face_count,
            got: complete as u32,
        });
    }

    let mut mesh = IndexedMesh::with_capacity((face_count as usize) * 3, face_count as usize);
    for triangle in body.chunks_exact(TRIANGLE_SIZE).take(face_count as usize) {
        #[allow(clippy::cast_possible_truncation)]
        // Truncation: mesh indices are u32, meshes with >4B vertices are unsupported
        let base_idx = mesh.vertices.len() as u32;

        // Skip normal (12 bytes), read 3 vertices (36 bytes total)
        mesh.vertices.push(read_vertex(&triangle[12..24]));
        mesh.vertices.push(read_vertex(&triangle[24..36]));
        mesh.vertices.push(read_vertex(&triangle[36..48]));
        mesh.faces.push([base_idx, base_idx + 1, base_idx + 2]);
    }

    Ok(mesh)
}

/// Read a vertex from 12 bytes (3 f32s).
fn read_vertex(buf: &[u8]) -> Vertex {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vertex::from_coords(f64::from(x), f64::from(y), f64::from(z))
}

fn read_stl_ascii<R: BufRead>(reader: R) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut in_facet = false;
    let mut in_loop = false;
    let mut vertices_in_face: Vec<Vertex> = Vec::with_capacity(3);

    for line in reader.lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(keyword) = parts.first() else {
            continue;
        };

        match keyword.to_lowercase().as_str() {
            "facet" => in_facet = true,
            "outer" => {
                if parts.len() >= 2 && parts[1].eq_ignore_ascii_case("loop") {
                    in_loop = true;
                    vertices_in_face.clear();
                }
            }
            "vertex" => {
                if !in_loop {
                    continue;
                }
                if parts.len() < 4 {
                    return Err(IoError::invalid_content(format!(
                        "STL vertex line has {} coordinate(s)",
                        parts.len() - 1
                    )));
                }
                let x: f64 = parts[1].parse()?;
                let y: f64 = parts[2].parse()?;
                let z: f64 = parts[3].parse()?;
                vertices_in_face.push(Vertex::from_coords(x, y, z));
            }
            "endloop" => in_loop = false,
            "endfacet" => {
                if in_facet {
                    if vertices_in_face.len() != 3 {
                        return Err(IoError::invalid_content(format!(
                            "STL facet {} has {} vertices",
                            mesh.faces.len(),
                            vertices_in_face.len()
                        )));
                    }
                    #[allow(clippy::cast_possible_truncation)]
                    let base_idx = mesh.vertices.len() as u32;
                    mesh.vertices.append(&mut vertices_in_face);
                    mesh.faces.push([base_idx, base_idx + 1, base_idx + 2]);
                }
                vertices_in_face.clear();
                in_facet = false;
            }
            "endsolid" => break,
            _ => {}
        }
    }

    Ok(mesh)
}
