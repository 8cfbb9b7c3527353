//! Wavefront OBJ support.
//!
//! Reading understands `v` (with optional `r g b` colour), `f`, `o` and `g`.
//! Face corners may be `i`, `i/t`, `i//n` or `i/t/n`; negative indices count
//! back from the most recent vertex. Polygons are fan-triangulated. Other
//! statements (normals, texture coordinates, materials, lines) are skipped.
//!
//! A file without `o` or `g` statements loads as one mesh. Otherwise each
//! named group becomes a scene geometry holding only the vertices its faces
//! use; faces that appear before the first group go to `default`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use hashbrown::HashMap;
use mesh_scene::{RawAsset, Scene};
use mesh_types::{IndexedMesh, Point3, Vertex, VertexColor};
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::polygon::{check_indices, fan_triangulate};

/// Faces issued under one `o`/`g` statement, indexing the global vertex list.
struct Group {
    name: String,
    faces: Vec<[u32; 3]>,
}

/// Parse an OBJ buffer.
pub(crate) fn read_obj(bytes: &[u8]) -> IoResult<RawAsset> {
    let text = std::str::from_utf8(bytes)?;

    let mut vertices: Vec<Vertex> = Vec::new();
    let mut groups = vec![Group {
        name: "default".to_string(),
        faces: Vec::new(),
    }];
    let mut saw_group = false;
    let mut corners: Vec<u32> = Vec::with_capacity(4);

    for (line_idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("");
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        let line_no = line_idx + 1;

        match keyword {
            "v" => {
                let values = tokens.map(str::parse::<f64>).collect::<Result<Vec<_>, _>>()?;
                vertices.push(parse_vertex(&values, line_no)?);
            }
            "f" => {
                corners.clear();
                for token in tokens {
                    corners.push(resolve_index(token, vertices.len(), line_no)?);
                }
                if corners.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "OBJ line {line_no}: face has {} corner(s)",
                        corners.len()
                    )));
                }
                if let Some(group) = groups.last_mut() {
                    fan_triangulate(&corners, &mut group.faces);
                }
            }
            "o" | "g" => {
                saw_group = true;
                let name = tokens.collect::<Vec<_>>().join(" ");
                groups.push(Group {
                    name: if name.is_empty() {
                        "unnamed".to_string()
                    } else {
                        name
                    },
                    faces: Vec::new(),
                });
            }
            _ => {}
        }
    }

    if groups.iter().all(|g| g.faces.is_empty()) {
        debug!(points = vertices.len(), "OBJ without faces");
        return Ok(RawAsset::PointCloud(vertices));
    }

    if !saw_group {
        let faces = groups.into_iter().flat_map(|g| g.faces).collect();
        let mesh = IndexedMesh::from_parts(vertices, faces);
        check_indices(&mesh, "OBJ")?;
        return Ok(RawAsset::Mesh(mesh));
    }

    let mut scene = Scene::new();
    for group in groups.into_iter().filter(|g| !g.faces.is_empty()) {
        let mesh = extract_group(&vertices, &group.faces);
        scene.insert_unique(&group.name, mesh);
    }
    debug!(geometries = scene.len(), "OBJ groups");
    Ok(RawAsset::Scene(scene))
}

fn parse_vertex(values: &[f64], line_no: usize) -> IoResult<Vertex> {
    match *values {
        [x, y, z, r, g, b, ..] => Ok(Vertex::with_color(
            Point3::new(x, y, z),
            color_from_floats(r, g, b),
        )),
        [x, y, z, ..] => Ok(Vertex::from_coords(x, y, z)),
        _ => Err(IoError::invalid_content(format!(
            "OBJ line {line_no}: vertex has {} coordinate(s)",
            values.len()
        ))),
    }
}

/// Colours in `[0, 1]` are scaled to bytes; anything larger is taken as
/// already being in `[0, 255]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn color_from_floats(r: f64, g: f64, b: f64) -> VertexColor {
    let scale = if r > 1.0 || g > 1.0 || b > 1.0 { 1.0 } else { 255.0 };
    let byte = |c: f64| (c * scale).round().clamp(0.0, 255.0) as u8;
    VertexColor::new(byte(r), byte(g), byte(b))
}

/// Turn a face corner token into a zero-based vertex index.
fn resolve_index(token: &str, vertex_count: usize, line_no: usize) -> IoResult<u32> {
    let position = token.split('/').next().unwrap_or("");
    let raw: i64 = position.parse()?;

    let count = i64::try_from(vertex_count).unwrap_or(i64::MAX);
    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r - 1),
        r => Some(count + r),
    };

    resolved
        .filter(|&i| (0..count).contains(&i))
        .and_then(|i| u32::try_from(i).ok())
        .ok_or_else(|| {
            IoError::invalid_content(format!(
                "OBJ line {line_no}: index {raw} is out of range for {vertex_count} vertices"
            ))
        })
}

/// Copy the vertices a group uses, in order of first use.
fn extract_group(vertices: &[Vertex], faces: &[[u32; 3]]) -> IndexedMesh {
    let mut remap: HashMap<u32, u32> = HashMap::new();
    let mut mesh = IndexedMesh::with_capacity(faces.len(), faces.len());

    for face in faces {
        let mut local = [0u32; 3];
        for (slot, &global) in local.iter_mut().zip(face) {
            *slot = *remap.entry(global).or_insert_with(|| {
                mesh.vertices.push(vertices[global as usize].clone());
                #[allow(clippy::cast_possible_truncation)]
                let index = (mesh.vertices.len() - 1) as u32;
                index
            });
        }
        mesh.faces.push(local);
    }
    mesh
}

/// Save a mesh as OBJ with `v x y z r g b` vertex colours.
///
/// Colour channels are written as floats in `[0, 1]`. Vertices without a
/// colour are written without one.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_colored_obj<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_colored_obj(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh as OBJ with vertex colours to any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_colored_obj<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "# written by mesh-io")?;
    for v in &mesh.vertices {
        let p = v.position;
        match v.color() {
            Some(c) => writeln!(
                writer,
                "v {} {} {} {:.6} {:.6} {:.6}",
                p.x,
                p.y,
                p.z,
                f64::from(c.r) / 255.0,
                f64::from(c.g) / 255.0,
                f64::from(c.b) / 255.0
            )?,
            None => writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?,
        }
    }
    for &[a, b, c] in &mesh.faces {
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{MeshTopology, unit_cube};

    fn expect_mesh(asset: RawAsset) -> IndexedMesh {
        match asset {
            RawAsset::Mesh(mesh) => mesh,
            other => panic!("expected a mesh, got a {}", other.kind()),
        }
    }

    #[test]
    fn plain_triangle() {
        let text = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = expect_mesh(read_obj(text).unwrap());
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn corner_forms_and_negative_indices() {
        let text = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2//1 3/1\nf -4 -2 -1\n";
        let mesh = expect_mesh(read_obj(text).unwrap());
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn polygons_are_fan_triangulated() {
        let text = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4 # quad\n";
        let mesh = expect_mesh(read_obj(text).unwrap());
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn groups_become_scene_geometries() {
        let text = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\n\
o first\nf 1 2 3\n\
o second\nf 1 2 4\nf 2 3 4\n\
g second\nf 4 3 1\n";
        let RawAsset::Scene(scene) = read_obj(text).unwrap() else {
            panic!("expected a scene");
        };

        assert_eq!(scene.len(), 3);
        let first = scene.get("first").unwrap();
        assert_eq!(first.vertex_count(), 3);
        assert_eq!(first.faces, vec![[0, 1, 2]]);

        let second = scene.get("second").unwrap();
        assert_eq!(second.vertex_count(), 4);
        assert_eq!(second.faces, vec![[0, 1, 2], [1, 3, 2]]);
        assert_eq!(second.vertices[2].position.z, 1.0);

        assert_eq!(scene.get("second_1").unwrap().face_count(), 1);
    }

    #[test]
    fn faces_before_first_group_go_to_default() {
        let text = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\ng tail\nf 3 2 1\n";
        let RawAsset::Scene(scene) = read_obj(text).unwrap() else {
            panic!("expected a scene");
        };
        let names: Vec<&str> = scene.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["default", "tail"]);
    }

    #[test]
    fn vertices_only_is_a_point_cloud() {
        let RawAsset::PointCloud(points) = read_obj(b"v 0 0 0\nv 1 1 1\n").unwrap() else {
            panic!("expected a point cloud");
        };
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn bad_indices_are_invalid_content() {
        for text in [
            &b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n"[..],
            b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n",
            b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf -4 1 2\n",
            b"v 0 0 0\nv 1 0 0\nf 1 2\n",
            b"v 0 0\n",
        ] {
            assert!(read_obj(text).unwrap_err().is_invalid_content());
        }
    }

    #[test]
    fn colours_survive_a_write_and_read() {
        let mut cube = unit_cube();
        cube.vertices[0].attributes.color = Some(VertexColor::new(220, 220, 220));
        cube.vertices[5].attributes.color = Some(VertexColor::RED);
        for v in &mut cube.vertices[1..5] {
            v.attributes.color = Some(VertexColor::new(0, 64, 255));
        }

        let mut bytes = Vec::new();
        write_colored_obj(&cube, &mut bytes).unwrap();
        let loaded = expect_mesh(read_obj(&bytes).unwrap());

        assert_eq!(loaded.faces, cube.faces);
        for (a, b) in cube.vertices.iter().zip(&loaded.vertices) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.color(), b.color());
        }
    }

    #[test]
    fn byte_range_colours_are_accepted() {
        let mesh = expect_mesh(read_obj(b"v 0 0 0 255 0 128\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap());
        assert_eq!(mesh.vertices[0].color(), Some(VertexColor::new(255, 0, 128)));
    }
}
