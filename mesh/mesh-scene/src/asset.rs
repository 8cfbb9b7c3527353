//! Shapes a loaded asset can take before flattening.

use mesh_types::{IndexedMesh, MeshTopology, Vertex};

use crate::error::{SceneError, SceneResult};

/// A loaded asset, as produced by a file loader.
///
/// Loaders describe what they found without deciding how it becomes a
/// single mesh; [`flatten`](crate::flatten) makes that decision.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAsset {
    /// A single triangle mesh with valid indices.
    Mesh(IndexedMesh),
    /// Named sub-geometries, e.g. the meshes of a glTF document or the
    /// objects of an OBJ file.
    Scene(Scene),
    /// A flat list of parts, only some of which may be meshes.
    Composite(Vec<Part>),
    /// Positions without any faces.
    PointCloud(Vec<Vertex>),
}

impl RawAsset {
    /// Short description of the asset shape, used in logs and errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Mesh(_) => "mesh",
            Self::Scene(_) => "scene",
            Self::Composite(_) => "composite",
            Self::PointCloud(_) => "point cloud",
        }
    }
}

impl From<IndexedMesh> for RawAsset {
    fn from(mesh: IndexedMesh) -> Self {
        Self::Mesh(mesh)
    }
}

impl From<Scene> for RawAsset {
    fn from(scene: Scene) -> Self {
        Self::Scene(scene)
    }
}

/// One entry of a [`RawAsset::Composite`].
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// A triangle mesh.
    Mesh(IndexedMesh),
    /// Line segments as vertex index pairs.
    Lines {
        /// Segment endpoints.
        vertices: Vec<Vertex>,
        /// Segments as index pairs into `vertices`.
        segments: Vec<[u32; 2]>,
    },
    /// Loose points.
    Points(Vec<Vertex>),
}

impl Part {
    /// The mesh, if this part is one.
    #[must_use]
    pub const fn as_mesh(&self) -> Option<&IndexedMesh> {
        match self {
            Self::Mesh(mesh) => Some(mesh),
            Self::Lines { .. } | Self::Points(_) => None,
        }
    }
}

/// Ordered collection of uniquely named geometries.
///
/// Iteration order is insertion order, so flattening the same scene always
/// produces the same vertex layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    geometries: Vec<(String, IndexedMesh)>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            geometries: Vec::new(),
        }
    }

    /// Add a geometry under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::DuplicateName`] if the name is taken.
    pub fn insert(&mut self, name: impl Into<String>, mesh: IndexedMesh) -> SceneResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(SceneError::DuplicateName { name });
        }
        self.geometries.push((name, mesh));
        Ok(())
    }

    /// Add a geometry, suffixing the name (`name_1`, `name_2`, ...) until
    /// it is unique. Returns the name actually used.
    pub fn insert_unique(&mut self, name: &str, mesh: IndexedMesh) -> String {
        let mut candidate = name.to_string();
        let mut suffix = 1;
        while self.contains(&candidate) {
            candidate = format!("{name}_{suffix}");
            suffix += 1;
        }
        self.geometries.push((candidate.clone(), mesh));
        candidate
    }

    /// Whether a geometry with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.geometries.iter().any(|(n, _)| n == name)
    }

    /// Look up a geometry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&IndexedMesh> {
        self.geometries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, mesh)| mesh)
    }

    /// Number of geometries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// Whether the scene holds no geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Iterate over `(name, mesh)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexedMesh)> {
        self.geometries.iter().map(|(n, m)| (n.as_str(), m))
    }

    /// Total face count across all geometries.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.geometries.iter().map(|(_, m)| m.face_count()).sum()
    }
}

impl FromIterator<(String, IndexedMesh)> for Scene {
    /// Collect geometries; repeated names are made unique.
    fn from_iter<I: IntoIterator<Item = (String, IndexedMesh)>>(iter: I) -> Self {
        let mut scene = Self::new();
        for (name, mesh) in iter {
            scene.insert_unique(&name, mesh);
        }
        scene
    }
}
