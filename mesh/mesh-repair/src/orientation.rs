//! The orientation repair pipeline.

use std::fmt;

use mesh_types::IndexedMesh;
use tracing::{debug, info};

use crate::adjacency::FaceAdjacency;
use crate::error::{RepairError, RepairResult};
use crate::orient::orient_outward;
use crate::snapshot::NormalSnapshot;
use crate::validate::check_topology;
use crate::weld::weld_vertices;
use crate::winding::propagate_winding;

/// Configuration for [`repair_orientation`].
///
/// Distances are in mesh units.
///
/// # Example
///
/// ```
/// use mesh_repair::OrientParams;
///
/// let params = OrientParams::default()
///     .with_weld_epsilon(1e-5)
///     .with_flip_dot_threshold(-0.9);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrientParams {
    /// Vertices closer than this are welded before adjacency is built.
    ///
    /// Zero or negative welds only exactly equal positions.
    /// Default: `1e-8`
    pub weld_epsilon: f64,

    /// A face is flagged as inverted when the dot product of its repaired
    /// and original unit normals is below this.
    ///
    /// Must lie in `[-1, 1)`. Default: `-0.5`
    pub flip_dot_threshold: f64,
}

impl Default for OrientParams {
    fn default() -> Self {
        Self {
            weld_epsilon: 1e-8,
            flip_dot_threshold: -0.5,
        }
    }
}

impl OrientParams {
    /// Params for scanned or exported meshes with loose seams.
    #[must_use]
    pub fn for_scans() -> Self {
        Self {
            weld_epsilon: 1e-4,
            ..Default::default()
        }
    }

    /// Params that never merge distinct positions.
    #[must_use]
    pub fn exact() -> Self {
        Self {
            weld_epsilon: 0.0,
            ..Default::default()
        }
    }

    /// Set the weld distance.
    #[must_use]
    pub const fn with_weld_epsilon(mut self, epsilon: f64) -> Self {
        self.weld_epsilon = epsilon;
        self
    }

    /// Set the inversion threshold.
    #[must_use]
    pub const fn with_flip_dot_threshold(mut self, threshold: f64) -> Self {
        self.flip_dot_threshold = threshold;
        self
    }

    /// Check that the params are usable.
    ///
    /// # Errors
    ///
    /// Returns [`RepairError::InvalidParams`] if the weld epsilon is not
    /// finite, or the threshold is outside `[-1, 1)`.
    pub fn validate(&self) -> RepairResult<()> {
        if !self.weld_epsilon.is_finite() {
            return Err(RepairError::invalid_params(format!(
                "weld_epsilon must be finite, got {}",
                self.weld_epsilon
            )));
        }
        if !(-1.0..1.0).contains(&self.flip_dot_threshold) {
            return Err(RepairError::invalid_params(format!(
                "flip_dot_threshold must be in [-1, 1), got {}",
                self.flip_dot_threshold
            )));
        }
        Ok(())
    }
}

/// Counters describing what a repair did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrientationReport {
    /// Vertices merged into a coincident vertex.
    pub vertices_welded: usize,
    /// Faces dropped because welding collapsed them.
    pub degenerate_faces_dropped: usize,
    /// Connected components where every edge has exactly two faces.
    pub closed_components: usize,
    /// Connected components with boundary or non-manifold edges.
    pub open_components: usize,
    /// Faces reversed to agree with their neighbours.
    pub faces_reversed_by_propagation: usize,
    /// Components reversed as a whole to face outward.
    pub components_reversed: usize,
    /// Edges shared by more than two faces.
    pub non_manifold_edges: usize,
    /// Faces touching a non-manifold edge.
    pub unresolved_faces: usize,
    /// Shared edges whose faces still disagree on direction.
    pub conflicting_edges: usize,
    /// Faces whose final normal opposes their original normal.
    pub inverted_faces: usize,
}

impl OrientationReport {
    /// Total connected components.
    #[must_use]
    pub const fn component_count(&self) -> usize {
        self.closed_components + self.open_components
    }

    /// Whether the surface had topology the repair could not fully resolve.
    #[must_use]
    pub const fn has_topology_issues(&self) -> bool {
        self.non_manifold_edges > 0 || self.conflicting_edges > 0
    }
}

impl fmt::Display for OrientationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Orientation: {} inverted, {} components ({} closed, {} open), \
             {} faces reversed, {} components reversed, {} welded, {} degenerate dropped",
            self.inverted_faces,
            self.component_count(),
            self.closed_components,
            self.open_components,
            self.faces_reversed_by_propagation,
            self.components_reversed,
            self.vertices_welded,
            self.degenerate_faces_dropped
        )?;
        if self.has_topology_issues() {
            write!(
                f,
                "; {} non-manifold edges, {} unresolved faces, {} conflicting edges",
                self.non_manifold_edges, self.unresolved_faces, self.conflicting_edges
            )?;
        }
        Ok(())
    }
}

/// The repaired mesh with its inversion flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrientationOutcome {
    /// Welded, consistently wound, outward-facing mesh.
    pub mesh: IndexedMesh,
    /// One flag per face of `mesh`; true where the face was inverted.
    pub inverted: Vec<bool>,
    /// What the repair did.
    pub report: OrientationReport,
}

impl OrientationOutcome {
    /// Number of flagged faces.
    #[must_use]
    pub fn inverted_count(&self) -> usize {
        self.inverted.iter().filter(|&&flag| flag).count()
    }

    /// Indices of flagged faces, ascending.
    #[must_use]
    pub fn inverted_faces(&self) -> Vec<usize> {
        self.inverted
            .iter()
            .enumerate()
            .filter_map(|(idx, &flag)| flag.then_some(idx))
            .collect()
    }
}

/// Repair face orientation and find the faces that were inverted.
///
/// The input is left untouched. The repair:
/// 1. validates topology,
/// 2. welds coincident vertices and drops collapsed faces,
/// 3. records every face normal,
/// 4. makes winding consistent within each connected component,
/// 5. turns each component to face outward,
/// 6. flags faces whose normal now opposes the recorded one.
///
/// A mesh without faces short-circuits to an empty outcome.
///
/// # Errors
///
/// - [`RepairError::MalformedMesh`] if a face index is out of range or a
///   referenced vertex is not finite.
/// - [`RepairError::InvalidParams`] if `params` fail
///   [`OrientParams::validate`].
///
/// # Example
///
/// ```
/// use mesh_repair::{repair_orientation, OrientParams};
/// use mesh_types::unit_cube;
///
/// let mut cube = unit_cube();
/// cube.flip_face(5);
///
/// let outcome = repair_orientation(&cube, &OrientParams::default()).unwrap();
/// assert_eq!(outcome.inverted_faces(), vec![5]);
/// assert_eq!(outcome.mesh, unit_cube());
/// ```
pub fn repair_orientation(
    mesh: &IndexedMesh,
    params: &OrientParams,
) -> RepairResult<OrientationOutcome> {
    params.validate()?;
    check_topology(mesh)?;

    if mesh.faces.is_empty() {
        debug!("no faces to orient");
        return Ok(OrientationOutcome::default());
    }

    let mut repaired = mesh.clone();
    let weld = weld_vertices(&mut repaired, params.weld_epsilon);

    let snapshot = NormalSnapshot::capture(&repaired);
    let adjacency = FaceAdjacency::build(&repaired.faces);
    let winding = propagate_winding(&mut repaired.faces, &adjacency);
    let orient = orient_outward(&mut repaired, &winding.components, &adjacency);
    let inverted = snapshot.diff(&repaired, params.flip_dot_threshold);

    let report = OrientationReport {
        vertices_welded: weld.vertices_merged,
        degenerate_faces_dropped: weld.degenerate_faces_dropped,
        closed_components: orient.closed_count(),
        open_components: orient.open_count(),
        faces_reversed_by_propagation: winding.faces_reversed,
        components_reversed: orient.reversed_count(),
        non_manifold_edges: adjacency.non_manifold_edge_count(),
        unresolved_faces: adjacency.unresolved_faces().len(),
        conflicting_edges: winding.conflicting_edges,
        inverted_faces: inverted.iter().filter(|&&flag| flag).count(),
    };

    info!(
        faces = repaired.faces.len(),
        inverted = report.inverted_faces,
        components = report.component_count(),
        "{report}"
    );

    Ok(OrientationOutcome {
        mesh: repaired,
        inverted,
        report,
    })
}
