//! Indexed polygon mesh with derived edge incidence.
//!
//! Faces are supplied as closed vertex-index loops. Each consecutive pair of
//! a loop (including last → first) becomes an undirected mesh edge; edges
//! shared between faces are deduplicated and numbered in first-seen order.
//!
//! Validation:
//! - A loop with fewer than 3 distinct vertices is rejected.
//! - Repeated consecutive vertices produce no edge.
//! - An edge used by more than two faces is handled per [`NonManifoldHandling`].
//! - More faces or edges than `u32` handles address fail with
//!   [`MeshError::IndexOverflow`].

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use itertools::Itertools;

use super::ids::{FaceId, MeshEdgeId};
use super::mesh_topology::MeshTopology;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;

/// What to do when an edge has more than two incident faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NonManifoldHandling {
    /// Accept silently.
    Ignore,
    /// Accept and emit a `log::warn!` per edge.
    Warn,
    /// Reject the mesh with [`MeshError::NonManifoldEdge`].
    #[default]
    Error,
}

/// Options for [`PolygonMesh::from_polygons_with`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshBuildOpts {
    pub non_manifold: NonManifoldHandling,
}

/// Face and edge counts always fit a `u32` handle; the builder enforces it.
#[derive(Clone, Debug, Default)]
pub struct PolygonMesh {
    face_vertices: Vec<Vec<u32>>,
    face_edges: Vec<Vec<MeshEdgeId>>,
    /// Canonical `(min, max)` vertex pair per edge.
    edge_vertices: Vec<(u32, u32)>,
    edge_faces: Vec<Vec<FaceId>>,
    edge_lookup: HashMap<(u32, u32), MeshEdgeId>,
}

impl PolygonMesh {
    /// Build with default options (non-manifold edges rejected).
    pub fn from_polygons<P: AsRef<[u32]>>(polygons: &[P]) -> Result<Self, MeshError> {
        Self::from_polygons_with(polygons, MeshBuildOpts::default())
    }

    pub fn from_triangles(triangles: &[[u32; 3]]) -> Result<Self, MeshError> {
        Self::from_polygons(triangles)
    }

    pub fn from_polygons_with<P: AsRef<[u32]>>(
        polygons: &[P],
        opts: MeshBuildOpts,
    ) -> Result<Self, MeshError> {
        let mut mesh = PolygonMesh {
            face_vertices: Vec::with_capacity(polygons.len()),
            face_edges: Vec::with_capacity(polygons.len()),
            ..Default::default()
        };

        for (fi, poly) in polygons.iter().enumerate() {
            let poly = poly.as_ref();
            let distinct = poly.iter().unique().count();
            if distinct < 3 {
                return Err(MeshError::DegenerateFace { face: fi });
            }
            let face = FaceId::new(handle(fi, "faces")?);
            let mut edges = Vec::with_capacity(poly.len());
            for (a, b) in poly.iter().copied().circular_tuple_windows::<(u32, u32)>() {
                if a == b {
                    continue;
                }
                let key = (a.min(b), a.max(b));
                let id = match mesh.edge_lookup.entry(key) {
                    Entry::Occupied(slot) => *slot.get(),
                    Entry::Vacant(slot) => {
                        let id = MeshEdgeId::new(handle(mesh.edge_vertices.len(), "edges")?);
                        mesh.edge_vertices.push(key);
                        mesh.edge_faces.push(Vec::new());
                        *slot.insert(id)
                    }
                };
                let incident = &mut mesh.edge_faces[id.index()];
                if incident.last() != Some(&face) {
                    incident.push(face);
                }
                edges.push(id);
            }
            mesh.face_vertices.push(poly.to_vec());
            mesh.face_edges.push(edges);
        }

        for (ei, faces) in mesh.edge_faces.iter().enumerate() {
            if faces.len() <= 2 {
                continue;
            }
            let edge = mesh.edge_vertices[ei];
            match opts.non_manifold {
                NonManifoldHandling::Ignore => {}
                NonManifoldHandling::Warn => {
                    log::warn!(
                        "Non-manifold edge detected: vertices={edge:?} incident_faces={}",
                        faces.len()
                    );
                }
                NonManifoldHandling::Error => {
                    return Err(MeshError::NonManifoldEdge {
                        edge,
                        faces: faces.len(),
                    });
                }
            }
        }

        log::debug!(
            "PolygonMesh built: {} faces, {} edges",
            mesh.face_edges.len(),
            mesh.edge_vertices.len()
        );
        Ok(mesh)
    }

    /// Vertex loop of `face` as supplied.
    pub fn face_vertices(&self, face: FaceId) -> Option<&[u32]> {
        self.face_vertices.get(face.index()).map(Vec::as_slice)
    }

    /// Canonical `(min, max)` vertex pair of `edge`.
    pub fn edge_vertices(&self, edge: MeshEdgeId) -> Option<(u32, u32)> {
        self.edge_vertices.get(edge.index()).copied()
    }

    /// Look up the edge joining two vertices, in either order.
    pub fn find_edge(&self, a: u32, b: u32) -> Option<MeshEdgeId> {
        self.edge_lookup.get(&(a.min(b), a.max(b))).copied()
    }

    /// Edges with exactly one incident face.
    pub fn boundary_edges(&self) -> impl Iterator<Item = MeshEdgeId> + '_ {
        self.edge_faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.len() == 1)
            .map_while(|(i, _)| u32::try_from(i).ok())
            .map(MeshEdgeId::new)
    }

    /// No edge has more than two incident faces.
    pub fn is_manifold(&self) -> bool {
        self.edge_faces.iter().all(|f| f.len() <= 2)
    }

    /// Every edge is shared by at least two faces.
    pub fn is_closed(&self) -> bool {
        self.edge_faces.iter().all(|f| f.len() >= 2)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.face_edges.is_empty()
    }
}

impl MeshTopology for PolygonMesh {
    #[inline]
    fn face_count(&self) -> usize {
        self.face_edges.len()
    }

    #[inline]
    fn edge_count(&self) -> usize {
        self.edge_vertices.len()
    }

    fn face_edges(&self, face: FaceId) -> &[MeshEdgeId] {
        self.face_edges
            .get(face.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn edge_faces(&self, edge: MeshEdgeId) -> &[FaceId] {
        self.edge_faces
            .get(edge.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl DebugInvariants for PolygonMesh {
    const LABEL: &'static str = "PolygonMesh";

    fn validate_invariants(&self) -> Result<(), MeshError> {
        let broken = |detail: String| MeshError::InvariantViolation {
            container: Self::LABEL,
            detail,
        };
        for face in self.faces() {
            if let Some(e) = self
                .face_edges(face)
                .iter()
                .find(|e| !self.edge_faces(**e).contains(&face))
            {
                return Err(broken(format!("face {face} lists edge {e}, which does not list it back")));
            }
        }
        for (ei, faces) in self.edge_faces.iter().enumerate() {
            let edge = MeshEdgeId::new(handle(ei, "edges")?);
            if let Some(f) = faces.iter().find(|f| !self.face_edges(**f).contains(&edge)) {
                return Err(broken(format!("edge {edge} lists face {f}, which does not list it back")));
            }
            let indexed = self
                .edge_vertices
                .get(ei)
                .and_then(|key| self.edge_lookup.get(key));
            if indexed != Some(&edge) {
                return Err(broken(format!("edge {edge} is missing from the vertex-pair index")));
            }
        }
        Ok(())
    }
}

/// Convert a slot index to a `u32` handle.
fn handle(index: usize, kind: &'static str) -> Result<u32, MeshError> {
    u32::try_from(index).map_err(|_| MeshError::IndexOverflow {
        kind,
        count: index.saturating_add(1),
    })
}
