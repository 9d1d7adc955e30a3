//! Read-only face/edge incidence queries over a polygon mesh.
//!
//! Face-to-face adjacency is never stored. It is derived on demand by walking a
//! face's bounding edges and collecting the other faces incident to each one.

use super::ids::{FaceId, MeshEdgeId};

/// Incidence view over a mesh that owns its faces and edges.
///
/// Implementations must be deterministic: repeated queries on an unmodified
/// mesh return the same sequences in the same order.
pub trait MeshTopology {
    /// Number of faces; valid ids are `0..face_count()`.
    fn face_count(&self) -> usize;

    /// Number of edges; valid ids are `0..edge_count()`.
    fn edge_count(&self) -> usize;

    #[inline]
    fn contains_face(&self, face: FaceId) -> bool {
        face.index() < self.face_count()
    }

    /// Bounding edges of `face` in stored order. Empty for unknown faces.
    fn face_edges(&self, face: FaceId) -> &[MeshEdgeId];

    /// Faces incident to `edge` (0, 1 or 2 on a manifold mesh). Empty for
    /// unknown edges.
    fn edge_faces(&self, edge: MeshEdgeId) -> &[FaceId];

    /// All face ids in ascending order. Stops at the end of the `u32` handle range.
    fn faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.face_count())
            .map_while(|i| u32::try_from(i).ok())
            .map(FaceId::new)
    }

    /// Faces sharing at least one edge with `face`, excluding `face` itself.
    ///
    /// Ordered by `face`'s edge order, then by each edge's incident-face order,
    /// keeping the first occurrence of each neighbor.
    fn adjacent_faces(&self, face: FaceId) -> Vec<FaceId> {
        let mut out = Vec::new();
        for &e in self.face_edges(face) {
            for &other in self.edge_faces(e) {
                if other != face && !out.contains(&other) {
                    out.push(other);
                }
            }
        }
        out
    }
}
