//! Mesh topology: face/edge handles, the incidence accessor trait, and an
//! indexed polygon mesh implementing it.
//!
//! Most users build a [`PolygonMesh`] from vertex loops and query it through
//! [`MeshTopology`]; the path search in [`crate::algs::face_path`] is generic
//! over any implementation of that trait.

pub mod ids;
pub mod mesh_topology;
pub mod polygon_mesh;

pub use ids::{FaceId, MeshEdgeId};
pub use mesh_topology::MeshTopology;
pub use polygon_mesh::{MeshBuildOpts, NonManifoldHandling, PolygonMesh};
