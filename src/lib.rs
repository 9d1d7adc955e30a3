#![cfg_attr(docsrs, feature(doc_cfg))]
//! # morphology-mesh
//!
//! morphology-mesh is the in-memory graph and geometry engine behind
//! connectomics annotation tooling. It turns structure/location records into
//! per-cell morphology graphs, answers face-adjacency path queries on polygon
//! meshes built from those graphs, and seeds 2D hull construction for contour
//! stitching.
//!
//! ## Features
//! - A typed [`Graph`](graph::Graph) container with node/edge referential integrity
//! - A [`MeshTopology`](topology::MeshTopology) incidence view and an indexed
//!   [`PolygonMesh`](topology::PolygonMesh)
//! - Memoized face-path search ([`algs::face_path`]) with caller-owned caches
//!   and cancellation
//! - Axis-extreme points and convex hulls of 2D point sets ([`geometry`])
//! - Morphology graph assembly from annotation records ([`morphology`])
//!
//! ## Determinism
//!
//! Every operation is a synchronous, single-threaded computation over in-memory
//! data. Queries whose result order matters (adjacency, components, hulls,
//! extreme ties) are defined by input order, never by hash iteration order.
//!
//! ## Errors
//!
//! Precondition violations return [`MeshError`](mesh_error::MeshError) and leave
//! the receiver unchanged. Searches that find nothing return `None`.
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade; install any logger to see them.

pub mod algs;
pub mod debug_invariants;
pub mod geometry;
pub mod graph;
pub mod mesh_error;
pub mod morphology;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::face_path::{FacePathError, FacePathSearch, PathCache, find_face_path};
    pub use crate::algs::traversal::{face_components, graph_components};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::{Extremes, convex_hull, extreme_points};
    pub use crate::graph::{Edge, EdgeIndex, Graph, Node};
    pub use crate::mesh_error::MeshError;
    pub use crate::morphology::{
        AssemblyOpts, LocationLink, LocationRecord, MorphologyGraph, StructureRecord,
        assemble_all, assemble_structure,
    };
    pub use crate::topology::{FaceId, MeshEdgeId, MeshTopology, PolygonMesh};
}
