//! MeshError: Unified error type for morphology-mesh public APIs
//!
//! Precondition violations (dangling edges, empty point sets, malformed faces)
//! are reported through this type and never leave the receiver half-mutated.
//! "No path" is not an error; searches report it as `Ok(None)`.

use thiserror::Error;

/// Unified error type for morphology-mesh operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A node with this key is already present in the graph.
    #[error("Graph error: node `{0}` already exists")]
    DuplicateNodeKey(String),
    /// An edge endpoint does not name a node in the graph.
    #[error("Graph error: edge {source_key} -> {target_key} references missing node `{missing}`")]
    DanglingEdge {
        source_key: String,
        target_key: String,
        missing: String,
    },
    /// Extreme points requested for an empty point set.
    #[error("Geometry error: point set is empty")]
    EmptyPointSet,
    /// A coordinate is NaN or infinite.
    #[error("Geometry error: point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
    /// A polygon with fewer than three distinct vertices.
    #[error("Topology error: face {face} has fewer than 3 distinct vertices")]
    DegenerateFace { face: usize },
    /// A mesh edge shared by more than two faces.
    #[error("Topology error: edge ({}, {}) is shared by {faces} faces", edge.0, edge.1)]
    NonManifoldEdge { edge: (u32, u32), faces: usize },
    /// A location refers to a structure that was not supplied.
    #[error("Morphology error: structure {0} is unknown")]
    UnknownStructure(u64),
    /// A link endpoint is not one of the structure's locations.
    #[error("Morphology error: link {a} -> {b} references location {missing} outside structure {structure}")]
    MissingLocation {
        structure: u64,
        a: u64,
        b: u64,
        missing: u64,
    },
    /// More faces or edges than a `u32` handle can address.
    #[error("Topology error: {count} {kind} exceed the u32 handle range")]
    IndexOverflow { kind: &'static str, count: usize },
    /// A container's internal cross-references disagree.
    #[error("Invariant violated in {container}: {detail}")]
    InvariantViolation {
        container: &'static str,
        detail: String,
    },
    /// The caller raised the cancellation flag during a search.
    #[error("Search cancelled")]
    SearchCancelled,
}
