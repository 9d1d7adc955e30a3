//! Typed graph container.
//!
//! [`Graph`] maps keys to [`Node`]s and keeps an insertion-ordered list of
//! [`Edge`]s. Nodes refer to their incident edges by [`EdgeIndex`]; the graph
//! owns the edges. Morphology graphs are built on top of this container.

pub mod edge;
#[allow(clippy::module_inception)]
pub mod graph;
pub mod node;

/// Position of an edge in [`Graph::edges`].
pub type EdgeIndex = usize;

pub use edge::Edge;
pub use graph::{Graph, NodeKey};
pub use node::Node;
