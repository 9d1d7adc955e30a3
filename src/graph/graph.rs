//! Typed graph container with node/edge referential integrity.
//!
//! A [`Graph`] owns a key → [`Node`] map and an insertion-ordered list of
//! [`Edge`]s. Every edge index recorded on a node points at an edge naming
//! that node, and every edge is recorded on both of its endpoints. Nothing is
//! ever removed; callers that need deletion rebuild the graph.
//!
//! Policies:
//! - Inserting a key twice is rejected with [`MeshError::DuplicateNodeKey`].
//! - Adding an edge whose source or target is absent is rejected with
//!   [`MeshError::DanglingEdge`]; the graph is left untouched.
//! - Parallel edges are allowed. A self-loop is recorded once on its node.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::{Edge, EdgeIndex, Node};
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;

/// Bound alias for graph keys.
pub trait NodeKey: Clone + Eq + Hash + Ord + Debug {}
impl<T: Clone + Eq + Hash + Ord + Debug> NodeKey for T {}

#[derive(Clone, Debug)]
pub struct Graph<K, N = (), E = ()> {
    nodes: HashMap<K, Node<K, N>>,
    edges: Vec<Edge<K, E>>,
}

impl<K: NodeKey, N, E> Default for Graph<K, N, E> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
        }
    }
}

impl<K: NodeKey, N, E> Graph<K, N, E> {
    /// Creates a new, empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: HashMap::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Insert `node` under its own key.
    ///
    /// Fails with [`MeshError::DuplicateNodeKey`] if the key is taken; the
    /// existing node is kept.
    pub fn add_node(&mut self, node: Node<K, N>) -> Result<(), MeshError> {
        if self.nodes.contains_key(node.key()) {
            return Err(MeshError::DuplicateNodeKey(format!("{:?}", node.key())));
        }
        self.nodes.insert(node.key().clone(), node);
        Ok(())
    }

    /// Append `edge` and record it on both endpoints.
    ///
    /// Both endpoints must already be nodes of the graph, otherwise
    /// [`MeshError::DanglingEdge`] is returned and nothing changes.
    pub fn add_edge(&mut self, edge: Edge<K, E>) -> Result<EdgeIndex, MeshError> {
        for key in [&edge.source, &edge.target] {
            if !self.nodes.contains_key(key) {
                return Err(MeshError::DanglingEdge {
                    source_key: format!("{:?}", edge.source),
                    target_key: format!("{:?}", edge.target),
                    missing: format!("{key:?}"),
                });
            }
        }

        let idx = self.edges.len();
        if let Some(n) = self.nodes.get_mut(&edge.source) {
            n.edges.push(idx);
        }
        if edge.target != edge.source
            && let Some(n) = self.nodes.get_mut(&edge.target)
        {
            n.edges.push(idx);
        }
        self.edges.push(edge);
        Ok(idx)
    }

    #[inline]
    pub fn contains_node(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    #[inline]
    pub fn node(&self, key: &K) -> Option<&Node<K, N>> {
        self.nodes.get(key)
    }

    /// Mutable access to a node's payload. Incidence stays graph-managed.
    #[inline]
    pub fn node_data_mut(&mut self, key: &K) -> Option<&mut N> {
        self.nodes.get_mut(key).map(|n| &mut n.data)
    }

    #[inline]
    pub fn edge(&self, idx: EdgeIndex) -> Option<&Edge<K, E>> {
        self.edges.get(idx)
    }

    /// All edges in insertion order.
    #[inline]
    pub fn edges(&self) -> &[Edge<K, E>] {
        &self.edges
    }

    /// All nodes, in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<K, N>> + '_ {
        self.nodes.values()
    }

    /// Node keys in ascending order.
    pub fn keys_sorted(&self) -> Vec<K> {
        let mut keys: Vec<K> = self.nodes.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges touching `key`, in the order they were added.
    pub fn incident_edges(&self, key: &K) -> impl Iterator<Item = (EdgeIndex, &Edge<K, E>)> + '_ {
        self.nodes
            .get(key)
            .map(|n| n.edges.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&i| (i, &self.edges[i]))
    }

    /// Opposite endpoints of every incident edge. Parallel edges repeat the
    /// neighbor; a self-loop yields `key` itself.
    pub fn neighbors<'a>(&'a self, key: &'a K) -> impl Iterator<Item = &'a K> + 'a {
        self.incident_edges(key)
            .filter_map(move |(_, e)| e.opposite(key))
    }

    /// Incident edge count of `key`, or `None` if absent.
    #[inline]
    pub fn degree(&self, key: &K) -> Option<usize> {
        self.nodes.get(key).map(Node::degree)
    }

    /// Connected components, each sorted, ordered by smallest key.
    pub fn connected_components(&self) -> Vec<Vec<K>> {
        crate::algs::traversal::graph_components(self)
    }

    /// Indices of all edges joining `a` and `b` in either direction.
    pub fn edges_between(&self, a: &K, b: &K) -> Vec<EdgeIndex> {
        self.incident_edges(a)
            .filter(|(_, e)| e.connects(a, b))
            .map(|(i, _)| i)
            .collect()
    }
}

impl<K: NodeKey, N, E> DebugInvariants for Graph<K, N, E> {
    const LABEL: &'static str = "Graph";

    fn validate_invariants(&self) -> Result<(), MeshError> {
        for (key, node) in &self.nodes {
            if node.key() != key {
                return Err(MeshError::InvariantViolation {
                    container: Self::LABEL,
                    detail: format!("node stored under {key:?} reports key {:?}", node.key()),
                });
            }
            for (pos, &idx) in node.edges.iter().enumerate() {
                let recorded = self
                    .edges
                    .get(idx)
                    .is_some_and(|e| e.opposite(key).is_some());
                if !recorded || node.edges[..pos].contains(&idx) {
                    return Err(MeshError::InvariantViolation {
                        container: Self::LABEL,
                        detail: format!("node {key:?} lists edge #{idx} that does not touch it"),
                    });
                }
            }
        }
        for (idx, e) in self.edges.iter().enumerate() {
            for key in [&e.source, &e.target] {
                let listed = self
                    .nodes
                    .get(key)
                    .is_some_and(|n| n.edges.contains(&idx));
                if !listed {
                    return Err(MeshError::InvariantViolation {
                        container: Self::LABEL,
                        detail: format!("edge #{idx} is not listed on endpoint {key:?}"),
                    });
                }
            }
        }
        Ok(())
    }
}
