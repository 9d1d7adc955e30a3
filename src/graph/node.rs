//! Graph nodes: a key, a payload, and back-references to incident edges.

use super::EdgeIndex;

/// A node keyed by `K` carrying payload `N`.
///
/// The incident-edge list holds indices into the owning [`Graph`](super::Graph)'s
/// edge list. It is populated only by [`Graph::add_edge`](super::Graph::add_edge),
/// so a freshly constructed node always starts isolated.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<K, N = ()> {
    key: K,
    /// User payload.
    pub data: N,
    pub(crate) edges: Vec<EdgeIndex>,
}

impl<K, N> Node<K, N> {
    /// Create an isolated node.
    #[inline]
    pub fn new(key: K, data: N) -> Self {
        Node {
            key,
            data,
            edges: Vec::new(),
        }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Indices of edges touching this node, in the order they were added.
    #[inline]
    pub fn incident_edges(&self) -> &[EdgeIndex] {
        &self.edges
    }

    /// Number of incident edges. A self-loop counts once.
    #[inline]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Transform the payload, keeping key and incidence.
    pub fn map<M>(self, f: impl FnOnce(N) -> M) -> Node<K, M> {
        Node {
            key: self.key,
            data: f(self.data),
            edges: self.edges,
        }
    }
}

impl<K> Node<K, ()> {
    /// A node with no payload.
    #[inline]
    pub fn bare(key: K) -> Self {
        Node::new(key, ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_isolated() {
        let n = Node::new(7u32, "soma");
        assert_eq!(*n.key(), 7);
        assert_eq!(n.data, "soma");
        assert_eq!(n.degree(), 0);
        assert!(n.incident_edges().is_empty());
    }

    #[test]
    fn map_keeps_key() {
        let n = Node::new(3u32, 2.0f64).map(|r| r * 2.0);
        assert_eq!(*n.key(), 3);
        assert_eq!(n.data, 4.0);
    }
}
