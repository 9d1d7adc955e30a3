//! Edge: a connection from a source node key to a target node key with payload.
//!
//! Edges are owned by the [`Graph`](super::Graph); nodes only hold their indices.
//! Direction is recorded but adjacency queries treat edges as undirected.

/// A connection `source -> target` carrying an arbitrary `data` payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Edge<K, E = ()> {
    pub source: K,
    pub target: K,
    pub data: E,
}

impl<K, E> Edge<K, E> {
    #[inline]
    pub fn new(source: K, target: K, data: E) -> Self {
        Edge {
            source,
            target,
            data,
        }
    }

    /// Returns the `(source, target)` endpoints, dropping the payload.
    #[inline]
    pub fn endpoints(&self) -> (&K, &K) {
        (&self.source, &self.target)
    }

    pub fn map<F>(self, f: impl FnOnce(E) -> F) -> Edge<K, F> {
        Edge::new(self.source, self.target, f(self.data))
    }
}

impl<K: PartialEq, E> Edge<K, E> {
    /// The endpoint opposite `key`, or `None` if `key` is not an endpoint.
    ///
    /// For a self-loop the opposite endpoint is `key` itself.
    pub fn opposite(&self, key: &K) -> Option<&K> {
        if self.source == *key {
            Some(&self.target)
        } else if self.target == *key {
            Some(&self.source)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }

    /// True if this edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: &K, b: &K) -> bool {
        (self.source == *a && self.target == *b) || (self.source == *b && self.target == *a)
    }
}

impl<K> Edge<K, ()> {
    /// An edge with no payload.
    #[inline]
    pub fn unit(source: K, target: K) -> Self {
        Edge::new(source, target, ())
    }
}
