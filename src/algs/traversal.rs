//! Breadth-first reachability and connected components.
//!
//! Works on [`Graph`]s (edges treated as undirected) and on any
//! [`MeshTopology`] (faces joined by shared edges). Output order is
//! deterministic: components are discovered from the smallest unvisited seed,
//! and each component is returned sorted.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use crate::graph::{Graph, NodeKey};
use crate::topology::{FaceId, MeshTopology};

/// BFS from `seeds`, returning points in visit order.
///
/// `max_depth` limits the number of hops from the nearest seed; `None` walks
/// the whole component.
pub fn bfs<P, I, F>(seeds: impl IntoIterator<Item = P>, max_depth: Option<u32>, mut neighbors: F) -> Vec<P>
where
    P: Clone + Eq + Hash,
    I: IntoIterator<Item = P>,
    F: FnMut(&P) -> I,
{
    let mut seen: HashSet<P> = HashSet::new();
    let mut out = Vec::new();
    let mut q: VecDeque<(P, u32)> = VecDeque::new();
    for s in seeds {
        if seen.insert(s.clone()) {
            q.push_back((s, 0));
        }
    }
    while let Some((p, d)) = q.pop_front() {
        if max_depth.is_none_or(|md| d < md) {
            for n in neighbors(&p) {
                if seen.insert(n.clone()) {
                    q.push_back((n, d + 1));
                }
            }
        }
        out.push(p);
    }
    out
}

/// Keys reachable from `seed`, in BFS order. Empty if `seed` is absent.
pub fn reachable_nodes<K: NodeKey, N, E>(graph: &Graph<K, N, E>, seed: &K) -> Vec<K> {
    if !graph.contains_node(seed) {
        return Vec::new();
    }
    bfs([seed.clone()], None, |k| {
        graph.neighbors(k).cloned().collect::<Vec<_>>()
    })
}

/// Connected components of `graph`, each sorted, ordered by smallest key.
pub fn graph_components<K: NodeKey, N, E>(graph: &Graph<K, N, E>) -> Vec<Vec<K>> {
    components(graph.keys_sorted(), |k| {
        graph.neighbors(k).cloned().collect::<Vec<_>>()
    })
}

/// Faces reachable from `start` across shared edges, in BFS order.
pub fn reachable_faces<M: MeshTopology>(mesh: &M, start: FaceId) -> Vec<FaceId> {
    if !mesh.contains_face(start) {
        return Vec::new();
    }
    bfs([start], None, |&f| mesh.adjacent_faces(f))
}

/// Edge-connected face patches of `mesh`.
pub fn face_components<M: MeshTopology>(mesh: &M) -> Vec<Vec<FaceId>> {
    components(mesh.faces(), |&f| mesh.adjacent_faces(f))
}

fn components<P, I, F>(order: impl IntoIterator<Item = P>, mut neighbors: F) -> Vec<Vec<P>>
where
    P: Clone + Eq + Hash + Ord,
    I: IntoIterator<Item = P>,
    F: FnMut(&P) -> I,
{
    let mut assigned: HashSet<P> = HashSet::new();
    let mut out = Vec::new();
    for seed in order {
        if assigned.contains(&seed) {
            continue;
        }
        let mut comp = bfs([seed], None, &mut neighbors);
        assigned.extend(comp.iter().cloned());
        comp.sort_unstable();
        out.push(comp);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};
    use crate::topology::PolygonMesh;

    #[test]
    fn bfs_respects_depth() {
        // 0 - 1 - 2 - 3
        let next = |&p: &u32| if p < 3 { vec![p + 1] } else { vec![] };
        assert_eq!(bfs([0u32], None, next), vec![0, 1, 2, 3]);
        assert_eq!(bfs([0u32], Some(2), next), vec![0, 1, 2]);
        assert_eq!(bfs([0u32], Some(0), next), vec![0]);
    }

    #[test]
    fn graph_components_are_sorted() {
        let mut g: Graph<u32> = Graph::new();
        for k in [5, 1, 3, 2, 4] {
            g.add_node(Node::bare(k)).unwrap();
        }
        g.add_edge(Edge::unit(5, 3)).unwrap();
        g.add_edge(Edge::unit(1, 2)).unwrap();
        assert_eq!(graph_components(&g), vec![vec![1, 2], vec![3, 5], vec![4]]);
        assert_eq!(reachable_nodes(&g, &3), vec![3, 5]);
        assert!(reachable_nodes(&g, &9).is_empty());
    }

    #[test]
    fn face_patches() {
        let m = PolygonMesh::from_triangles(&[[0, 1, 2], [3, 4, 5], [2, 1, 6]]).unwrap();
        let comps = face_components(&m);
        assert_eq!(
            comps,
            vec![vec![FaceId::new(0), FaceId::new(2)], vec![FaceId::new(1)]]
        );
        assert_eq!(reachable_faces(&m, FaceId::new(2)), vec![FaceId::new(2), FaceId::new(0)]);
    }
}
