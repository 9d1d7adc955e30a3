use std::collections::BTreeSet;

use morphology_mesh::graph::{Edge, Graph, Node};
use morphology_mesh::mesh_error::MeshError;
use morphology_mesh::DebugInvariants;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    AddNode(u8),
    AddEdge(u8, u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12).prop_map(Op::AddNode),
        (0u8..12, 0u8..12).prop_map(|(a, b)| Op::AddEdge(a, b)),
    ]
}

fn edge_snapshot(g: &Graph<u8>) -> Vec<(u8, u8)> {
    g.edges().iter().map(|e| (e.source, e.target)).collect()
}

#[test]
fn diamond_end_to_end() {
    let mut g: Graph<&str> = Graph::new();
    for k in ["A", "B", "C", "D"] {
        g.add_node(Node::bare(k)).unwrap();
    }
    for (a, b) in [("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")] {
        g.add_edge(Edge::unit(a, b)).unwrap();
    }
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 4);
    for n in g.nodes() {
        assert_eq!(n.degree(), 2, "node {}", n.key());
    }
    assert_eq!(g.connected_components(), vec![vec!["A", "B", "C", "D"]]);
    g.validate_invariants().unwrap();
}

#[test]
fn rejected_edge_reports_missing_endpoint() {
    let mut g: Graph<u32> = Graph::new();
    g.add_node(Node::bare(1)).unwrap();
    let err = g.add_edge(Edge::unit(7, 1)).unwrap_err();
    assert!(matches!(err, MeshError::DanglingEdge { ref missing, .. } if missing == "7"));
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.degree(&1), Some(0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn incidence_matches_edge_list(ops in prop::collection::vec(op(), 0..60)) {
        let mut g: Graph<u8> = Graph::new();
        let mut keys = BTreeSet::new();

        for op in ops {
            match op {
                Op::AddNode(k) => {
                    let fresh = keys.insert(k);
                    prop_assert_eq!(g.add_node(Node::bare(k)).is_ok(), fresh);
                }
                Op::AddEdge(a, b) => {
                    let before = edge_snapshot(&g);
                    let res = g.add_edge(Edge::unit(a, b));
                    if keys.contains(&a) && keys.contains(&b) {
                        prop_assert_eq!(res, Ok(before.len()));
                    } else {
                        prop_assert!(
                            matches!(res, Err(MeshError::DanglingEdge { .. })),
                            "expected a dangling-edge error",
                        );
                        prop_assert_eq!(edge_snapshot(&g), before);
                    }
                }
            }
        }

        prop_assert_eq!(g.node_count(), keys.len());
        prop_assert!(g.validate_invariants().is_ok());
        for (idx, e) in g.edges().iter().enumerate() {
            for n in g.nodes() {
                let listed = n.incident_edges().contains(&idx);
                let endpoint = e.source == *n.key() || e.target == *n.key();
                prop_assert_eq!(listed, endpoint);
            }
        }
    }
}
