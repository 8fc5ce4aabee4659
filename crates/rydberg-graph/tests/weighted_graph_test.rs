use rydberg_graph::{EdgeKey, Error, WeightedGraph};

#[test]
fn edges_are_undirected_and_keyed_low_to_high() {
    let g = WeightedGraph::from_edges(3, [(2, 0, 1.5)]).unwrap();

    assert!(g.has_edge(0, 2));
    assert!(g.has_edge(2, 0));
    assert_eq!(g.weight(0, 2), Some(1.5));
    assert_eq!(g.weight(2, 0), Some(1.5));
    assert_eq!(g.edges()[0].key, EdgeKey { v: 0, w: 2 });
}

#[test]
fn zero_weights_are_not_edges() {
    let g = WeightedGraph::from_edges(3, [(0, 1, 0.0), (1, 2, 2.0)]).unwrap();

    assert_eq!(g.edge_count(), 1);
    assert!(!g.has_edge(0, 1));
    assert!(g.is_isolated(0));
}

#[test]
fn edge_order_is_stable_regardless_of_insertion_order() {
    let a = WeightedGraph::from_edges(4, [(2, 3, 1.0), (0, 1, 2.0), (1, 3, 3.0)]).unwrap();
    let b = WeightedGraph::from_edges(4, [(1, 3, 3.0), (3, 2, 1.0), (1, 0, 2.0)]).unwrap();

    let keys_a: Vec<EdgeKey> = a.edges().iter().map(|e| e.key).collect();
    let keys_b: Vec<EdgeKey> = b.edges().iter().map(|e| e.key).collect();
    assert_eq!(keys_a, keys_b);
    assert_eq!(
        keys_a,
        vec![EdgeKey::new(0, 1), EdgeKey::new(1, 3), EdgeKey::new(2, 3)]
    );
}

#[test]
fn neighbors_are_ascending_with_weights() {
    let g = WeightedGraph::from_edges(4, [(2, 3, 7.0), (0, 2, 1.0), (1, 2, 4.0)]).unwrap();

    let n: Vec<(usize, f64)> = g.neighbors(2).collect();
    assert_eq!(n, vec![(0, 1.0), (1, 4.0), (3, 7.0)]);
    assert_eq!(g.degree(2), 3);
    assert_eq!(g.incident_weight(2), 12.0);
    assert_eq!(g.incident_weight(0), 1.0);
}

#[test]
fn neighbors_of_unknown_nodes_are_empty() {
    let g = WeightedGraph::new(2);
    assert_eq!(g.neighbors(5).count(), 0);
    assert_eq!(g.degree(5), 0);
    assert_eq!(g.incident_weight(5), 0.0);
}

#[test]
fn rejects_out_of_range_endpoints() {
    let err = WeightedGraph::from_edges(2, [(0, 2, 1.0)]).unwrap_err();
    assert_eq!(
        err,
        Error::MissingEndpoint {
            v: 0,
            w: 2,
            node_count: 2
        }
    );
}

#[test]
fn rejects_self_loops_and_bad_weights() {
    assert_eq!(
        WeightedGraph::from_edges(2, [(1, 1, 1.0)]).unwrap_err(),
        Error::SelfLoop { node: 1 }
    );
    assert!(matches!(
        WeightedGraph::from_edges(2, [(0, 1, -1.0)]).unwrap_err(),
        Error::InvalidWeight { v: 0, w: 1, .. }
    ));
    assert!(matches!(
        WeightedGraph::from_edges(2, [(0, 1, f64::NAN)]).unwrap_err(),
        Error::InvalidWeight { .. }
    ));
}

#[test]
fn rejects_duplicate_pairs() {
    let err = WeightedGraph::from_edges(3, [(0, 1, 1.0), (1, 0, 1.0)]).unwrap_err();
    assert_eq!(err, Error::DuplicateEdge { v: 0, w: 1 });
}

#[test]
fn edge_key_other_endpoint() {
    let k = EdgeKey::new(4, 1);
    assert_eq!(k.other(1), Some(4));
    assert_eq!(k.other(4), Some(1));
    assert_eq!(k.other(2), None);
}
