use std::collections::HashSet;

use smallworld_core::Graph;

/// Asserts the simple-graph invariants every generated graph must satisfy.
pub fn assert_simple_graph(graph: &Graph) {
    let mut seen = HashSet::new();
    for (left, right) in graph.edges() {
        assert!(left < right, "edge ({left}, {right}) must be reported low-high");
        assert!(right < graph.node_count(), "edge ({left}, {right}) out of range");
        assert!(seen.insert((left, right)), "edge ({left}, {right}) repeated");
    }
    assert_eq!(seen.len(), graph.edge_count());
    let degree_sum: usize = graph.nodes().map(|node| graph.degree(node)).sum();
    assert_eq!(degree_sum, 2 * graph.edge_count());
}

/// Hop distance between two positions on a ring of `node_count` nodes.
#[must_use]
pub fn ring_distance(node_count: usize, left: usize, right: usize) -> usize {
    let forward = (right + node_count - left) % node_count;
    forward.min(node_count - forward)
}
