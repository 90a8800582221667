//! Breadth-first traversal over a [`Graph`].

use std::collections::VecDeque;

use crate::Graph;

/// Returns the hop distance from `source` to every node, or `None` for nodes
/// that cannot be reached. An out-of-range `source` reaches nothing.
///
/// # Examples
/// ```
/// use smallworld_core::{Graph, bfs_distances};
///
/// let path = Graph::try_from_edges(4, [(0, 1), (1, 2)])?;
/// assert_eq!(bfs_distances(&path, 0), [Some(0), Some(1), Some(2), None]);
/// # Ok::<(), smallworld_core::GraphError>(())
/// ```
#[must_use]
pub fn bfs_distances(graph: &Graph, source: usize) -> Vec<Option<usize>> {
    let mut distances = vec![None; graph.node_count()];
    let Some(slot) = distances.get_mut(source) else {
        return distances;
    };
    *slot = Some(0);

    let mut frontier = VecDeque::from([(source, 0_usize)]);
    while let Some((node, distance)) = frontier.pop_front() {
        for neighbour in graph.neighbours(node) {
            if distances[neighbour].is_none() {
                distances[neighbour] = Some(distance + 1);
                frontier.push_back((neighbour, distance + 1));
            }
        }
    }
    distances
}

/// Counts the nodes reachable from `source`, including `source` itself.
#[must_use]
pub fn reachable_count(graph: &Graph, source: usize) -> usize {
    if source >= graph.node_count() {
        return 0;
    }
    let mut visited = vec![false; graph.node_count()];
    visited[source] = true;
    let mut stack = vec![source];
    let mut count = 1;
    while let Some(node) = stack.pop() {
        for neighbour in graph.neighbours(node) {
            if !visited[neighbour] {
                visited[neighbour] = true;
                count += 1;
                stack.push(neighbour);
            }
        }
    }
    count
}

pub(crate) fn is_connected(graph: &Graph) -> bool {
    graph.node_count() > 0 && reachable_count(graph, 0) == graph.node_count()
}
