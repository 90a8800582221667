//! Undirected simple graph over contiguous node identifiers.
//!
//! Each node owns an ordered neighbour set, so edge iteration, equality, and
//! anything serialised from a [`Graph`] are deterministic.

use std::collections::BTreeSet;

use crate::{components, error::GraphError, traversal};

/// An undirected graph without self-loops or parallel edges on nodes
/// `0..node_count`.
///
/// # Examples
/// ```
/// use smallworld_core::Graph;
///
/// let graph = Graph::try_from_edges(3, [(0, 1), (2, 1)])?;
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.degree(1), 2);
/// assert!(graph.contains_edge(1, 2));
/// assert_eq!(graph.edges().collect::<Vec<_>>(), [(0, 1), (1, 2)]);
/// # Ok::<(), smallworld_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<BTreeSet<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Creates a graph with `node_count` isolated nodes.
    #[must_use]
    pub fn empty(node_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); node_count],
            edge_count: 0,
        }
    }

    /// Builds a graph from an edge list, rejecting anything that would break
    /// the simple-graph invariants.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfBounds`] when an endpoint is not below
    /// `node_count`, [`GraphError::SelfLoop`] for an edge from a node to
    /// itself, and [`GraphError::DuplicateEdge`] when an unordered pair repeats.
    pub fn try_from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::empty(node_count);
        for (left, right) in edges {
            for node in [left, right] {
                if node >= node_count {
                    return Err(GraphError::NodeOutOfBounds { node, node_count });
                }
            }
            if left == right {
                return Err(GraphError::SelfLoop { node: left });
            }
            if !graph.insert_edge(left, right) {
                return Err(GraphError::DuplicateEdge {
                    source_node: left.min(right),
                    target_node: left.max(right),
                });
            }
        }
        Ok(graph)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterates node identifiers in ascending order.
    pub fn nodes(&self) -> std::ops::Range<usize> {
        0..self.adjacency.len()
    }

    /// Iterates every edge once as `(low, high)`, ordered by `low` then
    /// `high`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(node, neighbours)| {
            neighbours
                .range(node + 1..)
                .map(move |&neighbour| (node, neighbour))
        })
    }

    /// Iterates the neighbours of `node` in ascending order. Out-of-range
    /// nodes have no neighbours.
    pub fn neighbours(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|neighbours| neighbours.iter().copied())
    }

    /// Returns the number of edges incident to `node`.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency.get(node).map_or(0, BTreeSet::len)
    }

    /// Returns whether `left` and `right` are joined by an edge.
    #[must_use]
    pub fn contains_edge(&self, left: usize, right: usize) -> bool {
        self.adjacency
            .get(left)
            .is_some_and(|neighbours| neighbours.contains(&right))
    }

    /// Returns whether every node is reachable from node 0.
    ///
    /// A graph without nodes is not considered connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        traversal::is_connected(self)
    }

    /// Counts connected components. Isolated nodes form their own component.
    #[must_use]
    pub fn component_count(&self) -> usize {
        components::count_components(self)
    }

    /// Adds the edge if absent. Returns whether the graph changed.
    ///
    /// Callers guarantee both endpoints are in range and distinct.
    pub(crate) fn insert_edge(&mut self, left: usize, right: usize) -> bool {
        debug_assert!(left != right, "self-loops are not permitted");
        let inserted = self.adjacency[left].insert(right);
        if inserted {
            self.adjacency[right].insert(left);
            self.edge_count += 1;
        }
        inserted
    }

    /// Removes the edge if present. Returns whether the graph changed.
    pub(crate) fn remove_edge(&mut self, left: usize, right: usize) -> bool {
        let removed = self
            .adjacency
            .get_mut(left)
            .is_some_and(|neighbours| neighbours.remove(&right));
        if removed {
            self.adjacency[right].remove(&left);
            self.edge_count -= 1;
        }
        removed
    }
}
