//! Summary statistics over a [`Graph`].
//!
//! Covers the usual small-world diagnostics: degree distribution, average
//! clustering coefficient, and average shortest path length.

use rayon::prelude::*;
use smallworld_core::{Graph, bfs_distances};
use thiserror::Error;
use tracing::instrument;

/// Errors raised when a statistic is undefined for the given graph.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MetricsError {
    /// The graph has no nodes.
    #[error("graph has no nodes")]
    EmptyGraph,
    /// Path lengths are undefined between components.
    #[error("graph is not connected ({components} components)")]
    Disconnected {
        /// Number of connected components found.
        components: usize,
    },
}

/// Headline statistics for a generated graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphSummary {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of undirected edges.
    pub edge_count: usize,
    /// Mean node degree, `2m / n`.
    pub average_degree: f64,
    /// Node counts indexed by degree.
    pub degree_histogram: Vec<usize>,
    /// Mean local clustering coefficient.
    pub average_clustering: f64,
    /// Mean hop distance over all ordered node pairs.
    pub average_shortest_path_length: f64,
}

/// Computes every statistic in [`GraphSummary`].
///
/// # Errors
/// Returns [`MetricsError::EmptyGraph`] for a graph without nodes and
/// [`MetricsError::Disconnected`] when path lengths are undefined.
///
/// # Examples
/// ```
/// use smallworld_core::Graph;
/// use smallworld_metrics::summarise;
///
/// let triangle = Graph::try_from_edges(3, [(0, 1), (1, 2), (2, 0)])?;
/// let summary = summarise(&triangle)?;
/// assert_eq!(summary.degree_histogram, [0, 0, 3]);
/// assert_eq!(summary.average_clustering, 1.0);
/// assert_eq!(summary.average_shortest_path_length, 1.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "metrics.summarise",
    err,
    skip(graph),
    fields(nodes = graph.node_count(), edges = graph.edge_count()),
)]
pub fn summarise(graph: &Graph) -> Result<GraphSummary, MetricsError> {
    let average_shortest_path_length = average_shortest_path_length(graph)?;
    Ok(GraphSummary {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        average_degree: average_degree(graph)?,
        degree_histogram: degree_histogram(graph),
        average_clustering: average_clustering(graph)?,
        average_shortest_path_length,
    })
}

/// Returns `2m / n`.
///
/// # Errors
/// Returns [`MetricsError::EmptyGraph`] when the graph has no nodes.
pub fn average_degree(graph: &Graph) -> Result<f64, MetricsError> {
    if graph.node_count() == 0 {
        return Err(MetricsError::EmptyGraph);
    }
    Ok((2 * graph.edge_count()) as f64 / graph.node_count() as f64)
}

/// Counts nodes by degree; entry `d` holds the number of nodes of degree `d`.
/// The vector ends at the maximum degree.
#[must_use]
pub fn degree_histogram(graph: &Graph) -> Vec<usize> {
    let mut histogram = Vec::new();
    for node in graph.nodes() {
        let degree = graph.degree(node);
        if histogram.len() <= degree {
            histogram.resize(degree + 1, 0);
        }
        histogram[degree] += 1;
    }
    histogram
}

/// Fraction of a node's neighbour pairs that are themselves adjacent.
/// Nodes with fewer than two neighbours score zero.
#[must_use]
pub fn local_clustering(graph: &Graph, node: usize) -> f64 {
    let neighbours: Vec<usize> = graph.neighbours(node).collect();
    let degree = neighbours.len();
    if degree < 2 {
        return 0.0;
    }
    let links = neighbours
        .iter()
        .enumerate()
        .map(|(index, &left)| {
            neighbours[index + 1..]
                .iter()
                .filter(|&&right| graph.contains_edge(left, right))
                .count()
        })
        .sum::<usize>();
    (2 * links) as f64 / (degree * (degree - 1)) as f64
}

/// Mean of [`local_clustering`] over every node.
///
/// # Errors
/// Returns [`MetricsError::EmptyGraph`] when the graph has no nodes.
pub fn average_clustering(graph: &Graph) -> Result<f64, MetricsError> {
    if graph.node_count() == 0 {
        return Err(MetricsError::EmptyGraph);
    }
    let total: f64 = graph
        .nodes()
        .map(|node| local_clustering(graph, node))
        .sum();
    Ok(total / graph.node_count() as f64)
}

/// Mean shortest-path hop count over all ordered pairs of distinct nodes,
/// from one breadth-first search per source. A single node scores zero.
///
/// # Errors
/// Returns [`MetricsError::EmptyGraph`] for a graph without nodes and
/// [`MetricsError::Disconnected`] when some pair is unreachable.
#[instrument(
    name = "metrics.average_shortest_path_length",
    err,
    skip(graph),
    fields(nodes = graph.node_count()),
)]
pub fn average_shortest_path_length(graph: &Graph) -> Result<f64, MetricsError> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Err(MetricsError::EmptyGraph);
    }
    if node_count == 1 {
        return Ok(0.0);
    }
    if !graph.is_connected() {
        return Err(MetricsError::Disconnected {
            components: graph.component_count(),
        });
    }

    let total: u64 = graph
        .nodes()
        .into_par_iter()
        .map(|source| {
            bfs_distances(graph, source)
                .into_iter()
                .flatten()
                .map(|distance| distance as u64)
                .sum::<u64>()
        })
        .sum();
    let pairs = node_count as u64 * (node_count as u64 - 1);
    Ok(total as f64 / pairs as f64)
}
