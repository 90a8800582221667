//! Connected Watts–Strogatz generation.
//!
//! Each attempt lays out a ring lattice, rewires its edges into random
//! shortcuts, and checks connectivity. Attempts share one random stream, so a
//! seed fixes the whole sequence of attempts, not only the first.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{Span, debug, field, info, instrument, warn};

use crate::{Graph, Result, error::SmallWorldError, params::GenerationParameters};

/// Produces connected small-world graphs from validated
/// [`GenerationParameters`].
///
/// # Examples
/// ```
/// use smallworld_core::{GenerationParameters, SmallWorldGenerator};
///
/// let generator = SmallWorldGenerator::new(
///     GenerationParameters::new(20, 4, 0.25).with_max_tries(50).with_seed(42),
/// )?;
/// let graph = generator.generate()?;
/// assert_eq!(graph.node_count(), 20);
/// assert_eq!(graph.edge_count(), 40);
/// assert!(graph.is_connected());
/// # Ok::<(), smallworld_core::SmallWorldError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SmallWorldGenerator {
    params: GenerationParameters,
}

impl SmallWorldGenerator {
    /// Validates `params` and wraps them in a generator.
    ///
    /// # Errors
    /// Returns [`SmallWorldError::InvalidParameters`] when
    /// [`GenerationParameters::validate`] rejects the configuration.
    pub fn new(params: GenerationParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Returns the parameters every attempt uses.
    #[must_use]
    pub fn parameters(&self) -> &GenerationParameters {
        &self.params
    }

    /// Generates a graph using a stream seeded from the configured seed, or
    /// from OS entropy when no seed was given.
    ///
    /// # Errors
    /// Returns [`SmallWorldError::GenerationExhausted`] when no attempt within
    /// the retry budget is connected.
    pub fn generate(&self) -> Result<Graph> {
        let mut rng = match self.params.seed() {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.generate_with_rng(&mut rng)
    }

    /// Generates a graph drawing every random decision from `rng`.
    ///
    /// The configured seed is ignored; the caller owns the stream.
    ///
    /// # Errors
    /// Returns [`SmallWorldError::GenerationExhausted`] when no attempt within
    /// the retry budget is connected.
    #[instrument(
        name = "core.generate",
        err,
        skip(self, rng),
        fields(
            node_count = self.params.node_count(),
            neighbour_degree = self.params.neighbour_degree(),
            rewire_probability = self.params.rewire_probability(),
            max_tries = self.params.max_tries(),
            tries = field::Empty,
        ),
    )]
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Graph> {
        let max_tries = self.params.max_tries();
        for attempt in 1..=max_tries {
            let graph = self.attempt(rng);
            record_attempt();
            if graph.is_connected() {
                Span::current().record("tries", attempt);
                info!(
                    tries = attempt,
                    edges = graph.edge_count(),
                    "connected small-world graph generated"
                );
                return Ok(graph);
            }
            debug!(
                attempt,
                components = graph.component_count(),
                "graph is disconnected, regenerating"
            );
        }

        Span::current().record("tries", max_tries);
        warn!(tries = max_tries, "retry budget exhausted without a connected graph");
        record_exhausted();
        Err(SmallWorldError::GenerationExhausted {
            parameters: self.params.clone(),
            tries: max_tries,
        })
    }

    fn attempt<R: Rng + ?Sized>(&self, rng: &mut R) -> Graph {
        let half_degree = self.params.half_degree();
        let mut graph = ring_lattice(self.params.node_count(), half_degree);
        rewire(&mut graph, half_degree, self.params.rewire_probability(), rng);
        graph
    }
}

/// Generates a connected small-world graph in one call.
///
/// # Errors
/// Returns [`SmallWorldError::InvalidParameters`] for rejected parameters and
/// [`SmallWorldError::GenerationExhausted`] when `max_tries` attempts all
/// produce disconnected graphs.
///
/// # Examples
/// ```
/// use smallworld_core::generate;
///
/// let cycle = generate(5, 2, 0.0, 1, Some(1))?;
/// assert_eq!(cycle.edges().collect::<Vec<_>>(), [(0, 1), (0, 4), (1, 2), (2, 3), (3, 4)]);
/// # Ok::<(), smallworld_core::SmallWorldError>(())
/// ```
pub fn generate(
    node_count: usize,
    neighbour_degree: usize,
    rewire_probability: f64,
    max_tries: usize,
    seed: Option<u64>,
) -> Result<Graph> {
    let params = GenerationParameters::new(node_count, neighbour_degree, rewire_probability)
        .with_max_tries(max_tries)
        .with_optional_seed(seed);
    SmallWorldGenerator::new(params)?.generate()
}

/// Joins every node to the `half_degree` nearest nodes on each side of the
/// ring. Requires `2 * half_degree < node_count` so no pair repeats.
fn ring_lattice(node_count: usize, half_degree: usize) -> Graph {
    let mut graph = Graph::empty(node_count);
    for offset in 1..=half_degree {
        for node in 0..node_count {
            graph.insert_edge(node, (node + offset) % node_count);
        }
    }
    graph
}

/// Visits ring edges in construction order and, with `probability`, moves
/// the far endpoint to a uniformly drawn node that is neither the near
/// endpoint nor already adjacent to it.
fn rewire<R: Rng + ?Sized>(graph: &mut Graph, half_degree: usize, probability: f64, rng: &mut R) {
    let node_count = graph.node_count();
    for offset in 1..=half_degree {
        for node in 0..node_count {
            if !rng.gen_bool(probability) {
                continue;
            }
            // Saturated nodes have no valid target; redrawing would never end.
            if graph.degree(node) + 1 >= node_count {
                continue;
            }
            let target = loop {
                let candidate = rng.gen_range(0..node_count);
                if candidate != node && !graph.contains_edge(node, candidate) {
                    break candidate;
                }
            };
            let removed = graph.remove_edge(node, (node + offset) % node_count);
            debug_assert!(removed, "ring edge must be present when its turn comes");
            graph.insert_edge(node, target);
        }
    }
}

#[cfg(feature = "metrics")]
fn record_attempt() {
    metrics::counter!("smallworld_generation_attempts").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_attempt() {}

#[cfg(feature = "metrics")]
fn record_exhausted() {
    metrics::counter!("smallworld_generation_exhausted").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_exhausted() {}
