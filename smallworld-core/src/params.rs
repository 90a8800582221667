//! Parameter handling for small-world generation.

use std::fmt;

use crate::{Result, error::SmallWorldError};

/// Attempts made by [`crate::SmallWorldGenerator`] when no budget is given.
pub const DEFAULT_MAX_TRIES: usize = 100;

/// Configuration for a connected Watts–Strogatz generation run.
///
/// The value is inert until handed to [`crate::SmallWorldGenerator::new`],
/// which validates it.
///
/// # Examples
/// ```
/// use smallworld_core::GenerationParameters;
///
/// let params = GenerationParameters::new(2000, 4, 0.25)
///     .with_max_tries(20)
///     .with_seed(7);
/// assert_eq!(params.node_count(), 2000);
/// assert_eq!(params.max_tries(), 20);
/// assert_eq!(params.seed(), Some(7));
/// assert_eq!(params.to_string(), "small_world(n=2000, k=4, p=0.25)");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationParameters {
    node_count: usize,
    neighbour_degree: usize,
    rewire_probability: f64,
    max_tries: usize,
    seed: Option<u64>,
}

impl GenerationParameters {
    /// Creates a parameter set with the default retry budget and no seed.
    #[must_use]
    pub fn new(node_count: usize, neighbour_degree: usize, rewire_probability: f64) -> Self {
        Self {
            node_count,
            neighbour_degree,
            rewire_probability,
            max_tries: DEFAULT_MAX_TRIES,
            seed: None,
        }
    }

    /// Overrides how many full regeneration attempts are allowed.
    #[must_use]
    pub fn with_max_tries(mut self, max_tries: usize) -> Self {
        self.max_tries = max_tries;
        self
    }

    /// Seeds the random stream so generation is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[must_use]
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the number of nodes on the ring.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the requested neighbour degree `k`.
    #[must_use]
    pub fn neighbour_degree(&self) -> usize {
        self.neighbour_degree
    }

    /// Returns the per-edge rewiring probability `p`.
    #[must_use]
    pub fn rewire_probability(&self) -> f64 {
        self.rewire_probability
    }

    /// Returns the retry budget.
    #[must_use]
    pub fn max_tries(&self) -> usize {
        self.max_tries
    }

    /// Returns the seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the degree actually used for ring construction: `k` rounded
    /// down to the nearest even number.
    ///
    /// # Examples
    /// ```
    /// use smallworld_core::GenerationParameters;
    ///
    /// assert_eq!(GenerationParameters::new(10, 5, 0.1).effective_degree(), 4);
    /// assert_eq!(GenerationParameters::new(10, 4, 0.1).effective_degree(), 4);
    /// ```
    #[must_use]
    pub fn effective_degree(&self) -> usize {
        self.neighbour_degree - self.neighbour_degree % 2
    }

    /// Returns the number of ring neighbours joined on each side of a node.
    #[must_use]
    pub fn half_degree(&self) -> usize {
        self.neighbour_degree / 2
    }

    /// Returns the edge count of the ring lattice, which rewiring preserves.
    ///
    /// # Examples
    /// ```
    /// use smallworld_core::GenerationParameters;
    ///
    /// assert_eq!(GenerationParameters::new(20, 4, 0.25).ring_edge_count(), 40);
    /// assert_eq!(GenerationParameters::new(7, 3, 0.25).ring_edge_count(), 7);
    /// ```
    #[must_use]
    pub fn ring_edge_count(&self) -> usize {
        self.node_count * self.half_degree()
    }

    /// Checks the parameters without generating anything.
    ///
    /// # Errors
    /// Returns [`SmallWorldError::InvalidParameters`] when the node count or
    /// retry budget is zero, when `k >= n`, when `p` is not a finite value in
    /// `[0, 1]`, or when `k < 2` on more than one node (the ring would have
    /// no edges and could never be connected).
    pub fn validate(&self) -> Result<()> {
        if self.node_count == 0 {
            return Err(invalid("node_count must be greater than zero".to_owned()));
        }
        if self.neighbour_degree >= self.node_count {
            return Err(invalid(format!(
                "neighbour_degree ({}) must be less than node_count ({})",
                self.neighbour_degree, self.node_count
            )));
        }
        if !self.rewire_probability.is_finite() || !(0.0..=1.0).contains(&self.rewire_probability)
        {
            return Err(invalid(format!(
                "rewire_probability ({}) must lie in [0, 1]",
                self.rewire_probability
            )));
        }
        if self.max_tries == 0 {
            return Err(invalid("max_tries must be greater than zero".to_owned()));
        }
        if self.half_degree() == 0 && self.node_count > 1 {
            return Err(invalid(format!(
                "neighbour_degree ({}) leaves the {}-node ring without edges",
                self.neighbour_degree, self.node_count
            )));
        }
        Ok(())
    }
}

impl fmt::Display for GenerationParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "small_world(n={}, k={}, p={})",
            self.node_count, self.neighbour_degree, self.rewire_probability
        )
    }
}

fn invalid(reason: String) -> SmallWorldError {
    SmallWorldError::InvalidParameters { reason }
}
