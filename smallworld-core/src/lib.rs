//! Small-world core library.
//!
//! Generates connected Watts–Strogatz graphs: a ring lattice whose edges are
//! rewired into random shortcuts with a fixed probability, regenerated until
//! the result is connected or the retry budget runs out.
//!
//! # Metrics
//!
//! When the `metrics` feature is enabled the generator emits:
//!
//! - `smallworld_generation_attempts` (counter, one per ring-and-rewire attempt)
//! - `smallworld_generation_exhausted` (counter, one per exhausted budget)
#![cfg_attr(docsrs, feature(doc_cfg))]

mod components;
mod error;
mod generator;
mod graph;
mod params;
mod traversal;

pub use crate::{
    error::{GraphError, GraphErrorCode, Result, SmallWorldError, SmallWorldErrorCode},
    generator::{SmallWorldGenerator, generate},
    graph::Graph,
    params::{DEFAULT_MAX_TRIES, GenerationParameters},
    traversal::{bfs_distances, reachable_count},
};
