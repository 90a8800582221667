//! Command-line interface for generating small-world networks.
//!
//! The `generate` command builds a connected Watts–Strogatz graph, exports it
//! as GraphML, and summarises its degree, clustering, and path-length
//! statistics.

mod commands;

pub use commands::{
    Cli, CliError, Command, GenerateCommand, GenerationSummary, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
