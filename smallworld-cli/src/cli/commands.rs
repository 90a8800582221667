//! Command implementations and argument parsing for the smallworld CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use smallworld_core::{
    DEFAULT_MAX_TRIES, GenerationParameters, Graph, SmallWorldError, SmallWorldGenerator,
};
use smallworld_graphml::{GraphmlError, GraphmlWriter};
use smallworld_metrics::{GraphSummary, MetricsError, summarise};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_NODE_COUNT: usize = 2000;
const DEFAULT_NEIGHBOUR_DEGREE: usize = 4;
const DEFAULT_REWIRE_PROBABILITY: f64 = 0.25;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "smallworld",
    about = "Generate connected small-world networks for agent-based simulation."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a connected Watts–Strogatz graph and export it as GraphML.
    Generate(GenerateCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of nodes on the ring.
    #[arg(long, default_value_t = DEFAULT_NODE_COUNT)]
    pub nodes: usize,

    /// Ring neighbours joined to each node (rounded down to even).
    #[arg(long, default_value_t = DEFAULT_NEIGHBOUR_DEGREE)]
    pub neighbours: usize,

    /// Probability of rewiring each ring edge into a random shortcut.
    #[arg(long = "rewire-probability", default_value_t = DEFAULT_REWIRE_PROBABILITY)]
    pub rewire_probability: f64,

    /// Regeneration attempts allowed before giving up on connectivity.
    #[arg(long = "max-tries", default_value_t = DEFAULT_MAX_TRIES)]
    pub max_tries: usize,

    /// Seed for reproducible output (defaults to OS entropy).
    #[arg(long)]
    pub seed: Option<u64>,

    /// GraphML destination (defaults to `SmallWorld-<nodes>Nodes.graphml`).
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Graph name stored in the GraphML file (defaults to a parameter summary).
    #[arg(long)]
    pub name: Option<String>,

    /// Skip clustering and path-length statistics.
    #[arg(long = "skip-metrics")]
    pub skip_metrics: bool,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Generation was rejected or exhausted its retry budget.
    #[error(transparent)]
    Core(#[from] SmallWorldError),
    /// Writing the GraphML output failed.
    #[error(transparent)]
    Graphml(#[from] GraphmlError),
    /// A statistic was undefined for the generated graph.
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

/// Outcome of a `generate` command.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Name written into the GraphML document.
    pub graph_name: String,
    /// Where the GraphML document was written.
    pub output: PathBuf,
    /// Number of nodes generated.
    pub nodes: usize,
    /// Number of edges generated.
    pub edges: usize,
    /// Statistics, unless skipped.
    pub metrics: Option<GraphSummary>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when generation, export, or summarisation fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use smallworld_cli::cli::{Cli, Command, GenerateCommand, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         nodes: 20,
///         neighbours: 4,
///         rewire_probability: 0.25,
///         max_tries: 50,
///         seed: Some(42),
///         output: Some(dir.path().join("net.graphml")),
///         name: None,
///         skip_metrics: false,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.edges, 40);
/// assert!(summary.output.exists());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<GenerationSummary, CliError> {
    match cli.command {
        Command::Generate(generate) => {
            Span::current().record("command", field::display("generate"));
            run_generate(generate)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(output = field::Empty, seeded = command.seed.is_some()),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<GenerationSummary, CliError> {
    let params = GenerationParameters::new(
        command.nodes,
        command.neighbours,
        command.rewire_probability,
    )
    .with_max_tries(command.max_tries)
    .with_optional_seed(command.seed);
    let generator = SmallWorldGenerator::new(params)?;
    let output = derive_output_path(command.output.as_deref(), command.nodes);
    Span::current().record("output", field::display(output.display()));

    let graph = generator.generate()?;
    let graph_name = command
        .name
        .unwrap_or_else(|| generator.parameters().to_string());
    export(&graph, &graph_name, &output)?;

    let metrics = if command.skip_metrics {
        None
    } else {
        Some(summarise(&graph)?)
    };

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        output = %output.display(),
        "command completed"
    );
    Ok(GenerationSummary {
        graph_name,
        output,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        metrics,
    })
}

fn export(graph: &Graph, graph_name: &str, output: &Path) -> Result<(), CliError> {
    GraphmlWriter::new()
        .with_graph_name(graph_name)
        .write_file(graph, output)?;
    Ok(())
}

pub(super) fn derive_output_path(output: Option<&Path>, nodes: usize) -> PathBuf {
    output.map_or_else(
        || PathBuf::from(format!("SmallWorld-{nodes}Nodes.graphml")),
        Path::to_path_buf,
    )
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use smallworld_cli::cli::{GenerationSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = GenerationSummary {
///     graph_name: "demo".into(),
///     output: "demo.graphml".into(),
///     nodes: 5,
///     edges: 5,
///     metrics: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "name: demo\noutput: demo.graphml\nnodes: 5\nedges: 5\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &GenerationSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "name: {}", summary.graph_name)?;
    writeln!(writer, "output: {}", summary.output.display())?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "edges: {}", summary.edges)?;
    if let Some(metrics) = &summary.metrics {
        writeln!(writer, "average degree: {:.4}", metrics.average_degree)?;
        writeln!(writer, "degree histogram: {:?}", metrics.degree_histogram)?;
        writeln!(
            writer,
            "clustering coefficient: {:.4}",
            metrics.average_clustering
        )?;
        writeln!(
            writer,
            "average shortest path length: {:.4}",
            metrics.average_shortest_path_length
        )?;
    }
    Ok(())
}
