//! Small helpers shared across CLI tests.

use std::path::PathBuf;

use tempfile::TempDir;

use super::{Cli, CliError, Command, GenerateCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// A seeded 20-node command writing into `output`.
pub(super) fn small_command(output: PathBuf) -> GenerateCommand {
    GenerateCommand {
        nodes: 20,
        neighbours: 4,
        rewire_probability: 0.25,
        max_tries: 50,
        seed: Some(42),
        output: Some(output),
        name: None,
        skip_metrics: false,
    }
}

pub(super) fn generate_cli(command: GenerateCommand) -> Cli {
    Cli {
        command: Command::Generate(command),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
