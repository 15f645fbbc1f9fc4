//! Command-line entry point: JSON in, JSON out.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use route_solver::engine::{SearchParameters, DEFAULT_TIME_LIMIT_SECS};
use route_solver::io::{Input, InputError};
use route_solver::pipeline;

/// Solve a capacitated routing problem described by a JSON document.
///
/// Reads the problem from a file or standard input, searches for routes
/// within the wall-clock budget, and writes the result document to a file
/// or standard output. An infeasible problem is still a successful run;
/// only malformed input or I/O failures exit non-zero.
#[derive(Debug, Parser)]
#[command(name = "route-solver", version)]
struct Cli {
    /// Input file; reads standard input when omitted.
    input: Option<PathBuf>,

    /// Output file; writes standard output when omitted.
    #[arg(short, long, value_name = "path")]
    output: Option<PathBuf>,

    /// Maximum solve duration in seconds.
    #[arg(long, default_value_t = DEFAULT_TIME_LIMIT_SECS, value_name = "seconds")]
    duration: u64,
}

/// Errors emitted by the command-line interface.
#[derive(Debug, Error)]
enum CliError {
    /// Reading the input or writing the output failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// The input document is not valid JSON of the expected shape.
    #[error("invalid input: {0}")]
    Parse(#[from] serde_json::Error),
    /// The input parsed but failed validation.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("route-solver: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let raw = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let input: Input = serde_json::from_str(&raw)?;
    let problem = input.into_problem()?;

    let params =
        SearchParameters::default().with_time_limit(Duration::from_secs(cli.duration));
    let output = pipeline::solve(&problem, &params);
    let rendered = serde_json::to_string_pretty(&output)?;

    match &cli.output {
        Some(path) => fs::write(path, rendered + "\n")?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
