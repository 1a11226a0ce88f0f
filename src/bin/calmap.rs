//! Command-line front end for querying a calibration map.
//!
//! Points are given on the command line, so no file format is involved:
//!
//! ```text
//! calmap --point 0:0 --point 10:9 --point 20:21 error 5
//! calmap --point 0:0 --point 10:9 summary
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use calibration_map::calibration::summary::format_general;
use calibration_map::{AppConfig, CalibrationMap};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "calmap",
    about = "Query a piecewise-linear calibration map built from the command line"
)]
struct Cli {
    /// Calibration point as NOMINAL:CALIBRATED (repeatable)
    #[arg(long = "point", value_name = "NOMINAL:CALIBRATED", value_parser = parse_pair, allow_hyphen_values = true)]
    points: Vec<(f64, f64)>,

    /// Precomputed error as NOMINAL:ERROR, merged without overwriting points (repeatable)
    #[arg(long = "merge", value_name = "NOMINAL:ERROR", value_parser = parse_pair, allow_hyphen_values = true)]
    merge: Vec<(f64, f64)>,

    /// JSON configuration file; must exist when given (defaults to assets/calibration_config.json if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit debug logs on stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the calibration table
    Summary,
    /// Print the error value at a nominal position
    Error {
        #[arg(allow_negative_numbers = true)]
        nominal: f64,
    },
    /// Print the corrected position for a nominal position
    Correct {
        #[arg(allow_negative_numbers = true)]
        nominal: f64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("calmap error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load(),
    };

    let mut map: CalibrationMap = cli.points.iter().copied().collect();
    map.append_map(cli.merge.iter().copied());
    tracing::debug!(points = map.len(), "calibration map built");

    let precision = config.summary.precision;
    match cli.command {
        Commands::Summary => {
            let summary = map
                .map_summary_with(&config.summary)
                .context("failed to render summary")?;
            print!("{summary}");
        }
        Commands::Error { nominal } => {
            let error = map
                .error_value(nominal)
                .with_context(|| format!("no error value for nominal {nominal}"))?;
            println!("{}", format_general(error, precision));
        }
        Commands::Correct { nominal } => {
            let corrected = map
                .corrected_position(nominal)
                .with_context(|| format!("no corrected position for nominal {nominal}"))?;
            println!("{}", format_general(corrected, precision));
        }
    }

    Ok(())
}

fn parse_pair(raw: &str) -> std::result::Result<(f64, f64), String> {
    let (first, second) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NOMINAL:VALUE, got `{raw}`"))?;
    let first = first
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid nominal `{first}`: {err}"))?;
    let second = second
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid value `{second}`: {err}"))?;
    Ok((first, second))
}
