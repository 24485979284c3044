//! Infracheck CLI - assert expected host state against the live machine.

use clap::{Parser, Subcommand};
use infracheck_common::Error;
use infracheck_engine::{run_all, RunOutput};
use infracheck_facts::LocalHost;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "infracheck")]
#[command(
    author,
    version,
    about = "Declarative host-state assertion checker"
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a specification against this host
    Run {
        /// Specification file (YAML)
        #[arg(long, short)]
        spec: PathBuf,

        /// Report only pass/fail totals
        #[arg(long)]
        totals_only: bool,

        /// Output format (json, text)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    match cli.command {
        Commands::Run {
            spec,
            totals_only,
            format,
        } => run(&spec, totals_only, &format),
    }
}

fn run(spec_path: &Path, totals_only: bool, format: &str) -> ExitCode {
    // "Could not run" (exit 2) stays distinct from "ran with failures"
    // (exit 1) so automation can tell the two apart.
    let checks = match infracheck_spec::load_path(spec_path) {
        Ok(checks) => checks,
        Err(Error::SpecUnavailable(reason)) => {
            eprintln!("could not run: {}", reason);
            return ExitCode::from(2);
        }
        Err(e) => {
            eprintln!("could not run: {}", e);
            return ExitCode::from(2);
        }
    };

    info!("evaluating {} against the local host", spec_path.display());

    let host = LocalHost::new();
    let output = run_all(&host, &checks, !totals_only);
    let totals = output.totals();

    match format {
        "json" => match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("could not render output: {}", e);
                return ExitCode::from(2);
            }
        },
        _ => print_text(&output),
    }

    if totals.fail == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn print_text(output: &RunOutput) {
    match output {
        RunOutput::Detailed(report) => {
            for entry in &report.failed {
                println!("FAIL {}", entry);
            }
            for entry in &report.passed {
                println!("PASS {}", entry);
            }
            println!("{} passed, {} failed", report.totals.pass, report.totals.fail);
        }
        RunOutput::Totals(totals) => {
            println!("{} passed, {} failed", totals.pass, totals.fail);
        }
    }
}
