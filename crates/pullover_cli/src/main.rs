//! Pullover CLI
//!
//! Replays headless gesture scenarios against a refresh container and
//! inspects refresh configuration files.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "pullover")]
#[command(author, version, about = "Pull-to-refresh container diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON gesture scenario and report the outcome
    Replay {
        /// Scenario file
        scenario: PathBuf,

        /// Refresh configuration (refresh.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Logical milliseconds per frame
        #[arg(long, default_value = "16")]
        tick_ms: u64,

        /// Also write the JSON report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Validate a configuration file and print the effective settings
    Config {
        /// Refresh configuration (defaults when omitted)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Replay {
            scenario,
            config,
            tick_ms,
            report,
        } => commands::replay::run(&scenario, config.as_deref(), tick_ms, report.as_deref()),
        Commands::Config { path } => {
            commands::config::run(path.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
