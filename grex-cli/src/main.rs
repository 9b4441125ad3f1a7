//! grex CLI - replay graph exploration sessions through the vertex-edge cache
//!
//! Reads recorded fetch sessions (JSON Lines) and reports what the cache
//! knows: enriched vertices, per-vertex completeness, and which vertices
//! still need an edge fetch.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;
mod session;

use commands::pending::DirectionFilter;
use commands::*;
use config::GrexConfig;
use output::{OutputConfig, OutputFormat};

/// Replay graph exploration sessions through the vertex-edge cache.
#[derive(Parser)]
#[command(name = "grex")]
#[command(author, version)]
#[command(about = "Replay graph exploration sessions through the vertex-edge cache")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  grex replay session.jsonl              Show every enrich result
  grex status session.jsonl              List cached vertices and counters
  grex pending session.jsonl -d out      Vertices still missing out-edges")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Single-line JSON and borderless tables
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session and show the result of every enrich event
    Replay {
        /// Session file (JSON Lines)
        session: PathBuf,
    },

    /// Replay a session and list every cached vertex
    #[command(visible_alias = "st")]
    Status {
        /// Session file (JSON Lines)
        session: PathBuf,
    },

    /// Replay a session and list vertices that still need an edge fetch
    Pending {
        /// Session file (JSON Lines)
        session: PathBuf,

        /// Edge direction(s) to check
        #[arg(short, long, value_enum, default_value = "both")]
        direction: DirectionFilter,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: completions::Shell,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .grexrc.toml
    let config = GrexConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }
    let compact = cli.compact || config.compact_output();
    let output = OutputConfig::auto_detect(format, config.use_color(), compact);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Replay { session } => replay::run(&session, &config, output).await,
        Commands::Status { session } => status::run(&session, &config, output).await,
        Commands::Pending { session, direction } => {
            pending::run(&session, direction, &config, output).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            completions::generate_to(shell, &mut cmd, &mut std::io::stdout());
            Ok(())
        }
    }
}
