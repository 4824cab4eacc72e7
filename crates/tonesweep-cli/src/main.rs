//! Tonesweep CLI - generate stepped test tones and analyze their recordings.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tonesweep")]
#[command(author, version, about = "Frequency-response test tone generator and analyzer", long_about = None)]
struct Cli {
    /// Log per-stage details (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the spectrum of a recording
    Analyze(commands::analyze::AnalyzeArgs),

    /// Analyze two recordings side by side
    Compare(commands::compare::CompareArgs),

    /// Generate test tones
    Generate(commands::generate::GenerateArgs),

    /// Show WAV file information and sweep metadata
    Info(commands::info::InfoArgs),

    /// Manage the analysis config file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Compare(args) => commands::compare::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
