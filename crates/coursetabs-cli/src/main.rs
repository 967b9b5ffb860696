//! Course tabs CLI.
//!
//! Provides commands for:
//! - `validate`: Check a persisted tab list
//! - `show`: List the tabs a viewer sees for a course
//! - `defaults`: Print a course's tab list with default tabs appended

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DefaultsArgs, ShowArgs, ValidateArgs};
use output::Output;

/// Course tabs - validate and render course navigation tabs.
#[derive(Parser)]
#[command(name = "coursetabs", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON tab list.
    Validate(ValidateArgs),
    /// Show the tabs a viewer sees for a course.
    Show(ShowArgs),
    /// Print a course's tabs after default initialization.
    Defaults(DefaultsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate(args) => args.execute(),
        Commands::Show(args) => args.execute(),
        Commands::Defaults(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
