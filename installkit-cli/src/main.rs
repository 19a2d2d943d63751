//! installkit CLI - install versioned product releases from the terminal.

use clap::{Parser, Subcommand};

mod commands;
mod error;

#[derive(Parser)]
#[command(
    name = "installkit",
    version,
    about = "Download, verify and install product releases"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Download, verify and install the current release
    Install(commands::InstallArgs),
    /// Fetch and display the current release manifest
    Check(commands::CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(args),
        Commands::Check(args) => commands::check::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing output.
///
/// `RUST_LOG` takes precedence; otherwise verbosity flags choose the level.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
