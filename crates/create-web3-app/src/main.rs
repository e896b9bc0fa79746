//! create-web3-app - Scaffold a new web3 application
//!
//! This is the main entry point for the create-web3-app command-line interface.

mod cli;
mod commands;
mod interactive;
mod output;
mod utils;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{partition_args, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Unknown options are dropped instead of rejected
    let args = partition_args(std::env::args_os());
    let cli = Cli::parse_from(args.known);

    init_tracing(cli.verbose, cli.quiet);

    for arg in &args.ignored {
        output::warning(&format!("Ignoring unknown argument: {}", arg));
    }

    commands::create::run(&cli).await
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Progress goes to stdout; logs stay quiet unless asked for
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
