//! WiBox CLI - find serial-to-Ethernet bridges on the local network.
//!
//! Sends one discovery broadcast, lists the devices that answer, and lets an
//! operator pick one of them from a numbered menu.

mod cli;
mod commands;
mod error;
mod output;
mod terminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{ChooseArgs, Cli, Commands};
use commands::GlobalArgs;
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Diagnostics go to stderr; RUST_LOG overrides the verbosity flag and
/// WIBOX_LOG_FORMAT=json switches to JSON lines.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if std::env::var("WIBOX_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let globals = GlobalArgs::from_cli(&cli);

    match cli.command {
        Some(Commands::Discover(args)) => commands::run_discover(args, &globals).await,
        Some(Commands::Choose(args)) => commands::run_choose(args, &globals).await,
        None => commands::run_choose(ChooseArgs::default(), &globals).await,
    }
}
