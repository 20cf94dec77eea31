//! Binary crate for the `touch-grass` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and resolving the location
//! - Interactive configuration
//! - Human-friendly output formatting

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod render;

fn init_tracing() {
    // Logs go to stderr so the report on stdout stays clean.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cmd = cli::Cli::parse();
    if let Err(err) = cmd.run().await {
        eprintln!("{}", render::error(&err));
        std::process::exit(1);
    }
}
