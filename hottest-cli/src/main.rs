//! Binary crate for the `hottest` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Persisting the data-endpoint configuration
//! - Rendering readings to the terminal

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod display;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
