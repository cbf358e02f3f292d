//! Archivist CLI binary.
//!
//! This binary provides command-line access to the usage-tier engine:
//! - Classify research queries and shape answers
//! - Record delivered answers
//! - Summarize a user's day

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, handle_command};

    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    handle_command(cli)?;

    Ok(())
}
