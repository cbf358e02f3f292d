//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Archivist - usage-tiered answers for historical research
#[derive(Parser, Debug)]
#[command(name = "archivist")]
#[command(about = "Usage-tiered answers for historical research", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding usage records (defaults to the configured path)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Configuration file to use instead of the layered defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a research query and print the response policy
    Ask {
        /// User asking the question
        #[arg(long)]
        user: String,

        /// The research question
        query: String,

        /// Generated answer to shape and record
        #[arg(long, conflicts_with = "words")]
        answer: Option<String>,

        /// Record usage for a generated answer of this many words
        #[arg(long)]
        words: Option<u64>,
    },

    /// Record usage for an answer that was already delivered
    Record {
        /// User the answer went to
        #[arg(long)]
        user: String,

        /// Topic of the query
        #[arg(long, default_value = "")]
        topic: String,

        /// Words delivered
        #[arg(long)]
        words: u64,
    },

    /// Show today's usage and learning path for a user
    Stats {
        /// User to summarize
        #[arg(long)]
        user: String,
    },

    /// Print the effective configuration as TOML
    Config,
}
