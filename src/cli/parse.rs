//! CLI parse: clap types for caconf. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// caconf CLI - context-aware configuration lookups
#[derive(Parser)]
#[command(name = "caconf")]
#[command(about = "Resolve context-aware configuration from a content tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (settings are loaded from <workspace>/config)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Settings file path (overrides layered settings loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Content tree: a .json/.toml content file or a sled store directory
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a configuration as a merged value map
    Resolve {
        /// Context path in the content tree
        #[arg(long)]
        context: String,
        /// Configuration name
        #[arg(long)]
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Resolve each member of a configuration collection
    Collection {
        /// Context path in the content tree
        #[arg(long)]
        context: String,
        /// Collection name
        #[arg(long)]
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Check whether a configuration resource exists in the fallback chain
    Has {
        #[arg(long)]
        context: String,
        #[arg(long)]
        name: String,
    },
    /// List candidate locations in lookup order
    Candidates {
        #[arg(long)]
        context: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Import a JSON or TOML content file into a sled store directory
    Import {
        /// Content file to import
        #[arg(long)]
        from: PathBuf,
        /// Target sled directory
        #[arg(long)]
        db: PathBuf,
    },
}

impl Commands {
    /// Stable command name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Resolve { .. } => "resolve",
            Commands::Collection { .. } => "collection",
            Commands::Has { .. } => "has",
            Commands::Candidates { .. } => "candidates",
            Commands::Import { .. } => "import",
        }
    }
}
