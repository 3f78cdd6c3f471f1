//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Infinity List CLI
#[derive(Parser, Debug)]
#[command(name = "infinity-list")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scroll through a feed, loading a page each time the end is reached
    Scroll {
        /// Feed definition file (YAML)
        #[arg(short = 'C', long)]
        config: Option<PathBuf>,

        /// Endpoint URL (overrides the feed file)
        #[arg(long)]
        url: Option<String>,

        /// Query parameter carrying the page index
        #[arg(long)]
        page_param: Option<String>,

        /// JSONPath of the item array in each response
        #[arg(long)]
        items_path: Option<String>,

        /// First page index to request
        #[arg(long)]
        start_page: Option<u32>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u32>,
    },

    /// Validate a feed definition
    Validate {
        /// Feed definition file (YAML)
        #[arg(short = 'C', long)]
        config: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
