//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vitrine - media asset catalog with version resolution
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(about = "Browse, prune, and delete media assets across local and object store backends", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file to use instead of the layered defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of the catalog as JSON
    List {
        /// Backend preference: auto, local, or object-store
        #[arg(long, default_value = "auto")]
        platform: String,

        /// 1-indexed page number
        #[arg(long, default_value = "1")]
        page: usize,

        /// Page size (clamped to the configured bounds)
        #[arg(long)]
        limit: Option<usize>,

        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive substring of the display filename
        #[arg(long)]
        search: Option<String>,
    },

    /// Show which storage backends this deployment can use
    Capabilities,

    /// Delete assets by URL, reporting each one
    Delete {
        /// Asset URLs
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// List superseded versions, optionally deleting them
    Superseded {
        /// Backend preference: auto, local, or object-store
        #[arg(long, default_value = "auto")]
        platform: String,

        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,

        /// Delete the superseded versions
        #[arg(long)]
        prune: bool,

        /// With --prune, report what would be deleted without deleting
        #[arg(long, requires = "prune")]
        dry_run: bool,
    },
}
