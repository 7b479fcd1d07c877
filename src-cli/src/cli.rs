//! CLI argument parsing for ollama-catalog

use clap::Parser;
use std::path::PathBuf;

/// Scrape ollama.com library tag pages into cleaned, sorted JSON catalogs
#[derive(Parser, Debug)]
#[command(name = "ollama-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    ///
    /// Defaults to config.yaml in the ollama-catalog config directory
    /// (~/.ollama-catalog, override the directory with OLLAMA_CATALOG_ENV).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rewrite catalogs whose output file already exists
    ///
    /// Without this flag a family whose catalog file is already present is
    /// skipped entirely (no merge, no refresh).
    #[arg(long)]
    pub force: bool,

    /// Process only the configured entries with this family key
    ///
    /// Example: --only deepseek
    #[arg(long)]
    pub only: Option<String>,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
