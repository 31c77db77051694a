//! Command-line interface for chord-search.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Rank stored chords against a (partial) fingering
//! - **catalog**: List, export, or add to the chord catalog
//! - **serve**: Start the web interface
//!
//! ## Usage
//!
//! ```text
//! # Chords with the b string on fret 2, closest first
//! chord-search search guitar b2
//!
//! # Every guitar chord as JSON
//! chord-search search guitar all --format json
//!
//! # Add a chord to a custom catalog
//! chord-search catalog add --catalog my.json --instrument guitar \
//!     --chord A --modifier major --frets e0b2g2D2A0E0
//!
//! # Start web UI
//! chord-search serve --port 8080 --open
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod catalog;
pub mod search;

#[derive(Parser)]
#[command(name = "chord-search")]
#[command(version)]
#[command(about = "Look up chord fingerings ranked by similarity to a partial fingering")]
#[command(
    long_about = "chord-search finds stored chord fingerings that match a partial fingering such as 'b2g2'.\n\nResults are ranked by fret distance to the query, then by how common the chord type is."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank stored chords against a fingering query
    Search(search::SearchArgs),

    /// Manage the chord catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Base URL for canonical chord links (defaults to http://<address>:<port>)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
