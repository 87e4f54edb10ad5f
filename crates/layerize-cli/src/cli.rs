use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Convert rendered-document snapshots into design layer JSON.
#[derive(Debug, Parser)]
#[command(name = "layerize", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a snapshot file into design layers
    Convert {
        /// Path to the snapshot JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Root selector ('tag', '#id', or '.class'). Default: snapshot root
        #[arg(long)]
        selector: Option<String>,

        /// Emit the reconstructed nested tree instead of the flat sequence
        #[arg(long)]
        nested: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Write output to a file instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Suppress warnings on stderr
        #[arg(long)]
        quiet: bool,
    },

    /// Show snapshot statistics
    Info {
        /// Path to the snapshot JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
