//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wrangle: dataset profiling and cleaning suggestions
#[derive(Parser)]
#[command(name = "wrangle")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a data file and report per-column statistics
    Profile {
        /// Path to the data file (CSV or Excel)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate ranked cleaning suggestions for a data file
    Suggest {
        /// Path to the data file (CSV or Excel)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum number of suggestions to show
        #[arg(short = 'n', long, default_value = "10")]
        max_suggestions: usize,

        /// Rank with the learned model instead of simulation
        #[arg(long)]
        learned: bool,

        /// Persist the learned model at this path (implies --learned)
        #[arg(long, value_name = "MODEL_FILE")]
        model: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply one suggestion and write the cleaned data
    Apply {
        /// Path to the data file (CSV or Excel)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Id of the suggestion to apply, as shown by `suggest`
        #[arg(short, long)]
        pick: usize,

        /// Output path for cleaned data (default: <file>.cleaned.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
