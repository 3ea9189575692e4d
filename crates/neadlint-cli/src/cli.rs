//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// neadlint: validation gate for iCSV/NEAD data files
#[derive(Parser)]
#[command(name = "neadlint")]
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
    /// Validate one or more files and write per-file reports
    Check {
        /// Paths to the data files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Directory for report files (default: next to each input)
        #[arg(short, long)]
        report_dir: Option<PathBuf>,

        /// Print each report to stdout instead of writing files
        #[arg(long)]
        print: bool,
    },

    /// Build the schema for a file and write it as JSON
    Schema {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>.schema.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract the data block as a plain CSV with a header row
    Extract {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>.clean.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
