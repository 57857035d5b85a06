//! Bench Report Diff CLI
//!
//! Compares benchmark reports from a baseline run and a new run and writes
//! a single `DiffReport.csv`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use bench_report_diff::commands::{
    display_units, display_version, execute_compare, validate_args, CompareArgs,
};
use bench_report_diff::utils::config::DEFAULT_COLUMNS;

/// Bench Report Diff - compare benchmark reports between runs
#[derive(Parser, Debug)]
#[command(name = "bench-diff")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Diff every baseline report against its namesake in the new directory
    Compare {
        /// Directory with the baseline *-report.csv files
        #[arg(short, long, env = "BENCH_DIFF_BASE")]
        base: PathBuf,

        /// Directory with the new *-report.csv files
        #[arg(short, long, env = "BENCH_DIFF_NEW")]
        new: PathBuf,

        /// Directory for DiffReport.csv (defaults to the current directory)
        #[arg(short, long, env = "BENCH_DIFF_OUT")]
        out: Option<PathBuf>,

        /// Directory of JSON threshold files
        #[arg(short, long, env = "BENCH_DIFF_THRESHOLD")]
        threshold: Option<PathBuf>,

        /// Comma-separated columns to compare
        #[arg(long, default_value = DEFAULT_COLUMNS)]
        columns: String,

        /// Prefix methods with their report name instead of failing on duplicates
        #[arg(long)]
        qualify_duplicates: bool,
    },

    /// Display the recognized units
    Units,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Compare {
            base,
            new,
            out,
            threshold,
            columns,
            qualify_duplicates,
        } => {
            let args = CompareArgs {
                base_dir: base,
                new_dir: new,
                output_dir: out,
                threshold_dir: threshold,
                columns,
                qualify_duplicates,
            };

            // Validate args first
            validate_args(&args)?;

            let written = execute_compare(args)?;
            info!("✓ Diff written to: {}", written.display());
        }

        Commands::Units => {
            display_units();
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
