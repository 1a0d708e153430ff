//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nectar - Quarterly web analytics insights for nonprofits
#[derive(Parser)]
#[command(name = "nectar")]
#[command(about = "Nonprofit web analytics insight reporter", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analysis config override (TOML)
    ///
    /// Defaults to ~/.local/share/nectar/config/analysis.toml when present,
    /// otherwise the built-in thresholds and benchmarks are used.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a report from two snapshot files
    Generate {
        /// Current period snapshot (JSON)
        #[arg(long)]
        current: PathBuf,

        /// Prior period snapshot (JSON)
        #[arg(long)]
        prior: PathBuf,

        /// Client name or identifier
        #[arg(long)]
        client: String,

        /// Quarter being reported (Q1-Q4), used for period labels
        #[arg(short, long, requires = "year")]
        quarter: Option<String>,

        /// Year of the reported quarter
        #[arg(short, long, requires = "quarter")]
        year: Option<i32>,

        /// Comparison type: yoy (year over year) or qoq (quarter over quarter)
        #[arg(long, default_value = "yoy")]
        comparison: String,

        /// Minimum percent change treated as significant
        #[arg(long)]
        significant_threshold: Option<f64>,

        /// Percent change flagged as anomalous
        #[arg(long)]
        anomaly_threshold: Option<f64>,

        /// Insights per category in the executive summary
        #[arg(long)]
        top: Option<usize>,

        /// Export formats: all, json, csv, none
        #[arg(short, long, default_value = "all")]
        export: String,

        /// Directory for exported files
        #[arg(short, long, default_value = "reports")]
        output_dir: PathBuf,
    },

    /// List benchmark reference values
    Benchmarks,

    /// Show the comparison periods for a quarter
    Periods {
        /// Quarter (Q1-Q4)
        quarter: String,

        /// Year
        year: i32,

        /// Comparison type: yoy or qoq
        #[arg(long, default_value = "yoy")]
        comparison: String,
    },

    /// Show the resolved analysis configuration
    Config,
}
