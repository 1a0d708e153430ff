//! Nectar CLI - Nonprofit web analytics insight reporter
//!
//! Usage:
//!   nectar generate --current Q4.json --prior Q4-prev.json --client NAME
//!   nectar benchmarks                  List benchmark reference values
//!   nectar periods Q4 2024             Show comparison periods
//!   nectar config                      Show resolved configuration

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Generate {
            current,
            prior,
            client,
            quarter,
            year,
            comparison,
            significant_threshold,
            anomaly_threshold,
            top,
            export,
            output_dir,
        } => {
            let options = commands::GenerateOptions {
                current,
                prior,
                client,
                quarter,
                year,
                comparison,
                significant_threshold,
                anomaly_threshold,
                top,
                export,
                output_dir,
            };
            commands::cmd_generate(config_path, &options).map(|_| ())
        }
        Commands::Benchmarks => commands::cmd_benchmarks(config_path),
        Commands::Periods {
            quarter,
            year,
            comparison,
        } => commands::cmd_periods(&quarter, year, &comparison),
        Commands::Config => commands::cmd_config(config_path),
    }
}
