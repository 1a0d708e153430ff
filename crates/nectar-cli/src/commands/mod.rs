//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `generate` - Report generation from snapshot files
//! - `benchmarks` - Benchmark table listing
//! - `periods` - Quarterly comparison period lookup
//! - `config` - Resolved configuration display
//!
//! Shared loading helpers (`load_config`, `load_snapshot`) live here.

pub mod benchmarks;
pub mod config;
pub mod generate;
pub mod periods;

// Re-export command functions for main.rs
pub use benchmarks::*;
pub use config::*;
pub use generate::*;
pub use periods::*;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use nectar_core::{AnalysisConfig, MetricSnapshot};

/// Load the analysis config, overlaying the override file when there is one
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    AnalysisConfig::load(path).context("Failed to load analysis config")
}

/// Read and validate a snapshot JSON file
pub fn load_snapshot(path: &Path) -> Result<MetricSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    MetricSnapshot::from_json(&content)
        .with_context(|| format!("Invalid snapshot {}", path.display()))
}
