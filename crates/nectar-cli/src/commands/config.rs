//! Configuration display command

use std::path::Path;

use anyhow::Result;
use nectar_core::config::resolve_config_path;
use nectar_core::Direction;

use super::load_config;

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let thresholds = &config.thresholds;

    println!();
    println!("⚙️  Analysis Configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    match resolve_config_path(config_path) {
        Some(path) => println!("   Source:               built-in + {}", path.display()),
        None => println!("   Source:               built-in defaults"),
    }
    println!();
    println!(
        "   Significant change:   {:.1}%",
        thresholds.significant_change
    );
    println!("   Anomaly:              {:.1}%", thresholds.anomaly);
    println!(
        "   Benchmark tolerance:  {:.1}%",
        thresholds.benchmark_tolerance
    );
    println!("   Summary top-N:        {}", thresholds.summary_top_n);
    println!("   Benchmarks:           {}", config.benchmarks.len());

    let lower: Vec<&str> = config
        .directions
        .iter()
        .filter(|(_, direction)| *direction == Direction::LowerIsBetter)
        .map(|(name, _)| name)
        .collect();
    if !lower.is_empty() {
        println!("   Lower is better:      {}", lower.join(", "));
    }

    Ok(())
}
