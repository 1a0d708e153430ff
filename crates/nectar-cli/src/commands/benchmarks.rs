//! Benchmark listing command

use std::path::Path;

use anyhow::Result;
use nectar_core::format::{format_value, truncate};
use nectar_core::Direction;

use super::load_config;

pub fn cmd_benchmarks(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    println!();
    println!("📏 Nonprofit Benchmarks");
    println!("   ─────────────────────────────────────────────────────────────");

    if config.benchmarks.is_empty() {
        println!("   No benchmarks configured.");
        return Ok(());
    }

    println!(
        "   {:28} │ {:>10} │ {:6} │ Description",
        "Metric", "Reference", "Better"
    );
    println!("   ─────────────────────────────┼────────────┼────────┼────────────────────");

    for entry in config.benchmarks.iter() {
        let better = match config.direction_of(&entry.metric_name) {
            Direction::HigherIsBetter => "higher",
            Direction::LowerIsBetter => "lower",
        };
        println!(
            "   {:28} │ {:>10} │ {:6} │ {}",
            truncate(&config.label(&entry.metric_name), 28),
            format_value(entry.reference_value, entry.unit),
            better,
            entry.description.as_deref().unwrap_or("")
        );
    }

    println!();
    println!("   {} benchmarks", config.benchmarks.len());

    Ok(())
}
