//! Period lookup command

use anyhow::Result;
use nectar_core::periods::{comparison_periods, monthly_periods};
use nectar_core::{ComparisonType, Quarter};

pub fn cmd_periods(quarter: &str, year: i32, comparison: &str) -> Result<()> {
    let quarter: Quarter = quarter.parse().map_err(anyhow::Error::msg)?;
    let comparison: ComparisonType = comparison.parse().map_err(anyhow::Error::msg)?;
    let periods = comparison_periods(quarter, year, comparison)?;

    println!();
    println!("📅 {} ({})", periods, comparison.description());
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Current:  {} to {} ({} days)",
        periods.current.start,
        periods.current.end,
        periods.current.days()
    );
    println!(
        "   Previous: {} to {} ({} days)",
        periods.previous.start,
        periods.previous.end,
        periods.previous.days()
    );

    println!();
    println!("   Months in {}:", periods.current.label);
    for month in monthly_periods(quarter, year)? {
        println!("   {:16} {} to {}", month.label, month.start, month.end);
    }

    Ok(())
}
