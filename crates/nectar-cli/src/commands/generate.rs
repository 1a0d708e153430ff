//! Report generation command

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use nectar_core::export::write_exports;
use nectar_core::format::{format_change, format_value, trend_arrow, truncate};
use nectar_core::periods::{comparison_periods, custom_period};
use nectar_core::{
    ComparisonType, ExportFormat, Insight, InsightCategory, Quarter, Report, ReportAssembler,
    ReportRequest,
};

use super::{load_config, load_snapshot};

/// Arguments for `nectar generate`
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub current: PathBuf,
    pub prior: PathBuf,
    pub client: String,
    pub quarter: Option<String>,
    pub year: Option<i32>,
    pub comparison: String,
    pub significant_threshold: Option<f64>,
    pub anomaly_threshold: Option<f64>,
    pub top: Option<usize>,
    pub export: String,
    pub output_dir: PathBuf,
}

/// Parse the --export value ("all", "none", or a comma-separated list)
pub fn parse_export_formats(value: &str) -> Result<Vec<ExportFormat>> {
    match value.to_lowercase().as_str() {
        "all" => Ok(vec![ExportFormat::Json, ExportFormat::Csv]),
        "none" => Ok(vec![]),
        list => list
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<ExportFormat>()
                    .map_err(anyhow::Error::msg)
            })
            .collect(),
    }
}

/// Generate a report and write the requested exports, returning the files written
pub fn cmd_generate(config_path: Option<&Path>, options: &GenerateOptions) -> Result<Vec<PathBuf>> {
    let base = load_config(config_path)?;

    let mut thresholds = base.thresholds;
    if let Some(value) = options.significant_threshold {
        thresholds = thresholds.with_significant_change(value);
    }
    if let Some(value) = options.anomaly_threshold {
        thresholds = thresholds.with_anomaly(value);
    }
    if let Some(value) = options.top {
        thresholds = thresholds.with_summary_top_n(value);
    }
    let config = base
        .with_thresholds(thresholds)
        .context("Invalid threshold override")?;

    let formats = parse_export_formats(&options.export)?;
    let current = load_snapshot(&options.current)?;
    let prior = load_snapshot(&options.prior)?;
    tracing::debug!(
        current = %options.current.display(),
        prior = %options.prior.display(),
        metrics = current.len(),
        "Loaded snapshots"
    );

    let request = match (&options.quarter, options.year) {
        (Some(quarter), Some(year)) => {
            let quarter: Quarter = quarter.parse().map_err(anyhow::Error::msg)?;
            let comparison: ComparisonType =
                options.comparison.parse().map_err(anyhow::Error::msg)?;
            let periods = comparison_periods(quarter, year, comparison)?;
            ReportRequest::for_periods(&options.client, &periods, current, prior)
        }
        _ => {
            let cur = current.period();
            let prev = prior.period();
            let current_period = custom_period(cur.start_date, cur.end_date, None)?;
            let prior_period = custom_period(prev.start_date, prev.end_date, None)?;
            ReportRequest::new(
                &options.client,
                current_period.label.clone(),
                current,
                prior,
            )
            .with_comparison_label(format!("{} vs {}", current_period, prior_period))
        }
    };

    let report = ReportAssembler::new(Arc::new(config)).assemble(request);
    print_report(&report);

    if formats.is_empty() {
        return Ok(vec![]);
    }

    let files = write_exports(&report, &options.output_dir, &formats).with_context(|| {
        format!(
            "Failed to write exports to {}",
            options.output_dir.display()
        )
    })?;

    tracing::info!(count = files.len(), "Exports written");

    println!();
    println!("📁 Exported:");
    for file in &files {
        println!("   {}", file.display());
    }

    Ok(files)
}

fn print_report(report: &Report) {
    println!();
    println!("📊 Nectar Report: {}", report.metadata.client_id);
    match &report.metadata.comparison_label {
        Some(label) => println!("   Period: {}", label),
        None => println!("   Period: {}", report.metadata.period_label),
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if report.trends.is_empty() {
        println!("   No metrics in the current snapshot.");
    } else {
        println!(
            "   {:28} │ {:>12} │ {:>12} │ {:>9}",
            "Metric", "Prior", "Current", "Change"
        );
        println!("   ─────────────────────────────┼──────────────┼──────────────┼───────────");
        for trend in &report.trends {
            let prior = trend
                .prior_value
                .map(|v| format_value(v, trend.unit))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "   {:28} │ {:>12} │ {:>12} │ {:>7} {}",
                truncate(&trend.metric_name, 28),
                prior,
                format_value(trend.current_value, trend.unit),
                format_change(trend.percent_delta),
                trend_arrow(trend.classification, trend.anomalous)
            );
        }
    }

    print_category(report, InsightCategory::Strength, "✅");
    print_category(report, InsightCategory::Challenge, "⚠️");
    print_category(report, InsightCategory::Opportunity, "💡");

    println!();
    println!("📝 Executive Summary");
    println!("   {}", report.narrative);

    if !report.key_recommendations.is_empty() {
        println!();
        println!("🎯 Key Recommendations");
        for (i, rec) in report.key_recommendations.iter().enumerate() {
            println!("   {}. {}", i + 1, rec);
        }
    }
}

fn print_category(report: &Report, category: InsightCategory, icon: &str) {
    let top: Vec<&Insight> = report
        .executive_summary
        .iter()
        .filter(|i| i.category == category)
        .collect();
    if top.is_empty() {
        return;
    }

    let total = report.insights.category(category).len();
    println!();
    if total > top.len() {
        println!(
            "{} {} (top {} of {})",
            icon,
            category.heading(),
            top.len(),
            total
        );
    } else {
        println!("{} {}", icon, category.heading());
    }
    for insight in top {
        println!("   {}. {}", insight.severity_rank, insight.headline);
    }
}
