//! Export functionality for assembled reports
//!
//! Supports:
//! - Full report JSON export (pretty printed)
//! - Trend table CSV export
//! - Insight CSV export (all categories, with rank and recommendation)

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::Result;
use crate::format::sanitize_filename;
use crate::report::Report;
use crate::trends::TrendResult;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!(
                "Unknown export format: {}. Available: json, csv",
                s
            )),
        }
    }
}

/// One row of the trend CSV
#[derive(Debug, Serialize)]
struct TrendRow<'a> {
    metric: &'a str,
    unit: &'a str,
    current: f64,
    prior: Option<f64>,
    absolute_change: Option<f64>,
    percent_change: Option<f64>,
    classification: &'a str,
    anomalous: bool,
}

/// One row of the insight CSV
#[derive(Debug, Serialize)]
struct InsightRow<'a> {
    category: &'a str,
    rank: u32,
    metric: &'a str,
    headline: &'a str,
    supporting_value: f64,
    source: &'a str,
    detail: Option<&'a str>,
    recommendation: Option<&'a str>,
}

/// Write the full report as pretty JSON
pub fn export_json<W: Write>(report: &Report, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Write trend results as CSV, one row per metric
pub fn export_trends_csv<W: Write>(trends: &[TrendResult], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for trend in trends {
        csv.serialize(TrendRow {
            metric: &trend.metric_name,
            unit: trend.unit.as_str(),
            current: trend.current_value,
            prior: trend.prior_value,
            absolute_change: trend.absolute_delta,
            percent_change: trend.percent_delta,
            classification: trend.classification.as_str(),
            anomalous: trend.anomalous,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Write every insight as CSV: strengths, then challenges, then opportunities
pub fn export_insights_csv<W: Write>(report: &Report, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for insight in report.insights.iter() {
        csv.serialize(InsightRow {
            category: insight.category.as_str(),
            rank: insight.severity_rank,
            metric: &insight.metric_name,
            headline: &insight.headline,
            supporting_value: insight.supporting_value,
            source: insight.source.as_str(),
            detail: insight.detail.as_deref(),
            recommendation: insight.recommendation.as_deref(),
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// "<client>_<period>_<kind>.<ext>", safe for any filesystem
pub fn default_filename(report: &Report, kind: &str, extension: &str) -> String {
    sanitize_filename(&format!(
        "{}_{}_{}.{}",
        report.client_id(),
        report.period_label(),
        kind,
        extension
    ))
}

/// Write the requested formats into `dir`, returning the files created
///
/// CSV produces two files (trends and insights); JSON one.
pub fn write_exports(
    report: &Report,
    dir: &Path,
    formats: &[ExportFormat],
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    for format in formats {
        match format {
            ExportFormat::Json => {
                let path = dir.join(default_filename(report, "report", format.extension()));
                let mut writer = BufWriter::new(File::create(&path)?);
                export_json(report, &mut writer)?;
                writer.flush()?;
                written.push(path);
            }
            ExportFormat::Csv => {
                let trends_path = dir.join(default_filename(report, "trends", format.extension()));
                export_trends_csv(&report.trends, File::create(&trends_path)?)?;
                written.push(trends_path);

                let insights_path =
                    dir.join(default_filename(report, "insights", format.extension()));
                export_insights_csv(report, File::create(&insights_path)?)?;
                written.push(insights_path);
            }
        }
    }

    tracing::debug!(files = written.len(), dir = %dir.display(), "Exports written");
    Ok(written)
}
