//! Benchmark comparison
//!
//! Compares a snapshot's metrics against industry reference values. A metric
//! is "above" its benchmark when it is better than the norm and "below" when
//! it is worse, so the status already accounts for the metric's direction
//! (a bounce rate above the reference value is reported as `Below`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::format_value;
use crate::models::{Direction, MetricSnapshot, Unit};

/// Reference value for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    pub metric_name: String,
    pub reference_value: f64,
    pub unit: Unit,
    pub description: Option<String>,
}

/// Benchmark reference values keyed by metric name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkTable {
    entries: BTreeMap<String, BenchmarkEntry>,
}

impl BenchmarkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for a metric
    pub fn insert(&mut self, entry: BenchmarkEntry) {
        self.entries.insert(entry.metric_name.clone(), entry);
    }

    pub fn lookup(&self, metric_name: &str) -> Option<&BenchmarkEntry> {
        self.entries.get(metric_name)
    }

    /// Entries in metric name order
    pub fn iter(&self) -> impl Iterator<Item = &BenchmarkEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-metric better direction; anything not listed is higher-is-better
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectionTable {
    directions: BTreeMap<String, Direction>,
}

impl DirectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, metric_name: impl Into<String>, direction: Direction) {
        self.directions.insert(metric_name.into(), direction);
    }

    pub fn direction_of(&self, metric_name: &str) -> Direction {
        self.directions
            .get(metric_name)
            .copied()
            .unwrap_or_default()
    }

    /// Explicitly configured entries in metric name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Direction)> {
        self.directions.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// How a metric sits relative to its benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkStatus {
    /// Better than the benchmark
    Above,
    /// Worse than the benchmark
    Below,
    /// Within tolerance of the benchmark
    At,
}

impl BenchmarkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BenchmarkStatus::Above => "above",
            BenchmarkStatus::Below => "below",
            BenchmarkStatus::At => "at",
        }
    }
}

impl fmt::Display for BenchmarkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One metric compared against its benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub metric_name: String,
    pub unit: Unit,
    pub value: f64,
    pub reference_value: f64,
    /// Signed distance from the reference, as a percent of the reference
    pub percent_vs_benchmark: f64,
    pub status: BenchmarkStatus,
    pub interpretation: String,
}

/// Compare every benchmarked metric in a snapshot; unbenchmarked metrics are skipped
pub fn compare_to_benchmark(
    snapshot: &MetricSnapshot,
    table: &BenchmarkTable,
    directions: &DirectionTable,
    tolerance: f64,
) -> Vec<BenchmarkComparison> {
    let comparisons: Vec<BenchmarkComparison> = snapshot
        .iter()
        .filter_map(|metric| {
            let entry = table.lookup(&metric.name)?;
            let direction = directions.direction_of(&metric.name);

            let difference = metric.value - entry.reference_value;
            let percent_vs_benchmark = if entry.reference_value != 0.0 {
                difference / entry.reference_value * 100.0
            } else {
                0.0
            };

            let status = if percent_vs_benchmark.abs() < tolerance || difference == 0.0 {
                BenchmarkStatus::At
            } else if direction.is_improvement(difference) {
                BenchmarkStatus::Above
            } else {
                BenchmarkStatus::Below
            };

            let interpretation = interpret(
                metric.value,
                entry,
                metric.unit,
                percent_vs_benchmark,
                status,
            );

            Some(BenchmarkComparison {
                metric_name: metric.name.clone(),
                unit: metric.unit,
                value: metric.value,
                reference_value: entry.reference_value,
                percent_vs_benchmark,
                status,
                interpretation,
            })
        })
        .collect();

    tracing::debug!(
        metrics = snapshot.len(),
        compared = comparisons.len(),
        "Benchmark comparison complete"
    );

    comparisons
}

fn interpret(
    value: f64,
    entry: &BenchmarkEntry,
    unit: Unit,
    percent_vs_benchmark: f64,
    status: BenchmarkStatus,
) -> String {
    let current = format_value(value, unit);
    let reference = format_value(entry.reference_value, unit);
    match status {
        BenchmarkStatus::At => format!("Performing at industry benchmark ({})", reference),
        BenchmarkStatus::Above => format!(
            "Outperforming benchmark by {:.1}% ({} vs {})",
            percent_vs_benchmark.abs(),
            current,
            reference
        ),
        BenchmarkStatus::Below => format!(
            "Below benchmark by {:.1}% ({} vs {})",
            percent_vs_benchmark.abs(),
            current,
            reference
        ),
    }
}

/// Counts and metric names grouped by benchmark status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub outperforming: Vec<String>,
    pub underperforming: Vec<String>,
    pub at_benchmark: Vec<String>,
    pub total_compared: usize,
}

pub fn summarize_benchmarks(comparisons: &[BenchmarkComparison]) -> BenchmarkSummary {
    let mut summary = BenchmarkSummary {
        total_compared: comparisons.len(),
        ..Default::default()
    };

    for comparison in comparisons {
        let name = comparison.metric_name.clone();
        match comparison.status {
            BenchmarkStatus::Above => summary.outperforming.push(name),
            BenchmarkStatus::Below => summary.underperforming.push(name),
            BenchmarkStatus::At => summary.at_benchmark.push(name),
        }
    }

    summary
}
