//! Analysis configuration
//!
//! Thresholds, benchmark reference values and metric directions used by the
//! trend detector and insight engine. A config is built once, validated, and
//! then passed by reference into every analysis call; it is never mutated in
//! place. Per-call overrides produce a new value via [`AnalysisConfig::with_thresholds`].
//!
//! ## Configuration Resolution
//!
//! 1. Start from the embedded defaults (compiled into the binary)
//! 2. Overlay an explicit `--config` file, or the override in the data dir
//!    (~/.local/share/nectar/config/analysis.toml) when present
//! 3. Validate; invalid thresholds fail before any comparison runs

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::benchmarks::{BenchmarkEntry, BenchmarkTable, DirectionTable};
use crate::error::{Error, Result};
use crate::models::{metric_label, Direction, Unit};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analysis.toml");

pub const DEFAULT_SIGNIFICANT_CHANGE: f64 = 10.0;
pub const DEFAULT_ANOMALY: f64 = 25.0;
pub const DEFAULT_BENCHMARK_TOLERANCE: f64 = 2.0;
pub const DEFAULT_SUMMARY_TOP_N: usize = 3;

/// Numeric thresholds for classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Minimum |percent change| for a metric to count as moved
    pub significant_change: f64,
    /// |percent change| at which a move is flagged anomalous
    pub anomaly: f64,
    /// |percent vs benchmark| still treated as at the benchmark
    pub benchmark_tolerance: f64,
    /// Insights per category in the executive summary
    pub summary_top_n: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            significant_change: DEFAULT_SIGNIFICANT_CHANGE,
            anomaly: DEFAULT_ANOMALY,
            benchmark_tolerance: DEFAULT_BENCHMARK_TOLERANCE,
            summary_top_n: DEFAULT_SUMMARY_TOP_N,
        }
    }
}

impl Thresholds {
    pub fn with_significant_change(mut self, value: f64) -> Self {
        self.significant_change = value;
        self
    }

    pub fn with_anomaly(mut self, value: f64) -> Self {
        self.anomaly = value;
        self
    }

    pub fn with_benchmark_tolerance(mut self, value: f64) -> Self {
        self.benchmark_tolerance = value;
        self
    }

    pub fn with_summary_top_n(mut self, value: usize) -> Self {
        self.summary_top_n = value;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.significant_change.is_finite() || self.significant_change <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "significant_change must be a positive number, got {}",
                self.significant_change
            )));
        }
        if !self.anomaly.is_finite() || self.anomaly <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "anomaly must be a positive number, got {}",
                self.anomaly
            )));
        }
        if self.anomaly < self.significant_change {
            return Err(Error::InvalidConfiguration(format!(
                "anomaly ({}) must not be below significant_change ({})",
                self.anomaly, self.significant_change
            )));
        }
        if !self.benchmark_tolerance.is_finite() || self.benchmark_tolerance < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "benchmark_tolerance must be zero or positive, got {}",
                self.benchmark_tolerance
            )));
        }
        if self.summary_top_n == 0 {
            return Err(Error::InvalidConfiguration(
                "summary_top_n must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything the analysis core needs besides the snapshots themselves
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub thresholds: Thresholds,
    pub benchmarks: BenchmarkTable,
    pub directions: DirectionTable,
    labels: BTreeMap<String, String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::builtin().unwrap_or_else(|_| Self::empty())
    }
}

impl AnalysisConfig {
    /// Default thresholds with no benchmarks and no direction overrides
    pub fn empty() -> Self {
        Self {
            thresholds: Thresholds::default(),
            benchmarks: BenchmarkTable::new(),
            directions: DirectionTable::new(),
            labels: BTreeMap::new(),
        }
    }

    /// The embedded default configuration
    pub fn builtin() -> Result<Self> {
        let mut config = Self::empty();
        config.apply_toml(DEFAULT_CONFIG)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config: embedded defaults overlaid with the override file, if any
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::empty();
        config.apply_toml(DEFAULT_CONFIG)?;

        if let Some(path) = resolve_config_path(override_path) {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::InvalidConfiguration(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                ))
            })?;
            tracing::debug!(path = %path.display(), "Applying config override");
            config.apply_toml(&content)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse config from TOML content on top of the embedded defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config = Self::empty();
        config.apply_toml(DEFAULT_CONFIG)?;
        config.apply_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Same config with different thresholds
    pub fn with_thresholds(&self, thresholds: Thresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            ..self.clone()
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        for entry in self.benchmarks.iter() {
            if !entry.reference_value.is_finite() || entry.reference_value <= 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "Benchmark for {} must be a positive number, got {}",
                    entry.metric_name, entry.reference_value
                )));
            }
        }
        Ok(())
    }

    pub fn direction_of(&self, metric_name: &str) -> Direction {
        self.directions.direction_of(metric_name)
    }

    /// Display label for a metric, preferring configured labels
    pub fn label(&self, metric_name: &str) -> String {
        self.labels
            .get(metric_name)
            .cloned()
            .unwrap_or_else(|| metric_label(metric_name))
    }

    fn apply_toml(&mut self, content: &str) -> Result<()> {
        let raw: RawConfig = toml::from_str(content)?;

        for key in raw.unknown.keys() {
            tracing::warn!(key = %key, "Ignoring unknown config section");
        }

        if let Some(thresholds) = raw.thresholds {
            for key in thresholds.unknown.keys() {
                tracing::warn!(key = %key, "Ignoring unknown threshold");
            }
            if let Some(v) = thresholds.significant_change {
                self.thresholds.significant_change = v;
            }
            if let Some(v) = thresholds.anomaly {
                self.thresholds.anomaly = v;
            }
            if let Some(v) = thresholds.benchmark_tolerance {
                self.thresholds.benchmark_tolerance = v;
            }
            if let Some(v) = thresholds.summary_top_n {
                self.thresholds.summary_top_n = v;
            }
        }

        if let Some(benchmarks) = raw.benchmarks {
            for (metric_name, bench) in benchmarks {
                let unit = bench.unit.unwrap_or_else(|| {
                    self.benchmarks
                        .lookup(&metric_name)
                        .map(|e| e.unit)
                        .unwrap_or(Unit::Count)
                });
                self.benchmarks.insert(BenchmarkEntry {
                    metric_name,
                    reference_value: bench.value,
                    unit,
                    description: bench.description,
                });
            }
        }

        if let Some(directions) = raw.directions {
            for (metric_name, direction) in directions {
                self.directions.set(metric_name, direction);
            }
        }

        if let Some(labels) = raw.labels {
            self.labels.extend(labels);
        }

        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("nectar").join("config").join("analysis.toml"))
}

/// The override file that [`AnalysisConfig::load`] would read, if any
///
/// An explicit path is returned even when missing so the read error surfaces;
/// the data-dir default is only used when it exists.
pub fn resolve_config_path(override_path: Option<&Path>) -> Option<PathBuf> {
    match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.exists()),
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    thresholds: Option<RawThresholds>,
    benchmarks: Option<BTreeMap<String, RawBenchmark>>,
    directions: Option<BTreeMap<String, Direction>>,
    labels: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    significant_change: Option<f64>,
    anomaly: Option<f64>,
    benchmark_tolerance: Option<f64>,
    summary_top_n: Option<usize>,
    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct RawBenchmark {
    value: f64,
    unit: Option<Unit>,
    description: Option<String>,
}
