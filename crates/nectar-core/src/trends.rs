//! Trend detection - period-over-period comparison of two snapshots

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::models::{Direction, MetricSnapshot, Unit};

/// How a metric moved between periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendClass {
    /// Moved past the significance threshold in the better direction
    Improved,
    /// Moved past the significance threshold in the worse direction
    Declined,
    /// Change below the significance threshold
    Flat,
    /// No usable baseline in the prior period
    New,
}

impl TrendClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendClass::Improved => "improved",
            TrendClass::Declined => "declined",
            TrendClass::Flat => "flat",
            TrendClass::New => "new",
        }
    }
}

impl fmt::Display for TrendClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One metric compared across two periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub metric_name: String,
    pub unit: Unit,
    pub current_value: f64,
    /// None when the prior snapshot has no value for the metric
    pub prior_value: Option<f64>,
    pub absolute_delta: Option<f64>,
    /// None when there is no baseline to divide by
    pub percent_delta: Option<f64>,
    pub classification: TrendClass,
    /// Change reached the anomaly threshold (in either direction)
    pub anomalous: bool,
    pub direction: Direction,
}

impl TrendResult {
    /// True when the raw change moves the metric in its worse direction
    pub fn is_worsening(&self) -> bool {
        match self.absolute_delta {
            Some(delta) if delta != 0.0 => !self.direction.is_improvement(delta),
            _ => false,
        }
    }

    pub fn has_baseline(&self) -> bool {
        self.percent_delta.is_some()
    }
}

/// Compares a current snapshot against a prior one
pub struct TrendDetector<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> TrendDetector<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// One result per metric in `current`, in the snapshot's insertion order
    pub fn compare(&self, current: &MetricSnapshot, prior: &MetricSnapshot) -> Vec<TrendResult> {
        let results: Vec<TrendResult> = current
            .iter()
            .map(|metric| {
                let direction = self.config.direction_of(&metric.name);
                let prior_value = prior.value(&metric.name);
                self.classify(
                    &metric.name,
                    metric.unit,
                    metric.value,
                    prior_value,
                    direction,
                )
            })
            .collect();

        tracing::debug!(
            metrics = results.len(),
            improved = count(&results, TrendClass::Improved),
            declined = count(&results, TrendClass::Declined),
            new = count(&results, TrendClass::New),
            anomalous = results.iter().filter(|r| r.anomalous).count(),
            "Trend comparison complete"
        );

        results
    }

    fn classify(
        &self,
        metric_name: &str,
        unit: Unit,
        current_value: f64,
        prior_value: Option<f64>,
        direction: Direction,
    ) -> TrendResult {
        let thresholds = &self.config.thresholds;

        let absolute_delta = prior_value.map(|prior| current_value - prior);
        let percent_delta = match (prior_value, absolute_delta) {
            (Some(prior), Some(delta)) if prior != 0.0 => Some(delta / prior * 100.0),
            // 0 -> 0 is no change at all
            (Some(_), Some(delta)) if delta == 0.0 => Some(0.0),
            _ => None,
        };

        let (classification, anomalous) = match percent_delta {
            None => (TrendClass::New, false),
            Some(pct) => {
                let classification = if pct.abs() < thresholds.significant_change {
                    TrendClass::Flat
                } else if direction.is_improvement(pct) {
                    TrendClass::Improved
                } else {
                    TrendClass::Declined
                };
                (classification, pct.abs() >= thresholds.anomaly)
            }
        };

        TrendResult {
            metric_name: metric_name.to_string(),
            unit,
            current_value,
            prior_value,
            absolute_delta,
            percent_delta,
            classification,
            anomalous,
            direction,
        }
    }
}

fn count(results: &[TrendResult], class: TrendClass) -> usize {
    results.iter().filter(|r| r.classification == class).count()
}
