//! Report assembly
//!
//! Runs the analysis pipeline for one client and period and packages the
//! results into an immutable [`Report`] for the export layer:
//!
//! snapshots → trends → benchmark comparisons → insights → summary

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::benchmarks::{
    compare_to_benchmark, summarize_benchmarks, BenchmarkComparison, BenchmarkSummary,
};
use crate::config::AnalysisConfig;
use crate::insights::{key_recommendations, narrative_summary, Insight, InsightEngine, InsightSet};
use crate::models::MetricSnapshot;
use crate::periods::ComparisonPeriods;
use crate::trends::{TrendDetector, TrendResult};

/// Recommendations kept on a report
pub const KEY_RECOMMENDATION_LIMIT: usize = 5;

/// Who and what a report is about
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub client_id: String,
    pub period_label: String,
    /// e.g. "Q4 2024 vs Q4 2023"
    pub comparison_label: Option<String>,
    pub generated_at: DateTime<Utc>,
}

/// Inputs for one report generation run
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub client_id: String,
    pub period_label: String,
    pub comparison_label: Option<String>,
    pub current: MetricSnapshot,
    pub prior: MetricSnapshot,
}

impl ReportRequest {
    pub fn new(
        client_id: impl Into<String>,
        period_label: impl Into<String>,
        current: MetricSnapshot,
        prior: MetricSnapshot,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            period_label: period_label.into(),
            comparison_label: None,
            current,
            prior,
        }
    }

    /// Request labelled from quarterly comparison periods
    pub fn for_periods(
        client_id: impl Into<String>,
        periods: &ComparisonPeriods,
        current: MetricSnapshot,
        prior: MetricSnapshot,
    ) -> Self {
        Self::new(client_id, periods.current.label.clone(), current, prior)
            .with_comparison_label(periods.to_string())
    }

    pub fn with_comparison_label(mut self, label: impl Into<String>) -> Self {
        self.comparison_label = Some(label.into());
        self
    }
}

/// The assembled analysis for one client and period
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub current: MetricSnapshot,
    pub prior: MetricSnapshot,
    pub trends: Vec<TrendResult>,
    pub benchmark_comparisons: Vec<BenchmarkComparison>,
    pub benchmark_summary: BenchmarkSummary,
    pub insights: InsightSet,
    /// Top insights per category
    pub executive_summary: Vec<Insight>,
    pub narrative: String,
    pub key_recommendations: Vec<String>,
}

impl Report {
    pub fn client_id(&self) -> &str {
        &self.metadata.client_id
    }

    pub fn period_label(&self) -> &str {
        &self.metadata.period_label
    }

    /// Trend for a metric, if the current snapshot had it
    pub fn trend(&self, metric_name: &str) -> Option<&TrendResult> {
        self.trends.iter().find(|t| t.metric_name == metric_name)
    }
}

/// Orchestrates the analysis pipeline
///
/// Holds a shared, read-only config so one assembler (or clones of it) can
/// serve many clients, including from several threads at once.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    config: Arc<AnalysisConfig>,
}

impl ReportAssembler {
    pub fn new(config: Arc<AnalysisConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn assemble(&self, request: ReportRequest) -> Report {
        let config = self.config.as_ref();

        tracing::debug!(
            client = %request.client_id,
            current_metrics = request.current.len(),
            prior_metrics = request.prior.len(),
            "Comparing periods"
        );
        let trends = TrendDetector::new(config).compare(&request.current, &request.prior);

        let benchmark_comparisons = compare_to_benchmark(
            &request.current,
            &config.benchmarks,
            &config.directions,
            config.thresholds.benchmark_tolerance,
        );
        let benchmark_summary = summarize_benchmarks(&benchmark_comparisons);

        let engine = InsightEngine::new(config);
        let insights = engine.generate(&trends, &benchmark_comparisons);
        let executive_summary = engine.summarize(&insights);
        let narrative = narrative_summary(&insights);
        let key_recommendations = key_recommendations(&insights, KEY_RECOMMENDATION_LIMIT);

        tracing::info!(
            client = %request.client_id,
            period = %request.period_label,
            trends = trends.len(),
            benchmarks = benchmark_comparisons.len(),
            insights = insights.len(),
            "Report assembled"
        );

        Report {
            metadata: ReportMetadata {
                client_id: request.client_id,
                period_label: request.period_label,
                comparison_label: request.comparison_label,
                generated_at: Utc::now(),
            },
            current: request.current,
            prior: request.prior,
            trends,
            benchmark_comparisons,
            benchmark_summary,
            insights,
            executive_summary,
            narrative,
            key_recommendations,
        }
    }
}
