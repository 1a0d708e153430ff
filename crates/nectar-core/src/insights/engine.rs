//! Insight Engine - turns trend and benchmark comparisons into ranked findings

use std::collections::BTreeMap;

use crate::benchmarks::{BenchmarkComparison, BenchmarkStatus};
use crate::config::AnalysisConfig;
use crate::trends::{TrendClass, TrendResult};

use super::narrative;
use super::types::{Insight, InsightCategory, InsightSet, InsightSource};

/// Rule-based classifier for strengths, challenges and opportunities
pub struct InsightEngine<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> InsightEngine<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Classify comparisons into an insight set
    ///
    /// Each list holds at most one insight per metric and is ordered by
    /// severity rank. Empty inputs produce an empty set.
    pub fn generate(
        &self,
        trends: &[TrendResult],
        comparisons: &[BenchmarkComparison],
    ) -> InsightSet {
        let mut strengths: BTreeMap<String, Insight> = BTreeMap::new();
        let mut challenges: BTreeMap<String, Insight> = BTreeMap::new();
        let mut opportunities: BTreeMap<String, Insight> = BTreeMap::new();

        for trend in trends {
            if let Some(insight) = self.trend_insight(trend) {
                let target = match insight.category {
                    InsightCategory::Strength => &mut strengths,
                    _ => &mut challenges,
                };
                target.entry(trend.metric_name.clone()).or_insert(insight);
            }
        }

        for comparison in comparisons {
            match comparison.status {
                BenchmarkStatus::Below => {
                    if challenges.contains_key(&comparison.metric_name) {
                        continue;
                    }
                    opportunities
                        .entry(comparison.metric_name.clone())
                        .or_insert_with(|| self.opportunity(comparison));
                }
                BenchmarkStatus::Above => match strengths.get_mut(&comparison.metric_name) {
                    Some(existing) => reinforce(existing, comparison),
                    None => {
                        strengths.insert(
                            comparison.metric_name.clone(),
                            self.benchmark_strength(comparison),
                        );
                    }
                },
                BenchmarkStatus::At => {}
            }
        }

        let set = InsightSet {
            strengths: rank(strengths.into_values().collect()),
            challenges: rank(challenges.into_values().collect()),
            opportunities: rank(opportunities.into_values().collect()),
        };

        tracing::debug!(
            strengths = set.strengths.len(),
            challenges = set.challenges.len(),
            opportunities = set.opportunities.len(),
            "Insight generation complete"
        );

        set
    }

    /// Top-N insights per category: strengths, then challenges, then opportunities
    ///
    /// Selection follows `severity_rank` (ties by metric name), not list order.
    pub fn summarize(&self, insights: &InsightSet) -> Vec<Insight> {
        let top_n = self.config.thresholds.summary_top_n;
        let mut summary = Vec::new();

        for category in InsightCategory::ALL {
            let mut ranked: Vec<&Insight> = insights.category(category).iter().collect();
            ranked.sort_by(|a, b| {
                a.severity_rank
                    .cmp(&b.severity_rank)
                    .then_with(|| a.metric_name.cmp(&b.metric_name))
            });
            summary.extend(ranked.into_iter().take(top_n).cloned());
        }

        summary
    }

    fn trend_insight(&self, trend: &TrendResult) -> Option<Insight> {
        let pct = trend.percent_delta?;

        let category = if trend.classification == TrendClass::Improved && !trend.anomalous {
            InsightCategory::Strength
        } else if trend.classification == TrendClass::Declined
            || (trend.anomalous && trend.is_worsening())
        {
            InsightCategory::Challenge
        } else {
            return None;
        };

        let label = self.config.label(&trend.metric_name);
        let insight = Insight::new(
            category,
            trend.metric_name.clone(),
            narrative::trend_headline(&label, trend),
            pct,
            InsightSource::Trend,
        )
        .with_detail(narrative::trend_detail(&label, trend))
        .with_recommendation(narrative::recommendation(
            &trend.metric_name,
            category,
            trend.anomalous,
        ));

        Some(insight)
    }

    fn opportunity(&self, comparison: &BenchmarkComparison) -> Insight {
        let label = self.config.label(&comparison.metric_name);
        Insight::new(
            InsightCategory::Opportunity,
            comparison.metric_name.clone(),
            narrative::benchmark_headline(&label, comparison, false),
            comparison.percent_vs_benchmark,
            InsightSource::Benchmark,
        )
        .with_detail(comparison.interpretation.clone())
        .with_recommendation(narrative::recommendation(
            &comparison.metric_name,
            InsightCategory::Opportunity,
            false,
        ))
    }

    fn benchmark_strength(&self, comparison: &BenchmarkComparison) -> Insight {
        let label = self.config.label(&comparison.metric_name);
        Insight::new(
            InsightCategory::Strength,
            comparison.metric_name.clone(),
            narrative::benchmark_headline(&label, comparison, true),
            comparison.percent_vs_benchmark,
            InsightSource::Benchmark,
        )
        .with_detail(comparison.interpretation.clone())
        .with_recommendation(narrative::recommendation(
            &comparison.metric_name,
            InsightCategory::Strength,
            false,
        ))
    }
}

/// Fold a favourable benchmark comparison into an existing trend strength
fn reinforce(existing: &mut Insight, comparison: &BenchmarkComparison) {
    existing.source = InsightSource::TrendAndBenchmark;
    existing.magnitude = existing
        .magnitude
        .max(comparison.percent_vs_benchmark.abs());
    existing.detail = Some(match existing.detail.take() {
        Some(detail) => format!("{} {}.", detail, comparison.interpretation),
        None => format!("{}.", comparison.interpretation),
    });
}

/// Order by magnitude (largest first), ties by metric name, and number 1..n
fn rank(mut insights: Vec<Insight>) -> Vec<Insight> {
    insights.sort_by(|a, b| {
        b.magnitude
            .total_cmp(&a.magnitude)
            .then_with(|| a.metric_name.cmp(&b.metric_name))
    });
    for (position, insight) in insights.iter_mut().enumerate() {
        insight.severity_rank = position as u32 + 1;
    }
    insights
}
