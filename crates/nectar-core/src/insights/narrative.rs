//! Report wording for insights
//!
//! Headlines, details and recommendations are plain text assembled from a
//! metric's display label and group. The executive summary and recommendation
//! list are derived from a finished [`InsightSet`].

use crate::benchmarks::BenchmarkComparison;
use crate::format::{format_number, format_value};
use crate::models::MetricGroup;
use crate::trends::{TrendClass, TrendResult};

use super::types::{InsightCategory, InsightSet, InsightSource};

pub const INSUFFICIENT_DATA: &str = "Insufficient data to generate executive summary.";

const MAINTAIN_MOMENTUM: &str = "Maintain momentum by analyzing what's working. Document \
successful strategies and apply learnings to underperforming areas.";

const REPLICATE_CONTENT: &str = "Identify top-performing content and apply similar patterns to \
underperforming pages.";

const URGENT_TRAFFIC: &str = "Urgent: Investigate significant traffic decline. Check for technical \
issues, algorithm updates, or seasonal factors. Review acquisition channels to identify source.";

const MONITOR_TRAFFIC: &str = "Monitor traffic trends and review marketing channel performance. \
Consider increasing promotion or content freshness.";

const LANDING_PAGES: &str = "Review top landing pages for relevance, improve page load speed, and \
ensure clear calls-to-action above the fold.";

const MOBILE_EXPERIENCE: &str = "Prioritize mobile experience improvements: faster load times, \
responsive design, touch-friendly navigation, and readable text.";

const CONTENT_DEPTH: &str = "Improve content depth, add internal linking, and create clear \
pathways to keep visitors engaged.";

const SEARCH_RANKINGS: &str = "Focus on improving rankings for high-impression keywords. Consider \
content optimization and link building.";

const SEARCH_SNIPPETS: &str = "Review high-impression keywords and optimize title tags, meta \
descriptions, and content to improve click-through rates.";

const ORGANIC_VISIBILITY: &str = "Invest in content marketing, keyword optimization, and technical \
SEO to improve organic visibility.";

const ATTRIBUTION: &str = "Ensure proper UTM tagging on all campaigns and consider implementing \
link tracking for better attribution.";

const CHANNEL_MIX: &str = "Review acquisition channels to see where visitors were lost and shift \
promotion toward the channels that are still growing.";

const RETENTION: &str = "Consider implementing email newsletter signup, retargeting campaigns, or \
engaging content series to bring visitors back.";

const AUDIENCE_REACH: &str = "Expand reach to new audiences while maintaining engagement with \
loyal visitors.";

/// "Sessions improved by 20.0% (1,000 → 1,200)"
pub fn trend_headline(label: &str, trend: &TrendResult) -> String {
    let pct = trend.percent_delta.unwrap_or_default().abs();
    let verb = match (trend.classification, trend.anomalous) {
        (TrendClass::Improved, _) => "improved",
        (_, true) => "declined sharply",
        _ => "declined",
    };

    match trend.prior_value {
        Some(prior) => format!(
            "{} {} by {:.1}% ({} → {})",
            label,
            verb,
            pct,
            format_value(prior, trend.unit),
            format_value(trend.current_value, trend.unit)
        ),
        None => format!("{} {} by {:.1}%", label, verb, pct),
    }
}

pub fn trend_detail(label: &str, trend: &TrendResult) -> String {
    match (trend.prior_value, trend.absolute_delta) {
        (Some(prior), Some(delta)) => format!(
            "{} went from {} to {} compared with the prior period, a difference of {}.",
            label,
            format_value(prior, trend.unit),
            format_value(trend.current_value, trend.unit),
            format_number(delta.abs(), if delta.fract() == 0.0 { 0 } else { 1 })
        ),
        _ => format!("{} has no baseline in the prior period.", label),
    }
}

/// Headline for a metric that beats or trails its benchmark
pub fn benchmark_headline(
    label: &str,
    comparison: &BenchmarkComparison,
    outperforms: bool,
) -> String {
    let verb = if outperforms { "outperforms" } else { "trails" };
    format!(
        "{} {} the nonprofit benchmark by {:.1}% ({} vs {})",
        label,
        verb,
        comparison.percent_vs_benchmark.abs(),
        format_value(comparison.value, comparison.unit),
        format_value(comparison.reference_value, comparison.unit)
    )
}

/// Suggested action for an insight on a metric
pub fn recommendation(
    metric_name: &str,
    category: InsightCategory,
    anomalous: bool,
) -> &'static str {
    let group = MetricGroup::for_metric(metric_name);

    match category {
        InsightCategory::Strength => match group {
            MetricGroup::Engagement => REPLICATE_CONTENT,
            _ => MAINTAIN_MOMENTUM,
        },
        InsightCategory::Challenge => match (group, metric_name) {
            (_, "mobile_bounce_rate") => MOBILE_EXPERIENCE,
            (MetricGroup::Traffic, _) if anomalous => URGENT_TRAFFIC,
            (MetricGroup::Traffic, _) => MONITOR_TRAFFIC,
            (MetricGroup::Engagement, _) => LANDING_PAGES,
            (MetricGroup::Search, _) => SEARCH_RANKINGS,
            (MetricGroup::Acquisition, "organic_traffic_share") => ORGANIC_VISIBILITY,
            (MetricGroup::Acquisition, _) => CHANNEL_MIX,
            (MetricGroup::Audience, _) => AUDIENCE_REACH,
        },
        InsightCategory::Opportunity => match (group, metric_name) {
            (_, "mobile_bounce_rate") => MOBILE_EXPERIENCE,
            (MetricGroup::Traffic, _) => MONITOR_TRAFFIC,
            (MetricGroup::Engagement, _) => CONTENT_DEPTH,
            (MetricGroup::Search, "avg_search_position") => SEARCH_RANKINGS,
            (MetricGroup::Search, _) => SEARCH_SNIPPETS,
            (MetricGroup::Acquisition, "direct_traffic_share") => ATTRIBUTION,
            (MetricGroup::Acquisition, _) => ORGANIC_VISIBILITY,
            (MetricGroup::Audience, "new_visitor_rate") => AUDIENCE_REACH,
            (MetricGroup::Audience, _) => RETENTION,
        },
    }
}

/// One-paragraph executive summary of an insight set
pub fn narrative_summary(insights: &InsightSet) -> String {
    if insights.is_empty() {
        return INSUFFICIENT_DATA.to_string();
    }

    let mut parts = Vec::new();

    let traffic = insights.iter().find(|i| {
        matches!(i.metric_name.as_str(), "total_users" | "sessions")
            && i.category != InsightCategory::Opportunity
            && i.source != InsightSource::Benchmark
    });
    if let Some(lead) = traffic {
        let verb = if lead.category == InsightCategory::Strength {
            "grew"
        } else {
            "declined"
        };
        parts.push(format!(
            "Website traffic {} by {:.1}% compared with the prior period.",
            verb,
            lead.supporting_value.abs()
        ));
    }

    if let Some(win) = insights.strengths.first() {
        parts.push(format!("Key strength: {}.", win.headline));
    }
    if let Some(opp) = insights.opportunities.first() {
        parts.push(format!("Primary opportunity: {}.", opp.headline));
    }
    if let Some(issue) = insights.challenges.first() {
        parts.push(format!("Requires attention: {}.", issue.headline));
    }

    parts.join(" ")
}

/// Distinct recommendations, challenges first, then opportunities, then strengths
pub fn key_recommendations(insights: &InsightSet, limit: usize) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    let ordered = insights
        .challenges
        .iter()
        .chain(insights.opportunities.iter())
        .chain(insights.strengths.iter());

    for insight in ordered {
        if recommendations.len() >= limit {
            break;
        }
        if let Some(rec) = &insight.recommendation {
            if !recommendations.contains(rec) {
                recommendations.push(rec.clone());
            }
        }
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::Insight;
    use crate::models::{Direction, Unit};

    fn trend(prior: f64, current: f64, class: TrendClass, anomalous: bool) -> TrendResult {
        TrendResult {
            metric_name: "sessions".to_string(),
            unit: Unit::Count,
            current_value: current,
            prior_value: Some(prior),
            absolute_delta: Some(current - prior),
            percent_delta: Some((current - prior) / prior * 100.0),
            classification: class,
            anomalous,
            direction: Direction::HigherIsBetter,
        }
    }

    #[test]
    fn test_trend_headline() {
        let t = trend(1000.0, 1200.0, TrendClass::Improved, false);
        assert_eq!(
            trend_headline("Sessions", &t),
            "Sessions improved by 20.0% (1,000 → 1,200)"
        );

        // A surge keeps the plain verb
        let t = trend(1000.0, 1500.0, TrendClass::Improved, true);
        assert_eq!(
            trend_headline("Sessions", &t),
            "Sessions improved by 50.0% (1,000 → 1,500)"
        );

        let t = trend(1000.0, 500.0, TrendClass::Declined, true);
        assert_eq!(
            trend_headline("Sessions", &t),
            "Sessions declined sharply by 50.0% (1,000 → 500)"
        );
        assert_eq!(
            trend_detail("Sessions", &t),
            "Sessions went from 1,000 to 500 compared with the prior period, a difference of 500."
        );
    }

    #[test]
    fn test_benchmark_headline() {
        let comparison = BenchmarkComparison {
            metric_name: "bounce_rate".to_string(),
            unit: Unit::Percent,
            value: 70.0,
            reference_value: 55.0,
            percent_vs_benchmark: 27.27,
            status: crate::benchmarks::BenchmarkStatus::Below,
            interpretation: String::new(),
        };
        assert_eq!(
            benchmark_headline("Bounce rate", &comparison, false),
            "Bounce rate trails the nonprofit benchmark by 27.3% (70.0% vs 55.0%)"
        );
    }

    #[test]
    fn test_recommendation_by_group() {
        assert_eq!(
            recommendation("sessions", InsightCategory::Challenge, true),
            URGENT_TRAFFIC
        );
        assert_eq!(
            recommendation("sessions", InsightCategory::Challenge, false),
            MONITOR_TRAFFIC
        );
        assert_eq!(
            recommendation("bounce_rate", InsightCategory::Challenge, false),
            LANDING_PAGES
        );
        assert_eq!(
            recommendation("search_ctr", InsightCategory::Opportunity, false),
            SEARCH_SNIPPETS
        );
        assert_eq!(
            recommendation("organic_traffic_share", InsightCategory::Opportunity, false),
            ORGANIC_VISIBILITY
        );
        assert_eq!(
            recommendation("sessions", InsightCategory::Strength, false),
            MAINTAIN_MOMENTUM
        );
    }

    fn insight(category: InsightCategory, metric: &str, rec: &str) -> Insight {
        let headline = format!("{} moved", metric);
        Insight::new(category, metric, headline, 12.0, InsightSource::Trend)
            .with_recommendation(rec)
    }

    #[test]
    fn test_narrative_summary() {
        assert_eq!(narrative_summary(&InsightSet::default()), INSUFFICIENT_DATA);

        let set = InsightSet {
            strengths: vec![insight(InsightCategory::Strength, "sessions", "a")],
            challenges: vec![insight(InsightCategory::Challenge, "bounce_rate", "b")],
            opportunities: vec![],
        };
        assert_eq!(
            narrative_summary(&set),
            "Website traffic grew by 12.0% compared with the prior period. \
             Key strength: sessions moved. Requires attention: bounce_rate moved."
        );
    }

    #[test]
    fn test_key_recommendations_dedup_and_order() {
        let set = InsightSet {
            strengths: vec![insight(InsightCategory::Strength, "sessions", "keep going")],
            challenges: vec![
                insight(InsightCategory::Challenge, "bounce_rate", "fix pages"),
                insight(InsightCategory::Challenge, "exit_rate", "fix pages"),
            ],
            opportunities: vec![insight(InsightCategory::Opportunity, "search_ctr", "tune")],
        };

        assert_eq!(
            key_recommendations(&set, 5),
            vec!["fix pages", "tune", "keep going"]
        );
        assert_eq!(key_recommendations(&set, 1), vec!["fix pages"]);
    }
}
