//! Data models for Nectar

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Unit a metric value is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Count,
    Percent,
    Seconds,
    Currency,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Count => "count",
            Unit::Percent => "percent",
            Unit::Seconds => "seconds",
            Unit::Currency => "currency",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "count" => Ok(Unit::Count),
            "percent" | "%" => Ok(Unit::Percent),
            "seconds" => Ok(Unit::Seconds),
            "currency" => Ok(Unit::Currency),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

/// Which way a metric has to move to count as an improvement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    HigherIsBetter,
    LowerIsBetter,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::HigherIsBetter => "higher_is_better",
            Direction::LowerIsBetter => "lower_is_better",
        }
    }

    /// True when a signed change (current minus reference) is a move for the better
    pub fn is_improvement(&self, signed_change: f64) -> bool {
        match self {
            Direction::HigherIsBetter => signed_change > 0.0,
            Direction::LowerIsBetter => signed_change < 0.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "higher_is_better" => Ok(Direction::HigherIsBetter),
            "lower_is_better" => Ok(Direction::LowerIsBetter),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

/// Broad area of the site a metric describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGroup {
    Traffic,
    Engagement,
    Search,
    Acquisition,
    Audience,
}

impl MetricGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricGroup::Traffic => "traffic",
            MetricGroup::Engagement => "engagement",
            MetricGroup::Search => "search",
            MetricGroup::Acquisition => "acquisition",
            MetricGroup::Audience => "audience",
        }
    }

    /// Classify a metric by its name
    pub fn for_metric(name: &str) -> Self {
        if name.ends_with("_traffic_share") && !name.starts_with("mobile") {
            return MetricGroup::Acquisition;
        }
        match name {
            "bounce_rate"
            | "mobile_bounce_rate"
            | "avg_session_duration"
            | "pages_per_session"
            | "engagement_rate"
            | "engaged_sessions"
            | "exit_rate" => MetricGroup::Engagement,
            "avg_search_position"
            | "search_ctr"
            | "search_clicks"
            | "search_impressions"
            | "total_clicks"
            | "total_impressions" => MetricGroup::Search,
            "new_visitor_rate" | "mobile_traffic_share" | "returning_users" => {
                MetricGroup::Audience
            }
            _ => MetricGroup::Traffic,
        }
    }
}

impl fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Human-readable label for a metric name
///
/// Known metrics have curated labels; anything else is derived from the
/// snake_case name ("donation_page_views" -> "Donation page views").
pub fn metric_label(name: &str) -> String {
    let known = match name {
        "total_users" => Some("Total users"),
        "new_users" => Some("New users"),
        "sessions" => Some("Sessions"),
        "pageviews" => Some("Pageviews"),
        "bounce_rate" => Some("Bounce rate"),
        "mobile_bounce_rate" => Some("Mobile bounce rate"),
        "avg_session_duration" => Some("Average session duration"),
        "pages_per_session" => Some("Pages per session"),
        "engagement_rate" => Some("Engagement rate"),
        "organic_traffic_share" => Some("Organic search share"),
        "direct_traffic_share" => Some("Direct traffic share"),
        "referral_traffic_share" => Some("Referral traffic share"),
        "social_traffic_share" => Some("Social traffic share"),
        "new_visitor_rate" => Some("New visitor rate"),
        "mobile_traffic_share" => Some("Mobile traffic share"),
        "avg_search_position" => Some("Average search position"),
        "search_ctr" => Some("Search click-through rate"),
        "total_clicks" | "search_clicks" => Some("Search clicks"),
        "total_impressions" | "search_impressions" => Some("Search impressions"),
        _ => None,
    };

    if let Some(label) = known {
        return label.to_string();
    }

    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Inclusive date range a snapshot covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl SnapshotPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        if end_date < start_date {
            return Err(Error::InvalidData(format!(
                "Snapshot period ends ({}) before it starts ({})",
                end_date, start_date
            )));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }
}

/// A single named measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub name: String,
    pub value: f64,
    pub unit: Unit,
}

/// Metrics for one reporting period, in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct MetricSnapshot {
    #[serde(flatten)]
    period: SnapshotPeriod,
    metrics: Vec<MetricValue>,
}

#[derive(Deserialize)]
struct RawSnapshot {
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(default)]
    metrics: Vec<MetricValue>,
}

impl TryFrom<RawSnapshot> for MetricSnapshot {
    type Error = Error;

    fn try_from(raw: RawSnapshot) -> Result<Self> {
        let mut snapshot = MetricSnapshot::new(SnapshotPeriod::new(raw.start_date, raw.end_date)?);
        for metric in raw.metrics {
            snapshot.push(metric.name, metric.value, metric.unit)?;
        }
        Ok(snapshot)
    }
}

impl MetricSnapshot {
    pub fn new(period: SnapshotPeriod) -> Self {
        Self {
            period,
            metrics: Vec::new(),
        }
    }

    /// Append a metric, rejecting duplicate names and negative or non-finite values
    pub fn push(&mut self, name: impl Into<String>, value: f64, unit: Unit) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidData("Metric name is empty".to_string()));
        }
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidData(format!(
                "Metric {} has invalid value {}",
                name, value
            )));
        }
        if self.get(&name).is_some() {
            return Err(Error::InvalidData(format!(
                "Metric {} appears more than once in snapshot",
                name
            )));
        }
        self.metrics.push(MetricValue { name, value, unit });
        Ok(())
    }

    /// Builder-style [`push`](Self::push)
    pub fn with_metric(mut self, name: impl Into<String>, value: f64, unit: Unit) -> Result<Self> {
        self.push(name, value, unit)?;
        Ok(self)
    }

    pub fn period(&self) -> SnapshotPeriod {
        self.period
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.iter().find(|m| m.name == name)
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).map(|m| m.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricValue> {
        self.metrics.iter()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Parse a snapshot from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period() -> SnapshotPeriod {
        SnapshotPeriod::new(
            NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let snapshot = MetricSnapshot::new(period())
            .with_metric("sessions", 1200.0, Unit::Count)
            .unwrap()
            .with_metric("bounce_rate", 48.5, Unit::Percent)
            .unwrap()
            .with_metric("avg_session_duration", 95.0, Unit::Seconds)
            .unwrap();

        let names: Vec<_> = snapshot.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["sessions", "bounce_rate", "avg_session_duration"]
        );
        assert_eq!(snapshot.value("bounce_rate"), Some(48.5));
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_push_rejects_duplicates() {
        let mut snapshot = MetricSnapshot::new(period());
        snapshot.push("sessions", 10.0, Unit::Count).unwrap();
        let err = snapshot.push("sessions", 12.0, Unit::Count).unwrap_err();
        assert!(err.to_string().contains("more than once"));
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_push_rejects_negative_and_nan() {
        let mut snapshot = MetricSnapshot::new(period());
        assert!(snapshot.push("sessions", -1.0, Unit::Count).is_err());
        assert!(snapshot.push("sessions", f64::NAN, Unit::Count).is_err());
        assert!(snapshot.push("", 1.0, Unit::Count).is_err());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_period_rejects_reversed_dates() {
        let result = SnapshotPeriod::new(
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_json_validates() {
        let json = r#"{
            "start_date": "2024-10-01",
            "end_date": "2024-12-31",
            "metrics": [
                {"name": "sessions", "value": 1000, "unit": "count"},
                {"name": "bounce_rate", "value": 52.1, "unit": "percent"}
            ]
        }"#;
        let snapshot = MetricSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("bounce_rate").unwrap().unit, Unit::Percent);

        let duplicate = r#"{
            "start_date": "2024-10-01",
            "end_date": "2024-12-31",
            "metrics": [
                {"name": "sessions", "value": 1000, "unit": "count"},
                {"name": "sessions", "value": 1001, "unit": "count"}
            ]
        }"#;
        assert!(MetricSnapshot::from_json(duplicate).is_err());
    }

    #[test]
    fn test_snapshot_json_roundtrip_shape() {
        let snapshot = MetricSnapshot::new(period())
            .with_metric("sessions", 5.0, Unit::Count)
            .unwrap();
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["start_date"], "2024-10-01");
        assert_eq!(value["metrics"][0]["unit"], "count");
    }

    #[test]
    fn test_direction_improvement() {
        assert!(Direction::HigherIsBetter.is_improvement(5.0));
        assert!(!Direction::HigherIsBetter.is_improvement(-5.0));
        assert!(Direction::LowerIsBetter.is_improvement(-5.0));
        assert!(!Direction::LowerIsBetter.is_improvement(0.0));
    }

    #[test]
    fn test_metric_label_and_group() {
        assert_eq!(metric_label("bounce_rate"), "Bounce rate");
        assert_eq!(metric_label("donation_page_views"), "Donation page views");
        assert_eq!(
            MetricGroup::for_metric("organic_traffic_share"),
            MetricGroup::Acquisition
        );
        assert_eq!(
            MetricGroup::for_metric("mobile_traffic_share"),
            MetricGroup::Audience
        );
        assert_eq!(MetricGroup::for_metric("search_ctr"), MetricGroup::Search);
        assert_eq!(MetricGroup::for_metric("sessions"), MetricGroup::Traffic);
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!(Unit::from_str("percent").unwrap(), Unit::Percent);
        assert_eq!(Unit::from_str("%").unwrap(), Unit::Percent);
        assert!(Unit::from_str("pages").is_err());
    }
}
