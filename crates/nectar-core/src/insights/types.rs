//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    /// Something the organization is doing well
    Strength,
    /// Something that got worse and needs attention
    Challenge,
    /// Below the industry norm without an active decline (quick win)
    Opportunity,
}

impl InsightCategory {
    pub const ALL: [InsightCategory; 3] = [
        InsightCategory::Strength,
        InsightCategory::Challenge,
        InsightCategory::Opportunity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::Strength => "strength",
            InsightCategory::Challenge => "challenge",
            InsightCategory::Opportunity => "opportunity",
        }
    }

    /// Plural heading ("Strengths")
    pub fn heading(&self) -> &'static str {
        match self {
            InsightCategory::Strength => "Strengths",
            InsightCategory::Challenge => "Challenges",
            InsightCategory::Opportunity => "Opportunities",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(InsightCategory::Strength),
            "challenge" => Ok(InsightCategory::Challenge),
            "opportunity" => Ok(InsightCategory::Opportunity),
            _ => Err(format!("Unknown insight category: {}", s)),
        }
    }
}

/// What evidence an insight was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    Trend,
    Benchmark,
    TrendAndBenchmark,
}

impl InsightSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightSource::Trend => "trend",
            InsightSource::Benchmark => "benchmark",
            InsightSource::TrendAndBenchmark => "trend_and_benchmark",
        }
    }
}

impl fmt::Display for InsightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified, human-readable finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub metric_name: String,
    pub headline: String,
    /// Percent change for trend insights, percent vs benchmark otherwise
    pub supporting_value: f64,
    /// 1-based position within the category, 1 = most significant
    pub severity_rank: u32,
    pub source: InsightSource,
    pub detail: Option<String>,
    pub recommendation: Option<String>,
    /// Ordering key; not part of the report output
    #[serde(skip)]
    pub(crate) magnitude: f64,
}

impl Insight {
    pub fn new(
        category: InsightCategory,
        metric_name: impl Into<String>,
        headline: impl Into<String>,
        supporting_value: f64,
        source: InsightSource,
    ) -> Self {
        Self {
            category,
            metric_name: metric_name.into(),
            headline: headline.into(),
            supporting_value,
            severity_rank: 0,
            source,
            detail: None,
            recommendation: None,
            magnitude: supporting_value.abs(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    /// Absolute size of the evidence behind this insight
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

/// Insights grouped by category, each list ordered by severity rank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightSet {
    pub strengths: Vec<Insight>,
    pub challenges: Vec<Insight>,
    pub opportunities: Vec<Insight>,
}

impl InsightSet {
    pub fn category(&self, category: InsightCategory) -> &[Insight] {
        match category {
            InsightCategory::Strength => &self.strengths,
            InsightCategory::Challenge => &self.challenges,
            InsightCategory::Opportunity => &self.opportunities,
        }
    }

    pub fn len(&self) -> usize {
        self.strengths.len() + self.challenges.len() + self.opportunities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Strengths, then challenges, then opportunities
    pub fn iter(&self) -> impl Iterator<Item = &Insight> {
        self.strengths
            .iter()
            .chain(self.challenges.iter())
            .chain(self.opportunities.iter())
    }
}
