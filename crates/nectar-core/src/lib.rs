//! Nectar Core Library
//!
//! Analysis core for the Nectar nonprofit web analytics reporter:
//! - Metric snapshots for a reporting period
//! - Period-over-period trend detection
//! - Benchmark comparison against nonprofit industry norms
//! - Rule-based insights (strengths, challenges, opportunities)
//! - Report assembly with executive summary and recommendations
//! - Quarterly period utilities and display formatting
//! - JSON and CSV export

pub mod benchmarks;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod insights;
pub mod models;
pub mod periods;
pub mod report;
pub mod trends;

pub use benchmarks::{
    compare_to_benchmark, summarize_benchmarks, BenchmarkComparison, BenchmarkEntry,
    BenchmarkStatus, BenchmarkSummary, BenchmarkTable, DirectionTable,
};
pub use config::{AnalysisConfig, Thresholds};
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use insights::{Insight, InsightCategory, InsightEngine, InsightSet, InsightSource};
pub use models::{Direction, MetricGroup, MetricSnapshot, MetricValue, SnapshotPeriod, Unit};
pub use periods::{ComparisonPeriods, ComparisonType, DatePeriod, Quarter};
pub use report::{Report, ReportAssembler, ReportMetadata, ReportRequest};
pub use trends::{TrendClass, TrendDetector, TrendResult};
