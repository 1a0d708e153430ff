//! Insight Engine - qualitative findings from quantitative comparisons
//!
//! The engine reads trend results and benchmark comparisons and classifies
//! each metric into findings a nonprofit can act on.
//!
//! ## Categories
//!
//! - **Strength** - improved period over period, or better than the benchmark
//! - **Challenge** - declined, or moved sharply in the wrong direction
//! - **Opportunity** - trails the benchmark without an active decline
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nectar_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new(&config);
//! let insights = engine.generate(&trends, &comparisons);
//! let summary = engine.summarize(&insights);
//! ```

pub mod engine;
pub mod narrative;
pub mod types;

pub use engine::InsightEngine;
pub use narrative::{key_recommendations, narrative_summary};
pub use types::{Insight, InsightCategory, InsightSet, InsightSource};
