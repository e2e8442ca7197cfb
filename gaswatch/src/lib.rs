//! gaswatch orchestrates gas price and on-chain metric sources into one
//! comparable dataset.
//!
//! Overview
//! - Routes gas history requests to connectors implementing the
//!   `gaswatch_core` contracts and combines their candles.
//! - Fetches or accepts metric tables and joins them onto the gas table with a
//!   declarative, ordered merge plan.
//! - Resamples the merged dataset and compares each metric before and after a
//!   cutoff date (the London upgrade by default).
//!
//! Key behaviors and trade-offs
//! - History merge:
//!   - `Deep`: query all history connectors and backfill gaps; most complete,
//!     more requests.
//!   - `Fallback`: first non-empty history wins; economical but may miss data
//!     held by later connectors.
//! - Join modes: an `Inner` step keeps dates present on both sides, a `Left`
//!   step keeps every accumulated date and leaves absent cells missing. Sources
//!   that only start mid-window (burnt fees before London) are joined left.
//! - Every provider call is bounded by a timeout; there are no retries.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use gaswatch::{GasWatch, JoinMode};
//! use gaswatch_mock::MockConnector;
//!
//! let gw = GasWatch::builder()
//!     .with_connector(Arc::new(MockConnector::new()))
//!     .metric("EthVolumeUSD", JoinMode::Inner)
//!     .metric("DailyEthBurnt", JoinMode::Left)
//!     .build()?;
//!
//! let analysis = gw.analyze(&["average_gas_price", "EthVolumeUSD"]).await?;
//! for c in &analysis.report.comparisons {
//!     println!("{}: {:?}", c.metric, c.mean_direction);
//! }
//! ```
//!
//! See `gaswatch/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{GasWatch, GasWatchBuilder, tag_err};
pub use router::analysis::Analysis;
pub use router::unified::{GAS_LABEL, UnifiedBuild, gas_table};

// Re-export core types for convenience
pub use gaswatch_core::{
    AnalysisConfig, Attribution, Candle, CandleHistory, Cell, ComparisonReport, ComparisonResult,
    DatedTable, Direction, GasConnector, GasError, GrowthComparison, HistoryWindow, JoinMode,
    LONDON_UPGRADE, MergeReport, MergeStep, MergeStrategy, MetricTable, Network, PartitionStats,
    RawTable, ResampledSeries, Side, Span, columns,
};
#[cfg(feature = "dataframe")]
pub use gaswatch_core::ToDataFrame;
