//! Re-export of foundational types from `gaswatch-types`.
// Consolidated re-exports so downstream crates can depend on `gaswatch-core` only

pub use gaswatch_types::{Attribution, ConnectorKey, GasError, Span};
pub use gaswatch_types::{AnalysisConfig, HistoryWindow, JoinMode, LONDON_UPGRADE, MergeStrategy, Network};
pub use gaswatch_types::{
    ComparisonReport, ComparisonResult, Direction, GrowthComparison, MergeReport, MergeStep,
    PartitionStats, Side,
};

pub use crate::candle::{Candle, CandleHistory};
pub use crate::table::{Cell, DatedRow, DatedTable, RawTable};
pub use crate::timeseries::normalize::Normalized;
pub use crate::timeseries::resample::{ResampledRow, ResampledSeries};
