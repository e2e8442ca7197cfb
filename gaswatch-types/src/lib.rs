//! Gaswatch data transfer objects, error taxonomy, and configuration primitives.
#![warn(missing_docs)]

mod attribution;
mod config;
mod connector;
mod error;
mod reports;

pub use attribution::{Attribution, Span};
pub use config::{AnalysisConfig, HistoryWindow, JoinMode, LONDON_UPGRADE, MergeStrategy, Network};
pub use connector::ConnectorKey;
pub use error::GasError;
pub use reports::{
    ComparisonReport, ComparisonResult, Direction, GrowthComparison, MergeReport, MergeStep,
    PartitionStats, Side,
};
