//! gaswatch-core
//!
//! Data model, pipeline stages, and connector traits shared across the gaswatch
//! workspace.
//!
//! - `types`: cells, raw and dated tables, candles, plus re-exported reports.
//! - `timeseries`: the five pipeline stages (flatten, normalize, merge,
//!   resample, compare).
//! - `io`: delimited-file persistence of the unified artifact.
//! - `connector`: the `GasConnector` trait and its capability provider traits.
//!
//! Every pipeline stage is a synchronous, pure function over tables. Only the
//! connector traits are async; they assume a Tokio 1.x runtime in the
//! orchestrator.
//!
#![warn(missing_docs)]

/// Candle and oracle history document types.
pub mod candle;
/// Canonical column names.
pub mod columns;
/// Connector capability traits and the primary `GasConnector` interface.
pub mod connector;
/// Polars conversions, behind the `dataframe` feature.
#[cfg(feature = "dataframe")]
pub mod dataframe;
/// Delimited-file reading and writing.
pub mod io;
/// Metric source tables.
pub mod metric;
/// Cell and table containers.
pub mod table;
/// The time-series pipeline.
pub mod timeseries;
/// Re-exported shared types.
pub mod types;

pub use connector::GasConnector;
#[cfg(feature = "dataframe")]
pub use dataframe::ToDataFrame;
pub use io::{
    read_csv, read_csv_path, read_dated, read_dated_path, read_unified, read_unified_path,
    write_unified, write_unified_path,
};
pub use metric::MetricTable;
pub use timeseries::compare::{
    MetricSeries, compare, compare_growth, comparison_report, growth, partition_stats,
};
pub use timeseries::flatten::flatten_candles;
pub use timeseries::merge::{MergePlan, dedup_by_date, merge};
pub use timeseries::normalize::{coerce_date, normalize};
pub use timeseries::resample::{forward_fill, resample, resample_weekly};
pub use types::*;
