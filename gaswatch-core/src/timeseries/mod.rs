//! The gas-price time-series pipeline.
//!
//! - `flatten`: candle history to a flat table
//! - `normalize`: key a raw table by calendar date
//! - `merge`: fold several dated tables into one unified table
//! - `resample`: aggregate onto regular day buckets with forward fill
//! - `compare`: split-point statistics around a cutoff date
/// Split-point statistics over any metric series.
pub mod compare;
/// Candle flattening.
pub mod flatten;
/// Declarative multi-source joins on `Date`.
pub mod merge;
/// Date coercion and keying.
pub mod normalize;
/// Fixed-width day bucketing.
pub mod resample;
