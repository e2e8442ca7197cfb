#![allow(dead_code)]

// Re-export helpers so tests can `use helpers::*;`
pub mod mock_connector;

pub use mock_connector::MockConnector;

use std::sync::Arc;

use chrono::NaiveDate;
use gaswatch::{Candle, CandleHistory, Cell, GasConnector, MetricTable, RawTable};

/// Midnight UTC of 2021-08-01.
pub const AUG_1: i64 = 1_627_776_000;
pub const DAY: i64 = 86_400;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// A daily candle whose prices derive from `close`.
pub fn candle(ts: i64, close: f64) -> Candle {
    Candle {
        timestamp: ts,
        open: close - 1.0,
        close,
        low: close - 2.0,
        high: close + 2.0,
        avg_gas: close * 10.0,
        samples: 1440,
    }
}

/// History with one candle per entry of `days` (offsets from 2021-08-01).
pub fn hist(days: &[i64], close: f64) -> CandleHistory {
    CandleHistory {
        candles: days.iter().map(|i| candle(AUG_1 + i * DAY, close)).collect(),
    }
}

/// Connector that only serves gas history.
pub fn m_hist(name: &'static str, days: &[i64], close: f64) -> Arc<dyn GasConnector> {
    Arc::new(MockConnector::new(name).with_history(Ok(hist(days, close))))
}

/// Etherscan-like export: `Date(UTC)` text dates and one `Value` column,
/// renamed to `name` on normalization.
pub fn metric_table(name: &str, rows: &[(NaiveDate, f64)]) -> MetricTable {
    let mut raw = RawTable::new(["Date(UTC)", "Value"]).unwrap();
    for (date, v) in rows {
        raw.push_row(vec![
            Cell::Text(date.format("%m/%d/%Y").to_string()),
            Cell::Number(*v),
        ])
        .unwrap();
    }
    MetricTable::new(raw, "Date(UTC)")
        .rename("Value", name)
        .keep(&[name])
}
