use crate::candle::Candle;
use crate::columns::CANDLE_COLUMNS;
use crate::table::{Cell, RawTable};

/// Flatten candles into a table with the fixed candle schema.
///
/// One row per candle, in input order. An empty slice yields an empty table
/// that still carries every column.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn flatten_candles(candles: &[Candle]) -> RawTable {
    let rows = candles
        .iter()
        .map(|c| {
            vec![
                Cell::Number(c.timestamp as f64),
                Cell::from(c.open),
                Cell::from(c.close),
                Cell::from(c.low),
                Cell::from(c.high),
                Cell::from(c.avg_gas),
                Cell::Number(c.samples as f64),
            ]
        })
        .collect();
    RawTable::from_parts(CANDLE_COLUMNS.iter().map(|c| (*c).to_string()).collect(), rows)
}
