use gaswatch_core::columns::{
    BLOCK_SIZE, DAILY_ETH_BURNT, ETH_VOLUME_USD, TRANSACTIONS_AMOUNT, UNIQUE_ADDRESS_RECEIVE_COUNT,
    UNIQUE_ADDRESS_SENT_COUNT, UNIQUE_ADDRESS_TOTAL_COUNT,
};
use gaswatch_core::{Cell, GasError, MetricTable, RawTable};

use super::{DAYS, day, unix};

/// Name of the combined unique-address export.
pub const UNIQUE_ADDRESSES: &str = "UniqueAddresses";

/// Metric names served by the mock connector.
pub const SUPPORTED: &[&str] = &[
    ETH_VOLUME_USD,
    TRANSACTIONS_AMOUNT,
    BLOCK_SIZE,
    DAILY_ETH_BURNT,
    UNIQUE_ADDRESSES,
];

/// Index of the first post-London fixture day (2021-08-05).
pub const LONDON_INDEX: u32 = 21;

/// Fixture day missing from the block size export (2021-07-20).
pub const BLOCK_SIZE_GAP: u32 = 5;

/// Fixture day exported twice in the transaction count export (2021-08-01).
pub const TRANSACTIONS_DUPLICATE: u32 = 17;

pub fn by_name(name: &str) -> Result<Option<MetricTable>, GasError> {
    let table = match name {
        ETH_VOLUME_USD => etherscan(name, (0..DAYS).map(|i| (i, 1.0e9 + f64::from(i) * 1.0e7)))?,
        TRANSACTIONS_AMOUNT => {
            let rows = (0..DAYS)
                .map(|i| (i, 1_200_000.0 + f64::from(i) * 1_000.0))
                .chain(std::iter::once((TRANSACTIONS_DUPLICATE, 1.0)));
            etherscan(name, rows)?
        }
        BLOCK_SIZE => etherscan(
            name,
            (0..DAYS)
                .filter(|i| *i != BLOCK_SIZE_GAP)
                .map(|i| (i, 50_000.0 + f64::from(i) * 100.0)),
        )?,
        DAILY_ETH_BURNT => etherscan(
            name,
            (LONDON_INDEX..DAYS).map(|i| (i, 1_000.0 + f64::from(i - LONDON_INDEX) * 10.0)),
        )?,
        UNIQUE_ADDRESSES => unique_addresses()?,
        _ => return Ok(None),
    };
    Ok(Some(table))
}

/// Etherscan chart export: `Date(UTC)`, `UnixTimeStamp`, `Value`.
fn etherscan(
    name: &str,
    rows: impl Iterator<Item = (u32, f64)>,
) -> Result<MetricTable, GasError> {
    let mut raw = RawTable::new(["Date(UTC)", "UnixTimeStamp", "Value"])?;
    for (i, v) in rows {
        #[allow(clippy::cast_precision_loss)]
        let ts = unix(i) as f64;
        raw.push_row(vec![
            Cell::Text(day(i).format("%-m/%-d/%Y").to_string()),
            Cell::Number(ts),
            Cell::Number(v),
        ])?;
    }
    Ok(MetricTable::new(raw, "UnixTimeStamp")
        .rename("Value", name)
        .keep(&[name]))
}

fn unique_addresses() -> Result<MetricTable, GasError> {
    let mut raw = RawTable::new([
        "Date(UTC)",
        UNIQUE_ADDRESS_TOTAL_COUNT,
        UNIQUE_ADDRESS_RECEIVE_COUNT,
        UNIQUE_ADDRESS_SENT_COUNT,
    ])?;
    for i in 0..DAYS {
        let x = f64::from(i);
        raw.push_row(vec![
            Cell::Text(day(i).format("%-m/%-d/%Y").to_string()),
            Cell::Number(150_000_000.0 + x * 100_000.0),
            Cell::Number(500_000.0 + x),
            Cell::Number(400_000.0 + x),
        ])?;
    }
    Ok(MetricTable::new(raw, "Date(UTC)"))
}
