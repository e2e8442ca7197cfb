#![cfg(feature = "dataframe")]

use chrono::NaiveDate;
use gaswatch_core::{Cell, DatedTable, ToDataFrame, resample};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn table() -> DatedTable {
    let mut t = DatedTable::new(["GasPriceClose", "Note"]).unwrap();
    t.push(d(2021, 8, 1), vec![Cell::Number(10.0), Cell::Text("a".into())])
        .unwrap();
    t.push(d(2021, 8, 2), vec![Cell::Missing, Cell::Missing]).unwrap();
    t.push(d(2021, 8, 3), vec![Cell::Number(30.0), Cell::Text("c".into())])
        .unwrap();
    t
}

#[test]
fn dated_table_keeps_key_and_every_column() {
    let df = table().to_dataframe().unwrap();
    assert_eq!(df.height(), 3);
    assert_eq!(df.width(), 3);
}

#[test]
fn resampled_series_drops_text_columns() {
    let series = resample(&table(), 2).unwrap();
    let df = series.to_dataframe().unwrap();
    // Date plus the single numeric column; buckets 08-01 and 08-03.
    assert_eq!(df.height(), 2);
    assert_eq!(df.width(), 2);
}
