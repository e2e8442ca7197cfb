use chrono::NaiveDate;
use gaswatch_core::columns::{CANDLE_COLUMNS, TIMESTAMP};
use gaswatch_core::{
    Candle, CandleHistory, Cell, GasError, RawTable, coerce_date, flatten_candles, normalize,
};
use serde_json::json;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn candle(ts: i64, avg: f64) -> Candle {
    Candle {
        timestamp: ts,
        open: 50.0,
        close: 60.0,
        low: 40.0,
        high: 90.0,
        avg_gas: avg,
        samples: 1440,
    }
}

#[test]
fn flatten_keeps_order_and_schema() {
    let candles = vec![candle(1_609_459_200, 70.5), candle(1_609_545_600, 80.0)];
    let raw = flatten_candles(&candles);
    assert_eq!(raw.columns(), CANDLE_COLUMNS);
    assert_eq!(raw.len(), 2);
    assert_eq!(raw.rows()[0][0], Cell::Number(1_609_459_200.0));
    assert_eq!(raw.rows()[1][5], Cell::Number(80.0));
    assert_eq!(raw.rows()[1][6], Cell::Number(1440.0));
}

#[test]
fn flatten_empty_has_full_schema() {
    let raw = flatten_candles(&[]);
    assert!(raw.is_empty());
    assert_eq!(raw.columns().len(), 7);
}

#[test]
fn history_parses_owlracle_shape() {
    let doc = json!({
        "candles": [
            {
                "timestamp": "2021-01-01T00:00:00.000Z",
                "gasPrice": {"open": 50.1, "close": 60.2, "low": 40.0, "high": 99.9},
                "avgGas": 71234.5,
                "samples": 1440
            },
            {
                "timestamp": 1_609_545_600,
                "gasPrice": {"open": 1, "close": 2, "low": 1, "high": 3},
                "avgGas": 1,
                "samples": 10
            }
        ]
    });
    let history = CandleHistory::from_json(&doc).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.candles[0].timestamp, 1_609_459_200);
    assert!((history.candles[0].high - 99.9).abs() < f64::EPSILON);
    assert_eq!(history.candles[1].samples, 10);
}

#[test]
fn missing_fields_are_schema_errors() {
    let no_avg = json!({"candles": [{
        "timestamp": 1, "gasPrice": {"open": 1, "close": 1, "low": 1, "high": 1}, "samples": 1
    }]});
    assert!(matches!(
        CandleHistory::from_json(&no_avg),
        Err(GasError::Schema(_))
    ));
    assert!(matches!(
        CandleHistory::from_json(&json!({"error": 401})),
        Err(GasError::Schema(_))
    ));
    let bad_ts = json!({"candles": [{
        "timestamp": "yesterday",
        "gasPrice": {"open": 1, "close": 1, "low": 1, "high": 1},
        "avgGas": 1, "samples": 1
    }]});
    assert!(matches!(
        CandleHistory::from_json(&bad_ts),
        Err(GasError::Schema(_))
    ));
    assert!(matches!(
        CandleHistory::from_json_str("{\"candles\": ["),
        Err(GasError::Data(_))
    ));
}

#[test]
fn normalize_flattened_candles_on_timestamp() {
    // 2021-01-01 13:00 UTC keeps its calendar day.
    let raw = flatten_candles(&[candle(1_609_506_000, 1.0), candle(1_609_545_600, 2.0)]);
    let out = normalize(&raw, TIMESTAMP).unwrap();
    assert_eq!(out.excluded, 0);
    assert_eq!(out.table.key(), "Date");
    assert_eq!(out.table.columns().len(), 6);
    assert_eq!(out.table.dates().collect::<Vec<_>>(), vec![d(2021, 1, 1), d(2021, 1, 2)]);
}

#[test]
fn coerces_supported_formats() {
    let expect = d(2021, 8, 5);
    for text in [
        "1628121600",
        "2021-08-05T10:11:12Z",
        "2021-08-05T10:11:12+02:00",
        "2021-08-05 10:11:12",
        "2021-08-05T10:11:12.250",
        "2021-08-05",
        "8/5/2021",
    ] {
        assert_eq!(coerce_date(&Cell::parse(text)), Some(expect), "{text}");
    }
    assert_eq!(coerce_date(&Cell::Number(1_628_121_600.0)), Some(expect));
    assert_eq!(coerce_date(&Cell::Missing), None);
    assert_eq!(coerce_date(&Cell::from("not a date")), None);
}

#[test]
fn unparseable_dates_are_excluded_and_counted() {
    let mut raw = RawTable::new(["Date(UTC)", "Value"]).unwrap();
    raw.push_row(vec![Cell::from("7/30/2015"), Cell::Number(1.0)]).unwrap();
    raw.push_row(vec![Cell::Missing, Cell::Number(2.0)]).unwrap();
    raw.push_row(vec![Cell::from("n/a"), Cell::Number(3.0)]).unwrap();
    let out = normalize(&raw, "Date(UTC)").unwrap();
    assert_eq!(out.excluded, 2);
    assert_eq!(out.table.len(), 1);
    assert_eq!(out.table.get(d(2015, 7, 30), "Value"), Some(&Cell::Number(1.0)));
}

#[test]
fn absent_date_column_is_schema_error() {
    let raw = RawTable::new(["Value"]).unwrap();
    assert!(matches!(normalize(&raw, "Date"), Err(GasError::Schema(_))));

    let clash = RawTable::new(["UnixTimeStamp", "Date"]).unwrap();
    assert!(matches!(
        normalize(&clash, "UnixTimeStamp"),
        Err(GasError::Schema(_))
    ));
}

#[test]
fn normalize_is_idempotent() {
    let mut raw = RawTable::new(["UnixTimeStamp", "Value", "Note"]).unwrap();
    raw.push_row(vec![Cell::Number(1_628_121_600.0), Cell::Number(1.5), Cell::from("x")])
        .unwrap();
    raw.push_row(vec![Cell::Number(1_628_208_000.0), Cell::Missing, Cell::from("y")])
        .unwrap();
    let once = normalize(&raw, "UnixTimeStamp").unwrap().table;
    let twice = normalize(&once.to_raw(), "Date").unwrap();
    assert_eq!(twice.excluded, 0);
    assert_eq!(twice.table, once);
}

#[test]
fn rename_select_and_drop_helpers() {
    let mut raw = RawTable::new(["Date", "Value", "Extra"]).unwrap();
    raw.push_row(vec![Cell::from("2021-08-05"), Cell::Number(1.0), Cell::Missing])
        .unwrap();
    raw.drop_column("Extra").unwrap();
    let mut table = normalize(&raw, "Date").unwrap().table;
    table.rename_column("Value", "BlockSize").unwrap();
    assert!(table.rename_column("BlockSize", "Date").is_err());
    assert!(table.rename_column("Missing", "X").is_err());
    let selected = table.select(&["BlockSize"]).unwrap();
    assert_eq!(selected.columns(), ["BlockSize"]);
    assert!(table.select(&["Nope"]).is_err());
}
