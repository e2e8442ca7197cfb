use gaswatch::columns::AVERAGE_GAS_PRICE;
use gaswatch::{Direction, GasError, GasWatch, JoinMode};

use crate::helpers::{AUG_1, DAY, MockConnector, d, metric_table};

use std::sync::Arc;

fn rising_history() -> gaswatch::CandleHistory {
    // 2021-08-01 ..= 2021-08-10, close = 10 + day.
    gaswatch::CandleHistory {
        candles: (0..10)
            .map(|i| crate::helpers::candle(AUG_1 + i * DAY, 10.0 + i as f64))
            .collect(),
    }
}

#[tokio::test]
async fn compare_uses_configured_cutoff() {
    let gw = GasWatch::builder()
        .with_connector(Arc::new(
            MockConnector::new("H").with_history(Ok(rising_history())),
        ))
        .cutoff(d(2021, 8, 5))
        .build()
        .unwrap();
    let unified = gw.unified().await.unwrap();

    let c = gw.compare(&unified.table, "GasPriceClose").unwrap();
    // before: 08-01..=08-04 -> 10..=13; after: 08-05..=08-10 -> 14..=19
    assert_eq!(c.before.rows, 4);
    assert_eq!(c.after.rows, 6);
    assert!((c.before.mean - 11.5).abs() < 1e-9);
    assert!((c.after.mean - 16.5).abs() < 1e-9);
    assert_eq!(c.mean_direction, Direction::Increase);

    let g = gw.compare_growth(&unified.table, "GasPriceClose").unwrap();
    assert!((g.before - 30.0).abs() < 1e-9);
    assert!((g.after - (5.0 / 14.0 * 100.0)).abs() < 1e-9);
}

#[tokio::test]
async fn analyze_resamples_then_reports() {
    let gw = GasWatch::builder()
        .with_connector(Arc::new(
            MockConnector::new("H").with_history(Ok(rising_history())),
        ))
        .metric_table(
            "Late",
            metric_table("Late", &[(d(2021, 8, 9), 1.0)]),
            JoinMode::Left,
        )
        .resample_days(3)
        .cutoff(d(2021, 8, 5))
        .build()
        .unwrap();

    let analysis = gw
        .analyze(&[AVERAGE_GAS_PRICE, "Late", "Missing"])
        .await
        .unwrap();

    // 08-01 .. 08-10 spans 9 days: ceil(9/3) + 1 buckets.
    assert_eq!(analysis.resampled.len(), 4);
    assert_eq!(analysis.resampled.period_days, 3);
    assert!(analysis.report.get(AVERAGE_GAS_PRICE).is_some());
    // "Late" has no values before the cutoff, "Missing" is not a column.
    assert_eq!(analysis.report.warnings.len(), 2);
    assert!(matches!(analysis.report.warnings[0], GasError::NoData { .. }));
    assert!(matches!(analysis.report.warnings[1], GasError::Schema(_)));
}

#[tokio::test]
async fn load_reads_back_a_gas_only_artifact() {
    let gw = GasWatch::builder()
        .with_connector(Arc::new(
            MockConnector::new("H").with_history(Ok(rising_history())),
        ))
        .build()
        .unwrap();
    let unified = gw.unified().await.unwrap();

    let path = std::env::temp_dir().join(format!(
        "gaswatch_router_gas_only_{}.csv",
        std::process::id()
    ));
    gw.persist(&unified.table, &path).unwrap();
    let loaded = gw.load(&path);
    let strict = gaswatch_core::read_unified_path(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.unwrap(), unified.table);
    // The strict reader still wants every canonical metric column.
    assert!(matches!(strict, Err(GasError::Schema(_))));
}
