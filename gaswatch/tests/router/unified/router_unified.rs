use std::sync::Arc;

use gaswatch::columns::{AVERAGE_GAS_PRICE, GAS_PRICE_CLOSE, GAS_PRICE_OPEN};
use gaswatch::{Cell, GAS_LABEL, GasError, GasWatch, JoinMode, RawTable, gas_table};

use crate::helpers::{MockConnector, d, hist, m_hist, metric_table};

#[test]
fn gas_table_renames_average_and_drops_samples() {
    let (table, excluded) = gas_table(&hist(&[0, 1], 50.0)).unwrap();
    assert_eq!(excluded, 0);
    assert_eq!(table.key(), "Date");
    assert_eq!(
        table.columns(),
        &[
            "GasPriceOpen",
            "GasPriceClose",
            "GasPriceLow",
            "GasPriceHigh",
            AVERAGE_GAS_PRICE
        ]
    );
    assert_eq!(table.get(d(2021, 8, 1), AVERAGE_GAS_PRICE), Some(&Cell::Number(500.0)));
    assert_eq!(table.get(d(2021, 8, 2), GAS_PRICE_OPEN), Some(&Cell::Number(49.0)));
}

#[tokio::test]
async fn inner_then_left_steps_follow_plan_order() {
    // Gas on 08-01..=08-05.
    let volume = metric_table(
        "Volume",
        &[
            (d(2021, 8, 1), 1.0),
            (d(2021, 8, 2), 2.0),
            (d(2021, 8, 3), 3.0),
            (d(2021, 8, 4), 4.0),
        ],
    );
    let burnt = metric_table("Burnt", &[(d(2021, 8, 3), 30.0), (d(2021, 8, 4), 40.0)]);
    let gw = GasWatch::builder()
        .with_connector(m_hist("H", &[0, 1, 2, 3, 4], 10.0))
        .metric_table("Volume", volume, JoinMode::Inner)
        .metric_table("Burnt", burnt, JoinMode::Left)
        .build()
        .unwrap();

    let unified = gw.unified().await.unwrap();

    let rows: Vec<usize> = unified.merge.steps.iter().map(|s| s.rows).collect();
    assert_eq!(rows, vec![5, 4, 4]);
    assert_eq!(unified.merge.steps[0].source, GAS_LABEL);
    assert_eq!(unified.merge.steps[2].mode, Some(JoinMode::Left));
    assert_eq!(unified.merge.attrition(), 1);

    let t = &unified.table;
    assert_eq!(t.len(), 4);
    assert_eq!(t.columns().last().map(String::as_str), Some("Burnt"));
    assert_eq!(t.get(d(2021, 8, 1), "Burnt"), Some(&Cell::Missing));
    assert_eq!(t.get(d(2021, 8, 4), "Burnt"), Some(&Cell::Number(40.0)));
    assert_eq!(t.get(d(2021, 8, 2), GAS_PRICE_CLOSE), Some(&Cell::Number(10.0)));
    assert!(t.get(d(2021, 8, 5), GAS_PRICE_CLOSE).is_none());
    assert_eq!(unified.attribution.spans.len(), 1);
}

#[tokio::test]
async fn connector_metrics_are_fetched_and_excluded_rows_counted() {
    let mut raw = RawTable::new(["Date(UTC)", "Value"]).unwrap();
    raw.push_row(vec![Cell::Text("08/01/2021".into()), Cell::Number(1.0)])
        .unwrap();
    raw.push_row(vec![Cell::Text("not a date".into()), Cell::Number(2.0)])
        .unwrap();
    let table = gaswatch::MetricTable::new(raw, "Date(UTC)").rename("Value", "X");
    let source = MockConnector::new("M").with_metric("X", Ok(table));

    let gw = GasWatch::builder()
        .with_connector(m_hist("H", &[0, 1], 10.0))
        .with_connector(Arc::new(source))
        .metric("X", JoinMode::Inner)
        .build()
        .unwrap();

    let unified = gw.unified().await.unwrap();
    assert_eq!(unified.table.len(), 1);
    assert_eq!(
        unified.excluded,
        vec![(GAS_LABEL.to_string(), 0), ("X".to_string(), 1)]
    );
}

#[tokio::test]
async fn colliding_columns_are_schema_errors() {
    let dup = metric_table(AVERAGE_GAS_PRICE, &[(d(2021, 8, 1), 1.0)]);
    let gw = GasWatch::builder()
        .with_connector(m_hist("H", &[0], 10.0))
        .metric_table("dup", dup, JoinMode::Inner)
        .build()
        .unwrap();
    let err = gw.unified().await.unwrap_err();
    assert!(matches!(err, GasError::Schema(_)));
}

#[tokio::test]
async fn missing_metric_aborts_the_build() {
    let gw = GasWatch::builder()
        .with_connector(m_hist("H", &[0], 10.0))
        .metric("Nope", JoinMode::Inner)
        .build()
        .unwrap();
    let err = gw.unified().await.unwrap_err();
    assert!(matches!(err, GasError::NotFound { .. }));
}
