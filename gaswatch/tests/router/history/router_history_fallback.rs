use std::sync::Arc;

use gaswatch::{GasError, GasWatch, HistoryWindow};

use crate::helpers::{MockConnector, hist, m_hist};

#[tokio::test]
async fn fallback_stops_at_first_non_empty() {
    let gw = GasWatch::builder()
        .with_connector(m_hist("EMPTY", &[], 1.0))
        .with_connector(m_hist("A", &[0, 1], 10.0))
        .with_connector(m_hist("B", &[2, 3], 20.0))
        .build()
        .unwrap();

    let (merged, attr) = gw
        .gas_history_with_attribution(&HistoryWindow::default())
        .await
        .unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(attr.spans.len(), 1);
    assert_eq!(attr.spans[0].0, "A");
}

#[tokio::test]
async fn fallback_skips_failures_and_not_found() {
    let failing = MockConnector::new("BAD").with_history(Err(GasError::connection("BAD", "down")));
    let missing = MockConnector::new("NF").with_history(Err(GasError::not_found("history")));
    let gw = GasWatch::builder()
        .with_connector(Arc::new(failing))
        .with_connector(Arc::new(missing))
        .with_connector(m_hist("OK", &[0], 5.0))
        .build()
        .unwrap();

    let merged = gw.gas_history(&HistoryWindow::default()).await.unwrap();
    assert_eq!(merged, hist(&[0], 5.0));
}

#[tokio::test]
async fn connectors_without_history_are_ignored() {
    let metrics_only = MockConnector::new("M").with_metric("X", Err(GasError::not_found("X")));
    let gw = GasWatch::builder()
        .with_connector(Arc::new(metrics_only))
        .with_connector(m_hist("A", &[0], 1.0))
        .build()
        .unwrap();
    assert_eq!(gw.gas_history(&HistoryWindow::default()).await.unwrap().len(), 1);
}
