use std::sync::Arc;

use gaswatch::{GasError, GasWatch, HistoryWindow, MergeStrategy};

use crate::helpers::{MockConnector, m_hist};

#[tokio::test]
async fn all_empty_is_not_found() {
    for strategy in [MergeStrategy::Deep, MergeStrategy::Fallback] {
        let gw = GasWatch::builder()
            .with_connector(m_hist("A", &[], 1.0))
            .with_connector(m_hist("B", &[], 1.0))
            .merge_history_strategy(strategy)
            .build()
            .unwrap();
        let err = gw.gas_history(&HistoryWindow::default()).await.unwrap_err();
        assert!(matches!(err, GasError::NotFound { .. }), "{strategy:?}: {err:?}");
    }
}

#[tokio::test]
async fn no_history_capability_is_not_found() {
    let gw = GasWatch::builder()
        .with_connector(Arc::new(
            MockConnector::new("M").with_metric("X", Err(GasError::not_found("X"))),
        ))
        .build()
        .unwrap();
    let err = gw.gas_history(&HistoryWindow::default()).await.unwrap_err();
    assert!(matches!(err, GasError::NotFound { .. }));
}

#[tokio::test]
async fn failures_are_aggregated() {
    let a = MockConnector::new("A").with_history(Err(GasError::connection("A", "boom")));
    let b = MockConnector::new("B").with_history(Err(GasError::schema("bad candles")));
    let gw = GasWatch::builder()
        .with_connector(Arc::new(a))
        .with_connector(Arc::new(b))
        .merge_history_strategy(MergeStrategy::Deep)
        .build()
        .unwrap();
    let err = gw.gas_history(&HistoryWindow::default()).await.unwrap_err();
    match err {
        GasError::AllProvidersFailed(errs) => {
            assert_eq!(errs.len(), 2);
            assert!(matches!(errs[0], GasError::Connection { .. }));
            assert!(matches!(errs[1], GasError::Schema(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn invalid_window_is_rejected() {
    let gw = GasWatch::builder()
        .with_connector(m_hist("A", &[0], 1.0))
        .build()
        .unwrap();
    let window = HistoryWindow {
        candles: 0,
        ..HistoryWindow::default()
    };
    let err = gw.gas_history(&window).await.unwrap_err();
    assert!(matches!(err, GasError::InvalidArg(_)));
}
