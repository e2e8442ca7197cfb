use std::sync::Arc;
use std::time::Duration;

use gaswatch::{GasError, GasWatch, HistoryWindow, MergeStrategy};
use gaswatch_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{MockConnector, hist};

#[tokio::test]
async fn slow_connector_times_out_as_connection_error() {
    let (hang, controller) = DynamicMockConnector::new_with_controller("HANG");
    controller.set_history_behavior(MockBehavior::Hang).await;

    let gw = GasWatch::builder()
        .with_connector(hang)
        .provider_timeout(Duration::from_millis(30))
        .build()
        .unwrap();

    let err = gw.gas_history(&HistoryWindow::default()).await.unwrap_err();
    match err {
        GasError::AllProvidersFailed(errs) => {
            assert_eq!(errs.len(), 1);
            assert!(
                matches!(&errs[0], GasError::Connection { source_name, .. } if source_name == "HANG")
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(controller.history_requests().await.len(), 1);
}

#[tokio::test]
async fn deep_merge_keeps_fast_results_when_one_hangs() {
    let (hang, controller) = DynamicMockConnector::new_with_controller("HANG");
    controller.set_history_behavior(MockBehavior::Hang).await;
    let fast = MockConnector::new("FAST")
        .with_history(Ok(hist(&[0, 1], 3.0)))
        .with_delay(5);

    let gw = GasWatch::builder()
        .with_connector(hang)
        .with_connector(Arc::new(fast))
        .merge_history_strategy(MergeStrategy::Deep)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let (merged, attr) = gw
        .gas_history_with_attribution(&HistoryWindow::default())
        .await
        .unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(attr.spans[0].0, "FAST");
}
