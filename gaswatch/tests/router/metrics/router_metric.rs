use std::sync::Arc;
use std::time::Duration;

use gaswatch::{GasError, GasWatch};
use gaswatch_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{MockConnector, d, m_hist, metric_table};

#[tokio::test]
async fn first_capable_connector_serves_the_metric() {
    let table = metric_table("X", &[(d(2021, 8, 1), 1.0)]);
    let other = metric_table("X", &[(d(2021, 8, 2), 2.0)]);
    let a = MockConnector::new("A")
        .with_metric("X", Ok(table.clone()))
        .with_supported(&["X"]);
    let b = MockConnector::new("B").with_metric("X", Ok(other));
    let gw = GasWatch::builder()
        .with_connector(m_hist("H", &[0], 1.0))
        .with_connector(Arc::new(a))
        .with_connector(Arc::new(b))
        .build()
        .unwrap();

    assert_eq!(gw.metric("X").await.unwrap(), table);
}

#[tokio::test]
async fn unsupported_names_are_skipped() {
    let table = metric_table("X", &[(d(2021, 8, 1), 1.0)]);
    // A advertises only Y, so it is never asked for X.
    let a = MockConnector::new("A")
        .with_metric("X", Err(GasError::connection("A", "should not be called")))
        .with_supported(&["Y"]);
    let b = MockConnector::new("B").with_metric("X", Ok(table.clone()));
    let gw = GasWatch::builder()
        .with_connector(Arc::new(a))
        .with_connector(Arc::new(b))
        .build()
        .unwrap();

    assert_eq!(gw.metric("X").await.unwrap(), table);
}

#[tokio::test]
async fn unknown_metric_is_not_found() {
    let gw = GasWatch::builder()
        .with_connector(m_hist("H", &[0], 1.0))
        .build()
        .unwrap();
    let err = gw.metric("Nope").await.unwrap_err();
    assert!(matches!(err, GasError::NotFound { .. }));
}

#[tokio::test]
async fn failing_connector_error_is_returned() {
    let (dynamic, controller) = DynamicMockConnector::new_with_controller("DYN");
    controller
        .set_metric_behavior("X", MockBehavior::Fail(GasError::connection("DYN", "boom")))
        .await;
    let gw = GasWatch::builder().with_connector(dynamic).build().unwrap();

    let err = gw.metric("X").await.unwrap_err();
    assert_eq!(err, GasError::connection("DYN", "boom"));
}

#[tokio::test]
async fn hanging_metric_times_out() {
    let (dynamic, controller) = DynamicMockConnector::new_with_controller("DYN");
    controller.set_metric_behavior("X", MockBehavior::Hang).await;
    let gw = GasWatch::builder()
        .with_connector(dynamic)
        .provider_timeout(Duration::from_millis(30))
        .build()
        .unwrap();

    let err = gw.metric("X").await.unwrap_err();
    assert!(matches!(err, GasError::Connection { ref source_name, .. } if source_name == "DYN"));
}
