use gaswatch::{GasWatch, HistoryWindow, MergeStrategy};

use crate::helpers::{AUG_1, DAY, m_hist};

#[tokio::test]
async fn deep_merge_marks_connector_spans() {
    // A covers days [0,1,2], B covers [2,3,4]; first-wins on overlap (day 2).
    let gw = GasWatch::builder()
        .with_connector(m_hist("A", &[0, 1, 2], 10.0))
        .with_connector(m_hist("B", &[2, 3, 4], 20.0))
        .merge_history_strategy(MergeStrategy::Deep)
        .build()
        .unwrap();

    let (merged, attr) = gw
        .gas_history_with_attribution(&HistoryWindow::default())
        .await
        .unwrap();

    let ts: Vec<i64> = merged.candles.iter().map(|c| c.timestamp).collect();
    assert_eq!(ts, (0..5).map(|i| AUG_1 + i * DAY).collect::<Vec<_>>());
    // Overlapping day kept from A.
    assert!((merged.candles[2].close - 10.0).abs() < f64::EPSILON);

    assert_eq!(attr.spans.len(), 2);
    let (n0, s0) = attr.spans[0];
    assert_eq!(n0, "A");
    assert_eq!((s0.start, s0.end), (AUG_1, AUG_1 + 2 * DAY));
    let (n1, s1) = attr.spans[1];
    assert_eq!(n1, "B");
    assert_eq!((s1.start, s1.end), (AUG_1 + 3 * DAY, AUG_1 + 4 * DAY));
}

#[tokio::test]
async fn deep_merge_backfills_interleaved_gaps() {
    let gw = GasWatch::builder()
        .with_connector(m_hist("A", &[0, 2], 10.0))
        .with_connector(m_hist("B", &[1, 3], 20.0))
        .merge_history_strategy(MergeStrategy::Deep)
        .build()
        .unwrap();

    let (merged, attr) = gw
        .gas_history_with_attribution(&HistoryWindow::default())
        .await
        .unwrap();
    assert_eq!(merged.len(), 4);
    let names: Vec<&str> = attr.spans.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, vec!["A", "B", "A", "B"]);
}
