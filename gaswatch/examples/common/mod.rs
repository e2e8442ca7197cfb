#![allow(dead_code)]

use gaswatch::GasConnector;
use std::sync::Arc;

/// Live Owlracle connector, or the fixture mock when
/// `GASWATCH_EXAMPLES_USE_MOCK` is set or no API key is configured.
#[must_use]
pub fn get_connector() -> Arc<dyn GasConnector> {
    if std::env::var("GASWATCH_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        return Arc::new(gaswatch_mock::MockConnector::new());
    }
    match gaswatch_owlracle::OwlracleConnector::builder().build() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            println!("--- (Owlracle unavailable: {e}; using Mock Connector) ---");
            Arc::new(gaswatch_mock::MockConnector::new())
        }
    }
}

/// Fixture window of the mock connector, wide enough for live data too.
#[must_use]
pub fn london_window() -> gaswatch::HistoryWindow {
    gaswatch::HistoryWindow {
        // 2021-07-15 .. 2021-08-26
        from: 1_626_307_200,
        to: 1_629_936_000,
        ..gaswatch::HistoryWindow::default()
    }
}
