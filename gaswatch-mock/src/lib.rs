//! gaswatch-mock
//!
//! Deterministic connectors for tests and examples.
//!
//! - [`MockConnector`]: static fixtures covering 2021-07-15 ..= 2021-08-25 on
//!   `eth`, straddling the London upgrade. Serves gas candles and the on-chain
//!   metric exports listed in [`SUPPORTED_METRICS`].
//! - [`DynamicMockConnector`]: behavior scripted at runtime through a
//!   [`DynamicMockController`].
use async_trait::async_trait;
use gaswatch_core::connector::{GasConnector, GasHistoryProvider, MetricProvider};
use gaswatch_core::{CandleHistory, GasError, HistoryWindow, MetricTable};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use fixtures::metrics::{
    BLOCK_SIZE_GAP, LONDON_INDEX, SUPPORTED as SUPPORTED_METRICS, TRANSACTIONS_DUPLICATE,
    UNIQUE_ADDRESSES,
};
pub use fixtures::{DAYS as FIXTURE_DAYS, START as FIXTURE_START};

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> GasError {
        GasError::not_found(what.to_string())
    }
}

#[async_trait]
impl GasConnector for MockConnector {
    fn name(&self) -> &'static str {
        "gaswatch-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_gas_history_provider(&self) -> Option<&dyn GasHistoryProvider> {
        Some(self as &dyn GasHistoryProvider)
    }
    fn as_metric_provider(&self) -> Option<&dyn MetricProvider> {
        Some(self as &dyn MetricProvider)
    }
}

#[async_trait]
impl GasHistoryProvider for MockConnector {
    async fn gas_history(&self, window: &HistoryWindow) -> Result<CandleHistory, GasError> {
        window.validate()?;
        fixtures::history::for_window(window)
            .ok_or_else(|| Self::not_found(&format!("gas history for {}", window.network)))
    }
}

#[async_trait]
impl MetricProvider for MockConnector {
    async fn metric(&self, name: &str) -> Result<MetricTable, GasError> {
        fixtures::metrics::by_name(name)?.ok_or_else(|| Self::not_found(&format!("metric {name}")))
    }

    fn supported_metrics(&self) -> &'static [&'static str] {
        fixtures::metrics::SUPPORTED
    }
}
