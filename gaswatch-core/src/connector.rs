use async_trait::async_trait;

use crate::GasError;
use crate::candle::CandleHistory;
use crate::metric::MetricTable;
pub use gaswatch_types::ConnectorKey;
use gaswatch_types::HistoryWindow;

/// Focused role trait for connectors that provide gas price candles.
#[async_trait]
pub trait GasHistoryProvider: Send + Sync {
    /// Fetch candles covering `window`.
    async fn gas_history(&self, window: &HistoryWindow) -> Result<CandleHistory, GasError>;
}

/// Focused role trait for connectors that provide daily on-chain metrics.
#[async_trait]
pub trait MetricProvider: Send + Sync {
    /// Fetch the named metric as an un-normalized table.
    async fn metric(&self, name: &str) -> Result<MetricTable, GasError>;

    /// Metric names this connector can serve. Empty means any name may be asked for.
    fn supported_metrics(&self) -> &'static [&'static str];
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
#[async_trait]
pub trait GasConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "gaswatch-owlracle").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise gas history capability by returning a usable trait object reference when supported.
    fn as_gas_history_provider(&self) -> Option<&dyn GasHistoryProvider> {
        None
    }

    /// If implemented, returns a trait object for on-chain metrics.
    fn as_metric_provider(&self) -> Option<&dyn MetricProvider> {
        None
    }
}
