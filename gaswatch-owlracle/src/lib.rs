//! gaswatch-owlracle
//!
//! Public connector that implements `GasConnector` on top of the Owlracle gas
//! oracle (`GET {base}/v4/{network}/history`). Exposes daily gas price candles
//! through `GasHistoryProvider`.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
/// Builder for configuring endpoint, API key and HTTP client.
pub mod builder;

use std::sync::Arc;

use adapter::OwlHistory;
use async_trait::async_trait;
use gaswatch_core::{
    CandleHistory, GasError, HistoryWindow,
    connector::{ConnectorKey, GasConnector, GasHistoryProvider},
};

pub use builder::{API_KEY_ENV, DEFAULT_BASE_URL, OwlracleConnectorBuilder};

/// Public connector type. Production users construct it with `OwlracleConnector::builder()`.
pub struct OwlracleConnector {
    history: Arc<dyn OwlHistory>,
}

impl OwlracleConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("gaswatch-owlracle");

    /// Build from any history adapter, e.g. a closure-backed one in tests.
    #[must_use]
    pub fn from_adapter(history: Arc<dyn OwlHistory>) -> Self {
        Self { history }
    }
}

#[async_trait]
impl GasHistoryProvider for OwlracleConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gaswatch_owlracle::gas_history",
            skip(self, window),
            fields(network = %window.network, from = window.from, to = window.to, candles = window.candles),
        )
    )]
    async fn gas_history(&self, window: &HistoryWindow) -> Result<CandleHistory, GasError> {
        window.validate()?;
        let body = self.history.fetch_history(window).await?;
        let history = CandleHistory::from_json(&body)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(candles = history.len(), "owlracle history parsed");
        Ok(history)
    }
}

#[async_trait]
impl GasConnector for OwlracleConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Owlracle"
    }

    fn as_gas_history_provider(&self) -> Option<&dyn GasHistoryProvider> {
        Some(self as &dyn GasHistoryProvider)
    }
}
