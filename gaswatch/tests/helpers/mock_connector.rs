#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use gaswatch::{CandleHistory, GasConnector, GasError, HistoryWindow, MetricTable};
use gaswatch_core::connector::{GasHistoryProvider, MetricProvider};
use tokio::time::{Duration, sleep};

/// Simple in-memory connector used by integration tests.
/// Tailor behavior (returned history, metrics, latency) via the fields below.
pub struct MockConnector {
    pub name: &'static str,
    pub history: Option<Result<CandleHistory, GasError>>,
    pub metrics: HashMap<String, Result<MetricTable, GasError>>,
    pub supported: &'static [&'static str],
    pub delay_ms: u64,
    pub history_fn:
        Option<Arc<dyn Fn(&HistoryWindow) -> Result<CandleHistory, GasError> + Send + Sync>>,
}

impl MockConnector {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            history: None,
            metrics: HashMap::new(),
            supported: &[],
            delay_ms: 0,
            history_fn: None,
        }
    }

    pub fn with_history(mut self, h: Result<CandleHistory, GasError>) -> Self {
        self.history = Some(h);
        self
    }

    pub fn with_metric(mut self, name: &str, t: Result<MetricTable, GasError>) -> Self {
        self.metrics.insert(name.to_string(), t);
        self
    }

    pub const fn with_supported(mut self, names: &'static [&'static str]) -> Self {
        self.supported = names;
        self
    }

    pub const fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    async fn wait(&self) {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

#[async_trait]
impl GasConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_gas_history_provider(&self) -> Option<&dyn GasHistoryProvider> {
        if self.history.is_some() || self.history_fn.is_some() {
            Some(self as &dyn GasHistoryProvider)
        } else {
            None
        }
    }

    fn as_metric_provider(&self) -> Option<&dyn MetricProvider> {
        if self.metrics.is_empty() {
            None
        } else {
            Some(self as &dyn MetricProvider)
        }
    }
}

#[async_trait]
impl GasHistoryProvider for MockConnector {
    async fn gas_history(&self, window: &HistoryWindow) -> Result<CandleHistory, GasError> {
        self.wait().await;
        if let Some(f) = &self.history_fn {
            return f(window);
        }
        self.history
            .clone()
            .unwrap_or_else(|| Err(GasError::not_found("gas history")))
    }
}

#[async_trait]
impl MetricProvider for MockConnector {
    async fn metric(&self, name: &str) -> Result<MetricTable, GasError> {
        self.wait().await;
        self.metrics
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(GasError::not_found(format!("metric {name}"))))
    }

    fn supported_metrics(&self) -> &'static [&'static str] {
        self.supported
    }
}
