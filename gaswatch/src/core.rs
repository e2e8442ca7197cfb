use std::sync::Arc;
#[cfg(feature = "tracing")]
use std::convert::TryFrom;
use std::time::Duration;

use chrono::NaiveDate;
use gaswatch_core::{
    AnalysisConfig, GasConnector, GasError, HistoryWindow, JoinMode, MergeStrategy, MetricTable,
};

/// Where one merge step gets its table from.
#[derive(Debug, Clone)]
pub(crate) enum MetricSource {
    /// Fetched by name from the first capable metric connector.
    Connector { name: String, mode: JoinMode },
    /// Supplied directly, e.g. a CSV export read from disk.
    Table {
        label: String,
        table: MetricTable,
        mode: JoinMode,
    },
}

impl MetricSource {
    pub(crate) fn label(&self) -> &str {
        match self {
            Self::Connector { name, .. } => name,
            Self::Table { label, .. } => label,
        }
    }

    pub(crate) const fn mode(&self) -> JoinMode {
        match self {
            Self::Connector { mode, .. } | Self::Table { mode, .. } => *mode,
        }
    }
}

/// Orchestrator that fetches gas history and on-chain metrics from registered
/// connectors and runs them through the merge, resample and compare stages.
pub struct GasWatch {
    pub(crate) connectors: Vec<Arc<dyn GasConnector>>,
    pub(crate) sources: Vec<MetricSource>,
    pub(crate) cfg: AnalysisConfig,
}

/// Builder for constructing a `GasWatch` orchestrator with custom configuration.
pub struct GasWatchBuilder {
    connectors: Vec<Arc<dyn GasConnector>>,
    sources: Vec<MetricSource>,
    cfg: AnalysisConfig,
}

impl Default for GasWatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GasWatchBuilder {
    /// Create a new builder with the default [`AnalysisConfig`].
    ///
    /// Starts with no connectors and no metric sources. The cutoff defaults to
    /// the London upgrade, buckets to seven days and provider calls to a 10s
    /// timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            sources: vec![],
            cfg: AnalysisConfig::default(),
        }
    }

    /// Register a connector.
    ///
    /// Registration order is priority order: earlier connectors win duplicate
    /// candles in a deep merge and are tried first in a fallback merge.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn GasConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Join a metric fetched by name from the registered metric connectors.
    ///
    /// Steps are applied in the order they are added, after the gas table.
    #[must_use]
    pub fn metric(mut self, name: impl Into<String>, mode: JoinMode) -> Self {
        self.sources.push(MetricSource::Connector {
            name: name.into(),
            mode,
        });
        self
    }

    /// Join a metric table supplied by the caller.
    #[must_use]
    pub fn metric_table(
        mut self,
        label: impl Into<String>,
        table: MetricTable,
        mode: JoinMode,
    ) -> Self {
        self.sources.push(MetricSource::Table {
            label: label.into(),
            table,
            mode,
        });
        self
    }

    /// Replace the whole configuration, e.g. one loaded from TOML.
    #[must_use]
    pub fn config(mut self, cfg: AnalysisConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the comparison cutoff date.
    #[must_use]
    pub const fn cutoff(mut self, cutoff: NaiveDate) -> Self {
        self.cfg.cutoff = cutoff;
        self
    }

    /// Set the resample bucket width in days.
    #[must_use]
    pub const fn resample_days(mut self, days: u32) -> Self {
        self.cfg.resample_days = days;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Select how gas history from several connectors is combined.
    ///
    /// - `Deep`: query every history connector concurrently and backfill gaps.
    /// - `Fallback`: query in order and stop at the first non-empty history.
    #[must_use]
    pub const fn merge_history_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.cfg.merge_history_strategy = strategy;
        self
    }

    /// Set the gas history request window.
    #[must_use]
    pub const fn history(mut self, window: HistoryWindow) -> Self {
        self.cfg.history = window;
        self
    }

    /// Build the `GasWatch` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via
    /// [`with_connector`](Self::with_connector) or if `resample_days` is zero.
    pub fn build(self) -> Result<GasWatch, GasError> {
        if self.connectors.is_empty() {
            return Err(GasError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if self.cfg.resample_days == 0 {
            return Err(GasError::InvalidArg(
                "resample_days must be positive".to_string(),
            ));
        }
        Ok(GasWatch {
            connectors: self.connectors,
            sources: self.sources,
            cfg: self.cfg,
        })
    }
}

/// Normalize a connector failure before it is aggregated.
///
/// Timeouts surface as connection failures of the connector that hung.
pub fn tag_err(connector: &str, e: GasError) -> GasError {
    match e {
        GasError::ProviderTimeout { .. } => {
            GasError::connection(connector, "request timed out".to_string())
        }
        other => other,
    }
}

impl GasWatch {
    /// Start building a new `GasWatch` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use gaswatch::{GasWatch, JoinMode, MergeStrategy};
    /// use gaswatch_owlracle::OwlracleConnector;
    ///
    /// let owl = Arc::new(OwlracleConnector::builder().build()?);
    /// let gw = GasWatch::builder()
    ///     .with_connector(owl)
    ///     .metric_table("EthVolumeUSD", volume, JoinMode::Inner)
    ///     .merge_history_strategy(MergeStrategy::Fallback)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> GasWatchBuilder {
        GasWatchBuilder::new()
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.cfg
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gaswatch::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, GasError>
    where
        Fut: core::future::Future<Output = Result<T, GasError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(GasError::provider_timeout(connector_name)))
    }
}
