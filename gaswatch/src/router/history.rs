use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use gaswatch_core::{Attribution, Candle, CandleHistory, GasConnector, GasError, HistoryWindow};

use crate::core::tag_err;
use crate::{GasWatch, MergeStrategy};

type HistoryTaskResult = (&'static str, Result<CandleHistory, GasError>);
type HistoryOk = (&'static str, CandleHistory);

impl GasWatch {
    /// Fetch daily gas candles for `window` from the registered history connectors.
    ///
    /// # Errors
    /// See [`gas_history_with_attribution`](Self::gas_history_with_attribution).
    pub async fn gas_history(&self, window: &HistoryWindow) -> Result<CandleHistory, GasError> {
        let (merged, _attr) = self.gas_history_with_attribution(window).await?;
        Ok(merged)
    }

    /// Fetch gas history and report which connector supplied which candle spans.
    ///
    /// - `Deep`: every history connector is queried concurrently. Candles are
    ///   combined by timestamp with registration order deciding duplicates.
    /// - `Fallback`: connectors are queried in order until one returns a
    ///   non-empty history; empty and `NotFound` answers move on to the next.
    ///
    /// Each call is bounded by the configured provider timeout. A timeout is
    /// reported as a `Connection` error of that connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an invalid window, `NotFound` when no connector
    /// has the capability or every answer was empty, and `AllProvidersFailed`
    /// with the individual errors otherwise.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gaswatch::router::gas_history",
            skip(self),
            fields(network = %window.network, strategy = ?self.cfg.merge_history_strategy),
        )
    )]
    pub async fn gas_history_with_attribution(
        &self,
        window: &HistoryWindow,
    ) -> Result<(CandleHistory, Attribution), GasError> {
        window.validate()?;
        let eligible = self.eligible_history_connectors()?;
        let joined = match self.cfg.merge_history_strategy {
            MergeStrategy::Deep => {
                Self::parallel_history(&eligible, window, self.cfg.provider_timeout).await
            }
            MergeStrategy::Fallback => {
                Self::sequential_history(&eligible, window, self.cfg.provider_timeout).await
            }
        };
        Self::finalize_history_results(joined, window)
    }
}

impl GasWatch {
    fn eligible_history_connectors(&self) -> Result<Vec<Arc<dyn GasConnector>>, GasError> {
        let eligible: Vec<Arc<dyn GasConnector>> = self
            .connectors
            .iter()
            .filter(|c| c.as_gas_history_provider().is_some())
            .cloned()
            .collect();
        if eligible.is_empty() {
            return Err(GasError::not_found("gas history capability"));
        }
        Ok(eligible)
    }

    async fn fetch_one(
        c: Arc<dyn GasConnector>,
        window: &HistoryWindow,
        provider_timeout: Duration,
    ) -> HistoryTaskResult {
        let name = c.name();
        let Some(provider) = c.as_gas_history_provider() else {
            return (name, Err(GasError::not_found("gas history capability")));
        };
        let resp = Self::provider_call_with_timeout(
            name,
            "gas_history",
            provider_timeout,
            provider.gas_history(window),
        )
        .await;
        (name, resp)
    }

    async fn parallel_history(
        eligible: &[Arc<dyn GasConnector>],
        window: &HistoryWindow,
        provider_timeout: Duration,
    ) -> Vec<HistoryTaskResult> {
        let tasks = eligible
            .iter()
            .map(|c| Self::fetch_one(Arc::clone(c), window, provider_timeout));
        futures::future::join_all(tasks).await
    }

    async fn sequential_history(
        eligible: &[Arc<dyn GasConnector>],
        window: &HistoryWindow,
        provider_timeout: Duration,
    ) -> Vec<HistoryTaskResult> {
        let mut results = Vec::new();
        for c in eligible {
            let result = Self::fetch_one(Arc::clone(c), window, provider_timeout).await;
            let done = matches!(&result.1, Ok(h) if !h.is_empty());
            results.push(result);
            if done {
                break;
            }
        }
        results
    }

    fn finalize_history_results(
        joined: Vec<HistoryTaskResult>,
        window: &HistoryWindow,
    ) -> Result<(CandleHistory, Attribution), GasError> {
        let mut successes: Vec<HistoryOk> = Vec::new();
        let mut errors: Vec<GasError> = Vec::new();
        for (name, res) in joined {
            match res {
                Ok(h) if !h.is_empty() => successes.push((name, h)),
                Ok(_) | Err(GasError::NotFound { .. }) => {}
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = name, error = %e, "gas history attempt failed");
                    errors.push(tag_err(name, e));
                }
            }
        }

        if successes.is_empty() {
            if errors.is_empty() {
                return Err(GasError::not_found(format!(
                    "gas history for {}",
                    window.network
                )));
            }
            return Err(GasError::AllProvidersFailed(errors));
        }
        Ok(merge_candles(&successes))
    }
}

/// Combine candle histories by timestamp; earlier sources win duplicates.
fn merge_candles(results: &[HistoryOk]) -> (CandleHistory, Attribution) {
    let mut by_ts: BTreeMap<i64, (&'static str, Candle)> = BTreeMap::new();
    for (name, history) in results {
        for c in &history.candles {
            by_ts.entry(c.timestamp).or_insert((*name, *c));
        }
    }

    let mut attr = Attribution::new();
    let mut candles = Vec::with_capacity(by_ts.len());
    for (ts, (name, c)) in by_ts {
        attr.record(name, ts);
        candles.push(c);
    }
    (CandleHistory { candles }, attr)
}
