#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use gaswatch_core::{GasError, HistoryWindow};

const SOURCE: &str = "gaswatch-owlracle";

/// History abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait OwlHistory: Send + Sync {
    /// Fetch the raw `v4/{network}/history` document for `window`.
    async fn fetch_history(&self, window: &HistoryWindow) -> Result<Value, GasError>;
}

/// Real adapter backed by a shared `reqwest::Client`.
/// `reqwest::Client` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl RealAdapter {
    /// Wrap a client pointed at `base_url`.
    #[must_use]
    pub const fn new(http: reqwest::Client, base_url: Url, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// Full request URL for `window`, API key included when configured.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the base URL cannot carry a path.
    pub fn history_url(&self, window: &HistoryWindow) -> Result<Url, GasError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GasError::InvalidArg(format!("base url {} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["v4", window.network.as_str(), "history"]);
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("from", &window.from.to_string())
                .append_pair("to", &window.to.to_string())
                .append_pair("candles", &window.candles.to_string())
                .append_pair("timeframe", &window.timeframe_minutes.to_string());
            if let Some(key) = &self.api_key {
                q.append_pair("apikey", key);
            }
        }
        Ok(url)
    }
}

fn map_http_err(e: &reqwest::Error, context: &str) -> GasError {
    if e.is_timeout() {
        GasError::connection(SOURCE, format!("timed out: {context}"))
    } else if let Some(status) = e.status() {
        GasError::connection(SOURCE, format!("status {status}: {context}"))
    } else {
        GasError::connection(SOURCE, format!("{e}: {context}"))
    }
}

/// Reject the oracle's `{"error": ..., "message": ...}` bodies.
///
/// # Errors
/// Returns `Connection` carrying the upstream message when `body` has an
/// `error` field.
pub fn check_api_error(body: &Value) -> Result<(), GasError> {
    let Some(err) = body.get("error") else {
        return Ok(());
    };
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| err.to_string(), str::to_string);
    Err(GasError::connection(SOURCE, format!("api error: {message}")))
}

#[async_trait]
impl OwlHistory for RealAdapter {
    async fn fetch_history(&self, window: &HistoryWindow) -> Result<Value, GasError> {
        let url = self.history_url(window)?;
        let context = format!("history for {}", window.network);
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_http_err(&e, &context))?;
        let status = resp.status();
        if !status.is_success() {
            let body: Option<Value> = resp.json().await.ok();
            if let Some(body) = &body {
                check_api_error(body)?;
            }
            return Err(GasError::connection(
                SOURCE,
                format!("status {status}: {context}"),
            ));
        }
        let body: Value = resp.json().await.map_err(|e| map_http_err(&e, &context))?;
        check_api_error(&body)?;
        Ok(body)
    }
}

#[cfg(feature = "test-adapters")]
impl dyn OwlHistory {
    /// Build an `OwlHistory` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn OwlHistory>
    where
        F: Send + Sync + 'static + Fn(HistoryWindow) -> Result<Value, GasError>,
    {
        struct FnHist<F>(F);
        #[async_trait]
        impl<F> OwlHistory for FnHist<F>
        where
            F: Send + Sync + 'static + Fn(HistoryWindow) -> Result<Value, GasError>,
        {
            async fn fetch_history(&self, window: &HistoryWindow) -> Result<Value, GasError> {
                (self.0)(window.clone())
            }
        }
        Arc::new(FnHist(f))
    }
}
