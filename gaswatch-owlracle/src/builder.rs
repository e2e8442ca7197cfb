use std::sync::Arc;
use std::time::Duration;

use gaswatch_core::GasError;
use url::Url;

use crate::OwlracleConnector;
use crate::adapter::RealAdapter;

/// Production endpoint of the Owlracle API.
pub const DEFAULT_BASE_URL: &str = "https://api.owlracle.info/";

/// Environment variable consulted when no API key is set on the builder.
pub const API_KEY_ENV: &str = "OWLRACLE_API_KEY";

/// Builder for [`OwlracleConnector`].
#[derive(Debug, Clone, Default)]
pub struct OwlracleConnectorBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    http: Option<reqwest::Client>,
}

impl OwlracleConnectorBuilder {
    /// Point the connector at another host (e.g. a local mock server).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key explicitly instead of reading it from `OWLRACLE_API_KEY`.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Request timeout for the internally built HTTP client.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reuse an existing HTTP client; `timeout` is then ignored.
    #[must_use]
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no API key is configured or found in the
    /// environment, or if the base URL does not parse, and `Connection` if the
    /// HTTP client cannot be built.
    pub fn build(self) -> Result<OwlracleConnector, GasError> {
        let api_key = match self.api_key {
            Some(k) => k,
            None => std::env::var(API_KEY_ENV).map_err(|_| {
                GasError::InvalidArg(format!("owlracle api key missing: set {API_KEY_ENV}"))
            })?,
        };
        let raw_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw_url)
            .map_err(|e| GasError::InvalidArg(format!("base url {raw_url}: {e}")))?;
        let http = match self.http {
            Some(http) => http,
            None => {
                let mut b = reqwest::Client::builder();
                if let Some(t) = self.timeout {
                    b = b.timeout(t);
                }
                b.build()
                    .map_err(|e| GasError::connection(OwlracleConnector::KEY.as_str(), e.to_string()))?
            }
        };
        let adapter = RealAdapter::new(http, base_url, Some(api_key));
        Ok(OwlracleConnector::from_adapter(Arc::new(adapter)))
    }
}

impl OwlracleConnector {
    /// Returns an unconfigured builder pointed at the production endpoint.
    ///
    /// Customize with the builder methods before calling `.build()`.
    #[must_use]
    pub fn builder() -> OwlracleConnectorBuilder {
        OwlracleConnectorBuilder::default()
    }
}
