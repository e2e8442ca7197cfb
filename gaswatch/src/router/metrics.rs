use gaswatch_core::{GasError, MetricTable};

use crate::GasWatch;
use crate::core::tag_err;

impl GasWatch {
    /// Fetch a named metric from the first registered connector that serves it.
    ///
    /// Connectors advertising the name in `supported_metrics`, or advertising
    /// nothing at all, are tried in registration order; a `NotFound` answer
    /// moves on to the next one.
    ///
    /// # Errors
    /// Returns `NotFound` when no connector serves `name`, and the connector's
    /// error (timeouts as `Connection`) when a capable connector fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "gaswatch::router::metric", skip(self))
    )]
    pub async fn metric(&self, name: &str) -> Result<MetricTable, GasError> {
        let mut errors: Vec<GasError> = Vec::new();
        for c in &self.connectors {
            let Some(provider) = c.as_metric_provider() else {
                continue;
            };
            let supported = provider.supported_metrics();
            if !supported.is_empty() && !supported.iter().any(|m| *m == name) {
                continue;
            }
            match Self::provider_call_with_timeout(
                c.name(),
                "metric",
                self.cfg.provider_timeout,
                provider.metric(name),
            )
            .await
            {
                Ok(table) => return Ok(table),
                Err(GasError::NotFound { .. }) => {}
                Err(e) => errors.push(tag_err(c.name(), e)),
            }
        }
        match errors.len() {
            0 => Err(GasError::not_found(format!("metric {name}"))),
            1 => Err(errors.remove(0)),
            _ => Err(GasError::AllProvidersFailed(errors)),
        }
    }
}
