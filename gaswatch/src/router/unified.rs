use gaswatch_core::columns::{AVERAGE_GAS_PRICE, AVG_GAS, SAMPLES, TIMESTAMP};
use gaswatch_core::{
    Attribution, CandleHistory, DatedTable, GasError, MergePlan, MergeReport, MetricTable,
    flatten_candles, merge, normalize,
};

use crate::GasWatch;
use crate::core::MetricSource;

/// Label of the gas price table, the first step of every merge plan.
pub const GAS_LABEL: &str = "gas";

/// The merged dataset together with how it was assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedBuild {
    /// One row per date, sorted, with the union of all source columns.
    pub table: DatedTable,
    /// Row counts after each merge step.
    pub merge: MergeReport,
    /// Which connector supplied which gas candle spans.
    pub attribution: Attribution,
    /// Rows dropped per source because their date could not be parsed.
    pub excluded: Vec<(String, usize)>,
}

/// Turn a gas history into the first merge table.
///
/// Candles are flattened and keyed by day. `AvgGas` becomes
/// `average_gas_price` and the `Samples` count is dropped.
///
/// # Errors
/// Returns `Schema` if the flattened table lacks the expected columns.
pub fn gas_table(history: &CandleHistory) -> Result<(DatedTable, usize), GasError> {
    let raw = flatten_candles(&history.candles);
    let normalized = normalize(&raw, TIMESTAMP)?;
    let mut table = normalized.table;
    table.rename_column(AVG_GAS, AVERAGE_GAS_PRICE)?;
    table.drop_column(SAMPLES)?;
    Ok((table, normalized.excluded))
}

impl GasWatch {
    /// Build the unified dataset: gas history first, then every configured
    /// metric source joined in order.
    ///
    /// Metric sources fetched from connectors are requested concurrently.
    ///
    /// # Errors
    /// Propagates history and metric fetch failures, `Schema` errors from
    /// normalization (absent date column) and from the merge (non-`Date` key,
    /// colliding columns).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gaswatch::router::unified",
            skip(self),
            fields(sources = self.sources.len()),
        )
    )]
    pub async fn unified(&self) -> Result<UnifiedBuild, GasError> {
        let (history, attribution) = self.gas_history_with_attribution(&self.cfg.history).await?;
        let (gas, gas_excluded) = gas_table(&history)?;
        let mut excluded = vec![(GAS_LABEL.to_string(), gas_excluded)];

        let fetched = futures::future::join_all(self.sources.iter().map(|s| self.resolve(s))).await;

        let mut plan = MergePlan::new(GAS_LABEL, gas);
        for (source, table) in self.sources.iter().zip(fetched) {
            let normalized = table?.normalize()?;
            excluded.push((source.label().to_string(), normalized.excluded));
            plan = plan.join(source.label(), normalized.table, source.mode());
        }

        let (table, merge_report) = merge(plan)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = merge_report.final_rows(),
            attrition = merge_report.attrition(),
            "unified dataset built"
        );

        Ok(UnifiedBuild {
            table,
            merge: merge_report,
            attribution,
            excluded,
        })
    }

    async fn resolve(&self, source: &MetricSource) -> Result<MetricTable, GasError> {
        match source {
            MetricSource::Connector { name, .. } => self.metric(name).await,
            MetricSource::Table { table, .. } => Ok(table.clone()),
        }
    }
}
