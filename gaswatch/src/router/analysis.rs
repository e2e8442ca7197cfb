use std::path::Path;

use gaswatch_core::{
    ComparisonReport, ComparisonResult, DatedTable, GasError, GrowthComparison, MetricSeries,
    ResampledSeries, compare, compare_growth, comparison_report, read_dated_path, resample,
    write_unified_path,
};

use crate::GasWatch;
use crate::router::unified::UnifiedBuild;

/// Everything one analysis run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// The merged daily dataset and its build report.
    pub unified: UnifiedBuild,
    /// The dataset on the configured bucket width.
    pub resampled: ResampledSeries,
    /// Before/after comparison for each requested metric.
    pub report: ComparisonReport,
}

impl GasWatch {
    /// Resample a table onto buckets of the configured width.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the configured width is zero.
    pub fn resample(&self, table: &DatedTable) -> Result<ResampledSeries, GasError> {
        resample(table, self.cfg.resample_days)
    }

    /// Compare `metric` before and after the configured cutoff.
    ///
    /// # Errors
    /// Returns `Schema` for an unknown metric and `NoData` for an empty side.
    pub fn compare<S: MetricSeries + ?Sized>(
        &self,
        series: &S,
        metric: &str,
    ) -> Result<ComparisonResult, GasError> {
        compare(series, metric, self.cfg.cutoff)
    }

    /// Compare growth of `metric` before and after the configured cutoff.
    ///
    /// # Errors
    /// Returns `NoData` for an empty side and `DivisionUndefined` when a side
    /// starts at zero.
    pub fn compare_growth<S: MetricSeries + ?Sized>(
        &self,
        series: &S,
        metric: &str,
    ) -> Result<GrowthComparison, GasError> {
        compare_growth(series, metric, self.cfg.cutoff)
    }

    /// Compare several metrics at the configured cutoff; failures become warnings.
    #[must_use]
    pub fn report<S: MetricSeries + ?Sized>(
        &self,
        series: &S,
        metrics: &[&str],
    ) -> ComparisonReport {
        comparison_report(series, metrics, self.cfg.cutoff)
    }

    /// Write a unified table to a delimited file.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be written.
    pub fn persist(&self, table: &DatedTable, path: impl AsRef<Path>) -> Result<(), GasError> {
        write_unified_path(table, path)
    }

    /// Read back a table written by [`persist`](Self::persist), whatever
    /// metrics its plan joined. Use `read_unified_path` to insist on the full
    /// canonical column set.
    ///
    /// # Errors
    /// Returns `Io` for unreadable files and `Schema` when the `Date` column is
    /// absent or a date cannot be parsed.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<DatedTable, GasError> {
        read_dated_path(path)
    }

    /// Build the unified dataset, resample it and compare `metrics` on the
    /// resampled series.
    ///
    /// # Errors
    /// Propagates failures of [`unified`](Self::unified) and of resampling.
    /// Per-metric comparison failures are reported as warnings instead.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "gaswatch::router::analyze", skip(self))
    )]
    pub async fn analyze(&self, metrics: &[&str]) -> Result<Analysis, GasError> {
        let unified = self.unified().await?;
        let resampled = self.resample(&unified.table)?;
        let report = self.report(&resampled, metrics);
        Ok(Analysis {
            unified,
            resampled,
            report,
        })
    }
}
