use chrono::NaiveDate;
use statrs::statistics::{Data, Distribution};

use crate::table::DatedTable;
use crate::timeseries::resample::ResampledSeries;
use crate::{
    ComparisonReport, ComparisonResult, Direction, GasError, GrowthComparison, PartitionStats,
    Side,
};

/// A date-indexed source of numeric metric values.
pub trait MetricSeries {
    /// Values of `metric` paired with their dates, in series order.
    ///
    /// Cells that are missing or not numeric yield `None`.
    ///
    /// # Errors
    /// Returns `Schema` when the series has no such column.
    fn metric_values(&self, metric: &str) -> Result<Vec<(NaiveDate, Option<f64>)>, GasError>;
}

impl MetricSeries for DatedTable {
    fn metric_values(&self, metric: &str) -> Result<Vec<(NaiveDate, Option<f64>)>, GasError> {
        let idx = self
            .column_index(metric)
            .ok_or_else(|| GasError::schema(format!("no metric column {metric}")))?;
        Ok(self
            .rows()
            .iter()
            .map(|r| (r.date, r.cells[idx].as_f64()))
            .collect())
    }
}

impl MetricSeries for ResampledSeries {
    fn metric_values(&self, metric: &str) -> Result<Vec<(NaiveDate, Option<f64>)>, GasError> {
        let values = self
            .column(metric)
            .ok_or_else(|| GasError::schema(format!("no metric column {metric}")))?;
        Ok(self.dates().zip(values).collect())
    }
}

fn partition<S: MetricSeries + ?Sized>(
    series: &S,
    metric: &str,
    cutoff: NaiveDate,
    side: Side,
) -> Result<Vec<(NaiveDate, f64)>, GasError> {
    let values: Vec<(NaiveDate, f64)> = series
        .metric_values(metric)?
        .into_iter()
        .filter(|(d, _)| side.contains(*d, cutoff))
        .filter_map(|(d, v)| v.filter(|x| x.is_finite()).map(|x| (d, x)))
        .collect();
    if values.is_empty() {
        return Err(GasError::no_data(format!(
            "{metric} {} {cutoff}",
            side.as_str()
        )));
    }
    Ok(values)
}

/// Mean and sample standard deviation of `metric` on one side of `cutoff`.
///
/// Rows before the cutoff are strictly earlier; rows after include the
/// cutoff day. The standard deviation is `None` with fewer than two rows.
///
/// # Errors
/// Returns `Schema` for an unknown metric and `NoData` when the partition has
/// no valid value.
pub fn partition_stats<S: MetricSeries + ?Sized>(
    series: &S,
    metric: &str,
    cutoff: NaiveDate,
    side: Side,
) -> Result<PartitionStats, GasError> {
    let values: Vec<f64> = partition(series, metric, cutoff, side)?
        .into_iter()
        .map(|(_, v)| v)
        .collect();
    let rows = values.len();
    let data = Data::new(values);
    let mean = data
        .mean()
        .filter(|m| m.is_finite())
        .ok_or_else(|| GasError::no_data(format!("{metric} {} {cutoff}", side.as_str())))?;
    let stddev = if rows < 2 {
        None
    } else {
        data.std_dev().filter(|s| s.is_finite())
    };
    Ok(PartitionStats { rows, mean, stddev })
}

/// Compare mean and volatility of `metric` before and after `cutoff`.
///
/// # Errors
/// Propagates the errors of [`partition_stats`] for either side.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "gaswatch_core::compare", skip(series))
)]
pub fn compare<S: MetricSeries + ?Sized>(
    series: &S,
    metric: &str,
    cutoff: NaiveDate,
) -> Result<ComparisonResult, GasError> {
    let before = partition_stats(series, metric, cutoff, Side::Before)?;
    let after = partition_stats(series, metric, cutoff, Side::After)?;
    let stddev_direction = match (before.stddev, after.stddev) {
        (Some(b), Some(a)) => Some(Direction::between(b, a)),
        _ => None,
    };
    Ok(ComparisonResult {
        metric: metric.to_string(),
        cutoff,
        mean_direction: Direction::between(before.mean, after.mean),
        stddev_direction,
        before,
        after,
    })
}

/// Percentage growth of `metric` within one side of `cutoff`.
///
/// Computed as `(last - first) / first * 100` over the partition's present
/// values ordered by date.
///
/// # Errors
/// Returns `NoData` for an empty partition and `DivisionUndefined` when the
/// first value is zero.
pub fn growth<S: MetricSeries + ?Sized>(
    series: &S,
    metric: &str,
    cutoff: NaiveDate,
    side: Side,
) -> Result<f64, GasError> {
    let mut values = partition(series, metric, cutoff, side)?;
    values.sort_by_key(|(d, _)| *d);
    let (first, last) = match (values.first(), values.last()) {
        (Some((_, f)), Some((_, l))) => (*f, *l),
        _ => {
            return Err(GasError::no_data(format!(
                "{metric} {} {cutoff}",
                side.as_str()
            )));
        }
    };
    if first == 0.0 {
        return Err(GasError::division_undefined(format!(
            "{metric} {} {cutoff} starts at zero",
            side.as_str()
        )));
    }
    Ok((last - first) / first * 100.0)
}

/// Growth of a cumulative counter on both sides of `cutoff`.
///
/// # Errors
/// Propagates the errors of [`growth`] for either side.
pub fn compare_growth<S: MetricSeries + ?Sized>(
    series: &S,
    metric: &str,
    cutoff: NaiveDate,
) -> Result<GrowthComparison, GasError> {
    let before = growth(series, metric, cutoff, Side::Before)?;
    let after = growth(series, metric, cutoff, Side::After)?;
    Ok(GrowthComparison {
        metric: metric.to_string(),
        cutoff,
        before,
        after,
        direction: Direction::between(before, after),
    })
}

/// Run [`compare`] for several metrics, collecting failures as warnings.
#[must_use]
pub fn comparison_report<S: MetricSeries + ?Sized>(
    series: &S,
    metrics: &[&str],
    cutoff: NaiveDate,
) -> ComparisonReport {
    let mut report = ComparisonReport::default();
    for metric in metrics {
        match compare(series, metric, cutoff) {
            Ok(c) => report.comparisons.push(c),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(metric, error = %e, "comparison skipped");
                report.warnings.push(e);
            }
        }
    }
    report
}
