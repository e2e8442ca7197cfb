use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::GasError;
use crate::table::{Cell, DatedTable};

/// One bucket of a [`ResampledSeries`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampledRow {
    /// Bucket label: the last day the bucket covers.
    pub date: NaiveDate,
    /// Bucket means, aligned with the series columns.
    pub values: Vec<Option<f64>>,
}

/// Numeric columns aggregated onto a regular date index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampledSeries {
    /// Bucket width in days.
    pub period_days: u32,
    /// Numeric column names carried over from the source table.
    pub columns: Vec<String>,
    /// Buckets in ascending label order, none skipped.
    pub rows: Vec<ResampledRow>,
}

impl ResampledSeries {
    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the series has no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bucket labels in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|r| r.date)
    }

    /// Values of one column, aligned with [`Self::dates`].
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r.values[idx]).collect())
    }
}

/// Replace each gap with the closest earlier value. Leading gaps stay empty.
pub fn forward_fill(values: &mut [Option<f64>]) {
    let mut last = None;
    for v in values.iter_mut() {
        if v.is_some() {
            last = *v;
        } else {
            *v = last;
        }
    }
}

// A column is dropped only when it holds text and no number at all.
fn numeric_columns(table: &DatedTable) -> Vec<usize> {
    (0..table.columns().len())
        .filter(|&i| {
            let cells = table.rows().iter().map(|r| &r.cells[i]);
            let mut has_text = false;
            for cell in cells {
                match cell {
                    Cell::Number(_) => return true,
                    Cell::Text(_) => has_text = true,
                    Cell::Missing => {}
                }
            }
            !has_text
        })
        .collect()
}

/// Aggregate a dated table onto buckets of `period_days` days.
///
/// With `d_min`/`d_max` the earliest and latest row date, bucket `k` is labeled
/// `d_min + k * period_days` and covers the days in `(label - period_days, label]`,
/// so there are `ceil((d_max - d_min) / period_days) + 1` buckets and the first
/// one holds exactly `d_min`. Each cell is the mean of the bucket's numeric
/// values; empty buckets are forward-filled. Stray text cells (`N/A` and the
/// like) count as missing. Purely categorical columns are not carried.
///
/// # Errors
/// Returns `InvalidArg` when `period_days` is zero.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "gaswatch_core::resample",
        skip(table),
        fields(rows = table.len(), period_days = period_days),
    )
)]
#[allow(clippy::cast_precision_loss)]
pub fn resample(table: &DatedTable, period_days: u32) -> Result<ResampledSeries, GasError> {
    if period_days == 0 {
        return Err(GasError::InvalidArg("resample period must be positive".into()));
    }
    let idxs = numeric_columns(table);
    let columns: Vec<String> = idxs.iter().map(|&i| table.columns()[i].clone()).collect();

    let Some((d_min, d_max)) = table.date_span() else {
        return Ok(ResampledSeries {
            period_days,
            columns,
            rows: Vec::new(),
        });
    };

    let period = i64::from(period_days);
    let bucket_of = |date: NaiveDate| {
        let offset = (date - d_min).num_days();
        usize::try_from((offset + period - 1) / period).unwrap_or(0)
    };
    let buckets = bucket_of(d_max) + 1;

    let mut sums = vec![vec![0.0_f64; idxs.len()]; buckets];
    let mut counts = vec![vec![0usize; idxs.len()]; buckets];
    for row in table.rows() {
        let k = bucket_of(row.date);
        for (j, &i) in idxs.iter().enumerate() {
            if let Some(v) = row.cells[i].as_f64() {
                sums[k][j] += v;
                counts[k][j] += 1;
            }
        }
    }

    let mut by_column: Vec<Vec<Option<f64>>> = (0..idxs.len())
        .map(|j| {
            (0..buckets)
                .map(|k| (counts[k][j] > 0).then(|| sums[k][j] / counts[k][j] as f64))
                .collect()
        })
        .collect();
    for values in &mut by_column {
        forward_fill(values);
    }

    let mut rows = Vec::with_capacity(buckets);
    for k in 0..buckets {
        let date = d_min
            .checked_add_days(Days::new(u64::from(period_days) * k as u64))
            .ok_or_else(|| GasError::InvalidArg("resample label out of range".into()))?;
        rows.push(ResampledRow {
            date,
            values: by_column.iter().map(|col| col[k]).collect(),
        });
    }

    Ok(ResampledSeries {
        period_days,
        columns,
        rows,
    })
}

/// Weekly resampling, the cadence used for charting and comparisons.
///
/// # Errors
/// Never fails in practice; see [`resample`].
pub fn resample_weekly(table: &DatedTable) -> Result<ResampledSeries, GasError> {
    resample(table, 7)
}
