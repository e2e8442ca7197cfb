//! Report envelopes produced by the pipeline and the orchestrator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::JoinMode;
use crate::error::GasError;

/// Row-count bookkeeping for one step of a merge plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStep {
    /// Label of the table joined in this step.
    pub source: String,
    /// Join mode of the step; `None` for the seed table.
    pub mode: Option<JoinMode>,
    /// Rows of the incoming table after dropping duplicate dates.
    pub input_rows: usize,
    /// Rows of the incoming table dropped because their date was already seen.
    pub duplicates_dropped: usize,
    /// Rows of the accumulator after this step.
    pub rows: usize,
}

/// Attrition record for a whole merge plan, one entry per table in plan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MergeReport {
    /// Steps in the order they were applied.
    pub steps: Vec<MergeStep>,
}

impl MergeReport {
    /// Row count after the last step, or zero for an empty report.
    #[must_use]
    pub fn final_rows(&self) -> usize {
        self.steps.last().map_or(0, |s| s.rows)
    }

    /// Rows lost between the seed table and the final result.
    #[must_use]
    pub fn attrition(&self) -> usize {
        match (self.steps.first(), self.steps.last()) {
            (Some(first), Some(last)) => first.rows.saturating_sub(last.rows),
            _ => 0,
        }
    }
}

/// Neutral direction of change from the "before" side to the "after" side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// After is greater than before.
    Increase,
    /// After is smaller than before.
    Decrease,
    /// Both sides are equal.
    Unchanged,
}

impl Direction {
    /// Direction of change from `before` to `after`.
    #[must_use]
    pub fn between(before: f64, after: f64) -> Self {
        if after > before {
            Self::Increase
        } else if after < before {
            Self::Decrease
        } else {
            Self::Unchanged
        }
    }
}

/// Which side of the cutoff a partition covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Rows dated strictly before the cutoff.
    Before,
    /// Rows dated on or after the cutoff.
    After,
}

impl Side {
    /// Whether `date` falls in this side of `cutoff`.
    #[must_use]
    pub fn contains(self, date: NaiveDate, cutoff: NaiveDate) -> bool {
        match self {
            Self::Before => date < cutoff,
            Self::After => date >= cutoff,
        }
    }

    /// Lowercase label used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

/// Mean and volatility of a metric on one side of the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartitionStats {
    /// Number of rows with a valid value.
    pub rows: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two rows.
    pub stddev: Option<f64>,
}

/// Before/after comparison of one metric around a cutoff date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Metric column compared.
    pub metric: String,
    /// Cutoff date used for partitioning.
    pub cutoff: NaiveDate,
    /// Statistics strictly before the cutoff.
    pub before: PartitionStats,
    /// Statistics on or after the cutoff.
    pub after: PartitionStats,
    /// Direction of the mean.
    pub mean_direction: Direction,
    /// Direction of the standard deviation; `None` if either side is undefined.
    pub stddev_direction: Option<Direction>,
}

/// Before/after percentage growth of a cumulative counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthComparison {
    /// Metric column compared.
    pub metric: String,
    /// Cutoff date used for partitioning.
    pub cutoff: NaiveDate,
    /// Growth in percent within the "before" partition.
    pub before: f64,
    /// Growth in percent within the "after" partition.
    pub after: f64,
    /// Direction of growth.
    pub direction: Direction,
}

/// Summary of comparing several metrics around one cutoff.
///
/// Metrics that could not be compared are reported in `warnings` instead of
/// aborting the whole report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ComparisonReport {
    /// Successful comparisons in request order.
    pub comparisons: Vec<ComparisonResult>,
    /// Non-fatal issues, one per metric that failed.
    pub warnings: Vec<GasError>,
}

impl ComparisonReport {
    /// Look up a comparison by metric name.
    #[must_use]
    pub fn get(&self, metric: &str) -> Option<&ComparisonResult> {
        self.comparisons.iter().find(|c| c.metric == metric)
    }
}
