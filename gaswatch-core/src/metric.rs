//! Raw on-chain metric tables and how they become dated tables.

use std::io::Read;

use crate::GasError;
use crate::io::read_csv;
use crate::table::RawTable;
use crate::timeseries::normalize::{Normalized, normalize};

/// A metric source as exported upstream, with the steps that prepare it for a
/// merge: which column holds the date, how to rename value columns, and which
/// columns to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    raw: RawTable,
    date_column: String,
    renames: Vec<(String, String)>,
    keep: Option<Vec<String>>,
}

impl MetricTable {
    /// Wrap a raw table whose dates live in `date_column`.
    pub fn new(raw: RawTable, date_column: impl Into<String>) -> Self {
        Self {
            raw,
            date_column: date_column.into(),
            renames: Vec::new(),
            keep: None,
        }
    }

    /// Read a delimited export with a header row.
    ///
    /// # Errors
    /// Returns `Schema` for ragged rows and `Io`/`Data` for unreadable input.
    pub fn from_csv_reader<R: Read>(
        reader: R,
        date_column: impl Into<String>,
    ) -> Result<Self, GasError> {
        Ok(Self::new(read_csv(reader)?, date_column))
    }

    /// Rename a value column after normalization.
    #[must_use]
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.renames.push((from.into(), to.into()));
        self
    }

    /// Keep only these columns (post-rename names) after normalization.
    #[must_use]
    pub fn keep(mut self, columns: &[&str]) -> Self {
        self.keep = Some(columns.iter().map(|c| (*c).to_string()).collect());
        self
    }

    /// The wrapped raw table.
    #[must_use]
    pub const fn raw(&self) -> &RawTable {
        &self.raw
    }

    /// Name of the column holding dates.
    #[must_use]
    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    /// Normalize on the date column, then apply renames and the column filter.
    ///
    /// # Errors
    /// Returns `Schema` if the date column or a renamed/kept column is absent.
    pub fn normalize(&self) -> Result<Normalized, GasError> {
        let mut out = normalize(&self.raw, &self.date_column)?;
        for (from, to) in &self.renames {
            out.table.rename_column(from, to)?;
        }
        if let Some(keep) = &self.keep {
            let names: Vec<&str> = keep.iter().map(String::as_str).collect();
            out.table = out.table.select(&names)?;
        }
        Ok(out)
    }
}
