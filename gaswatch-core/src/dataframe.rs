//! Polars conversion of dated tables and resampled series.

use polars::prelude::{Column, DataFrame};

use crate::GasError;
use crate::table::{Cell, DatedTable};
use crate::timeseries::resample::ResampledSeries;

/// Convert a table-like value into a polars `DataFrame`.
///
/// The date key becomes a `%Y-%m-%d` string column named after the key.
pub trait ToDataFrame {
    /// Build the frame.
    ///
    /// # Errors
    /// Returns `Data` when polars rejects the columns.
    fn to_dataframe(&self) -> Result<DataFrame, GasError>;
}

fn polars_error(e: polars::error::PolarsError) -> GasError {
    GasError::Data(format!("dataframe: {e}"))
}

fn date_strings(dates: impl Iterator<Item = chrono::NaiveDate>) -> Vec<String> {
    dates.map(|d| d.format("%Y-%m-%d").to_string()).collect()
}

impl ToDataFrame for DatedTable {
    fn to_dataframe(&self) -> Result<DataFrame, GasError> {
        let mut columns = Vec::with_capacity(self.columns().len() + 1);
        columns.push(Column::new(self.key().into(), date_strings(self.dates())));
        for (i, name) in self.columns().iter().enumerate() {
            let textual = self
                .rows()
                .iter()
                .any(|r| matches!(r.cells[i], Cell::Text(_)));
            let column = if textual {
                let values: Vec<Option<String>> = self
                    .rows()
                    .iter()
                    .map(|r| (!r.cells[i].is_missing()).then(|| r.cells[i].to_string()))
                    .collect();
                Column::new(name.as_str().into(), values)
            } else {
                let values: Vec<Option<f64>> =
                    self.rows().iter().map(|r| r.cells[i].as_f64()).collect();
                Column::new(name.as_str().into(), values)
            };
            columns.push(column);
        }
        DataFrame::new(columns).map_err(polars_error)
    }
}

impl ToDataFrame for ResampledSeries {
    fn to_dataframe(&self) -> Result<DataFrame, GasError> {
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(Column::new(
            crate::columns::DATE.into(),
            date_strings(self.dates()),
        ));
        for (i, name) in self.columns.iter().enumerate() {
            let values: Vec<Option<f64>> = self.rows.iter().map(|r| r.values[i]).collect();
            columns.push(Column::new(name.as_str().into(), values));
        }
        DataFrame::new(columns).map_err(polars_error)
    }
}
