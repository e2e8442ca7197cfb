//! Tabular containers flowing through the pipeline.
//!
//! - [`RawTable`]: columns and rows exactly as a source produced them.
//! - [`DatedTable`]: rows keyed by a calendar date, the shape every join and
//!   statistic works on. A merged `DatedTable` is the unified artifact.

use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::GasError;
use crate::columns::DATE;

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Cell {
    /// Numeric value.
    Number(f64),
    /// Categorical or otherwise non-numeric value.
    Text(String),
    /// Absent value (empty field, left-join gap, NaN).
    #[default]
    Missing,
}

impl Cell {
    /// Parse a delimited-file field: empty is `Missing`, anything `f64` accepts is
    /// `Number` (NaN becomes `Missing`), the rest is `Text`.
    #[must_use]
    pub fn parse(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_nan() => Self::Missing,
            Ok(v) => Self::Number(v),
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }

    /// Finite numeric value, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Text value, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the cell holds no value.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Missing => Ok(()),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        if v.is_nan() { Self::Missing } else { Self::Number(v) }
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Self::Missing, Self::from)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

fn find(columns: &[String], name: &str) -> Option<usize> {
    columns.iter().position(|c| c == name)
}

fn rename_in(columns: &mut [String], from: &str, to: &str) -> Result<(), GasError> {
    let idx = find(columns, from).ok_or_else(|| GasError::schema(format!("no column {from}")))?;
    if from != to && find(columns, to).is_some() {
        return Err(GasError::schema(format!(
            "cannot rename {from} to {to}: column already exists"
        )));
    }
    columns[idx] = to.to_string();
    Ok(())
}

fn ensure_unique(columns: &[String]) -> Result<(), GasError> {
    for (i, c) in columns.iter().enumerate() {
        if columns[..i].contains(c) {
            return Err(GasError::schema(format!("duplicate column {c}")));
        }
    }
    Ok(())
}

/// Un-normalized table: named columns and rows of cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Create an empty table with the given schema.
    ///
    /// # Errors
    /// Returns `Schema` if a column name repeats.
    pub fn new<I, S>(columns: I) -> Result<Self, GasError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        ensure_unique(&columns)?;
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Append a row.
    ///
    /// # Errors
    /// Returns `Schema` if the row width differs from the column count.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), GasError> {
        if row.len() != self.columns.len() {
            return Err(GasError::schema(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        find(&self.columns, name)
    }

    /// Rename a column in place.
    ///
    /// # Errors
    /// Returns `Schema` if `from` is absent or `to` already exists.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), GasError> {
        rename_in(&mut self.columns, from, to)
    }

    /// Remove a column and its cells.
    ///
    /// # Errors
    /// Returns `Schema` if the column is absent.
    pub fn drop_column(&mut self, name: &str) -> Result<(), GasError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| GasError::schema(format!("no column {name}")))?;
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        Ok(())
    }

    pub(crate) const fn from_parts(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }
}

/// One row of a [`DatedTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedRow {
    /// Day the row describes.
    pub date: NaiveDate,
    /// Non-key cells, aligned with the table's columns.
    pub cells: Vec<Cell>,
}

/// Table keyed by calendar date.
///
/// `columns` never contains the key. Rows keep insertion order; tables produced
/// by the merge engine are sorted by date with one row per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedTable {
    key: String,
    columns: Vec<String>,
    rows: Vec<DatedRow>,
}

impl DatedTable {
    /// Create an empty table keyed by the canonical `Date` column.
    ///
    /// # Errors
    /// Returns `Schema` if a column repeats or equals the key.
    pub fn new<I, S>(columns: I) -> Result<Self, GasError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_key(DATE, columns)
    }

    /// Create an empty table with a custom key name.
    ///
    /// # Errors
    /// Returns `Schema` if a column repeats or equals the key.
    pub fn with_key<I, S>(key: impl Into<String>, columns: I) -> Result<Self, GasError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into();
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        ensure_unique(&columns)?;
        if columns.contains(&key) {
            return Err(GasError::schema(format!(
                "column {key} collides with the date key"
            )));
        }
        Ok(Self {
            key,
            columns,
            rows: Vec::new(),
        })
    }

    /// Append a row.
    ///
    /// # Errors
    /// Returns `Schema` if the row width differs from the column count.
    pub fn push(&mut self, date: NaiveDate, cells: Vec<Cell>) -> Result<(), GasError> {
        if cells.len() != self.columns.len() {
            return Err(GasError::schema(format!(
                "row for {date} has {} cells, table has {} columns",
                cells.len(),
                self.columns.len()
            )));
        }
        self.rows.push(DatedRow { date, cells });
        Ok(())
    }

    /// Name of the date key column.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Non-key column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in table order.
    #[must_use]
    pub fn rows(&self) -> &[DatedRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a non-key column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        find(&self.columns, name)
    }

    /// Whether a non-key column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterate over row dates in table order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|r| r.date)
    }

    /// Earliest and latest row date.
    #[must_use]
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.dates().min()?;
        let max = self.dates().max()?;
        Some((min, max))
    }

    /// Cell of the first row dated `date` in `column`.
    #[must_use]
    pub fn get(&self, date: NaiveDate, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows
            .iter()
            .find(|r| r.date == date)
            .and_then(|r| r.cells.get(idx))
    }

    /// Rename a non-key column in place.
    ///
    /// # Errors
    /// Returns `Schema` if `from` is absent or `to` already exists or equals the key.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), GasError> {
        if to == self.key {
            return Err(GasError::schema(format!(
                "column {to} collides with the date key"
            )));
        }
        rename_in(&mut self.columns, from, to)
    }

    /// Remove a non-key column and its cells.
    ///
    /// # Errors
    /// Returns `Schema` if the column is absent.
    pub fn drop_column(&mut self, name: &str) -> Result<(), GasError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| GasError::schema(format!("no column {name}")))?;
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.cells.remove(idx);
        }
        Ok(())
    }

    /// Keep only the named columns, in the given order.
    ///
    /// # Errors
    /// Returns `Schema` if a name is absent or repeated.
    pub fn select(&self, names: &[&str]) -> Result<Self, GasError> {
        let idxs = names
            .iter()
            .map(|n| {
                self.column_index(n)
                    .ok_or_else(|| GasError::schema(format!("no column {n}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut out = Self::with_key(self.key.clone(), names.iter().copied())?;
        out.rows = self
            .rows
            .iter()
            .map(|r| DatedRow {
                date: r.date,
                cells: idxs.iter().map(|&i| r.cells[i].clone()).collect(),
            })
            .collect();
        Ok(out)
    }

    /// Stable sort of the rows by date.
    pub fn sort_by_date(&mut self) {
        self.rows.sort_by_key(|r| r.date);
    }

    /// Raw form of the table: key column first, dates rendered as `%Y-%m-%d`.
    ///
    /// Normalizing the result on the key column reproduces `self`.
    #[must_use]
    pub fn to_raw(&self) -> RawTable {
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(self.key.clone());
        columns.extend(self.columns.iter().cloned());
        let rows = self
            .rows
            .iter()
            .map(|r| {
                let mut row = Vec::with_capacity(r.cells.len() + 1);
                row.push(Cell::Text(r.date.format("%Y-%m-%d").to_string()));
                row.extend(r.cells.iter().cloned());
                row
            })
            .collect();
        RawTable { columns, rows }
    }

    pub(crate) fn from_parts(key: String, columns: Vec<String>, rows: Vec<DatedRow>) -> Self {
        Self { key, columns, rows }
    }
}
