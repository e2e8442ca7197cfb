//! Delimited-file persistence of raw and unified tables.
//!
//! The unified artifact is a header row followed by one row per date; the key
//! column comes first and is written as `%Y-%m-%d`, missing cells as empty
//! fields.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ErrorKind, ReaderBuilder, Trim, WriterBuilder};

use crate::GasError;
use crate::columns::{DATE, OPTIONAL_COLUMNS, UNIFIED_COLUMNS};
use crate::table::{Cell, DatedTable, RawTable};
use crate::timeseries::normalize::normalize;

pub(crate) fn csv_error(e: csv::Error) -> GasError {
    match e.kind() {
        ErrorKind::UnequalLengths { .. } => GasError::schema(e.to_string()),
        ErrorKind::Io(_) => GasError::Io(e.to_string()),
        _ => GasError::Data(e.to_string()),
    }
}

/// Read a delimited file with a header row into a raw table.
///
/// Fields are trimmed and parsed with [`Cell::parse`].
///
/// # Errors
/// Returns `Schema` when a row's width differs from the header, `Io` when the
/// reader fails and `Data` for undecodable input.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable, GasError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = rdr.headers().map_err(csv_error)?.clone();
    let mut table = RawTable::new(headers.iter())?;
    for record in rdr.records() {
        let record = record.map_err(csv_error)?;
        table.push_row(record.iter().map(Cell::parse).collect())?;
    }
    Ok(table)
}

/// [`read_csv`] from a file path.
///
/// # Errors
/// See [`read_csv`]; opening the file maps to `Io`.
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<RawTable, GasError> {
    read_csv(File::open(path)?)
}

/// Write a dated table: key column first, then every column in table order.
///
/// Cells are written untyped. Reading back re-parses every field, so a text
/// cell that looks numeric (`Text("42")`) returns as `Number(42.0)`.
///
/// # Errors
/// Returns `Io` when the writer fails.
pub fn write_unified<W: Write>(table: &DatedTable, writer: W) -> Result<(), GasError> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(std::iter::once(table.key()).chain(table.columns().iter().map(String::as_str)))
        .map_err(csv_error)?;
    for row in table.rows() {
        let mut record = Vec::with_capacity(row.cells.len() + 1);
        record.push(row.date.format("%Y-%m-%d").to_string());
        record.extend(row.cells.iter().map(ToString::to_string));
        wtr.write_record(&record).map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

/// [`write_unified`] to a file path, replacing any existing file.
///
/// # Errors
/// See [`write_unified`]; creating the file maps to `Io`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "gaswatch_core::write_unified_path", skip(table, path), fields(rows = table.len()))
)]
pub fn write_unified_path(table: &DatedTable, path: impl AsRef<Path>) -> Result<(), GasError> {
    write_unified(table, File::create(path)?)
}

/// Read any dated table written by [`write_unified`].
///
/// Every row must carry a valid date; nothing is silently dropped.
///
/// # Errors
/// Returns `Schema` when the `Date` column is absent or a date is unparseable,
/// plus the errors of [`read_csv`].
pub fn read_dated<R: Read>(reader: R) -> Result<DatedTable, GasError> {
    let raw = read_csv(reader)?;
    let out = normalize(&raw, DATE)?;
    if out.excluded > 0 {
        return Err(GasError::schema(format!(
            "{} rows with an invalid {DATE}",
            out.excluded
        )));
    }
    Ok(out.table)
}

/// [`read_dated`] from a file path.
///
/// # Errors
/// See [`read_dated`]; opening the file maps to `Io`.
pub fn read_dated_path(path: impl AsRef<Path>) -> Result<DatedTable, GasError> {
    read_dated(File::open(path)?)
}

/// Read the unified artifact and check it carries the canonical columns.
///
/// Optional columns (those produced by left joins) may be absent; any other
/// canonical column must be present.
///
/// # Errors
/// Returns `Schema` for a missing canonical column, plus the errors of
/// [`read_dated`].
pub fn read_unified<R: Read>(reader: R) -> Result<DatedTable, GasError> {
    let table = read_dated(reader)?;
    if let Some(missing) = UNIFIED_COLUMNS
        .iter()
        .skip(1)
        .find(|c| !OPTIONAL_COLUMNS.contains(c) && !table.has_column(c))
    {
        return Err(GasError::schema(format!(
            "unified artifact is missing column {missing}"
        )));
    }
    Ok(table)
}

/// [`read_unified`] from a file path.
///
/// # Errors
/// See [`read_unified`]; opening the file maps to `Io`.
pub fn read_unified_path(path: impl AsRef<Path>) -> Result<DatedTable, GasError> {
    read_unified(File::open(path)?)
}
