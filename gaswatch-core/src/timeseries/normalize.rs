use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::GasError;
use crate::columns::DATE;
use crate::table::{Cell, DatedRow, DatedTable, RawTable};

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Result of normalizing a raw table.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Table keyed by `Date`.
    pub table: DatedTable,
    /// Rows dropped because their date value could not be coerced.
    pub excluded: usize,
}

fn date_from_unix(secs: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}

/// Coerce one cell to a calendar date, discarding any time of day.
///
/// Numbers are Unix seconds. Text may be Unix seconds, RFC 3339,
/// `YYYY-MM-DD[ HH:MM:SS]`, `YYYY-MM-DDTHH:MM:SS[.fff]` or `MM/DD/YYYY`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn coerce_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Number(v) if v.is_finite() => date_from_unix(v.floor() as i64),
        Cell::Text(s) => parse_date_text(s.trim()),
        _ => None,
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    if let Ok(secs) = s.parse::<i64>() {
        return date_from_unix(secs);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        })
}

/// Key a raw table by calendar date.
///
/// The `date_column` is renamed to `Date` and each of its values coerced with
/// [`coerce_date`]. Rows whose value cannot be coerced are excluded and counted.
/// Row order is preserved. Normalizing [`DatedTable::to_raw`] of the result on
/// `Date` gives back the same table.
///
/// # Errors
/// Returns `Schema` if `date_column` is absent or another column is already
/// named `Date`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "gaswatch_core::normalize",
        skip(raw),
        fields(rows = raw.len()),
    )
)]
pub fn normalize(raw: &RawTable, date_column: &str) -> Result<Normalized, GasError> {
    let idx = raw
        .column_index(date_column)
        .ok_or_else(|| GasError::schema(format!("date column {date_column} not found")))?;

    let columns: Vec<String> = raw
        .columns()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .map(|(_, c)| c.clone())
        .collect();
    if columns.iter().any(|c| c == DATE) {
        return Err(GasError::schema(format!(
            "column {DATE} already exists besides {date_column}"
        )));
    }

    let mut rows = Vec::with_capacity(raw.len());
    let mut excluded = 0usize;
    for row in raw.rows() {
        let Some(date) = coerce_date(&row[idx]) else {
            excluded += 1;
            continue;
        };
        let cells = row
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, c)| c.clone())
            .collect();
        rows.push(DatedRow { date, cells });
    }

    #[cfg(feature = "tracing")]
    if excluded > 0 {
        tracing::debug!(
            date_column,
            excluded,
            "rows with unparseable dates excluded"
        );
    }

    Ok(Normalized {
        table: DatedTable::from_parts(DATE.to_string(), columns, rows),
        excluded,
    })
}
