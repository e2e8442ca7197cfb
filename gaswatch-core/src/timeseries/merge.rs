use std::collections::{BTreeMap, btree_map::Entry};

use chrono::NaiveDate;

use crate::columns::DATE;
use crate::table::{Cell, DatedRow, DatedTable};
use crate::{GasError, JoinMode, MergeReport, MergeStep};

/// Ordered list of tables to fold into one unified table.
///
/// The first table seeds the accumulator; every further table is joined onto
/// it on `Date` with its own [`JoinMode`], in insertion order.
#[derive(Debug, Clone)]
pub struct MergePlan {
    seed: (String, DatedTable),
    steps: Vec<(String, DatedTable, JoinMode)>,
}

impl MergePlan {
    /// Start a plan from the seed table.
    #[must_use]
    pub fn new(label: impl Into<String>, table: DatedTable) -> Self {
        Self {
            seed: (label.into(), table),
            steps: Vec::new(),
        }
    }

    /// Append a join step.
    #[must_use]
    pub fn join(mut self, label: impl Into<String>, table: DatedTable, mode: JoinMode) -> Self {
        self.steps.push((label.into(), table, mode));
        self
    }

    /// Append an inner join step.
    #[must_use]
    pub fn inner(self, label: impl Into<String>, table: DatedTable) -> Self {
        self.join(label, table, JoinMode::Inner)
    }

    /// Append a left join step.
    #[must_use]
    pub fn left(self, label: impl Into<String>, table: DatedTable) -> Self {
        self.join(label, table, JoinMode::Left)
    }

    /// Number of tables in the plan, seed included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len() + 1
    }

    /// Always false: a plan holds at least its seed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    fn tables(&self) -> impl Iterator<Item = (&str, &DatedTable)> {
        std::iter::once((self.seed.0.as_str(), &self.seed.1))
            .chain(self.steps.iter().map(|(l, t, _)| (l.as_str(), t)))
    }

    fn validate(&self) -> Result<(), GasError> {
        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
        for (label, table) in self.tables() {
            if table.key() != DATE {
                return Err(GasError::schema(format!(
                    "{label}: key column is {}, expected {DATE}",
                    table.key()
                )));
            }
            for col in table.columns() {
                if let Some(prev) = owners.insert(col.as_str(), label) {
                    return Err(GasError::schema(format!(
                        "column {col} appears in both {prev} and {label}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Collapse a table to one row per date, keeping the first occurrence.
///
/// Returns the date-ordered rows and the number of duplicates dropped.
#[must_use]
pub fn dedup_by_date(table: &DatedTable) -> (BTreeMap<NaiveDate, Vec<Cell>>, usize) {
    let mut map: BTreeMap<NaiveDate, Vec<Cell>> = BTreeMap::new();
    let mut dropped = 0usize;
    for row in table.rows() {
        match map.entry(row.date) {
            Entry::Vacant(v) => {
                v.insert(row.cells.clone());
            }
            Entry::Occupied(_) => dropped += 1,
        }
    }
    (map, dropped)
}

/// Execute a merge plan.
///
/// - Every table must be keyed by `Date` and no non-key column may appear in
///   more than one table; both are checked before any join runs.
/// - Duplicate dates inside one table keep the first occurrence.
/// - An inner step keeps dates present on both sides; a left step keeps every
///   accumulated date and leaves the right columns `Missing` where absent.
/// - Result columns are the accumulator's followed by the joined table's; rows
///   are sorted by date.
///
/// # Errors
/// Returns `Schema` on a non-`Date` key or a colliding column.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "gaswatch_core::merge", skip(plan), fields(tables = plan.len()))
)]
pub fn merge(plan: MergePlan) -> Result<(DatedTable, MergeReport), GasError> {
    plan.validate()?;
    let MergePlan { seed, steps } = plan;

    let (seed_label, seed_table) = seed;
    let mut columns: Vec<String> = seed_table.columns().to_vec();
    let (mut acc, dropped) = dedup_by_date(&seed_table);
    let mut report = MergeReport::default();
    report.steps.push(MergeStep {
        source: seed_label,
        mode: None,
        input_rows: acc.len(),
        duplicates_dropped: dropped,
        rows: acc.len(),
    });

    for (label, table, mode) in steps {
        let (right, dropped) = dedup_by_date(&table);
        let width = table.columns().len();
        match mode {
            JoinMode::Inner => {
                acc.retain(|date, _| right.contains_key(date));
                for (date, cells) in &mut acc {
                    if let Some(extra) = right.get(date) {
                        cells.extend(extra.iter().cloned());
                    }
                }
            }
            JoinMode::Left => {
                for (date, cells) in &mut acc {
                    match right.get(date) {
                        Some(extra) => cells.extend(extra.iter().cloned()),
                        None => cells.extend(std::iter::repeat_n(Cell::Missing, width)),
                    }
                }
            }
        }
        columns.extend(table.columns().iter().cloned());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            source = %label,
            mode = mode.as_str(),
            input_rows = right.len(),
            duplicates_dropped = dropped,
            rows = acc.len(),
            "merge step"
        );

        report.steps.push(MergeStep {
            source: label,
            mode: Some(mode),
            input_rows: right.len(),
            duplicates_dropped: dropped,
            rows: acc.len(),
        });
    }

    let rows = acc
        .into_iter()
        .map(|(date, cells)| DatedRow { date, cells })
        .collect();
    Ok((
        DatedTable::from_parts(DATE.to_string(), columns, rows),
        report,
    ))
}
