// Duration-of-stay and reason-for-migration tables.
//
// Both tables share one shape: an area name, a last-residence name and a
// bag of numeric columns. The aggregator never looks at column meaning, the
// caller passes the columns it wants summed.
use crate::loader::resolve;
use crate::normalize::normalize;
use crate::schema::auxiliary as keys;
use crate::types::{Direction, Query, RawRow};
use crate::util::count_or_zero;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxiliaryRow {
    /// Canonical destination name.
    pub area_name: String,
    /// Canonical last-residence name.
    pub origin: String,
    pub cells: RawRow,
}

impl AuxiliaryRow {
    /// Numeric value of `column`; missing or non-numeric cells read as 0.
    pub fn value(&self, column: &str) -> i64 {
        count_or_zero(self.cells.get(column).map(String::as_str))
    }

    pub fn matches(&self, query: &Query) -> bool {
        let Some(selected) = query.selected() else {
            return false;
        };
        match query.direction {
            Direction::Inflow => self.area_name == selected,
            Direction::Outflow => self.origin == selected,
        }
    }
}

/// Normalize the matching keys of every row. Nothing is dropped.
pub fn ingest_auxiliary(rows: Vec<RawRow>) -> Vec<AuxiliaryRow> {
    let out: Vec<AuxiliaryRow> = rows
        .into_iter()
        .map(|cells| AuxiliaryRow {
            area_name: normalize(resolve(&cells, keys::AREA_NAME).unwrap_or("")),
            origin: normalize(resolve(&cells, keys::ORIGIN).unwrap_or("")),
            cells,
        })
        .collect();
    debug!(rows = out.len(), "ingested auxiliary table");
    out
}

/// Sum each requested column over the rows matching `query`.
///
/// Only entity and direction are matched; the threshold does not apply to
/// these tables. Every requested column is present in the result.
pub fn sum_columns<S: AsRef<str>>(rows: &[AuxiliaryRow], query: &Query, columns: &[S]) -> HashMap<String, i64> {
    let mut sums: HashMap<String, i64> = columns.iter().map(|c| (c.as_ref().to_string(), 0)).collect();
    for row in rows.iter().filter(|r| r.matches(query)) {
        for (column, total) in sums.iter_mut() {
            *total = total.saturating_add(row.value(column));
        }
    }
    sums
}
