//! Merge two statement exports into one deduplicated list.
//!
//! Multiple transactions can share a date, amount and description, so the
//! whole canonical line is the dedup key rather than any single field.

use std::collections::HashSet;
use std::path::Path;

use log::{debug, info};
use tally_ingest::{HeaderRow, StatementError, StatementRow, open_statement};

/// Distinct canonical rows collected from one or more statements.
#[derive(Debug, Clone, Default)]
pub struct MergedStatements {
    rows: HashSet<String>,
}

impl MergedStatements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize the row's date and add its canonical line.
    ///
    /// Returns `false` if an identical line was already present.
    pub fn insert(&mut self, row: StatementRow) -> bool {
        self.rows.insert(row.normalized().canonical_line())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.rows.contains(line)
    }

    /// Canonical lines in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(String::as_str)
    }

    /// Canonical lines, most recent date first; lines with the same date are
    /// ordered by their full text.
    pub fn into_sorted(self) -> Vec<String> {
        let mut lines: Vec<String> = self.rows.into_iter().collect();
        lines.sort_by(|a, b| date_field(b).cmp(date_field(a)).then_with(|| a.cmp(b)));
        lines
    }
}

impl Extend<StatementRow> for MergedStatements {
    fn extend<T: IntoIterator<Item = StatementRow>>(&mut self, iter: T) {
        for row in iter {
            self.insert(row);
        }
    }
}

impl FromIterator<StatementRow> for MergedStatements {
    fn from_iter<T: IntoIterator<Item = StatementRow>>(iter: T) -> Self {
        let mut merged = Self::new();
        merged.extend(iter);
        merged
    }
}

fn date_field(line: &str) -> &str {
    line.split(',').nth(1).unwrap_or("")
}

/// Row counts from a merge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Data rows read from each input, header excluded.
    pub rows_read: [usize; 2],
    pub distinct: usize,
}

impl MergeStats {
    pub fn duplicates(&self) -> usize {
        (self.rows_read[0] + self.rows_read[1]).saturating_sub(self.distinct)
    }
}

/// Read two statement exports (each with a header row) and merge them.
///
/// Fails on the first unreadable file, malformed CSV line, or row with fewer
/// than six fields.
pub fn merge_statements(
    first: impl AsRef<Path>,
    second: impl AsRef<Path>,
) -> Result<(MergedStatements, MergeStats), StatementError> {
    let mut merged = MergedStatements::new();
    let mut stats = MergeStats::default();

    for (slot, path) in [first.as_ref(), second.as_ref()].into_iter().enumerate() {
        let mut rows = open_statement(path, HeaderRow::Present)?;
        for numbered in rows.by_ref() {
            merged.insert(numbered?.row);
        }
        stats.rows_read[slot] = rows.rows_read();
        debug!("{}: read {} rows", path.display(), rows.rows_read());
    }

    stats.distinct = merged.len();
    info!(
        "merged {} + {} rows into {} distinct ({} duplicates)",
        stats.rows_read[0],
        stats.rows_read[1],
        stats.distinct,
        stats.duplicates()
    );

    Ok((merged, stats))
}
