//! Capital One statement CSV reader.
//!
//! Export layout, one transaction per line:
//!   Account Number,Transaction Date,Transaction Amount,Transaction Type,Transaction Description,Balance
//!   0546,01/02/22,50.00,Credit,PAYROLL ACME INC,320.00
//!
//! Bank exports carry the header line above; `tally merge` output does not.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::StatementError;
use crate::types::StatementRow;

/// Whether the first CSV line is a header to skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRow {
    /// Skip the first line without looking at it.
    Present,
    Absent,
}

/// A statement row together with the CSV line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedRow {
    pub line: u64,
    pub row: StatementRow,
}

/// Open a statement file for streaming.
///
/// Dates are returned as written in the file; callers decide whether to
/// normalize them.
pub fn open_statement(
    path: impl AsRef<Path>,
    header: HeaderRow,
) -> Result<StatementRows, StatementError> {
    let path = path.as_ref().to_path_buf();
    let file = File::open(&path).map_err(|source| StatementError::Open {
        path: path.clone(),
        source,
    })?;

    let records = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(file)
        .into_records();

    Ok(StatementRows {
        path,
        records,
        header,
        started: false,
        finished: false,
        rows_read: 0,
    })
}

/// Streaming iterator over the rows of one statement file.
///
/// Yields at most one error, after which it is exhausted.
pub struct StatementRows {
    path: PathBuf,
    records: csv::StringRecordsIntoIter<File>,
    header: HeaderRow,
    started: bool,
    finished: bool,
    rows_read: usize,
}

impl StatementRows {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows yielded so far (header excluded).
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    fn fail(&mut self, err: StatementError) -> Option<Result<NumberedRow, StatementError>> {
        self.finished = true;
        Some(Err(err))
    }

    fn next_record(&mut self) -> Option<Result<csv::StringRecord, StatementError>> {
        let path = &self.path;
        self.records.next().map(|result| {
            result.map_err(|source| StatementError::Csv {
                path: path.clone(),
                source,
            })
        })
    }
}

impl Iterator for StatementRows {
    type Item = Result<NumberedRow, StatementError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.started {
            self.started = true;
            if self.header == HeaderRow::Present {
                match self.next_record() {
                    Some(Ok(_)) => debug!("{}: skipped header row", self.path.display()),
                    Some(Err(err)) => return self.fail(err),
                    None => {
                        let path = self.path.clone();
                        return self.fail(StatementError::MissingHeader { path });
                    }
                }
            }
        }

        let record = match self.next_record()? {
            Ok(record) => record,
            Err(err) => return self.fail(err),
        };
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);

        match StatementRow::from_record(&record) {
            Some(row) => {
                self.rows_read += 1;
                Some(Ok(NumberedRow { line, row }))
            }
            None => {
                let path = self.path.clone();
                self.fail(StatementError::TooFewFields {
                    path,
                    line,
                    found: record.len(),
                })
            }
        }
    }
}
