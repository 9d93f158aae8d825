use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::STATEMENT_FIELDS;

/// Errors raised while reading or interpreting a statement file.
///
/// Line numbers are 1-based and refer to the physical CSV line.
#[derive(Debug, Error)]
pub enum StatementError {
    #[error("failed to open statement {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: malformed CSV", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: statement is empty, expected a header row", .path.display())]
    MissingHeader { path: PathBuf },

    #[error("{}:{line}: expected {} fields, found {found}", .path.display(), STATEMENT_FIELDS)]
    TooFewFields {
        path: PathBuf,
        line: u64,
        found: usize,
    },

    #[error("{}:{line}: could not parse amount `{value}` as a decimal", .path.display())]
    InvalidAmount {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("{}:{line}: could not parse date `{value}` as YYYY-MM-DD", .path.display())]
    InvalidDate {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("{}:{line}: running total no longer fits in a decimal", .path.display())]
    AmountOverflow { path: PathBuf, line: u64 },
}

impl StatementError {
    /// Likely cause of a row that failed to parse during summarization.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            StatementError::InvalidDate { .. } => Some(
                "Dates must already be YYYY-MM-DD. Is there a header row in the file, \
                 or were MM/DD/YY dates not normalized yet? Run the statement through \
                 `tally merge` first.",
            ),
            StatementError::InvalidAmount { .. } => Some(
                "Amounts must be plain decimal numbers. A header row at the top of the \
                 file is the usual cause; `tally merge` output has none.",
            ),
            StatementError::AmountOverflow { .. } => Some(
                "An amount is far outside any real statement value. Check the amount column \
                 for stray digits.",
            ),
            StatementError::TooFewFields { .. } => Some(
                "Each row needs account,date,amount,type,description,balance. \
                 Check that the file is a statement export.",
            ),
            _ => None,
        }
    }
}
