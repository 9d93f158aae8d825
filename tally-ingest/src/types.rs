use std::fmt;

use crate::normalize::normalize_date;

/// Number of positional fields in a statement row:
/// account, date, amount, type, description, balance.
pub const STATEMENT_FIELDS: usize = 6;

/// One row of a bank statement export, kept as raw text.
///
/// Field values are never trimmed or reformatted here; two rows are the same
/// transaction only if every field matches byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatementRow {
    pub account: String,
    pub date: String,
    pub amount: String,
    pub kind: String,
    pub description: String,
    /// Running balance after the transaction. Informational only.
    pub balance: String,
}

impl StatementRow {
    /// Build a row from the first six fields of a CSV record.
    ///
    /// Trailing fields past the sixth are ignored. Returns `None` when the
    /// record is too short.
    pub fn from_record(record: &csv::StringRecord) -> Option<Self> {
        if record.len() < STATEMENT_FIELDS {
            return None;
        }
        Some(Self {
            account: record[0].to_string(),
            date: record[1].to_string(),
            amount: record[2].to_string(),
            kind: record[3].to_string(),
            description: record[4].to_string(),
            balance: record[5].to_string(),
        })
    }

    /// Same row with its date run through [`normalize_date`].
    pub fn normalized(mut self) -> Self {
        self.date = normalize_date(&self.date);
        self
    }

    /// Comma-joined six-field line. Used as the dedup key when merging.
    pub fn canonical_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StatementRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.account, self.date, self.amount, self.kind, self.description, self.balance
        )
    }
}
