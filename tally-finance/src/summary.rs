//! Summary statistics over one merged statement.
//!
//! Input is `tally merge` output: no header row, dates already `YYYY-MM-DD`,
//! no duplicate rows. A positive amount is a deposit; zero and negative
//! amounts are withdrawals.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use log::{info, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use tally_ingest::{HeaderRow, NumberedRow, StatementError, StatementRow, open_statement};

const ISO_DATE: &str = "%Y-%m-%d";

/// The parsed fields of a row that the summary looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub date: NaiveDate,
    pub amount: Decimal,
    /// `None` when the balance column is not a decimal.
    pub balance: Option<Decimal>,
}

impl SummaryEntry {
    /// Parse date, amount and balance from a row found at `path:line`.
    ///
    /// The date is checked before the amount.
    pub fn parse(path: &Path, line: u64, row: &StatementRow) -> Result<Self, StatementError> {
        let date = parse_iso_date(&row.date).ok_or_else(|| StatementError::InvalidDate {
            path: path.to_path_buf(),
            line,
            value: row.date.clone(),
        })?;

        let amount = parse_decimal(&row.amount).ok_or_else(|| StatementError::InvalidAmount {
            path: path.to_path_buf(),
            line,
            value: row.amount.clone(),
        })?;

        let balance = parse_decimal(&row.balance);
        if balance.is_none() {
            warn!(
                "{}:{line}: ignoring balance `{}`, not a decimal",
                path.display(),
                row.balance
            );
        }

        Ok(Self {
            date,
            amount,
            balance,
        })
    }

    pub fn is_deposit(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// Strict `YYYY-MM-DD`: ten bytes, zero padded, no sign or whitespace.
///
/// chrono alone would also take `2022-1-2` and `22-01-02`.
fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(raw, ISO_DATE).ok()
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// An amount paired with the date it was seen on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatedAmount {
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Count and running sum for one side of the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bucket {
    pub count: usize,
    pub total: Decimal,
}

impl Bucket {
    /// `None` once the running total overflows.
    fn add(self, amount: Decimal) -> Option<Self> {
        Some(Self {
            count: self.count + 1,
            total: self.total.checked_add(amount)?,
        })
    }

    /// Mean amount rounded half-to-even to cents; `None` for an empty bucket.
    pub fn average(&self) -> Option<Decimal> {
        let mut average = self
            .total
            .checked_div(Decimal::from(self.count))?
            .round_dp(2);
        average.rescale(2);
        Some(average)
    }
}

/// Running state of a summary scan.
///
/// Each [`push`](Self::push) consumes the accumulator and returns the next
/// one, so a whole statement is a single `try_fold`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryAccumulator {
    pub transactions: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub deposits: Bucket,
    pub withdrawals: Bucket,
    pub largest_deposit: Option<DatedAmount>,
    pub largest_withdrawal: Option<DatedAmount>,
    pub highest_balance: Option<DatedAmount>,
    pub lowest_balance: Option<DatedAmount>,
}

impl SummaryAccumulator {
    /// Fold one entry in. Returns `None` if a deposit or withdrawal total
    /// overflows `Decimal`.
    pub fn push(mut self, entry: &SummaryEntry) -> Option<Self> {
        let date = entry.date;
        let seen = DatedAmount {
            amount: entry.amount,
            date,
        };

        self.transactions += 1;
        self.start_date = Some(self.start_date.map_or(date, |d| d.min(date)));
        self.end_date = Some(self.end_date.map_or(date, |d| d.max(date)));

        if entry.is_deposit() {
            self.deposits = self.deposits.add(entry.amount)?;
            self.largest_deposit = keep_extreme(self.largest_deposit, seen, |new, old| new > old);
        } else {
            self.withdrawals = self.withdrawals.add(entry.amount)?;
            self.largest_withdrawal =
                keep_extreme(self.largest_withdrawal, seen, |new, old| new < old);
        }

        if let Some(balance) = entry.balance {
            let seen = DatedAmount {
                amount: balance,
                date,
            };
            self.highest_balance = keep_extreme(self.highest_balance, seen, |new, old| new > old);
            self.lowest_balance = keep_extreme(self.lowest_balance, seen, |new, old| new < old);
        }

        Some(self)
    }

    pub fn finish(self) -> SummaryReport {
        SummaryReport {
            transactions: self.transactions,
            start_date: self.start_date,
            end_date: self.end_date,
            deposits: BucketSummary::from(self.deposits),
            withdrawals: BucketSummary::from(self.withdrawals),
            extremes: Extremes {
                largest_deposit: self.largest_deposit,
                largest_withdrawal: self.largest_withdrawal,
                highest_balance: self.highest_balance,
                lowest_balance: self.lowest_balance,
            },
        }
    }
}

// Ties keep the earlier row.
fn keep_extreme(
    current: Option<DatedAmount>,
    seen: DatedAmount,
    beats: impl Fn(Decimal, Decimal) -> bool,
) -> Option<DatedAmount> {
    match current {
        Some(current) if !beats(seen.amount, current.amount) => Some(current),
        _ => Some(seen),
    }
}

/// Count, total and average for deposits or withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketSummary {
    pub count: usize,
    pub total: Decimal,
    pub average: Option<Decimal>,
}

impl From<Bucket> for BucketSummary {
    fn from(bucket: Bucket) -> Self {
        Self {
            count: bucket.count,
            total: bucket.total,
            average: bucket.average(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Extremes {
    pub largest_deposit: Option<DatedAmount>,
    pub largest_withdrawal: Option<DatedAmount>,
    pub highest_balance: Option<DatedAmount>,
    pub lowest_balance: Option<DatedAmount>,
}

/// Final report for one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub transactions: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub deposits: BucketSummary,
    pub withdrawals: BucketSummary,
    pub extremes: Extremes,
}

/// Summarize already-parsed entries. `None` if a total overflows.
pub fn summarize<'a>(
    entries: impl IntoIterator<Item = &'a SummaryEntry>,
) -> Option<SummaryReport> {
    entries
        .into_iter()
        .try_fold(SummaryAccumulator::default(), SummaryAccumulator::push)
        .map(SummaryAccumulator::finish)
}

/// Parse every row of a headerless statement file and fold it into `init`.
///
/// `step` returning `None` is reported as an overflow at that row. The first
/// failing row aborts the scan.
pub(crate) fn scan_statement<A>(
    path: &Path,
    init: A,
    mut step: impl FnMut(A, &SummaryEntry) -> Option<A>,
) -> Result<A, StatementError> {
    open_statement(path, HeaderRow::Absent)?.try_fold(init, |acc, numbered| {
        let NumberedRow { line, row } = numbered?;
        let entry = SummaryEntry::parse(path, line, &row)?;
        step(acc, &entry).ok_or_else(|| StatementError::AmountOverflow {
            path: path.to_path_buf(),
            line,
        })
    })
}

/// Stream a headerless statement file and summarize it.
///
/// The first row that fails to parse aborts the scan; no partial report is
/// produced.
pub fn summarize_statement(path: impl AsRef<Path>) -> Result<SummaryReport, StatementError> {
    let path = path.as_ref();
    let report =
        scan_statement(path, SummaryAccumulator::default(), SummaryAccumulator::push)?.finish();

    info!(
        "{}: {} transactions, {} deposits, {} withdrawals",
        path.display(),
        report.transactions,
        report.deposits.count,
        report.withdrawals.count
    );
    Ok(report)
}
