//! Per-day rollup of a merged statement.
//!
//! Transactions on the same date are netted into one line, and the balance is
//! the first one seen that day. Written as `date net balance` lines, it is a
//! gnuplot data file of the account over time.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_ingest::StatementError;

use crate::summary::{SummaryEntry, scan_statement};

/// Net movement and balance for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub net: Decimal,
    pub transactions: usize,
    /// First parsable balance seen for the day, in file order.
    pub balance: Option<Decimal>,
}

/// Days in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyRollup {
    days: BTreeMap<NaiveDate, DailyTotal>,
}

impl DailyRollup {
    /// Fold one entry in. Returns `None` if the day's net overflows.
    pub fn push(mut self, entry: &SummaryEntry) -> Option<Self> {
        let day = self.days.entry(entry.date).or_insert(DailyTotal {
            date: entry.date,
            net: Decimal::ZERO,
            transactions: 0,
            balance: None,
        });
        day.net = day.net.checked_add(entry.amount)?;
        day.transactions += 1;
        day.balance = day.balance.or(entry.balance);
        Some(self)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyTotal> {
        self.days.get(&date)
    }

    pub fn days(&self) -> impl Iterator<Item = &DailyTotal> {
        self.days.values()
    }
}

/// Roll up already-parsed entries by day. `None` if a day's net overflows.
pub fn rollup<'a>(entries: impl IntoIterator<Item = &'a SummaryEntry>) -> Option<DailyRollup> {
    entries
        .into_iter()
        .try_fold(DailyRollup::default(), DailyRollup::push)
}

/// Stream a headerless statement file and roll it up by day.
///
/// Rows are validated exactly as for the summary.
pub fn rollup_statement(path: impl AsRef<Path>) -> Result<DailyRollup, StatementError> {
    let path = path.as_ref();
    let rollup = scan_statement(path, DailyRollup::default(), DailyRollup::push)?;
    info!("{}: {} distinct days", path.display(), rollup.len());
    Ok(rollup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entry(day: u32, amount: &str, balance: Option<&str>) -> SummaryEntry {
        SummaryEntry {
            date: NaiveDate::from_ymd_opt(2020, 5, day).unwrap(),
            amount: dec(amount),
            balance: balance.map(dec),
        }
    }

    #[test]
    fn test_same_day_amounts_are_summed() {
        let days = rollup(&[
            entry(10, "-30", Some("270")),
            entry(20, "50", Some("320")),
            entry(10, "-100", Some("300")),
        ])
        .unwrap();

        assert_eq!(days.len(), 2);
        let may_10 = days.get(NaiveDate::from_ymd_opt(2020, 5, 10).unwrap()).unwrap();
        assert_eq!(may_10.net, dec("-130"));
        assert_eq!(may_10.transactions, 2);
    }

    #[test]
    fn test_first_balance_of_the_day_is_kept() {
        let days = rollup(&[
            entry(10, "-30", Some("270")),
            entry(10, "-100", Some("300")),
        ])
        .unwrap();
        let may_10 = days.days().next().unwrap();
        assert_eq!(may_10.balance, Some(dec("270")));

        // An unparsable first balance falls through to the next one.
        let days = rollup(&[entry(10, "-30", None), entry(10, "-100", Some("300"))]).unwrap();
        assert_eq!(days.days().next().unwrap().balance, Some(dec("300")));
    }

    #[test]
    fn test_days_are_in_date_order() {
        let days = rollup(&[
            entry(20, "50", Some("320")),
            entry(1, "5", Some("5")),
            entry(10, "-30", Some("270")),
        ])
        .unwrap();
        let dates: Vec<u32> = days
            .days()
            .map(|d| chrono::Datelike::day(&d.date))
            .collect();
        assert_eq!(dates, [1, 10, 20]);
    }

    #[test]
    fn test_net_overflow_is_reported() {
        let huge = SummaryEntry {
            date: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
            amount: Decimal::MAX,
            balance: None,
        };
        assert!(rollup(&[huge.clone(), huge]).is_none());
    }
}
