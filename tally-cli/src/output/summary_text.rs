use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_finance::{DatedAmount, SummaryReport, format_average, format_total};

const NOT_AVAILABLE: &str = "n/a";

/// Human-readable summary report.
pub fn render(report: &SummaryReport) -> String {
    TextReport(report).to_string()
}

struct TextReport<'a>(&'a SummaryReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f)?;
        writeln!(
            f,
            "{} statements from {} to {}",
            report.transactions,
            date_or_na(report.start_date),
            date_or_na(report.end_date)
        )?;

        writeln!(f, "Breakdown:")?;
        writeln!(
            f,
            "\t{} deposits for a total of {} USD  ({} per deposit)",
            report.deposits.count,
            format_total(report.deposits.total),
            average_or_na(report.deposits.average)
        )?;
        writeln!(
            f,
            "\t{} withdrawals for a total of {} USD  ({} per withdrawal)",
            report.withdrawals.count,
            format_total(report.withdrawals.total),
            average_or_na(report.withdrawals.average)
        )?;

        let extremes = &report.extremes;
        writeln!(f, "Extremes:")?;
        for (label, value) in [
            ("largest deposit", extremes.largest_deposit),
            ("largest withdrawal", extremes.largest_withdrawal),
            ("highest balance", extremes.highest_balance),
            ("lowest balance", extremes.lowest_balance),
        ] {
            writeln!(f, "\t{label:<18}  {}", dated_or_na(value))?;
        }
        Ok(())
    }
}

fn date_or_na(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn average_or_na(average: Option<Decimal>) -> String {
    match average {
        Some(average) => format!("{} USD", format_average(average)),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn dated_or_na(value: Option<DatedAmount>) -> String {
    match value {
        Some(DatedAmount { amount, date }) => format!("{} USD on {date}", format_total(amount)),
        None => NOT_AVAILABLE.to_string(),
    }
}
