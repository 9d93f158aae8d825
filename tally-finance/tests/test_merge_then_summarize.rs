use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_finance::{format_total, merge_statements, rollup_statement, summarize_statement};
use tally_ingest::StatementError;
use tempfile::TempDir;

const HEADER: &str = "Account Number,Transaction Date,Transaction Amount,Transaction Type,Transaction Description,Balance";

fn write_statement(dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    path
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// An older export (MM/DD/YY) overlapping a newer one (YYYY-MM-DD).
fn overlapping_exports(dir: &TempDir) -> (PathBuf, PathBuf) {
    let old = write_statement(
        dir,
        "december.csv",
        &[
            HEADER,
            "0546,12/30/21,1500.00,Credit,PAYROLL ACME INC,2100.00",
            "0546,12/31/21,-42.10,Debit,H-E-B #455,2057.90",
            "0546,01/02/22,-4.50,Debit,COFFEE,2053.40",
        ],
    );
    let new = write_statement(
        dir,
        "january.csv",
        &[
            HEADER,
            "0546,2022-01-02,-4.50,Debit,COFFEE,2053.40",
            "0546,2022-01-02,-4.50,Debit,COFFEE,2048.90",
            "0546,2022-01-05,0.00,Debit,CARD CHECK,2048.90",
        ],
    );
    (old, new)
}

#[test]
fn test_merge_collapses_overlap() {
    let dir = TempDir::new().unwrap();
    let (old, new) = overlapping_exports(&dir);

    let (merged, stats) = merge_statements(&old, &new).unwrap();

    assert_eq!(stats.rows_read, [3, 3]);
    assert_eq!(stats.distinct, 5);
    assert_eq!(stats.duplicates(), 1);
    assert!(merged.contains("0546,2022-01-02,-4.50,Debit,COFFEE,2053.40"));
    assert!(merged.contains("0546,2022-01-02,-4.50,Debit,COFFEE,2048.90"));
    assert!(merged.iter().all(|line| !line.contains('/')));
}

#[test]
fn test_merge_with_itself_is_distinct_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_statement(
        &dir,
        "dupes.csv",
        &[
            HEADER,
            "0546,01/02/22,-4.50,Debit,COFFEE,10.00",
            "0546,2022-01-02,-4.50,Debit,COFFEE,10.00",
            "0546,01/03/22,20.00,Credit,REFUND,30.00",
        ],
    );

    let (merged, stats) = merge_statements(&path, &path).unwrap();
    assert_eq!(stats.rows_read, [3, 3]);
    assert_eq!(merged.len(), 2);
}

#[test]
fn test_merge_fails_on_short_row() {
    let dir = TempDir::new().unwrap();
    let good = write_statement(&dir, "good.csv", &[HEADER, "0546,01/02/22,1.00,Credit,X,1.00"]);
    let bad = write_statement(&dir, "bad.csv", &[HEADER, "0546,01/02/22,1.00"]);

    let err = merge_statements(&good, &bad).unwrap_err();
    assert!(matches!(err, StatementError::TooFewFields { line: 2, found: 3, .. }));
}

#[test]
fn test_merge_fails_on_missing_file() {
    let dir = TempDir::new().unwrap();
    let good = write_statement(&dir, "good.csv", &[HEADER]);
    let err = merge_statements(&good, dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, StatementError::Open { .. }));
}

#[test]
fn test_summarize_merged_output() {
    let dir = TempDir::new().unwrap();
    let (old, new) = overlapping_exports(&dir);
    let (merged, _) = merge_statements(&old, &new).unwrap();

    let lines: Vec<String> = merged.into_sorted();
    let merged_path = write_statement(
        &dir,
        "merged.csv",
        &lines.iter().map(String::as_str).collect::<Vec<_>>(),
    );

    let report = summarize_statement(&merged_path).unwrap();
    assert_eq!(report.transactions, 5);
    assert_eq!(report.start_date, NaiveDate::from_ymd_opt(2021, 12, 30));
    assert_eq!(report.end_date, NaiveDate::from_ymd_opt(2022, 1, 5));

    assert_eq!(report.deposits.count, 1);
    assert_eq!(format_total(report.deposits.total), "1,500");
    assert_eq!(report.deposits.average, Some(dec("1500.00")));

    // The 0.00 card check counts as a withdrawal.
    assert_eq!(report.withdrawals.count, 4);
    assert_eq!(format_total(report.withdrawals.total), "-51.1");
    assert_eq!(report.withdrawals.average.unwrap().to_string(), "-12.78");

    let lowest = report.extremes.lowest_balance.unwrap();
    assert_eq!(lowest.amount, dec("2048.90"));
}

#[test]
fn test_summarize_rejects_header_row() {
    let dir = TempDir::new().unwrap();
    let path = write_statement(
        &dir,
        "raw.csv",
        &[HEADER, "0546,2022-01-02,-4.50,Debit,COFFEE,10.00"],
    );

    let err = summarize_statement(&path).unwrap_err();
    assert!(matches!(err, StatementError::InvalidDate { line: 1, .. }));
    assert!(err.hint().unwrap().contains("tally merge"));
}

#[test]
fn test_summarize_rejects_unnormalized_dates() {
    let dir = TempDir::new().unwrap();
    let path = write_statement(
        &dir,
        "raw.csv",
        &[
            "0546,2022-01-02,-4.50,Debit,COFFEE,10.00",
            "0546,01/03/22,-4.50,Debit,COFFEE,5.50",
        ],
    );

    let err = summarize_statement(&path).unwrap_err();
    assert!(matches!(err, StatementError::InvalidDate { line: 2, .. }));
}

#[test]
fn test_summarize_report_serializes_decimals_as_strings() {
    let dir = TempDir::new().unwrap();
    let path = write_statement(
        &dir,
        "merged.csv",
        &[
            "A1,2022-01-02,100.00,DEP,Paycheck,500.00",
            "A1,2022-01-03,-20.00,WD,Coffee,480.00",
        ],
    );

    let report = summarize_statement(&path).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["transactions"], 2);
    assert_eq!(json["start_date"], "2022-01-02");
    assert_eq!(json["deposits"]["total"], "100.00");
    assert_eq!(json["withdrawals"]["average"], "-20.00");
    assert_eq!(json["extremes"]["highest_balance"]["date"], "2022-01-02");
}

#[test]
fn test_merge_skips_blank_lines() {
    let dir = TempDir::new().unwrap();
    let with_gap = write_statement(
        &dir,
        "gap.csv",
        &[
            HEADER,
            "0546,01/02/22,-4.50,Debit,COFFEE,10.00",
            "",
            "0546,01/03/22,20.00,Credit,REFUND,30.00",
        ],
    );
    let other = write_statement(&dir, "other.csv", &[HEADER]);

    let (merged, stats) = merge_statements(&with_gap, &other).unwrap();
    assert_eq!(stats.rows_read, [2, 0]);
    assert_eq!(merged.len(), 2);
    assert!(merged.contains("0546,2022-01-03,20.00,Credit,REFUND,30.00"));
}

#[test]
fn test_unpadded_merge_dates_fail_summary() {
    let dir = TempDir::new().unwrap();
    let old = write_statement(&dir, "old.csv", &[HEADER, "0546,1/2/22,-4.50,Debit,COFFEE,10.00"]);
    let empty = write_statement(&dir, "empty.csv", &[HEADER]);
    let (merged, _) = merge_statements(&old, &empty).unwrap();

    let lines = merged.into_sorted();
    assert_eq!(lines, ["0546,2022-1-2,-4.50,Debit,COFFEE,10.00"]);
    let merged_path = write_statement(&dir, "merged.csv", &[lines[0].as_str()]);

    let err = summarize_statement(&merged_path).unwrap_err();
    match err {
        StatementError::InvalidDate { line, value, .. } => {
            assert_eq!(line, 1);
            assert_eq!(value, "2022-1-2");
        }
        other => panic!("expected InvalidDate, got {other:?}"),
    }
}

#[test]
fn test_summarize_overflow_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_statement(
        &dir,
        "huge.csv",
        &[
            "A1,2022-01-02,79228162514264337593543950335,DEP,Typo,0",
            "A1,2022-01-03,79228162514264337593543950335,DEP,Typo,0",
        ],
    );

    let err = summarize_statement(&path).unwrap_err();
    assert!(matches!(err, StatementError::AmountOverflow { line: 2, .. }));
    assert!(err.hint().is_some());
}

#[test]
fn test_rollup_statement_groups_by_day() {
    let dir = TempDir::new().unwrap();
    let path = write_statement(
        &dir,
        "merged.csv",
        &[
            "0546,2020-09-20,50,Debit,Fake transaction 1,320",
            "0546,2020-05-10,-30,Debit,Fake transaction 1,270",
            "0546,2020-05-10,-100,Debit,Fake transaction 1,300",
        ],
    );

    let rollup = rollup_statement(&path).unwrap();
    let days: Vec<(String, String, Option<String>)> = rollup
        .days()
        .map(|d| (d.date.to_string(), d.net.to_string(), d.balance.map(|b| b.to_string())))
        .collect();
    assert_eq!(
        days,
        [
            ("2020-05-10".to_string(), "-130".to_string(), Some("270".to_string())),
            ("2020-09-20".to_string(), "50".to_string(), Some("320".to_string())),
        ]
    );
}
