use anyhow::{Context, Result};
use tally_finance::SummaryReport;

/// Pretty JSON for a summary report. Amounts are strings, missing values `null`.
pub fn render_summary(report: &SummaryReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serializing summary report")
}
