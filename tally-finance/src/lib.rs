//! tally-finance: statement merging, summary statistics, daily rollups, and money formatting

pub mod daily;
pub mod merge;
pub mod money;
pub mod summary;

pub use daily::{DailyRollup, DailyTotal, rollup, rollup_statement};
pub use merge::{MergeStats, MergedStatements, merge_statements};
pub use money::{format_average, format_total};
pub use summary::{
    DatedAmount, SummaryAccumulator, SummaryEntry, SummaryReport, summarize, summarize_statement,
};
