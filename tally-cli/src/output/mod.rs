pub mod daily_dat;
pub mod json;
pub mod summary_text;

#[derive(Debug, Clone, Copy, Eq, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Report as JSON
    Json,
    /// Per-day `date net balance` lines for gnuplot
    Dat,
}
