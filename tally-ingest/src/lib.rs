//! tally-ingest: statement row types, date normalization, and the CSV statement reader.

pub mod error;
pub mod normalize;
pub mod parsers;
pub mod types;

pub use error::StatementError;
pub use normalize::normalize_date;
pub use parsers::capital_one_csv::{HeaderRow, NumberedRow, StatementRows, open_statement};
pub use types::{STATEMENT_FIELDS, StatementRow};
