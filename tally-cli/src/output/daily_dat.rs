use std::fmt;

use tally_finance::DailyRollup;

/// gnuplot's marker for a missing value.
const MISSING: &str = "NaN";

/// Per-day rollup as whitespace-separated `date net balance` lines.
pub fn render(rollup: &DailyRollup) -> String {
    DatFile(rollup).to_string()
}

struct DatFile<'a>(&'a DailyRollup);

impl fmt::Display for DatFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.0.days() {
            match day.balance {
                Some(balance) => writeln!(f, "{} {} {}", day.date, day.net, balance)?,
                None => writeln!(f, "{} {} {MISSING}", day.date, day.net)?,
            }
        }
        Ok(())
    }
}
