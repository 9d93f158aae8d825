//! Transaction date normalization.
//!
//! Capital One CSV exports have shipped dates as `MM/DD/YY`, later ones as
//! `YYYY-MM-DD`. Both shapes show up when merging an old export with a new one.

/// Normalize a transaction date token.
///
/// A token with exactly three `/`-separated parts is read positionally as
/// `month/day/year` and reassembled as `20{year}-{month}-{day}`. The parts are
/// copied verbatim: no zero padding and no range checks, so `1/2/22` becomes
/// `2022-1-2` and `13/40/22` becomes `2022-13-40`.
///
/// Any other token is returned unchanged.
pub fn normalize_date(token: &str) -> String {
    let parts: Vec<&str> = token.split('/').collect();
    match parts.as_slice() {
        [month, day, year] => format!("20{year}-{month}-{day}"),
        _ => token.to_string(),
    }
}
