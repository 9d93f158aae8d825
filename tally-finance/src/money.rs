//! Text rendering for USD amounts in the summary report.

use rust_decimal::Decimal;

/// Render a running total.
///
/// Whole amounts drop their fractional part, other amounts drop trailing
/// zeros, and the integer part is grouped with commas:
/// `1234.50` -> `1,234.5`, `-20.00` -> `-20`.
pub fn format_total(amount: Decimal) -> String {
    group_thousands(&amount.normalize().to_string())
}

/// Render an average, always with two decimal places.
pub fn format_average(average: Decimal) -> String {
    format!("{average:.2}")
}

fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(plain.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
