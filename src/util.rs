// Utility helpers for parsing and number formatting.
//
// Census cells arrive as text with thousands separators, stray spaces,
// decimal artefacts or nothing at all. Everything that turns a cell into a
// number lives here so the rest of the code only sees typed values.
use num_format::{Locale, ToFormattedString};

/// Parse a count-like cell into `i64`, forgiving common export quirks.
///
/// - Trims whitespace and strips thousands separators (`","`).
/// - Accepts integral text directly, otherwise a finite float truncated
///   toward zero (`"1200.0"` -> 1200).
/// - Returns `None` for empty or non-numeric text, and for floats that do
///   not fit in `i64` (`"1e30"`).
pub fn parse_count_safe(s: Option<&str>) -> Option<i64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.replace(',', "");
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    match s.parse::<f64>().map(f64::trunc) {
        Ok(v) if (i64::MIN as f64..i64::MAX as f64).contains(&v) => Some(v as i64),
        _ => None,
    }
}

/// Same as [`parse_count_safe`] but collapses "absent", "non-numeric" and
/// "zero" into a plain 0.
pub fn count_or_zero(s: Option<&str>) -> i64 {
    parse_count_safe(s).unwrap_or(0)
}

/// Non-negative view of a parsed count.
pub fn non_negative(v: i64) -> u64 {
    u64::try_from(v).unwrap_or(0)
}

/// Share of `part` in `whole` as a percentage; 0 when `whole` is 0.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale-aware thousands separators
    // (e.g. `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
