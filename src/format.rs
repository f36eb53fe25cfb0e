use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Symbol for the tracker's single fixed currency (INR).
const CURRENCY_SYMBOL: &str = "₹";

/// Format an amount with thousand separators, keeping exactly the fractional
/// digits the decimal carries. e.g. `1234567.89` → `"₹1,234,567.89"`,
/// `1000` → `"₹1,000"`.
pub(crate) fn format_currency(val: Decimal) -> String {
    let formatted = val.abs().to_string();
    let mut parts = formatted.splitn(2, '.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next();

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let mut out = String::new();
    if val < Decimal::ZERO {
        out.push('-');
    }
    out.push_str(CURRENCY_SYMBOL);
    out.push_str(&with_commas);
    if let Some(frac) = dec_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Long display form for transaction lists, e.g. "Jan 15, 2024".
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Short form for trend labels, e.g. "Jan 15".
pub(crate) fn format_day(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Shorten a label to fit a `max`-character column, replacing the tail with
/// "…" (which counts as one of the `max`) when it overflows. Works on chars,
/// not bytes, so multi-byte text is never split mid-character.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
