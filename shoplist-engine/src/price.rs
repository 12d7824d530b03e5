//! Lexical price parsing.
//!
//! Prices on the host page are free text ("1,500 gp", "Varies", "Value: 250").
//! Sorting only needs a comparable number, so the first numeric token wins and
//! anything without digits counts as zero. No currency conversion happens here.

use std::sync::OnceLock;

use regex::Regex;

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("price pattern is valid"))
}

/// Parse the first integer or decimal number out of a price string.
///
/// Thousands separators are stripped before matching. Returns `0.0` when the
/// text is empty or carries no digits.
#[must_use]
pub fn parse_price(text: &str) -> f64 {
    let cleaned = text.replace(',', "");
    number_pattern()
        .find(&cleaned)
        .and_then(|token| token.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Drop a leading `Label:` prefix from a price cell's text.
#[must_use]
pub fn strip_price_label(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.split_once(':') {
        Some((label, value)) if !label.chars().any(|c| c.is_ascii_digit()) => value.trim(),
        _ => trimmed,
    }
}

/// Render `value` with the `Label:` prefix that `original` carries, so an
/// override reads like the host's own text. Values that already carry a
/// label are returned unchanged.
#[must_use]
pub fn with_price_label(original: &str, value: &str) -> String {
    let value = value.trim();
    match original.trim().split_once(':') {
        Some((label, _))
            if !label.chars().any(|c| c.is_ascii_digit()) && strip_price_label(value) == value =>
        {
            format!("{}: {value}", label.trim())
        }
        _ => value.to_string(),
    }
}
