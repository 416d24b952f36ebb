// src/core/sanitize.rs

use std::sync::LazyLock;

use regex::Regex;

// digits, a point, exactly two digits
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\d{2}").unwrap());

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// First `\d+\.\d{2}` in `s`, skipping any currency symbol or mis-decoded
/// prefix in front of it (`£51.77`, `Â£51.77`).
///
/// Known limitation: a single fixed pattern. Comma decimals (`51,77`) and
/// thousands separators (`1,051.77`) are not understood.
pub fn price_digits(s: &str) -> Option<&str> {
    PRICE_RE.find(s).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_and_trims() {
        assert_eq!(normalize_ws("  A \n\t Light   in the Attic "), "A Light in the Attic");
        assert_eq!(normalize_ws(""), "");
    }

    #[test]
    fn price_digits_skips_currency_artifacts() {
        assert_eq!(price_digits("£51.77"), Some("51.77"));
        assert_eq!(price_digits("Â£51.77"), Some("51.77"));
        assert_eq!(price_digits("  £0.99 incl. tax"), Some("0.99"));
    }

    #[test]
    fn price_digits_takes_first_two_decimals_only() {
        assert_eq!(price_digits("£12.345"), Some("12.34"));
        assert_eq!(price_digits("£3.5 / £4.00"), Some("4.00"));
    }

    #[test]
    fn price_digits_rejects_non_matching() {
        assert_eq!(price_digits("£12"), None);
        assert_eq!(price_digits("free"), None);
        assert_eq!(price_digits("12,50"), None);
    }
}
