//! Money text helpers
//!
//! Amounts may carry a currency sign and thousands separators: `$1,250.50`, `€3`, `1500`.
//! Only the number is kept; no currency conversion happens.

use crate::history::ast::Amount;
use once_cell::sync::Lazy;
use regex::Regex;

/// Regex fragment matching one amount as written in hand histories
pub const AMOUNT_PATTERN: &str = r"[$€£]?\d[\d,]*(?:\.\d+)?";

static AMOUNT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(AMOUNT_PATTERN).unwrap());

/// Read an amount, ignoring currency signs and thousands separators
pub fn parse_amount(text: &str) -> Option<Amount> {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Every amount found in a piece of text, in order
pub fn find_amounts(text: &str) -> Vec<Amount> {
    AMOUNT_REGEX
        .find_iter(text)
        .filter_map(|m| parse_amount(m.as_str()))
        .collect()
}

/// Small and big blind from a stakes string such as `$1/$2 USD` or `100/200`
pub fn blinds_from_stakes(stakes: &str) -> Option<(Amount, Amount)> {
    let mut parts = stakes.split('/');
    let small = parts.next().and_then(|p| find_amounts(p).into_iter().next())?;
    let big = parts.next().and_then(|p| find_amounts(p).into_iter().next())?;
    Some((small, big))
}

/// Round to whole cents, hiding float noise from summed amounts
pub fn round_cents(amount: Amount) -> Amount {
    (amount * 100.0).round() / 100.0
}

/// Whether two amounts are equal within `tolerance`
pub fn approx_eq(a: Amount, b: Amount, tolerance: Amount) -> bool {
    (a - b).abs() <= tolerance + 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$200"), Some(200.0));
        assert_eq!(parse_amount("$1,250.50"), Some(1250.5));
        assert_eq!(parse_amount("€0.05"), Some(0.05));
        assert_eq!(parse_amount("1500"), Some(1500.0));
        assert_eq!(parse_amount("$"), None);
        assert_eq!(parse_amount("1.2.3"), None);
    }

    #[test]
    fn test_find_amounts() {
        assert_eq!(
            find_amounts("Total pot $230 Main pot $148. Side pot $80."),
            vec![230.0, 148.0, 80.0]
        );
    }

    #[test]
    fn test_blinds_from_stakes() {
        assert_eq!(blinds_from_stakes("$1/$2 USD"), Some((1.0, 2.0)));
        assert_eq!(blinds_from_stakes("100/200"), Some((100.0, 200.0)));
        assert_eq!(blinds_from_stakes("$0.05/$0.10"), Some((0.05, 0.1)));
        assert_eq!(blinds_from_stakes("Freeroll"), None);
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(0.25 + 0.05 + 0.25, 0.55, 0.01));
        assert!(approx_eq(100.0, 100.01, 0.01));
        assert!(!approx_eq(100.0, 100.02, 0.01));
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
        assert_eq!(round_cents(1600.0), 1600.0);
    }
}
