//! Innkeeper Money Text
//! Copyright (c) 2026 Mamy Ratsimbazafy
//! Licensed and distributed under either of
//!   * MIT license (license terms at the root of the package or at http://opensource.org/licenses/MIT).
//!   * Apache v2 license (license terms at the root of the package or at http://www.apache.org/licenses/LICENSE-2.0).
//! at your option. This file may not be copied, modified, or distributed except according to those terms.

//! innkeeper-internals/money-text
//! Currency amounts as they appear on rendered pages: lenient extraction, strict parsing,
//! and formatting back to display text.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Tolerance used when comparing a computed amount with one read back from a page (0.01).
pub const PRICE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Custom error for strict amount parsing
#[derive(Debug, Clone, Error)]
pub enum MoneyTextError {
    #[error("no digits in {0:?}")]
    NoDigits(String),
    #[error("malformed amount {cleaned:?} extracted from {input:?}")]
    Malformed { input: String, cleaned: String },
}

/// Keep digits and `.`; `,` thousands separators go with everything else.
fn clean_amount_text(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    // "Total: £340." keeps the sentence full stop
    kept.trim_end_matches('.').to_string()
}

/// Parse a currency display string into a decimal amount.
///
/// Currency symbols, unit words and whitespace are ignored. Fails when nothing
/// numeric is left or when what is left is not a single decimal number.
///
/// ```
/// use innkeeper_money_text::parse_amount;
/// assert_eq!(parse_amount("£1,234.50").unwrap().to_string(), "1234.50");
/// assert!(parse_amount("n/a").is_err());
/// ```
pub fn parse_amount(text: &str) -> Result<Decimal, MoneyTextError> {
    let cleaned = clean_amount_text(text);
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Err(MoneyTextError::NoDigits(text.to_string()));
    }
    Decimal::from_str(&cleaned).map_err(|_| MoneyTextError::Malformed {
        input: text.to_string(),
        cleaned,
    })
}

/// Lenient variant of [`parse_amount`]: anything that cannot be read is zero.
///
/// Callers treat zero as "could not extract".
pub fn extract_amount(text: &str) -> Decimal {
    match parse_amount(text) {
        Ok(amount) => amount,
        Err(e) => {
            tracing::debug!("Could not extract amount: {}", e);
            Decimal::ZERO
        }
    }
}

/// Render an amount as the booking pages show it, e.g. `£1,234.50`.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let mut abs = amount.round_dp(2).abs();
    abs.rescale(2);
    let negative = amount.round_dp(2).is_sign_negative() && !abs.is_zero();

    let digits = abs.to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((&digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        symbol,
        grouped,
        frac_part
    )
}

/// `|a - b| <= tolerance`. Amounts too far apart to subtract never match.
pub fn within_tolerance(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    a.checked_sub(b).is_some_and(|diff| diff.abs() <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn tolerance_is_one_cent() {
        assert_eq!(PRICE_TOLERANCE, d("0.01"));
    }

    #[test]
    fn parses_symbols_and_separators() {
        assert_eq!(parse_amount("£1,234.50").unwrap(), d("1234.50"));
        assert_eq!(parse_amount("  $99 per night ").unwrap(), d("99"));
        assert_eq!(parse_amount("Total: €340.").unwrap(), d("340"));
        assert_eq!(parse_amount("1,000,000").unwrap(), d("1000000"));
    }

    #[test]
    fn rejects_text_without_digits() {
        assert!(matches!(parse_amount(""), Err(MoneyTextError::NoDigits(_))));
        assert!(matches!(parse_amount("abc"), Err(MoneyTextError::NoDigits(_))));
        assert!(matches!(parse_amount("..."), Err(MoneyTextError::NoDigits(_))));
    }

    #[test]
    fn rejects_several_numbers_glued_together() {
        assert!(matches!(
            parse_amount("1.2.3"),
            Err(MoneyTextError::Malformed { .. })
        ));
    }

    #[test]
    fn extract_falls_back_to_zero() {
        assert_eq!(extract_amount(""), Decimal::ZERO);
        assert_eq!(extract_amount("abc"), Decimal::ZERO);
        assert_eq!(extract_amount("v1.2.3"), Decimal::ZERO);
        assert_eq!(extract_amount("£25"), d("25"));
    }

    #[test]
    fn formats_like_the_booking_page() {
        assert_eq!(format_amount(d("1234.5"), "£"), "£1,234.50");
        assert_eq!(format_amount(d("240"), "£"), "£240.00");
        assert_eq!(format_amount(d("999.999"), "$"), "$1,000.00");
        assert_eq!(format_amount(d("0"), "€"), "€0.00");
        assert_eq!(format_amount(d("-15"), "£"), "-£15.00");
        assert_eq!(format_amount(d("1234567.8"), ""), "1,234,567.80");
    }

    #[test]
    fn far_apart_amounts_do_not_match() {
        assert!(!within_tolerance(Decimal::MAX, Decimal::MIN, PRICE_TOLERANCE));
        assert!(within_tolerance(Decimal::MAX, Decimal::MAX, PRICE_TOLERANCE));
    }

    #[test]
    fn format_then_extract_stays_within_tolerance() {
        for raw in ["0.004", "1", "12.345", "1000", "98765.43", "1234567.891"] {
            let amount = d(raw);
            let back = extract_amount(&format_amount(amount, "£"));
            assert!(
                within_tolerance(amount, back, PRICE_TOLERANCE),
                "{} -> {}",
                amount,
                back
            );
        }
    }
}
