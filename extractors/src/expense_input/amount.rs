use regex::Regex;
use rust_decimal::Decimal;
use shared_types::AmountError;
use std::str::FromStr;
use std::sync::OnceLock;

/// Amount token at the head of an expense message: digits, then optionally one
/// `.` or `,` followed by one or two fractional digits.
fn leading_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(?:[.,]\d{1,2})?").expect("invalid amount regex"))
}

/// Shapes accepted by `parse_amount` once commas are turned into dots.
fn numeric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("invalid numeric regex")
    })
}

/// Leading amount found in a message, with the byte offset just past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountToken {
    pub value: Decimal,
    pub end: usize,
}

/// Parse a standalone amount string into a strictly positive decimal.
///
/// A comma is read as a decimal separator. `.50`, `10.` and exponent forms such as
/// `1e2` are accepted; thousands separators, embedded letters, symbols and spaces are not.
pub fn parse_amount(raw: &str) -> Result<Decimal, AmountError> {
    if raw.is_empty() {
        return Err(AmountError::Empty);
    }

    let normalized = raw.replace(',', ".");
    if !numeric_re().is_match(&normalized) {
        return Err(AmountError::Unparseable(raw.to_string()));
    }

    let (mantissa, exponent) = match normalized.find(['e', 'E']) {
        Some(idx) => (&normalized[..idx], Some(&normalized[idx + 1..])),
        None => (normalized.as_str(), None),
    };

    let mantissa = canonical_mantissa(mantissa);
    let value = match exponent {
        Some(exp) => Decimal::from_scientific(&format!("{}e{}", mantissa, exp)),
        None => Decimal::from_str(&mantissa),
    }
    .map_err(|_| AmountError::Unparseable(raw.to_string()))?;

    if value.is_zero() {
        return Err(AmountError::NonPositive(Decimal::ZERO));
    }
    if value.is_sign_negative() {
        return Err(AmountError::NonPositive(value));
    }

    Ok(value)
}

/// Spell out the implied zero of `.50` and drop the dangling dot of `10.`.
fn canonical_mantissa(mantissa: &str) -> String {
    let (sign, digits) = match mantissa.strip_prefix(['+', '-']) {
        Some(rest) => (&mantissa[..1], rest),
        None => ("", mantissa),
    };
    let digits = digits.strip_suffix('.').unwrap_or(digits);
    let sign = if sign == "+" { "" } else { sign };

    if digits.starts_with('.') {
        format!("{}0{}", sign, digits)
    } else {
        format!("{}{}", sign, digits)
    }
}

/// Find the amount token at the very start of `text`.
///
/// Only the token shape is checked here; what may follow it is decided by the caller.
pub fn extract_leading_amount(text: &str) -> Option<AmountToken> {
    let m = leading_amount_re().find(text)?;
    let value = parse_amount(m.as_str()).ok()?;
    Some(AmountToken {
        value,
        end: m.end(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount_decimal_separators() {
        assert_eq!(parse_amount("25,50").unwrap(), dec!(25.50));
        assert_eq!(parse_amount("25.50").unwrap(), dec!(25.50));
        assert_eq!(parse_amount("7").unwrap(), dec!(7));
    }

    #[test]
    fn test_parse_amount_library_forms() {
        assert_eq!(parse_amount(".50").unwrap(), dec!(0.50));
        assert_eq!(parse_amount("10.").unwrap(), dec!(10));
        assert_eq!(parse_amount("1e2").unwrap(), dec!(100));
        assert_eq!(parse_amount("+3").unwrap(), dec!(3));
    }

    #[test]
    fn test_parse_amount_rejects_non_positive() {
        assert_eq!(parse_amount("0"), Err(AmountError::NonPositive(Decimal::ZERO)));
        assert_eq!(parse_amount("0.00"), Err(AmountError::NonPositive(Decimal::ZERO)));
        assert_eq!(parse_amount("-0"), Err(AmountError::NonPositive(Decimal::ZERO)));
        assert!(matches!(
            parse_amount("-5"),
            Err(AmountError::NonPositive(_))
        ));
    }

    #[test]
    fn test_parse_amount_rejects_malformed() {
        assert_eq!(parse_amount(""), Err(AmountError::Empty));
        for raw in [
            "1,234.56", "1.2.3", "10abc", "$10", "1 0", ".", "abc", "1e", "e5", "12€",
        ] {
            assert!(
                matches!(parse_amount(raw), Err(AmountError::Unparseable(_))),
                "{raw} should be unparseable"
            );
        }
    }

    #[test]
    fn test_extract_leading_amount() {
        let token = extract_leading_amount("12.5 lunch").unwrap();
        assert_eq!(token.value, dec!(12.5));
        assert_eq!(token.end, 4);

        let token = extract_leading_amount("6.80$ SGD").unwrap();
        assert_eq!(token.value, dec!(6.80));
        assert_eq!(token.end, 4);

        assert!(extract_leading_amount("lunch 12").is_none());
        assert!(extract_leading_amount("0 lunch").is_none());
        assert!(extract_leading_amount("0.00").is_none());
    }
}
