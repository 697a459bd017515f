use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,

    #[error("invalid number '{0}'")]
    Invalid(String),

    #[error("number '{0}' is out of range")]
    OutOfRange(String),
}

/// Convert a report amount into a decimal, falling back to zero.
///
/// Absent input, malformed numbers and out-of-range values all yield zero.
/// Magnitudes beyond `Decimal` (about 7.9e28) count as out of range.
/// Use [`parse_amount`] when the failure itself matters.
pub fn normalize(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };
    parse_amount(raw).unwrap_or(Decimal::ZERO)
}

/// Parse an amount written in Brazilian (or occasionally US) notation.
///
/// The role of each separator is inferred from the trailing digits:
/// - "1.234,56" -> 1234.56 (comma followed by 1-2 digits is the decimal mark)
/// - "1,234" -> 1234 (any other comma is a thousands separator)
/// - "1234.5" -> 1234.5 (period followed by 1-2 digits is the decimal mark)
/// - "12.345" -> 12345 (any other period is a thousands separator)
/// - "R$ 1.234,56" -> 1234.56
pub fn parse_amount(raw: &str) -> Result<Decimal, AmountError> {
    let canonical = canonicalize(raw);
    parse_decimal(&canonical).map(|d| d.normalize())
}

/// Rewrite an amount so that `.` is the only (decimal) separator.
fn canonicalize(raw: &str) -> String {
    let s: String = raw
        .trim()
        .replacen("R$", "", 1)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if s.contains(',') {
        if ends_with_short_fraction(&s, ',') {
            s.replace('.', "").replacen(',', ".", 1)
        } else {
            s.replace(',', "")
        }
    } else if s.contains('.') && !ends_with_short_fraction(&s, '.') {
        s.replace('.', "")
    } else {
        s
    }
}

/// True when `s` ends with `sep` followed by exactly one or two ASCII digits.
fn ends_with_short_fraction(s: &str, sep: char) -> bool {
    let bytes = s.as_bytes();
    let digits = bytes.iter().rev().take_while(|b| b.is_ascii_digit()).count();
    (1..=2).contains(&digits)
        && bytes.len() > digits
        && bytes[bytes.len() - digits - 1] == sep as u8
}

/// Parse `[+-]digits[.digits][e[+-]digits]`. Either side of the point may be
/// empty, but not both.
fn parse_decimal(s: &str) -> Result<Decimal, AmountError> {
    if s.is_empty() {
        return Err(AmountError::Empty);
    }
    let invalid = || AmountError::Invalid(s.to_string());

    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
        None => (s, None),
    };

    let negative = mantissa.starts_with('-');
    let unsigned = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let well_formed = !(int_part.is_empty() && frac_part.is_empty())
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    let sign = if negative { "-" } else { "" };
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let literal = if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    };

    match exponent {
        None => {
            Decimal::from_str(&literal).map_err(|_| AmountError::OutOfRange(s.to_string()))
        }
        Some(exp) => {
            let exp: i64 = exp.parse().map_err(|_| invalid())?;
            Decimal::from_scientific(&format!("{literal}e{exp}"))
                .map_err(|_| AmountError::OutOfRange(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_brazilian_decimal_comma() {
        assert_eq!(normalize(Some("1.234,56")), dec!(1234.56));
    }

    #[test]
    fn test_comma_as_thousands_separator() {
        assert_eq!(normalize(Some("1,234")), dec!(1234));
    }

    #[test]
    fn test_period_decimal() {
        assert_eq!(normalize(Some("1234.5")), dec!(1234.5));
    }

    #[test]
    fn test_period_as_thousands_separator() {
        assert_eq!(normalize(Some("12.345")), dec!(12345));
        assert_eq!(normalize(Some("1.234.567")), dec!(1234567));
    }

    #[test]
    fn test_absent_is_zero() {
        assert_eq!(normalize(None), Decimal::ZERO);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(normalize(Some("abc")), Decimal::ZERO);
        assert_eq!(normalize(Some("")), Decimal::ZERO);
        assert_eq!(normalize(Some("1_000")), Decimal::ZERO);
    }

    #[test]
    fn test_currency_marker_and_whitespace() {
        assert_eq!(normalize(Some("R$ 1.234,56")), dec!(1234.56));
        assert_eq!(normalize(Some("  R$1 234,5 ")), dec!(1234.5));
    }

    #[test]
    fn test_trailing_zeros_dropped() {
        let v = normalize(Some("100,00"));
        assert_eq!(v, dec!(100));
        assert_eq!(v.to_string(), "100");
    }

    #[test]
    fn test_only_first_comma_becomes_decimal_mark() {
        // "1,2,34" -> "1.2,34" which is not a number
        assert_eq!(
            parse_amount("1,2,34"),
            Err(AmountError::Invalid("1.2,34".into()))
        );
        assert_eq!(normalize(Some("1,2,34")), Decimal::ZERO);
    }

    #[test]
    fn test_ambiguous_period_kept_as_decimal() {
        // ends in ".56", so the periods are not stripped and the value is invalid
        assert_eq!(normalize(Some("1.234.56")), Decimal::ZERO);
    }

    #[test]
    fn test_partial_fractions() {
        assert_eq!(normalize(Some(",5")), dec!(0.5));
        assert_eq!(normalize(Some("5.")), dec!(5));
    }

    #[test]
    fn test_exponent() {
        assert_eq!(parse_amount("1e3"), Ok(dec!(1000)));
        assert_eq!(parse_amount("25e-2"), Ok(dec!(0.25)));
        assert!(parse_amount("1e").is_err());
    }

    #[test]
    fn test_out_of_range_is_zero() {
        let huge = "9".repeat(40);
        assert!(matches!(
            parse_amount(&huge),
            Err(AmountError::OutOfRange(_))
        ));
        assert_eq!(normalize(Some(&huge)), Decimal::ZERO);
    }

    #[test]
    fn test_empty_error() {
        assert_eq!(parse_amount("   "), Err(AmountError::Empty));
    }
}
