//! Parsing of coefficient and x-value fields.
//!
//! Fields accept plain decimal notation (`2`, `-1.5`, `1e3`) or a two-term
//! fraction `p/q` where both terms are decimals and `q != 0`.

use thiserror::Error;

/// Why a field could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The field is empty or only whitespace.
    #[error("value is empty")]
    Empty,
    /// The text is neither a decimal nor a `p/q` fraction.
    #[error("`{0}` is not a decimal number or a fraction p/q")]
    Malformed(String),
    /// A fraction with a zero denominator.
    #[error("fraction has a zero denominator")]
    ZeroDenominator,
    /// The value overflows or spells out infinity/NaN.
    #[error("value is not a finite number")]
    NonFinite,
}

/// Parse a decimal or a `p/q` fraction into a finite `f64`.
pub fn parse_number(text: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let value = match text.split_once('/') {
        Some((numerator, denominator)) => {
            if denominator.contains('/') {
                return Err(ParseError::Malformed(text.to_owned()));
            }
            let numerator = parse_decimal(numerator.trim(), text)?;
            let denominator = parse_decimal(denominator.trim(), text)?;
            if denominator == 0.0 {
                return Err(ParseError::ZeroDenominator);
            }
            numerator / denominator
        }
        None => parse_decimal(text, text)?,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::NonFinite)
    }
}

fn parse_decimal(term: &str, whole: &str) -> Result<f64, ParseError> {
    // `f64::from_str` also accepts "inf" and "NaN"; only an exponent letter is allowed here.
    if term.is_empty() || term.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return Err(ParseError::Malformed(whole.to_owned()));
    }
    let value: f64 = term
        .parse()
        .map_err(|_| ParseError::Malformed(whole.to_owned()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::NonFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimals() {
        assert_eq!(parse_number("2"), Ok(2.0));
        assert_eq!(parse_number("-1.5"), Ok(-1.5));
        assert_eq!(parse_number("  0.25 "), Ok(0.25));
        assert_eq!(parse_number("1e2"), Ok(100.0));
    }

    #[test]
    fn parses_fractions() {
        assert_eq!(parse_number("1/2"), Ok(0.5));
        assert_eq!(parse_number("-3/4"), Ok(-0.75));
        assert_eq!(parse_number("3 / -6"), Ok(-0.5));
        assert_eq!(parse_number("1.5/3"), Ok(0.5));
    }

    #[test]
    fn rejects_zero_denominator() {
        assert_eq!(parse_number("1/0"), Err(ParseError::ZeroDenominator));
        assert_eq!(parse_number("1/0.0"), Err(ParseError::ZeroDenominator));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_number(""), Err(ParseError::Empty));
        assert_eq!(parse_number("   "), Err(ParseError::Empty));
        assert!(matches!(parse_number("abc"), Err(ParseError::Malformed(_))));
        assert!(matches!(parse_number("1/2/3"), Err(ParseError::Malformed(_))));
        assert!(matches!(parse_number("/2"), Err(ParseError::Malformed(_))));
        assert!(matches!(parse_number("2/"), Err(ParseError::Malformed(_))));
        assert!(matches!(parse_number("3abc"), Err(ParseError::Malformed(_))));
        assert!(matches!(parse_number("inf"), Err(ParseError::Malformed(_))));
        assert!(matches!(parse_number("NaN"), Err(ParseError::Malformed(_))));
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(parse_number("1e400"), Err(ParseError::NonFinite));
        assert_eq!(parse_number("1e300/1e-300"), Err(ParseError::NonFinite));
    }
}
