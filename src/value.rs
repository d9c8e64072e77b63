use std::fmt;

use rust_decimal::Decimal;

/// Significant digits (and fractional digits) a `Decimal` holds exactly.
const MAX_DIGITS: usize = 28;

/// Right-hand side of an ordering comparison (`<`, `<=`, `>`, `>=`).
///
/// Text that starts with a number is compared numerically, the same way a
/// float parse reads the leading numeric prefix and ignores the rest. Any
/// other text is kept as a string, as is a number with more than 28
/// significant or fractional digits.
///
/// # Examples
///
/// ```
/// use when_clause::ComparisonValue;
/// use rust_decimal::Decimal;
///
/// assert_eq!(ComparisonValue::parse("2"), ComparisonValue::Number(Decimal::from(2)));
/// assert_eq!(ComparisonValue::parse("1.50").to_string(), "1.5");
/// assert_eq!(ComparisonValue::parse("3px").to_string(), "3");
/// assert_eq!(ComparisonValue::parse("large").to_string(), "'large'");
/// assert_eq!(ComparisonValue::parse("1e-30").to_string(), "'1e-30'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComparisonValue {
    /// Decimal number, compared numerically
    Number(Decimal),

    /// Non-numeric text
    Text(String),
}

impl ComparisonValue {
    pub fn parse(text: &str) -> Self {
        match numeric_prefix(text) {
            Some(number) => ComparisonValue::Number(number),
            None => ComparisonValue::Text(text.to_string()),
        }
    }

    /// Get as number
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            ComparisonValue::Number(n) => Some(*n),
            ComparisonValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ComparisonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonValue::Number(n) => write!(f, "{}", n.normalize()),
            ComparisonValue::Text(s) => write!(f, "'{}'", s),
        }
    }
}

/// Reads `[+-]digits[.digits][e[+-]digits]` from the start of `text`.
fn numeric_prefix(text: &str) -> Option<Decimal> {
    let bytes = text.trim_start().as_bytes();
    let mut pos = 0;

    let negative = match bytes.first().copied() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let int_end = pos;

    let mut frac_range = pos..pos;
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        frac_range = frac_start..end;
        pos = end;
    }

    if int_start == int_end && frac_range.is_empty() {
        return None;
    }

    let mut exponent = None;
    if matches!(bytes.get(pos).copied(), Some(b'e' | b'E')) {
        let mut end = pos + 1;
        let exp_negative = match bytes.get(end).copied() {
            Some(b'-') => {
                end += 1;
                true
            }
            Some(b'+') => {
                end += 1;
                false
            }
            _ => false,
        };
        let digits_start = end;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end > digits_start {
            exponent = Some((exp_negative, digits_start..end));
        }
    }

    let digits = |range: std::ops::Range<usize>| {
        bytes
            .get(range)
            .and_then(|slice| std::str::from_utf8(slice).ok())
            .unwrap_or("")
    };

    let exponent: i64 = match exponent {
        Some((exp_negative, range)) => {
            let magnitude: i64 = digits(range).parse().ok()?;
            if exp_negative { -magnitude } else { magnitude }
        }
        None => 0,
    };

    let frac_digits = digits(frac_range).trim_end_matches('0');
    let mantissa = format!("{}{}", digits(int_start..int_end), frac_digits);
    let mantissa = mantissa.trim_start_matches('0');
    if mantissa.is_empty() {
        return Some(Decimal::ZERO);
    }

    // Values a decimal cannot hold exactly stay text rather than rounding.
    let significant = mantissa.trim_end_matches('0');
    let scale = (frac_digits.len() as i64)
        .saturating_sub(exponent)
        .saturating_sub((mantissa.len() - significant.len()) as i64);
    if significant.len() > MAX_DIGITS || scale > MAX_DIGITS as i64 {
        return None;
    }
    if scale < 0 && (significant.len() as i64).saturating_sub(scale) > MAX_DIGITS as i64 {
        return None;
    }

    let mut value: i128 = significant.parse().ok()?;
    if scale < 0 {
        value *= 10i128.pow(scale.unsigned_abs() as u32);
    }
    if negative {
        value = -value;
    }
    Decimal::try_from_i128_with_scale(value, scale.max(0) as u32).ok()
}
