//! Display formatting for the two display lines

use crate::core::operand::parse_float;
use crate::core::Operator;

/// Values whose magnitude exceeds this render in exponent form
pub const EXPONENT_THRESHOLD: f64 = 999_999_999.0;

/// Maximum fraction digits shown in grouped form
pub const MAX_FRACTION_DIGITS: usize = 8;

/// Fraction digits shown in exponent form
pub const EXPONENT_DIGITS: usize = 6;

/// Formats operand text for the result line
///
/// Text that holds no number renders as `"0"`.
#[must_use]
pub fn format_display(text: &str) -> String {
    parse_float(text).map_or_else(|| "0".to_string(), format_number)
}

/// Formats a number for the result line
///
/// Magnitudes above 999,999,999 use exponent form with 6 fraction digits
/// (`1.234568e+9`); everything else is comma-grouped with up to 8 fraction
/// digits and no trailing zeros.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.abs() > EXPONENT_THRESHOLD {
        to_exponential(value, EXPONENT_DIGITS)
    } else {
        grouped(value, MAX_FRACTION_DIGITS)
    }
}

/// Formats the expression line: `"<previous> <symbol>"`
#[must_use]
pub fn format_expression(previous: &str, operator: Operator) -> String {
    format!("{} {}", format_display(previous), operator.symbol())
}

/// Exponent form with a signed exponent, e.g. `-1.500000e+10`
#[must_use]
pub fn to_exponential(value: f64, digits: usize) -> String {
    let raw = format!("{value:.digits$e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => raw,
    }
}

/// Fixed-point text with `digits` fraction digits, exact ties rounded away from zero
///
/// `to_fixed(0.03125, 4)` is `"0.0313"`, where `{:.4}` alone gives the even
/// `"0.0312"`.
#[must_use]
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !is_exact_tie(value, digits) {
        return format!("{value:.digits$}");
    }
    // one more digit is exact here and ends in the tied '5'
    let exact = format!("{value:.prec$}", prec = digits + 1);
    let truncated = &exact[..exact.len() - 1];
    let mut bumped = increment_last_digit(truncated);
    if bumped.ends_with('.') {
        bumped.pop();
    }
    bumped
}

/// True when `value` lies exactly halfway between two `digits`-place decimals
///
/// With `|value| = m * 2^e` and `m` odd, that holds exactly when
/// `e == -(digits + 1)`.
fn is_exact_tie(value: f64, digits: usize) -> bool {
    if !value.is_finite() || value == 0.0 {
        return false;
    }
    let bits = value.abs().to_bits();
    let biased = i64::try_from((bits >> 52) & 0x7ff).unwrap_or(0);
    let fraction = bits & ((1_u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1_u64 << 52), biased - 1075)
    };
    let Ok(digits) = i64::try_from(digits) else {
        return false;
    };
    exponent + i64::from(mantissa.trailing_zeros()) == -(digits + 1)
}

/// Adds one unit in the last place of a decimal string, carrying as needed
fn increment_last_digit(text: &str) -> String {
    let mut bytes = text.as_bytes().to_vec();
    let start = usize::from(bytes.first() == Some(&b'-'));
    let mut i = bytes.len();
    while i > start {
        i -= 1;
        match bytes[i] {
            b'.' => {}
            b'9' => bytes[i] = b'0',
            d => {
                bytes[i] = d + 1;
                return String::from_utf8_lossy(&bytes).into_owned();
            }
        }
    }
    bytes.insert(start, b'1');
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Comma-grouped decimal with at most `max_fraction` fraction digits
#[must_use]
pub fn grouped(value: f64, max_fraction: usize) -> String {
    let fixed = to_fixed(value.abs(), max_fraction);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_simple() {
        assert_eq!(format_display("0"), "0");
        assert_eq!(format_display("42"), "42");
        assert_eq!(format_display("-7.25"), "-7.25");
    }

    #[test]
    fn test_format_display_non_numeric() {
        assert_eq!(format_display(""), "0");
        assert_eq!(format_display("abc"), "0");
        assert_eq!(format_display("."), "0");
    }

    #[test]
    fn test_format_display_trailing_point_hidden() {
        assert_eq!(format_display("0."), "0");
        assert_eq!(format_display("12.50"), "12.5");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_number(1_234_567.5), "1,234,567.5");
        assert_eq!(format_number(999_999_999.0), "999,999,999");
        assert_eq!(format_number(-1000.0), "-1,000");
        assert_eq!(format_number(100.0), "100");
    }

    #[test]
    fn test_max_eight_fraction_digits() {
        assert_eq!(format_number(1.0 / 3.0), "0.33333333");
        assert_eq!(format_number(0.123_456_789_9), "0.12345679");
        assert_eq!(format_number(0.000_000_001), "0");
        assert_eq!(format_number(-0.000_000_001), "0");
    }

    #[test]
    fn test_exponent_form() {
        assert_eq!(format_number(1e10), "1.000000e+10");
        assert_eq!(format_number(1_234_567_890.0), "1.234568e+9");
        assert_eq!(format_number(-5e12), "-5.000000e+12");
        assert_eq!(format_display("1e+21"), "1.000000e+21");
    }

    #[test]
    fn test_to_exponential_negative_exponent() {
        assert_eq!(to_exponential(0.00015, 2), "1.50e-4");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn test_format_expression() {
        assert_eq!(format_expression("1234", Operator::Add), "1,234 +");
        assert_eq!(format_expression("8", Operator::Divide), "8 ÷");
        assert_eq!(format_expression("2", Operator::Power), "2 ^");
    }

    #[test]
    fn test_exact_ties_round_away_from_zero() {
        assert_eq!(format_display("0.001953125"), "0.00195313");
        assert_eq!(format_display("-0.001953125"), "-0.00195313");
        assert_eq!(to_fixed(0.03125, 4), "0.0313");
        assert_eq!(to_fixed(-0.03125, 4), "-0.0313");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(9.5, 0), "10");
        assert_eq!(to_fixed(0.96875, 4), "0.9688");
    }

    #[test]
    fn test_near_ties_keep_exact_rounding() {
        // 1.005 is stored just below the tie
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.125, 4), "0.1250");
        assert_eq!(to_fixed(1234.5678, 2), "1234.57");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
