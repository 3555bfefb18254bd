//! Operand representation
//!
//! An operand is text while the user is typing it and a number once it has
//! been computed. The two forms convert explicitly: [`Operand::value`] parses
//! the text, [`Operand::text`] renders a computed value the way a browser
//! renders a `Number`.

use std::borrow::Cow;
use std::fmt;

/// A calculator operand
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Digits and at most one decimal point, as typed
    Editing(String),
    /// A computed or recalled value
    Value(f64),
}

impl Default for Operand {
    fn default() -> Self {
        Self::zero()
    }
}

impl Operand {
    /// The initial operand, "0"
    #[must_use]
    pub fn zero() -> Self {
        Self::Editing("0".to_string())
    }

    /// Creates an operand holding typed text
    #[must_use]
    pub fn editing(text: impl Into<String>) -> Self {
        Self::Editing(text.into())
    }

    /// Returns the operand as text
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Editing(s) => Cow::Borrowed(s),
            Self::Value(v) => Cow::Owned(number_to_string(*v)),
        }
    }

    /// Returns the numeric value, or `None` when the text holds no number
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Editing(s) => parse_float(s),
            Self::Value(v) => Some(*v),
        }
    }

    /// True when the operand holds no text at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Editing(s) if s.is_empty())
    }

    /// True when the operand is exactly the text "0"
    #[must_use]
    pub fn is_lone_zero(&self) -> bool {
        self.text() == "0"
    }

    /// True when the operand text contains a decimal point
    #[must_use]
    pub fn has_decimal_point(&self) -> bool {
        self.text().contains('.')
    }

    /// Converts to the editable text form, consuming the operand
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Editing(s) => s,
            Self::Value(v) => number_to_string(v),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Parses the longest numeric prefix of `s`, ignoring leading whitespace
///
/// Accepts an optional sign, digits with an optional fraction, and an optional
/// exponent. `"12abc"` yields 12, `"abc"` and `""` yield `None`. `Infinity`
/// is recognised with an optional sign.
#[must_use]
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Renders a number the way ECMAScript `Number.prototype.toString` does
///
/// Shortest round-trip digits; plain notation for decimal exponents in
/// `-7..21`, exponent notation (`1e+21`, `1.5e-7`) outside it.
#[must_use]
pub fn number_to_string(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let sign = if v < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits, e.g. "1.2345e3"
    let sci = format!("{:e}", v.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    // decimal point position relative to the digit string
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let exp_sign = if n - 1 < 0 { '-' } else { '+' };
        let exp_abs = (n - 1).abs();
        if k == 1 {
            format!("{digits}e{exp_sign}{exp_abs}")
        } else {
            format!("{}.{}e{exp_sign}{exp_abs}", &digits[..1], &digits[1..])
        }
    };

    format!("{sign}{body}")
}
