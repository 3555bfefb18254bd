//! Core calculator: operand entry, pending operator and result rounding
//!
//! Everything in here is pure. The widget and the front ends only translate
//! events into [`machine::Input`]s and [`machine::Effect`]s into renders.

pub mod format;
pub mod machine;
pub mod memory;
pub mod operand;
mod operations;
pub mod scientific;

pub use machine::{transition, CalculatorState, Effect, Input, Pending};
pub use memory::MemoryRegister;
pub use operand::Operand;
pub use operations::Operator;
pub use scientific::{AngleMode, Function};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// `Unparseable` is swallowed silently by the state machine. The domain
/// errors surface to the user as a [`Notice`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// An operand could not be read as a number
    #[error("Operand is not a number: {0:?}")]
    Unparseable(String),
    /// Division by zero attempted
    #[error("Cannot divide by zero!")]
    DivisionByZero,
    /// Domain error or non-finite result
    #[error("Invalid operation: {0}")]
    InvalidOperation(&'static str),
}

impl CalcError {
    /// The notice shown for this error, if any
    #[must_use]
    pub const fn notice(&self) -> Option<Notice> {
        match self {
            Self::Unparseable(_) => None,
            Self::DivisionByZero => Some(Notice::DivideByZero),
            Self::InvalidOperation(_) => Some(Notice::InvalidOperation),
        }
    }
}

/// User-visible transient messages raised by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Division by zero was refused
    DivideByZero,
    /// A scientific function or operator produced no finite result
    InvalidOperation,
    /// Memory register zeroed
    MemoryCleared,
    /// Memory register loaded into the display
    MemoryRecalled,
    /// Current value added to memory
    MemoryAdded,
    /// Current value subtracted from memory
    MemorySubtracted,
    /// Trigonometric functions now read their argument in this mode
    AngleModeSwitched(AngleMode),
}

impl Notice {
    /// Message text as shown to the user
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::DivideByZero => "Cannot divide by zero!",
            Self::InvalidOperation => "Invalid operation",
            Self::MemoryCleared => "Memory cleared",
            Self::MemoryRecalled => "Memory recalled",
            Self::MemoryAdded => "Added to memory",
            Self::MemorySubtracted => "Subtracted from memory",
            Self::AngleModeSwitched(AngleMode::Degrees) => "Switched to Degree mode",
            Self::AngleModeSwitched(AngleMode::Radians) => "Switched to Radian mode",
        }
    }

    /// True for notices that report a refused operation
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::DivideByZero | Self::InvalidOperation)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Scale used to bound stored precision to 8 fraction digits
pub const ROUNDING_SCALE: f64 = 100_000_000.0;

/// Rounds a result to 8 decimal fraction digits, ties away from zero
///
/// Magnitudes where `x * 1e8` overflows are returned unchanged; they carry no
/// fraction digits anyway. Negative zero collapses to zero.
#[must_use]
pub fn round_result(x: f64) -> f64 {
    let scaled = x * ROUNDING_SCALE;
    let rounded = if scaled.is_finite() {
        scaled.round() / ROUNDING_SCALE
    } else {
        x
    };
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Rejects NaN and infinities before they reach an operand
pub fn ensure_finite(x: f64) -> CalcResult<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(CalcError::InvalidOperation("result is not finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_error_display() {
        assert_eq!(CalcError::DivisionByZero.to_string(), "Cannot divide by zero!");
        assert_eq!(
            CalcError::InvalidOperation("log of zero").to_string(),
            "Invalid operation: log of zero"
        );
        assert!(CalcError::Unparseable("abc".into())
            .to_string()
            .contains("abc"));
    }

    #[test]
    fn test_calc_error_notice() {
        assert_eq!(CalcError::Unparseable(String::new()).notice(), None);
        assert_eq!(
            CalcError::DivisionByZero.notice(),
            Some(Notice::DivideByZero)
        );
        assert_eq!(
            CalcError::InvalidOperation("x").notice(),
            Some(Notice::InvalidOperation)
        );
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::DivisionByZero);
        assert!(err.to_string().contains("divide"));
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(Notice::MemoryCleared.message(), "Memory cleared");
        assert_eq!(Notice::MemoryRecalled.message(), "Memory recalled");
        assert_eq!(Notice::MemoryAdded.message(), "Added to memory");
        assert_eq!(Notice::MemorySubtracted.message(), "Subtracted from memory");
        assert_eq!(
            Notice::AngleModeSwitched(AngleMode::Radians).to_string(),
            "Switched to Radian mode"
        );
        assert_eq!(
            Notice::AngleModeSwitched(AngleMode::Degrees).to_string(),
            "Switched to Degree mode"
        );
    }

    #[test]
    fn test_notice_is_warning() {
        assert!(Notice::DivideByZero.is_warning());
        assert!(Notice::InvalidOperation.is_warning());
        assert!(!Notice::MemoryAdded.is_warning());
    }

    #[test]
    fn test_round_result_removes_noise() {
        assert_eq!(round_result(0.1 + 0.2), 0.3);
        assert_eq!(round_result(1.0 / 3.0), 0.33333333);
        assert_eq!(round_result(2.0 / 3.0), 0.66666667);
    }

    #[test]
    fn test_round_result_symmetric_for_negatives() {
        assert_eq!(round_result(-2.0 / 3.0), -0.66666667);
        assert_eq!(round_result(-(0.1 + 0.2)), -0.3);
    }

    #[test]
    fn test_round_result_negative_zero() {
        let r = round_result(-0.000_000_001);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn test_round_result_huge_values_pass_through() {
        assert_eq!(round_result(1e305), 1e305);
        assert_eq!(round_result(-1e305), -1e305);
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite(1.5), Ok(1.5));
        assert!(ensure_finite(f64::NAN).is_err());
        assert!(ensure_finite(f64::INFINITY).is_err());
        assert!(ensure_finite(f64::NEG_INFINITY).is_err());
    }
}
