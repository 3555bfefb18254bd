//! Scientific (unary) functions and angle mode

use serde::{Deserialize, Serialize};

use crate::core::{ensure_finite, CalcError, CalcResult};

/// How trigonometric functions read their argument
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Argument in degrees
    #[default]
    Degrees,
    /// Argument in radians
    Radians,
}

impl AngleMode {
    /// The other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    /// Converts an argument in this mode to radians
    #[must_use]
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Degrees => value * std::f64::consts::PI / 180.0,
            Self::Radians => value,
        }
    }

    /// Short label for status lines
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Degrees => "DEG",
            Self::Radians => "RAD",
        }
    }
}

/// A scientific function applied to the current operand
///
/// `Pi`, `E` and `Random` ignore the operand. `Random` is not listed here;
/// its sample comes from the widget's generator and enters the machine as
/// [`Input::Random`](crate::core::Input::Random).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Function {
    /// Sine, honouring the angle mode
    Sin,
    /// Cosine, honouring the angle mode
    Cos,
    /// Tangent, honouring the angle mode
    Tan,
    /// Hyperbolic sine
    Sinh,
    /// Hyperbolic cosine
    Cosh,
    /// Hyperbolic tangent
    Tanh,
    /// Natural logarithm
    Ln,
    /// Base-10 logarithm
    Log10,
    /// e raised to the operand
    Exp,
    /// Square root
    Sqrt,
    /// Absolute value
    Abs,
    /// Round toward negative infinity
    Floor,
    /// Round toward positive infinity
    Ceil,
    /// Round to nearest integer
    Round,
    /// n! for non-negative integers
    Factorial,
    /// The constant π
    Pi,
    /// The constant e
    E,
}

impl Function {
    /// All functions in scientific keypad order
    pub const ALL: [Self; 17] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Ln,
        Self::Log10,
        Self::Exp,
        Self::Sqrt,
        Self::Abs,
        Self::Floor,
        Self::Ceil,
        Self::Round,
        Self::Factorial,
        Self::Pi,
        Self::E,
    ];

    /// Returns the action name used by keypad buttons
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Exp => "exp",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Factorial => "factorial",
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    /// Button label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ln => "ln",
            Self::Log10 => "log",
            Self::Exp => "eˣ",
            Self::Sqrt => "√",
            Self::Abs => "|x|",
            Self::Factorial => "n!",
            Self::Pi => "π",
            other => other.action(),
        }
    }

    /// Looks a function up by action name; `log` is an alias for `ln`
    #[must_use]
    pub fn from_action(action: &str) -> Option<Self> {
        if action == "log" {
            return Some(Self::Ln);
        }
        Self::ALL.into_iter().find(|f| f.action() == action)
    }

    /// True for functions that read the angle mode
    #[must_use]
    pub const fn is_trigonometric(&self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan)
    }

    /// Evaluates the function at `value`; the result is finite but unrounded
    pub fn apply(self, value: f64, mode: AngleMode) -> CalcResult<f64> {
        let raw = match self {
            Self::Sin => mode.to_radians(value).sin(),
            Self::Cos => mode.to_radians(value).cos(),
            Self::Tan => mode.to_radians(value).tan(),
            Self::Sinh => value.sinh(),
            Self::Cosh => value.cosh(),
            Self::Tanh => value.tanh(),
            Self::Ln => {
                if value <= 0.0 {
                    return Err(CalcError::InvalidOperation("logarithm of a non-positive value"));
                }
                value.ln()
            }
            Self::Log10 => {
                if value <= 0.0 {
                    return Err(CalcError::InvalidOperation("logarithm of a non-positive value"));
                }
                value.log10()
            }
            Self::Exp => value.exp(),
            Self::Sqrt => {
                if value < 0.0 {
                    return Err(CalcError::InvalidOperation("square root of a negative value"));
                }
                value.sqrt()
            }
            Self::Abs => value.abs(),
            Self::Floor => value.floor(),
            Self::Ceil => value.ceil(),
            // half-way cases round up, as on a browser
            Self::Round => {
                let floor = value.floor();
                if value - floor >= 0.5 {
                    floor + 1.0
                } else {
                    floor
                }
            }
            Self::Factorial => factorial(value)?,
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        };
        ensure_finite(raw)
    }
}

/// Exact product 1·2·…·n for a non-negative integral `n`
///
/// Large `n` overflows to infinity, which callers reject as non-finite.
pub fn factorial(n: f64) -> CalcResult<f64> {
    if n < 0.0 || n.fract() != 0.0 || !n.is_finite() {
        return Err(CalcError::InvalidOperation(
            "factorial needs a non-negative integer",
        ));
    }
    let mut result = 1.0_f64;
    let mut i = 2.0_f64;
    while i <= n {
        result *= i;
        if result.is_infinite() {
            break;
        }
        i += 1.0;
    }
    Ok(result)
}
