//! Operand/operator state machine
//!
//! The machine holds the operand being edited, an optional pending
//! operation (operator plus the operand to its left) and the
//! reset-on-next-input flag. Operators chain strictly left to right: choosing
//! an operator while another is pending evaluates the pending one first.
//!
//! Every operation either succeeds or leaves the state untouched. The one
//! exception is [`CalculatorState::choose_operator`], which installs the new
//! operator even when collapsing the previous one was refused.

use crate::core::format::{format_display, format_expression};
use crate::core::{
    ensure_finite, round_result, AngleMode, CalcError, CalcResult, Function, Notice, Operand,
    Operator,
};

/// An operator waiting for its right-hand operand
#[derive(Debug, Clone, PartialEq)]
pub struct Pending {
    /// The operator to apply
    pub operator: Operator,
    /// The left-hand operand, captured when the operator was chosen
    pub previous: Operand,
}

/// Calculator state
///
/// The previous operand exists exactly when an operator is pending; both
/// live in the single `pending` slot.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    current: Operand,
    pending: Option<Pending>,
    reset_on_next_input: bool,
    angle_mode: AngleMode,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Input events accepted by the state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Digit 0-9; anything larger is ignored
    Digit(u8),
    /// Decimal point
    DecimalPoint,
    /// Remove the last character of the current operand
    Backspace,
    /// Choose a binary operator
    Operator(Operator),
    /// Collapse the pending operation
    Evaluate,
    /// Reset operand and pending operation
    ClearAll,
    /// Reset only the current operand
    ClearEntry,
    /// Apply a scientific function to the current operand
    Apply(Function),
    /// Store a uniform sample from `[0, 1)` as the current operand
    Random(f64),
    /// Load a value (memory recall) as the current operand
    Load(f64),
    /// Switch between degrees and radians
    ToggleAngleMode,
}

/// Output effects produced by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Show a transient notice
    Notify(Notice),
}

/// Pure transition: consumes a state and an input, returns the next state
/// and the effects to render
#[must_use]
pub fn transition(mut state: CalculatorState, input: Input) -> (CalculatorState, Vec<Effect>) {
    let effects = state.apply_input(input);
    (state, effects)
}

impl CalculatorState {
    /// Creates the initial state: operand "0", nothing pending, degrees
    #[must_use]
    pub fn new() -> Self {
        Self::with_angle_mode(AngleMode::Degrees)
    }

    /// Creates the initial state with the given angle mode
    #[must_use]
    pub fn with_angle_mode(angle_mode: AngleMode) -> Self {
        Self {
            current: Operand::zero(),
            pending: None,
            reset_on_next_input: false,
            angle_mode,
        }
    }

    /// The operand being edited or the last result
    #[must_use]
    pub fn current(&self) -> &Operand {
        &self.current
    }

    /// The pending operation, if any
    #[must_use]
    pub fn pending(&self) -> Option<&Pending> {
        self.pending.as_ref()
    }

    /// The pending operator, if any
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending.as_ref().map(|p| p.operator)
    }

    /// The left-hand operand of the pending operation, if any
    #[must_use]
    pub fn previous(&self) -> Option<&Operand> {
        self.pending.as_ref().map(|p| &p.previous)
    }

    /// True when the next digit or decimal point starts a fresh operand
    #[must_use]
    pub fn reset_on_next_input(&self) -> bool {
        self.reset_on_next_input
    }

    /// Current angle mode
    #[must_use]
    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Applies one input, returning the effects it produced
    ///
    /// Unparseable operands are swallowed; domain errors become notices.
    pub fn apply_input(&mut self, input: Input) -> Vec<Effect> {
        let outcome = match input {
            Input::Digit(d) => {
                self.append_digit(d);
                Ok(())
            }
            Input::DecimalPoint => {
                self.append_decimal_point();
                Ok(())
            }
            Input::Backspace => {
                self.backspace();
                Ok(())
            }
            Input::Operator(op) => self.choose_operator(op),
            Input::Evaluate => self.evaluate(),
            Input::ClearAll => {
                self.clear_all();
                Ok(())
            }
            Input::ClearEntry => {
                self.clear_entry();
                Ok(())
            }
            Input::Apply(function) => self.apply_function(function),
            Input::Random(sample) => self.apply_random(sample),
            Input::Load(value) => self.load(value),
            Input::ToggleAngleMode => {
                let mode = self.toggle_angle_mode();
                return vec![Effect::Notify(Notice::AngleModeSwitched(mode))];
            }
        };

        match outcome {
            Ok(()) => Vec::new(),
            Err(err) => err.notice().map(Effect::Notify).into_iter().collect(),
        }
    }

    /// Appends a digit to the current operand
    ///
    /// A second leading zero is refused and a lone "0" is replaced.
    pub fn append_digit(&mut self, digit: u8) {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            return;
        };
        if self.reset_on_next_input {
            self.current = Operand::editing("");
            self.reset_on_next_input = false;
        }
        if ch == '0' && self.current.is_lone_zero() {
            return;
        }
        if self.current.is_lone_zero() {
            self.current = Operand::Editing(ch.to_string());
        } else {
            let mut text = std::mem::take(&mut self.current).into_text();
            text.push(ch);
            self.current = Operand::Editing(text);
        }
    }

    /// Appends a decimal point unless the operand already has one
    pub fn append_decimal_point(&mut self) {
        if self.reset_on_next_input {
            self.current = Operand::zero();
            self.reset_on_next_input = false;
        }
        if self.current.has_decimal_point() {
            return;
        }
        let mut text = std::mem::take(&mut self.current).into_text();
        text.push('.');
        self.current = Operand::Editing(text);
    }

    /// Removes the last character; never leaves the operand empty
    pub fn backspace(&mut self) {
        let mut text = std::mem::take(&mut self.current).into_text();
        if text.chars().count() <= 1 || text == "0" {
            self.current = Operand::zero();
        } else {
            text.pop();
            self.current = Operand::Editing(text);
        }
    }

    /// Chooses a binary operator, collapsing any pending one first
    ///
    /// The operator is installed even if the collapse was refused; the
    /// refusal is still returned so the caller can surface it.
    pub fn choose_operator(&mut self, operator: Operator) -> CalcResult<()> {
        if self.current.is_empty() {
            return Ok(());
        }
        let collapsed = if self.pending.is_some() {
            self.evaluate()
        } else {
            Ok(())
        };
        self.pending = Some(Pending {
            operator,
            previous: self.current.clone(),
        });
        self.reset_on_next_input = true;
        collapsed
    }

    /// Evaluates the pending operation into the current operand
    ///
    /// Without a pending operator this is a no-op. The result is rounded to
    /// 8 fraction digits.
    pub fn evaluate(&mut self) -> CalcResult<()> {
        let Some(pending) = &self.pending else {
            return Ok(());
        };
        let lhs = operand_value(&pending.previous)?;
        let rhs = operand_value(&self.current)?;
        let result = pending.operator.apply(lhs, rhs)?;

        self.current = Operand::Value(round_result(result));
        self.pending = None;
        self.reset_on_next_input = true;
        Ok(())
    }

    /// Resets the operand to "0" and drops the pending operation
    pub fn clear_all(&mut self) {
        self.current = Operand::zero();
        self.pending = None;
    }

    /// Resets only the operand to "0"
    pub fn clear_entry(&mut self) {
        self.current = Operand::zero();
    }

    /// Applies a scientific function to the current operand
    ///
    /// Unparseable text reads as 0. Non-finite and out-of-domain results
    /// leave the state unchanged.
    pub fn apply_function(&mut self, function: Function) -> CalcResult<()> {
        let value = self.current.value().unwrap_or(0.0);
        let result = function.apply(value, self.angle_mode)?;
        self.store_result(round_result(result));
        Ok(())
    }

    /// Stores a random sample, rounded like any other result
    pub fn apply_random(&mut self, sample: f64) -> CalcResult<()> {
        if !(0.0..1.0).contains(&sample) {
            return Err(CalcError::InvalidOperation("random sample outside [0, 1)"));
        }
        self.store_result(round_result(sample));
        Ok(())
    }

    /// Loads a value into the current operand as is
    pub fn load(&mut self, value: f64) -> CalcResult<()> {
        let value = ensure_finite(value)?;
        self.store_result(if value == 0.0 { 0.0 } else { value });
        Ok(())
    }

    /// Flips the angle mode and returns the new one
    pub fn toggle_angle_mode(&mut self) -> AngleMode {
        self.angle_mode = self.angle_mode.toggled();
        self.angle_mode
    }

    /// Expression line: `"<previous> <symbol>"`, empty when nothing is pending
    #[must_use]
    pub fn expression_line(&self) -> String {
        self.pending
            .as_ref()
            .map(|p| format_expression(&p.previous.text(), p.operator))
            .unwrap_or_default()
    }

    /// Result line: the formatted current operand
    #[must_use]
    pub fn result_line(&self) -> String {
        format_display(&self.current.text())
    }

    fn store_result(&mut self, value: f64) {
        self.current = Operand::Value(value);
        self.reset_on_next_input = true;
    }
}

fn operand_value(operand: &Operand) -> CalcResult<f64> {
    operand
        .value()
        .ok_or_else(|| CalcError::Unparseable(operand.text().into_owned()))
}
