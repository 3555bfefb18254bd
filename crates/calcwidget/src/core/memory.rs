//! Memory register (M+, M-, MR, MC)
//!
//! The register sits beside the state machine, not inside it. Only recall
//! touches the machine, through [`Input::Load`](crate::core::Input::Load).

use crate::core::Operand;

/// A single stored scalar
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryRegister {
    value: f64,
}

impl MemoryRegister {
    /// Creates an empty (zero) register
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// True when something other than zero is stored
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.value != 0.0
    }

    /// M+: adds the operand; unparseable text counts as 0
    pub fn add(&mut self, operand: &Operand) {
        self.value += operand.value().filter(|v| v.is_finite()).unwrap_or(0.0);
    }

    /// M-: subtracts the operand; unparseable text counts as 0
    pub fn subtract(&mut self, operand: &Operand) {
        self.value -= operand.value().filter(|v| v.is_finite()).unwrap_or(0.0);
    }

    /// MC: zeroes the register
    pub fn clear(&mut self) {
        self.value = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_starts_empty() {
        let mem = MemoryRegister::new();
        assert_eq!(mem.value(), 0.0);
        assert!(!mem.is_set());
    }

    #[test]
    fn test_memory_add_subtract() {
        let mut mem = MemoryRegister::new();
        mem.add(&Operand::editing("12"));
        mem.add(&Operand::Value(3.5));
        mem.subtract(&Operand::editing("5"));
        assert_eq!(mem.value(), 10.5);
        assert!(mem.is_set());
    }

    #[test]
    fn test_memory_unparseable_counts_as_zero() {
        let mut mem = MemoryRegister::new();
        mem.add(&Operand::editing(""));
        mem.subtract(&Operand::editing("abc"));
        assert_eq!(mem.value(), 0.0);
    }

    #[test]
    fn test_memory_clear() {
        let mut mem = MemoryRegister::new();
        mem.add(&Operand::editing("7"));
        mem.clear();
        assert_eq!(mem.value(), 0.0);
    }
}
