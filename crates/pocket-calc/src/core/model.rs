//! Calculator state machine
//!
//! Two states: idle (nothing pending) and pending (operand + operator
//! captured). The pair lives in a single `Option`, so one half can never be
//! set without the other.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::core::accumulator::{Accumulator, InputToken};
use crate::core::Operation;

/// First operand and operator waiting for the second operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingOperation {
    /// Accumulator value captured when the operator was chosen
    pub operand: Decimal,
    /// The chosen operator
    pub operator: Operation,
}

impl std::fmt::Display for PendingOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.operand.normalize(), self.operator)
    }
}

/// Four-function calculator model.
///
/// One instance per calculator window. The UI forwards button events to
/// [`input_digit`](Self::input_digit), [`set_operator`](Self::set_operator),
/// [`evaluate`](Self::evaluate) and [`clear_all`](Self::clear_all), then
/// re-reads [`display`](Self::display).
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    accumulator: Accumulator,
    pending: Option<PendingOperation>,
    config: CalculatorConfig,
}

impl Calculator {
    /// Creates an idle calculator showing "0"
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator with custom configuration
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            accumulator: Accumulator::new(),
            pending: None,
            config,
        }
    }

    /// Returns the configuration
    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Returns the accumulator value
    #[must_use]
    pub fn accumulator(&self) -> Decimal {
        self.accumulator.value()
    }

    /// Returns the pending operation, if any
    #[must_use]
    pub fn pending(&self) -> Option<PendingOperation> {
        self.pending
    }

    /// Returns the pending operand, if any
    #[must_use]
    pub fn pending_operand(&self) -> Option<Decimal> {
        self.pending.map(|p| p.operand)
    }

    /// Returns the pending operator, if any
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operation> {
        self.pending.map(|p| p.operator)
    }

    /// Returns true when an operator is waiting for evaluation
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Enters a digit or the decimal point into the accumulator
    pub fn input_digit(&mut self, token: InputToken) {
        self.accumulator.input(token);
    }

    /// Captures the accumulator as the first operand and starts a fresh
    /// second operand.
    ///
    /// A pending pair from an earlier call is overwritten.
    pub fn set_operator(&mut self, operator: Operation) {
        if let Some(previous) = self.pending {
            debug!(%previous, "overwriting pending operation");
        }
        let pending = PendingOperation {
            operand: self.accumulator.value(),
            operator,
        };
        debug!(%pending, "operator set");
        self.pending = Some(pending);
        self.accumulator.reset();
    }

    /// Applies the pending operator to the pending operand and the
    /// accumulator. No-op when nothing is pending.
    pub fn evaluate(&mut self) {
        let Some(PendingOperation { operand, operator }) = self.pending.take() else {
            return;
        };

        let rhs = self.accumulator.value();
        let result = operator.apply(operand, rhs, self.config.division_scale);
        debug!(%operand, %operator, %rhs, %result, "evaluated");
        self.accumulator.set(result);
    }

    /// Resets the accumulator to zero and drops any pending operation
    pub fn clear_all(&mut self) {
        debug!("clear");
        self.accumulator.reset();
        self.pending = None;
    }

    /// Text to show: trailing fractional zeros stripped, plain notation
    #[must_use]
    pub fn display(&self) -> String {
        self.accumulator.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn type_str(calc: &mut Calculator, s: &str) {
        for c in s.chars() {
            calc.input_digit(InputToken::try_from(c).unwrap());
        }
    }

    fn run(calc: &mut Calculator, lhs: &str, op: Operation, rhs: &str) -> String {
        type_str(calc, lhs);
        calc.set_operator(op);
        type_str(calc, rhs);
        calc.evaluate();
        calc.display()
    }

    // ===== Construction tests =====

    #[test]
    fn test_new_is_idle_zero() {
        let calc = Calculator::new();
        assert_eq!(calc.display(), "0");
        assert!(!calc.is_pending());
        assert_eq!(calc.pending_operand(), None);
        assert_eq!(calc.pending_operator(), None);
    }

    #[test]
    fn test_with_config() {
        let config = CalculatorConfig::new().with_division_scale(2);
        let mut calc = Calculator::with_config(config);
        assert_eq!(calc.config().division_scale, 2);
        assert_eq!(run(&mut calc, "2", Operation::Divide, "3"), "0.67");
    }

    // ===== Arithmetic scenarios =====

    #[test]
    fn test_add_round_trip() {
        let mut calc = Calculator::new();
        assert_eq!(run(&mut calc, "7", Operation::Add, "3"), "10");
    }

    #[test]
    fn test_subtract() {
        let mut calc = Calculator::new();
        assert_eq!(run(&mut calc, "3", Operation::Subtract, "10"), "-7");
    }

    #[test]
    fn test_multiply() {
        let mut calc = Calculator::new();
        assert_eq!(run(&mut calc, "2.5", Operation::Multiply, "4"), "10");
    }

    #[test]
    fn test_divide_precision() {
        let mut calc = Calculator::new();
        assert_eq!(run(&mut calc, "1", Operation::Divide, "3"), "0.3333333333");
    }

    #[test]
    fn test_divide_strips_trailing_zeros() {
        let mut calc = Calculator::new();
        assert_eq!(run(&mut calc, "1", Operation::Divide, "4"), "0.25");
    }

    #[test]
    fn test_divide_by_zero_yields_zero() {
        let mut calc = Calculator::new();
        assert_eq!(run(&mut calc, "9", Operation::Divide, ""), "0");
        assert!(!calc.is_pending());
    }

    #[test]
    fn test_chained_operations_reuse_result() {
        let mut calc = Calculator::new();
        assert_eq!(run(&mut calc, "5", Operation::Add, "2"), "7");
        calc.set_operator(Operation::Add);
        type_str(&mut calc, "1");
        calc.evaluate();
        assert_eq!(calc.display(), "8");
    }

    // ===== State machine tests =====

    #[test]
    fn test_set_operator_captures_and_resets() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "42");
        calc.set_operator(Operation::Multiply);
        assert_eq!(calc.display(), "0");
        assert_eq!(
            calc.pending(),
            Some(PendingOperation {
                operand: Decimal::from(42),
                operator: Operation::Multiply,
            })
        );
    }

    #[test]
    fn test_repeated_set_operator_overwrites_with_zero_operand() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "8");
        calc.set_operator(Operation::Add);
        calc.set_operator(Operation::Subtract);
        assert_eq!(calc.pending_operand(), Some(Decimal::ZERO));
        assert_eq!(calc.pending_operator(), Some(Operation::Subtract));
        type_str(&mut calc, "3");
        calc.evaluate();
        assert_eq!(calc.display(), "-3");
    }

    #[test]
    fn test_evaluate_without_operator_is_noop() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "12.5");
        calc.evaluate();
        assert_eq!(calc.display(), "12.5");
        assert!(!calc.is_pending());
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let mut calc = Calculator::new();
        assert_eq!(run(&mut calc, "6", Operation::Multiply, "7"), "42");
        calc.evaluate();
        assert_eq!(calc.display(), "42");
    }

    #[test]
    fn test_evaluate_clears_pending() {
        let mut calc = Calculator::new();
        run(&mut calc, "1", Operation::Add, "1");
        assert_eq!(calc.pending(), None);
    }

    #[test]
    fn test_clear_all_from_pending() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "9");
        calc.set_operator(Operation::Divide);
        type_str(&mut calc, "3");
        calc.clear_all();
        assert_eq!(calc.display(), "0");
        assert!(!calc.is_pending());
        calc.evaluate();
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_digits_after_result_extend_it() {
        let mut calc = Calculator::new();
        run(&mut calc, "7", Operation::Add, "3");
        type_str(&mut calc, "5");
        assert_eq!(calc.display(), "105");
    }

    #[test]
    fn test_accumulator_accessor() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "0.75");
        assert_eq!(calc.accumulator(), Decimal::from_str("0.75").unwrap());
    }

    #[test]
    fn test_pending_display() {
        let pending = PendingOperation {
            operand: Decimal::from_str("2.50").unwrap(),
            operator: Operation::Divide,
        };
        assert_eq!(pending.to_string(), "2.5 /");
    }
}
