//! Four-function arithmetic over exact decimals
//!
//! Division by zero and overflow both resolve to zero instead of failing.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::CalculatorConfig;
use crate::core::CalcError;

/// Largest mantissa a [`Decimal`] can hold (2^96 - 1)
const MAX_MANTISSA: u128 = (1 << 96) - 1;

/// Type-safe operation enum - the four operators the keypad offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// All operations in keypad order (top to bottom)
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Applies the operation as `lhs <op> rhs`.
    ///
    /// `division_scale` is the number of fractional digits kept by a
    /// quotient, rounded half away from zero. A zero divisor yields zero, as
    /// does any result outside the range of [`Decimal`].
    #[must_use]
    pub fn apply(self, lhs: Decimal, rhs: Decimal, division_scale: u32) -> Decimal {
        let result = match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Subtract => lhs.checked_sub(rhs),
            Self::Multiply => lhs.checked_mul(rhs),
            Self::Divide => {
                if rhs.is_zero() {
                    warn!(%lhs, "division by zero, result is 0");
                    return Decimal::ZERO;
                }
                divide_half_up(lhs, rhs, division_scale)
            }
        };

        match result {
            // Collapse -0 so that later digit entry sees a plain "0"
            Some(value) if value.is_zero() => Decimal::ZERO,
            Some(value) => value,
            None => {
                warn!(%lhs, %rhs, op = %self.symbol(), "decimal overflow, result is 0");
                Decimal::ZERO
            }
        }
    }
}

/// Divides and rounds the exact quotient half away from zero to `scale`
/// fractional digits.
///
/// When the rounded quotient has too many digits for a [`Decimal`] at that
/// scale, the scale is lowered until it fits. `None` means even the integer
/// quotient overflows.
fn divide_half_up(lhs: Decimal, rhs: Decimal, scale: u32) -> Option<Decimal> {
    let numerator = lhs.mantissa().unsigned_abs();
    let denominator = rhs.mantissa().unsigned_abs();
    let negative = lhs.is_sign_negative() != rhs.is_sign_negative();

    let mut scale = scale.min(CalculatorConfig::MAX_DIVISION_SCALE);
    loop {
        // lhs / rhs = numerator / denominator * 10^(rhs.scale - lhs.scale)
        let shift = i64::from(rhs.scale()) + i64::from(scale) - i64::from(lhs.scale());
        match scaled_quotient(numerator, denominator, shift) {
            Some(mantissa) if mantissa <= MAX_MANTISSA => {
                let mantissa = i128::try_from(mantissa).ok()?;
                let signed = if negative { -mantissa } else { mantissa };
                return Decimal::try_from_i128_with_scale(signed, scale).ok();
            }
            _ if scale > 0 => scale -= 1,
            _ => return None,
        }
    }
}

/// `numerator * 10^shift / denominator`, rounded half up.
///
/// Long division one digit at a time keeps the remainder below the
/// denominator, so nothing wider than `u128` is needed. `None` on overflow.
fn scaled_quotient(numerator: u128, denominator: u128, shift: i64) -> Option<u128> {
    if shift >= 0 {
        let mut quotient = numerator / denominator;
        let mut remainder = numerator % denominator;
        for _ in 0..shift {
            remainder *= 10;
            quotient = quotient
                .checked_mul(10)?
                .checked_add(remainder / denominator)?;
            remainder %= denominator;
            if quotient > MAX_MANTISSA {
                return Some(quotient);
            }
        }
        if remainder * 2 >= denominator {
            quotient = quotient.checked_add(1)?;
        }
        Some(quotient)
    } else {
        // The dropped digits are an integer and the discarded remainder is
        // below one, so comparing the digits with the half is exact.
        let divisor = 10u128.checked_pow(u32::try_from(-shift).ok()?)?;
        let whole = numerator / denominator;
        let (quotient, dropped) = (whole / divisor, whole % divisor);
        Some(if dropped >= divisor / 2 {
            quotient + 1
        } else {
            quotient
        })
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Operation {
    type Error = CalcError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(Self::Add),
            '-' => Ok(Self::Subtract),
            '*' | '×' => Ok(Self::Multiply),
            '/' | '÷' => Ok(Self::Divide),
            other => Err(CalcError::InvalidOperator(other.to_string())),
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(CalcError::InvalidOperator(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // ===== Symbol tests =====

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::Add.symbol(), '+');
        assert_eq!(Operation::Subtract.symbol(), '-');
        assert_eq!(Operation::Multiply.symbol(), '*');
        assert_eq!(Operation::Divide.symbol(), '/');
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Divide.to_string(), "/");
    }

    #[test]
    fn test_all_contains_every_operation_once() {
        let mut seen = std::collections::HashSet::new();
        for op in Operation::ALL {
            assert!(seen.insert(op));
        }
        assert_eq!(seen.len(), 4);
    }

    // ===== Parsing tests =====

    #[test]
    fn test_try_from_char() {
        assert_eq!(Operation::try_from('+'), Ok(Operation::Add));
        assert_eq!(Operation::try_from('-'), Ok(Operation::Subtract));
        assert_eq!(Operation::try_from('*'), Ok(Operation::Multiply));
        assert_eq!(Operation::try_from('×'), Ok(Operation::Multiply));
        assert_eq!(Operation::try_from('/'), Ok(Operation::Divide));
        assert_eq!(Operation::try_from('÷'), Ok(Operation::Divide));
    }

    #[test]
    fn test_try_from_invalid_char() {
        assert_eq!(
            Operation::try_from('^'),
            Err(CalcError::InvalidOperator("^".into()))
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("+".parse::<Operation>(), Ok(Operation::Add));
        assert!("++".parse::<Operation>().is_err());
        assert!("".parse::<Operation>().is_err());
    }

    // ===== Arithmetic tests =====

    #[test]
    fn test_add() {
        assert_eq!(Operation::Add.apply(dec("7"), dec("3"), 10), dec("10"));
    }

    #[test]
    fn test_subtract_negative_result() {
        assert_eq!(Operation::Subtract.apply(dec("2"), dec("5"), 10), dec("-3"));
    }

    #[test]
    fn test_multiply_decimals() {
        assert_eq!(
            Operation::Multiply.apply(dec("1.5"), dec("0.2"), 10),
            dec("0.3")
        );
    }

    #[test]
    fn test_divide_exact() {
        assert_eq!(Operation::Divide.apply(dec("20"), dec("4"), 10), dec("5"));
    }

    #[test]
    fn test_divide_rounds_to_scale() {
        let result = Operation::Divide.apply(dec("1"), dec("3"), 10);
        assert_eq!(result.to_string(), "0.3333333333");
    }

    #[test]
    fn test_divide_rounds_half_up() {
        // 2/3 = 0.666..., last kept digit rounds up
        let result = Operation::Divide.apply(dec("2"), dec("3"), 10);
        assert_eq!(result.to_string(), "0.6666666667");

        // exact half at the cut-off rounds away from zero
        let result = Operation::Divide.apply(dec("1"), dec("8"), 2);
        assert_eq!(result.to_string(), "0.13");
        let result = Operation::Divide.apply(dec("-1"), dec("8"), 2);
        assert_eq!(result.to_string(), "-0.13");
    }

    #[test]
    fn test_divide_rounds_exact_quotient_once() {
        // 1 / 20000000000.00000001 = 0.0000000000499999999999999999975...
        let result = Operation::Divide.apply(dec("1"), dec("20000000000.00000001"), 10);
        assert_eq!(result, Decimal::ZERO);

        // 1 / 19999999999.99999999 = 0.0000000000500000000000000000025...
        let result = Operation::Divide.apply(dec("1"), dec("19999999999.99999999"), 10);
        assert_eq!(result.to_string(), "0.0000000001");
    }

    #[test]
    fn test_divide_long_operands() {
        let result = Operation::Divide.apply(
            dec("9999999999999999999.999999999"),
            dec("3333333333.333333333333333333"),
            10,
        );
        assert_eq!(result.to_string(), "3000000000.0000000000");
    }

    #[test]
    fn test_divide_scale_zero() {
        assert_eq!(Operation::Divide.apply(dec("5"), dec("2"), 0), dec("3"));
        assert_eq!(Operation::Divide.apply(dec("-5"), dec("2"), 0), dec("-3"));
        assert_eq!(Operation::Divide.apply(dec("7"), dec("3"), 0), dec("2"));
    }

    #[test]
    fn test_divide_fine_operands_coarse_scale() {
        // Operand scale above the result scale drops whole digits
        assert_eq!(
            Operation::Divide.apply(dec("0.0000000000000000000000000015"), dec("0.1"), 26),
            dec("0.00000000000000000000000002")
        );
        assert_eq!(
            Operation::Divide.apply(dec("0.0000000000000000000000000014"), dec("0.1"), 26),
            dec("0.00000000000000000000000001")
        );
    }

    #[test]
    fn test_divide_lowers_scale_for_large_quotients() {
        // 33333333333333333333.3333333333 needs 30 digits, one more than fits
        let result = Operation::Divide.apply(dec("100000000000000000000"), dec("3"), 10);
        assert_eq!(result.to_string(), "33333333333333333333.333333333");
    }

    #[test]
    fn test_divide_overflow_is_zero() {
        assert_eq!(
            Operation::Divide.apply(Decimal::MAX, dec("0.1"), 10),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_divide_by_zero_is_zero() {
        assert_eq!(
            Operation::Divide.apply(dec("42"), Decimal::ZERO, 10),
            Decimal::ZERO
        );
        assert_eq!(
            Operation::Divide.apply(dec("42"), dec("0.000"), 10),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_overflow_is_zero() {
        assert_eq!(
            Operation::Multiply.apply(Decimal::MAX, dec("2"), 10),
            Decimal::ZERO
        );
        assert_eq!(
            Operation::Add.apply(Decimal::MAX, Decimal::MAX, 10),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_negative_zero_collapses() {
        let result = Operation::Multiply.apply(dec("-5"), Decimal::ZERO, 10);
        assert!(!result.is_sign_negative());
        assert_eq!(result.to_string(), "0");
    }
}
