//! Calculator core: decimal entry, the four operations and the
//! pending-operation state machine.

pub mod accumulator;
pub mod model;
mod operations;

pub use accumulator::{Accumulator, InputToken};
pub use model::{Calculator, PendingOperation};
pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised while translating UI input into calculator events.
///
/// The model itself never fails; these only come from converting raw
/// characters or labels at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Not a digit or decimal point
    #[error("Invalid input token: {0:?}")]
    InvalidToken(String),
    /// Not one of + - * /
    #[error("Invalid operator: {0:?}")]
    InvalidOperator(String),
    /// No keypad button carries this label
    #[error("Invalid keypad label: '{0}'")]
    InvalidLabel(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CalcError tests =====

    #[test]
    fn test_calc_error_display_invalid_token() {
        let err = CalcError::InvalidToken("x".into());
        assert_eq!(format!("{err}"), "Invalid input token: \"x\"");
    }

    #[test]
    fn test_calc_error_display_invalid_operator() {
        let err = CalcError::InvalidOperator("^".into());
        assert_eq!(format!("{err}"), "Invalid operator: \"^\"");
    }

    #[test]
    fn test_calc_error_display_invalid_label() {
        let err = CalcError::InvalidLabel('x');
        assert_eq!(format!("{err}"), "Invalid keypad label: 'x'");
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::InvalidLabel('?'));
        assert!(err.to_string().contains("keypad"));
    }
}
