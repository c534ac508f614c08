//! Pocket Calculator - four-function decimal calculator
//!
//! The model is a small state machine over an exact decimal accumulator and
//! a single pending operation. A terminal front-end with a clickable keypad
//! forwards button presses to it and re-reads the display after each one.
//!
//! # Example
//!
//! ```rust
//! use pocket_calc::prelude::*;
//!
//! let mut calc = Calculator::new();
//! calc.input_digit(InputToken::Digit(1));
//! calc.set_operator(Operation::Divide);
//! calc.input_digit(InputToken::Digit(3));
//! calc.evaluate();
//! assert_eq!(calc.display(), "0.3333333333");
//!
//! // Division by zero shows zero
//! calc.set_operator(Operation::Divide);
//! calc.evaluate();
//! assert_eq!(calc.display(), "0");
//! ```

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod cli;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod logging;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::CalculatorConfig;
    pub use crate::core::{
        Accumulator, CalcError, CalcResult, Calculator, InputToken, Operation, PendingOperation,
    };
    pub use crate::driver::{CalculatorDriver, ModelDriver, TuiDriver};
    pub use crate::error::{AppError, AppResult};
    pub use crate::tui::{ButtonAction, CalculatorApp, Keypad};
}
