//! Calculator drivers - write the button script once, run it on any front-end
//!
//! [`ModelDriver`] talks to the model directly; [`TuiDriver`] goes through
//! the terminal app, turning every press into a mouse click on the keypad.

use ratatui::layout::Rect;

use crate::config::CalculatorConfig;
use crate::core::{CalcResult, Calculator, PendingOperation};
use crate::tui::{layout, AppAction, ButtonAction, CalculatorApp, Keypad};

/// Abstract driver trait for calculator interactions
///
/// # Example
///
/// ```rust
/// use pocket_calc::prelude::*;
///
/// let mut driver = ModelDriver::new();
/// driver.press_sequence("7 + 3 =").unwrap();
/// assert_eq!(driver.display(), "10");
/// ```
pub trait CalculatorDriver {
    /// Presses one keypad button
    fn press(&mut self, action: ButtonAction);

    /// Gets the current display text
    fn display(&self) -> String;

    /// Gets the pending operation, if any
    fn pending(&self) -> Option<PendingOperation>;

    /// Presses the button carrying `label`
    fn press_label(&mut self, label: char) -> CalcResult<()> {
        let action = Keypad::new().action_for_label(label)?;
        self.press(action);
        Ok(())
    }

    /// Presses buttons by label, one per character. Whitespace is skipped.
    ///
    /// Stops at the first unknown label; earlier presses stay applied.
    fn press_sequence(&mut self, labels: &str) -> CalcResult<()> {
        labels
            .chars()
            .filter(|c| !c.is_whitespace())
            .try_for_each(|label| self.press_label(label))
    }

    /// Clears the calculator state
    fn clear(&mut self) {
        self.press(ButtonAction::Clear);
    }
}

/// Driver calling the model directly, as the keypad handlers do
#[derive(Debug, Default)]
pub struct ModelDriver {
    calculator: Calculator,
}

impl ModelDriver {
    /// Creates a new model driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model driver with custom configuration
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            calculator: Calculator::with_config(config),
        }
    }

    /// Returns the underlying model
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }
}

impl CalculatorDriver for ModelDriver {
    fn press(&mut self, action: ButtonAction) {
        action.dispatch(&mut self.calculator);
    }

    fn display(&self) -> String {
        self.calculator.display()
    }

    fn pending(&self) -> Option<PendingOperation> {
        self.calculator.pending()
    }
}

/// TUI driver clicking keypad buttons on a virtual screen
#[derive(Debug)]
pub struct TuiDriver {
    app: CalculatorApp,
    screen: Rect,
}

impl Default for TuiDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiDriver {
    /// Default virtual screen size
    pub const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    /// Creates a new TUI driver
    #[must_use]
    pub fn new() -> Self {
        Self::with_app(CalculatorApp::new())
    }

    /// Creates a TUI driver with an existing app
    #[must_use]
    pub fn with_app(app: CalculatorApp) -> Self {
        Self {
            app,
            screen: Self::SCREEN,
        }
    }

    /// Returns a reference to the underlying app
    #[must_use]
    pub fn app(&self) -> &CalculatorApp {
        &self.app
    }
}

impl CalculatorDriver for TuiDriver {
    fn press(&mut self, action: ButtonAction) {
        let keypad_area = layout(self.screen).keypad;
        let keypad = self.app.keypad();
        let Some((column, row)) = keypad
            .find_button_by_action(action)
            .and_then(|index| keypad.button_center(keypad_area, index))
        else {
            // No button for this action (e.g. a digit above 9)
            return;
        };
        self.app
            .handle_action(AppAction::Click { column, row }, self.screen);
        self.app.handle_action(AppAction::Release, self.screen);
    }

    fn display(&self) -> String {
        self.app.display()
    }

    fn pending(&self) -> Option<PendingOperation> {
        self.app.pending()
    }
}

// ===== Shared Verification Routines =====
// These work with ANY CalculatorDriver implementation

/// Verifies one evaluation per operator
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    for (script, expected) in [
        ("7+3=", "10"),
        ("10-4=", "6"),
        ("6*7=", "42"),
        ("20/4=", "5"),
        ("3-10=", "-7"),
    ] {
        driver.clear();
        driver.press_sequence(script)?;
        assert_eq!(driver.display(), expected, "script {script}");
    }
    driver.clear();
    Ok(())
}

/// Verifies digit entry display
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    for (script, expected) in [
        ("0", "0"),
        ("007", "7"),
        ("3.14", "3.14"),
        (".5", "0.5"),
        ("1.2.3", "1.23"),
        ("2.50", "2.5"),
    ] {
        driver.clear();
        driver.press_sequence(script)?;
        assert_eq!(driver.display(), expected, "script {script}");
    }
    driver.clear();
    Ok(())
}

/// Verifies that a result becomes the next first operand
pub fn verify_chained_evaluation<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.press_sequence("5+2=")?;
    assert_eq!(driver.display(), "7");
    driver.press_sequence("+1=")?;
    assert_eq!(driver.display(), "8");
    driver.clear();
    Ok(())
}

/// Verifies 10-digit round-half-up division
pub fn verify_decimal_precision<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.press_sequence("1/3=")?;
    assert_eq!(driver.display(), "0.3333333333");
    driver.clear();
    driver.press_sequence("2/3=")?;
    assert_eq!(driver.display(), "0.6666666667");
    driver.clear();
    Ok(())
}

/// Verifies that dividing by zero shows zero
pub fn verify_divide_by_zero<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.press_sequence("9/0=")?;
    assert_eq!(driver.display(), "0");
    assert!(driver.pending().is_none());
    driver.clear();
    Ok(())
}

/// Verifies that evaluate is a no-op without a pending operator
pub fn verify_idempotent_evaluate<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.press_sequence("42=")?;
    assert_eq!(driver.display(), "42");

    driver.press_sequence("*2=")?;
    let once = driver.display();
    driver.press_sequence("=")?;
    assert_eq!(driver.display(), once);
    driver.clear();
    Ok(())
}

/// Verifies that clear resets display and pending state
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.press_sequence("12+34")?;
    driver.clear();
    assert_eq!(driver.display(), "0");
    assert!(driver.pending().is_none());
    Ok(())
}

/// Complete verification suite
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    verify_basic_arithmetic(driver)?;
    verify_digit_entry(driver)?;
    verify_chained_evaluation(driver)?;
    verify_decimal_precision(driver)?;
    verify_divide_by_zero(driver)?;
    verify_idempotent_evaluate(driver)?;
    verify_clear(driver)
}
