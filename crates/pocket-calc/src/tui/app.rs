//! TUI application state
//!
//! Holds the calculator model for one window and routes keypad clicks to it.

use ratatui::layout::Rect;
use tracing::debug;

use super::input::AppAction;
use super::keypad::{ButtonAction, Keypad};
use super::ui;
use crate::config::CalculatorConfig;
use crate::core::{Calculator, PendingOperation};

/// Calculator application state
#[derive(Debug, Default)]
pub struct CalculatorApp {
    /// The model behind this window
    calculator: Calculator,
    /// Keypad with press highlighting
    keypad: Keypad,
    /// Whether the app should quit
    should_quit: bool,
}

impl CalculatorApp {
    /// Creates a new calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator app with custom configuration
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            calculator: Calculator::with_config(config),
            keypad: Keypad::new(),
            should_quit: false,
        }
    }

    /// Returns the calculator model
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the display text
    #[must_use]
    pub fn display(&self) -> String {
        self.calculator.display()
    }

    /// Returns the pending operation, if any
    #[must_use]
    pub fn pending(&self) -> Option<PendingOperation> {
        self.calculator.pending()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Forwards a button action to the model
    pub fn press(&mut self, action: ButtonAction) {
        action.dispatch(&mut self.calculator);
    }

    /// Handles a click at a screen position inside the keypad area.
    ///
    /// Returns the action of the button hit, if any.
    pub fn click(&mut self, keypad_area: Rect, column: u16, row: u16) -> Option<ButtonAction> {
        let index = self.keypad.hit_test(keypad_area, column, row)?;
        let action = self.keypad.get_button(index)?.action;
        self.keypad.press_button(index);
        debug!(?action, "keypad click");
        self.press(action);
        Some(action)
    }

    /// Releases the highlighted button
    pub fn release(&mut self) {
        self.keypad.release_all();
    }

    /// Applies a terminal action, given the full screen area
    pub fn handle_action(&mut self, action: AppAction, screen: Rect) {
        match action {
            AppAction::Click { column, row } => {
                let layout = ui::layout(screen);
                self.click(layout.keypad, column, row);
            }
            AppAction::Release => self.release(),
            AppAction::Quit => self.quit(),
            AppAction::Redraw | AppAction::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation;

    fn screen() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    fn click_label(app: &mut CalculatorApp, label: char) {
        let keypad_area = ui::layout(screen()).keypad;
        let index = app.keypad().find_button_by_label(label).unwrap();
        let (column, row) = app.keypad().button_center(keypad_area, index).unwrap();
        app.handle_action(AppAction::Click { column, row }, screen());
        app.handle_action(AppAction::Release, screen());
    }

    // ===== Constructor tests =====

    #[test]
    fn test_app_new() {
        let app = CalculatorApp::new();
        assert_eq!(app.display(), "0");
        assert!(app.pending().is_none());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_app_with_config() {
        let app = CalculatorApp::with_config(CalculatorConfig::new().with_division_scale(3));
        assert_eq!(app.calculator().config().division_scale, 3);
    }

    // ===== Press tests =====

    #[test]
    fn test_press_sequence() {
        let mut app = CalculatorApp::new();
        app.press(ButtonAction::Digit(7));
        app.press(ButtonAction::Operator(Operation::Add));
        assert_eq!(
            app.pending().map(|p| p.to_string()),
            Some("7 +".to_string())
        );
        app.press(ButtonAction::Digit(3));
        app.press(ButtonAction::Equals);
        assert_eq!(app.display(), "10");
        assert!(app.pending().is_none());
    }

    // ===== Click tests =====

    #[test]
    fn test_click_through_layout() {
        let mut app = CalculatorApp::new();
        for label in ['1', '2', '/', '4', '='] {
            click_label(&mut app, label);
        }
        assert_eq!(app.display(), "3");
    }

    #[test]
    fn test_click_highlights_until_release() {
        let mut app = CalculatorApp::new();
        let keypad_area = ui::layout(screen()).keypad;
        let (column, row) = app.keypad().button_center(keypad_area, 0).unwrap();
        app.handle_action(AppAction::Click { column, row }, screen());
        assert_eq!(app.keypad().pressed_index(), Some(0));
        app.handle_action(AppAction::Release, screen());
        assert_eq!(app.keypad().pressed_index(), None);
    }

    #[test]
    fn test_click_outside_keypad_ignored() {
        let mut app = CalculatorApp::new();
        let keypad_area = ui::layout(screen()).keypad;
        assert_eq!(app.click(keypad_area, 79, 23), None);
        assert_eq!(app.display(), "0");
        assert_eq!(app.keypad().pressed_index(), None);
    }

    // ===== Quit tests =====

    #[test]
    fn test_quit_action() {
        let mut app = CalculatorApp::new();
        app.handle_action(AppAction::Quit, screen());
        assert!(app.should_quit());
    }

    #[test]
    fn test_redraw_and_none_are_noops() {
        let mut app = CalculatorApp::new();
        app.handle_action(AppAction::Redraw, screen());
        app.handle_action(AppAction::None, screen());
        assert_eq!(app.display(), "0");
        assert!(!app.should_quit());
    }
}
