//! Terminal event mapping
//!
//! Calculator buttons are mouse-only; the keyboard only controls the window.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Actions that terminal events can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Left mouse button pressed at a screen position
    Click {
        /// Column of the pointer
        column: u16,
        /// Row of the pointer
        row: u16,
    },
    /// Left mouse button released
    Release,
    /// Terminal resized, redraw
    Redraw,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps terminal events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a terminal event to an action
    #[must_use]
    pub fn handle_event(&self, event: &Event) -> AppAction {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::Resize(..) => AppAction::Redraw,
            _ => AppAction::None,
        }
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> AppAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return AppAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => AppAction::Quit,
                _ => AppAction::None,
            };
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
            _ => AppAction::None,
        }
    }

    /// Maps a mouse event to an action
    #[must_use]
    pub fn handle_mouse(&self, event: MouseEvent) -> AppAction {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => AppAction::Click {
                column: event.column,
                row: event.row,
            },
            MouseEventKind::Up(MouseButton::Left) => AppAction::Release,
            _ => AppAction::None,
        }
    }
}
