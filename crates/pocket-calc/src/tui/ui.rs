//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;

/// Window title
pub const TITLE: &str = " Pocket Calculator ";

/// Footer hint
pub const FOOTER_HINT: &str = "click the keys · q/Esc quit";

/// Widest value text: sign, 29 mantissa digits and a decimal point
pub const MAX_VALUE_WIDTH: u16 = 31;

/// Width of the calculator column. The pending line adds " <op>" to the
/// widest value, and the display border takes one cell on each side.
pub const COLUMN_WIDTH: u16 = MAX_VALUE_WIDTH + 2 + 2;

/// Screen regions of the calculator window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Display panel
    pub display: Rect,
    /// Clickable keypad
    pub keypad: Rect,
    /// One-line hint
    pub footer: Rect,
}

/// Splits the screen into display, keypad and footer.
///
/// Both rendering and click hit-testing go through this function, so they
/// always agree on where the keypad is.
#[must_use]
pub fn layout(area: Rect) -> AppLayout {
    let column = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Length(COLUMN_WIDTH), Constraint::Min(0)])
        .split(area)[0];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Display
            Constraint::Length(12), // Keypad: 5 rows x 2 + border
            Constraint::Length(1),  // Footer
            Constraint::Min(0),
        ])
        .split(column);

    AppLayout {
        display: rows[0],
        keypad: rows[1],
        footer: rows[2],
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    /// Renders the display panel: pending operation above the value
    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let pending = self
            .app
            .pending()
            .map(|p| p.to_string())
            .unwrap_or_default();

        let lines = vec![
            Line::from(Span::styled(pending, Style::default().fg(Color::DarkGray))),
            Line::from(Span::styled(
                self.app.display(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(
            FOOTER_HINT,
            Style::default().fg(Color::DarkGray),
        ))
        .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let regions = layout(area);
        self.render_display(regions.display, buf);
        KeypadWidget::new(self.app.keypad()).render(regions.keypad, buf);
        self.render_footer(regions.footer, buf);
    }
}
