//! Pocket calculator binary
//!
//! ```bash
//! pocket-calc                     # Open the terminal calculator
//! pocket-calc --press "1/3="      # Replay button presses, print the display
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::io;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pocket_calc::{
    cli::Cli,
    config::CalculatorConfig,
    driver::{CalculatorDriver, ModelDriver},
    error::AppResult,
    logging::{self, FallbackSink},
    tui::{render, CalculatorApp, InputHandler},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::info;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = cli.calculator_config()?;

    match cli.press.as_deref() {
        Some(labels) => {
            logging::init(&cli.log_level, cli.log_file.as_deref(), FallbackSink::Stderr)?;
            replay(config, labels)
        }
        None => {
            logging::init(&cli.log_level, cli.log_file.as_deref(), FallbackSink::Discard)?;
            run_tui(config)
        }
    }
}

/// Presses the given labels on a fresh model and prints the display
fn replay(config: CalculatorConfig, labels: &str) -> AppResult<()> {
    let mut driver = ModelDriver::with_config(config);
    driver.press_sequence(labels)?;
    println!("{}", driver.display());
    Ok(())
}

fn run_tui(config: CalculatorConfig) -> AppResult<()> {
    enable_raw_mode()?;
    with_terminal_restored(
        || {
            let mut terminal = open_terminal()?;
            info!(division_scale = config.division_scale, "calculator window opened");
            run_app(&mut terminal, CalculatorApp::with_config(config))
        },
        restore_terminal,
    )
}

/// Runs `session`, then `restore` whether or not the session failed.
/// The session's error wins over the restore error.
fn with_terminal_restored<T>(
    session: impl FnOnce() -> AppResult<T>,
    restore: impl FnOnce() -> AppResult<()>,
) -> AppResult<T> {
    let result = session();
    let restored = restore();
    result.and_then(|value| restored.map(|()| value))
}

fn open_terminal() -> AppResult<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Leaves raw mode and the alternate screen. Every step is attempted.
fn restore_terminal() -> AppResult<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
    Ok(raw.and(screen)?)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: CalculatorApp,
) -> AppResult<()> {
    let input_handler = InputHandler::new();
    let mut screen = Rect::default();

    while !app.should_quit() {
        terminal.draw(|f| {
            screen = f.area();
            render(&app, f);
        })?;

        let action = input_handler.handle_event(&event::read()?);
        app.handle_action(action, screen);
    }

    info!("calculator window closed");
    Ok(())
}
