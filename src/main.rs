//! tcalc - Terminal Calculator
//!
//! A keypad calculator for the terminal. Expressions are built one key at a
//! time, evaluated live, and kept in a short history.

use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tcalc::application::{App, AppMode};
use tcalc::infrastructure::{init_logging, SettingsRepository};
use tcalc::presentation::{render_ui, InputHandler};
use tracing::{info, warn};

/// Entry point for the tcalc terminal calculator.
///
/// Loads settings, sets up the terminal interface and runs the event loop
/// until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_path = init_logging()?;
    info!(?log_path, "tcalc starting");

    let mut app = load_app();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    info!("tcalc exiting");
    Ok(())
}

/// Builds the application from stored settings, falling back to defaults.
fn load_app() -> App {
    let repository = match SettingsRepository::from_env() {
        Ok(repository) => repository,
        Err(error) => {
            warn!(%error, "settings unavailable, theme will not be saved");
            return App::default();
        }
    };

    match repository.load() {
        Ok(settings) => App::with_settings(settings, repository),
        Err(error) => {
            warn!(%error, path = %repository.path().display(), "could not load settings, using defaults");
            App::with_settings(Default::default(), repository)
        }
    }
}

/// Main application event loop.
///
/// Continues running until the user presses 'q' in normal mode or Ctrl+C.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
