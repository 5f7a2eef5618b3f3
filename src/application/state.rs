//! Application state management for the terminal calculator.
//!
//! [`App`] holds the current expression, the last confirmed result, the
//! history and the UI mode. It routes classified tokens into the expression
//! builder and decides what the preview and submit paths show.

use crate::domain::{
    classify, evaluate, Command, Evaluation, Expression, History, Theme, Token,
};
use crate::infrastructure::{PersistenceError, Settings, SettingsRepository};
use tracing::{debug, info, warn};

/// Shown in place of a result when a submitted expression fails.
pub const ERROR_DISPLAY: &str = "Error";

/// Default file name offered by the CSV export prompt.
pub const DEFAULT_EXPORT_FILENAME: &str = "history.csv";

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which UI elements
/// are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Calculator input - keys feed the expression builder
    Normal,
    /// History panel has focus - arrow keys move the selection
    History,
    /// Help screen is displayed
    Help,
    /// CSV export dialog is open
    ExportCsv,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use tcalc::application::App;
///
/// let mut app = App::default();
/// for key in ["2", "(", "3", "+", "4", ")"] {
///     app.press(key);
/// }
/// assert_eq!(app.expression.as_str(), "2*(3+4)");
/// assert_eq!(app.preview(), "21");
///
/// app.press("=");
/// assert_eq!(app.result, "21");
/// assert_eq!(app.history.len(), 1);
/// ```
#[derive(Debug)]
pub struct App {
    /// The expression being built
    pub expression: Expression,
    /// Last confirmed result
    pub result: String,
    /// Past calculations, most recent first
    pub history: History,
    /// Current application mode
    pub mode: AppMode,
    /// Active colour scheme
    pub theme: Theme,
    /// Selected row in the history panel
    pub history_selection: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Cursor position within the filename buffer
    pub cursor_position: usize,
    /// Where theme changes are saved, if anywhere
    pub settings_repository: Option<SettingsRepository>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            expression: Expression::new(),
            result: "0".to_string(),
            history: History::default(),
            mode: AppMode::Normal,
            theme: Theme::default(),
            history_selection: 0,
            help_scroll: 0,
            status_message: None,
            filename_input: String::new(),
            cursor_position: 0,
            settings_repository: None,
        }
    }
}

impl App {
    /// Creates an application using stored settings; theme changes are
    /// written back through `repository`.
    pub fn with_settings(settings: Settings, repository: SettingsRepository) -> Self {
        Self {
            theme: settings.theme,
            settings_repository: Some(repository),
            ..Self::default()
        }
    }

    /// Feeds one keypad label or key name into the calculator.
    ///
    /// Inputs outside the calculator alphabet are ignored.
    pub fn press(&mut self, raw: &str) {
        match classify(raw) {
            Ok(token) => self.apply_token(token),
            Err(rejected) => debug!(%rejected, "input ignored"),
        }
    }

    /// Applies a classified token.
    pub fn apply_token(&mut self, token: Token) {
        match token {
            Token::Command(Command::Clear) => {
                self.expression = self.expression.apply(token);
                self.result = "0".to_string();
            }
            Token::Command(Command::Submit) => self.submit(),
            _ => {
                let next = self.expression.apply(token);
                if next == self.expression {
                    debug!(?token, expression = %self.expression, "token had no effect");
                }
                self.expression = next;
            }
        }
    }

    /// Evaluates the expression, confirming the result and recording history.
    ///
    /// A failure shows [`ERROR_DISPLAY`] and records nothing. An expression
    /// with nothing to compute changes nothing.
    pub fn submit(&mut self) {
        match evaluate(self.expression.as_str()) {
            Ok(Evaluation::Value(number)) => {
                let expression = self.expression.as_str().trim();
                self.result = number.to_string();
                info!(expression, result = %self.result, "submitted");
                self.history.record(expression, self.result.clone());
            }
            Ok(Evaluation::Empty) => {}
            Err(error) => {
                warn!(expression = %self.expression, %error, "submit failed");
                self.result = ERROR_DISPLAY.to_string();
            }
        }
    }

    /// The value to show for the current expression.
    ///
    /// Falls back to the last confirmed result when the expression does not
    /// evaluate.
    pub fn preview(&self) -> String {
        match evaluate(self.expression.as_str()) {
            Ok(Evaluation::Value(number)) => number.to_string(),
            Ok(Evaluation::Empty) => "0".to_string(),
            Err(_) => self.result.clone(),
        }
    }

    /// Replaces the expression with a copy of a history entry's expression.
    pub fn reuse_history(&mut self, index: usize) {
        if let Some(entry) = self.history.get(index) {
            self.expression = Expression::from_text(entry.expression());
            debug!(expression = %self.expression, "reused history entry");
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.history_selection = 0;
        if self.mode == AppMode::History {
            self.mode = AppMode::Normal;
        }
        info!("history cleared");
        self.status_message = Some("History cleared".to_string());
    }

    /// Moves focus to the history panel; does nothing when it is empty.
    pub fn start_history_browse(&mut self) {
        if self.history.is_empty() {
            self.status_message = Some("No calculations yet".to_string());
            return;
        }
        self.mode = AppMode::History;
        self.history_selection = 0;
        self.status_message = None;
    }

    pub fn finish_history_browse(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn select_next_history(&mut self) {
        if self.history_selection + 1 < self.history.len() {
            self.history_selection += 1;
        }
    }

    pub fn select_previous_history(&mut self) {
        self.history_selection = self.history_selection.saturating_sub(1);
    }

    /// Reuses the selected entry and returns focus to the keypad.
    pub fn reuse_selected_history(&mut self) {
        self.reuse_history(self.history_selection);
        self.mode = AppMode::Normal;
    }

    /// Switches between light and dark themes and saves the choice.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        info!(theme = self.theme.label(), "theme changed");

        let Some(repository) = &self.settings_repository else {
            return;
        };
        let settings = Settings { theme: self.theme };
        if let Err(error) = repository.save(&settings) {
            warn!(%error, path = %repository.path().display(), "could not save settings");
            self.status_message = Some(format!("Could not save theme: {}", error));
        }
    }

    /// Processes the result of copying the displayed value.
    pub fn set_copy_result(&mut self, result: Result<(), String>) {
        self.status_message = Some(match result {
            Ok(()) => format!("Copied {}", self.preview()),
            Err(error) => error,
        });
    }

    /// Switches to CSV export mode to prompt for a filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = DEFAULT_EXPORT_FILENAME.to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Returns the filename input, or the default when it is empty.
    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            DEFAULT_EXPORT_FILENAME.to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of a CSV export and returns to normal mode.
    pub fn set_csv_export_result(&mut self, result: Result<String, PersistenceError>) {
        match result {
            Ok(filename) => {
                info!(%filename, "history exported");
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(error) => {
                warn!(%error, "history export failed");
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }

        self.cancel_filename_input();
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }
}
