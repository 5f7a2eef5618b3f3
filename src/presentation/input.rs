use crate::application::{App, AppMode};
use crate::infrastructure::{copy_to_clipboard, CsvExporter};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::History => Self::handle_history_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportCsv => Self::handle_filename_input_mode(app, key),
        }
    }

    /// The name the token classifier knows a key by.
    pub fn key_name(key: KeyCode) -> Option<String> {
        match key {
            KeyCode::Char(c) => Some(c.to_string()),
            KeyCode::Enter => Some("Enter".to_string()),
            KeyCode::Backspace => Some("Backspace".to_string()),
            KeyCode::Esc => Some("Escape".to_string()),
            _ => None,
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('t') => app.toggle_theme(),
                KeyCode::Char('l') => app.clear_history(),
                KeyCode::Char('y') => {
                    let result = copy_to_clipboard(&app.preview());
                    app.set_copy_result(result);
                }
                KeyCode::Char('e') => app.start_csv_export(),
                _ => {}
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Tab => app.start_history_browse(),
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            _ => {
                if let Some(name) = Self::key_name(key) {
                    app.press(&name);
                }
            }
        }
    }

    fn handle_history_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('l') {
            app.clear_history();
            return;
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous_history(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next_history(),
            KeyCode::Enter => app.reuse_selected_history(),
            KeyCode::Tab | KeyCode::Esc => app.finish_history_browse(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_csv_export_filename();
                let result = CsvExporter::export_history(&app.history, &filename);
                app.set_csv_export_result(result);
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.filename_input.remove(app.cursor_position - 1);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.len() {
                    app.filename_input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                app.cursor_position = app.cursor_position.saturating_sub(1);
            }
            KeyCode::Right => {
                if app.cursor_position < app.filename_input.len() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.len();
            }
            KeyCode::Char(c) if c.is_ascii() => {
                app.filename_input.insert(app.cursor_position, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }
}
