use crate::application::{App, AppMode};
use crate::domain::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

/// Keypad labels, row by row. Each label is fed to the classifier unchanged.
pub const KEYPAD_LABELS: [[&str; 4]; 5] = [
    ["C", "⌫", "%", "/"],
    ["7", "8", "9", "*"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "+"],
    ["(", "0", ")", "="],
];

struct Palette {
    background: Color,
    foreground: Color,
    accent: Color,
    operator: Color,
    muted: Color,
    selection: Style,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            background: Color::Black,
            foreground: Color::White,
            accent: Color::Cyan,
            operator: Color::Yellow,
            muted: Color::DarkGray,
            selection: Style::default().bg(Color::Blue).fg(Color::White),
        },
        Theme::Light => Palette {
            background: Color::White,
            foreground: Color::Black,
            accent: Color::Blue,
            operator: Color::Magenta,
            muted: Color::Gray,
            selection: Style::default().bg(Color::LightBlue).fg(Color::Black),
        },
    }
}

pub fn render_ui(f: &mut Frame, app: &App) {
    let colors = palette(app.theme);
    let base = Style::default().bg(colors.background).fg(colors.foreground);
    f.render_widget(Block::default().style(base), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let calculator = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(body[0]);

    render_header(f, app, &colors, chunks[0]);
    render_display(f, app, &colors, calculator[0]);
    render_keypad(f, &colors, calculator[1]);
    render_history(f, app, &colors, body[1]);
    render_status_bar(f, app, &colors, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, &colors, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let header = Paragraph::new(format!(
        "tcalc - Terminal Calculator | Theme: {}",
        app.theme.label()
    ))
    .style(Style::default().fg(colors.accent));
    f.render_widget(header, area);
}

fn render_display(f: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let expression = if app.expression.is_empty() {
        "0".to_string()
    } else {
        app.expression.to_string()
    };

    let lines = vec![
        Line::from(expression).style(Style::default().fg(colors.muted)),
        Line::from(app.preview()).style(
            Style::default()
                .fg(colors.foreground)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let display = Paragraph::new(lines)
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).title("Display"));
    f.render_widget(display, area);
}

fn render_keypad(f: &mut Frame, colors: &Palette, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Keypad");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(inner);

    for (labels, row_area) in KEYPAD_LABELS.iter().zip(rows.iter()) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(*row_area);

        for (label, key_area) in labels.iter().zip(cols.iter()) {
            let style = match *label {
                "=" => colors.selection,
                "C" | "⌫" => Style::default().fg(colors.accent),
                "+" | "-" | "*" | "/" | "%" => Style::default().fg(colors.operator),
                _ => Style::default().fg(colors.foreground),
            };
            let key = Paragraph::new(*label)
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(key, *key_area);
        }
    }
}

fn render_history(f: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let focused = matches!(app.mode, AppMode::History);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("History ({})", app.history.len()))
        .border_style(if focused {
            Style::default().fg(colors.accent)
        } else {
            Style::default()
        });

    if app.history.is_empty() {
        let empty = Paragraph::new("No calculations yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(colors.muted))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let visible_rows = area.height.saturating_sub(2) as usize;
    let skip = if focused && app.history_selection >= visible_rows {
        app.history_selection + 1 - visible_rows
    } else {
        0
    };

    let rows: Vec<Row> = app
        .history
        .list()
        .enumerate()
        .skip(skip)
        .take(visible_rows)
        .map(|(index, entry)| {
            let style = if focused && index == app.history_selection {
                colors.selection
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(entry.expression().to_string()),
                Cell::from(format!("= {}", entry.result())),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Enter/=: evaluate | Esc: clear | Tab: history | Ctrl+T: theme | Ctrl+Y: copy | Ctrl+E: export | F1/?: help | q: quit".to_string()
            }
        }
        AppMode::History => {
            "↑↓/jk: select | Enter: reuse | Ctrl+L: clear history | Tab/Esc: back".to_string()
        }
        AppMode::Help => {
            "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string()
        }
        AppMode::ExportCsv => format!(
            "Export history as: {} (Enter to export, Esc to cancel)",
            app.filename_input
        ),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::History => Style::default().fg(colors.accent),
            AppMode::Help => Style::default().fg(colors.accent),
            AppMode::ExportCsv => Style::default().fg(colors.operator),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, colors: &Palette, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "tcalc Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(colors.accent)),
        )
        .style(Style::default().bg(colors.background).fg(colors.foreground));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"TCALC REFERENCE

=== INPUT ===
0-9             Digits
.               Decimal point (one per number); a bare "." becomes "0."
+ - * / %       Operators; a second operator replaces the first
( )             Parentheses; "(" after a number or ")" inserts "*",
                as does a number typed right after ")"
-               A leading minus starts a negative number

=== EVALUATION ===
Enter or =      Evaluate and add the result to history
Esc or C        Clear the expression
Backspace       Delete the last character
                Missing ")" are closed automatically
                Trailing operators, dots and "(" are ignored
                * / % bind tighter than + -
                % is the remainder and keeps the sign of the left side
                Results are rounded to 10 decimal places

=== HISTORY ===
Tab             Focus the history panel
↑↓ or j/k       Select an entry
Enter           Copy the entry's expression into the calculator
Tab/Esc         Return to the keypad
Ctrl+L          Clear history
                The last 20 calculations are kept, newest first

=== OTHER SHORTCUTS ===
Ctrl+T          Toggle light/dark theme (saved between runs)
Ctrl+Y          Copy the displayed result to the clipboard
Ctrl+E          Export history to a CSV file
F1 or ?         Show this help
q or Ctrl+C     Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classify;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_keypad_labels_are_accepted() {
        for label in KEYPAD_LABELS.iter().flatten() {
            assert!(classify(label).is_ok(), "keypad label {:?} rejected", label);
        }
    }

    #[test]
    fn test_empty_history_message() {
        let app = App::default();
        let screen = render_to_string(&app);
        assert!(screen.contains("No calculations yet"));
        assert!(screen.contains("History (0)"));
    }

    #[test]
    fn test_display_shows_expression_and_preview() {
        let mut app = App::default();
        for key in ["1", "2", "*", "3"] {
            app.press(key);
        }
        let screen = render_to_string(&app);
        assert!(screen.contains("12*3"));
        assert!(screen.contains("36"));
    }

    #[test]
    fn test_history_rows_rendered() {
        let mut app = App::default();
        for key in ["9", "-", "4", "="] {
            app.press(key);
        }
        let screen = render_to_string(&app);
        assert!(screen.contains("History (1)"));
        assert!(screen.contains("= 5"));
    }

    #[test]
    fn test_help_popup_rendered() {
        let mut app = App::default();
        app.mode = AppMode::Help;
        let screen = render_to_string(&app);
        assert!(screen.contains("tcalc Help"));
    }

    #[test]
    fn test_help_text_mentions_every_shortcut() {
        let text = get_help_text();
        for shortcut in ["Ctrl+T", "Ctrl+Y", "Ctrl+E", "Ctrl+L", "Tab"] {
            assert!(text.contains(shortcut), "help is missing {}", shortcut);
        }
    }
}
