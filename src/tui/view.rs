use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::model::Task;
use crate::output::BANNER;

use super::app::{BANNER_HEIGHT, FOOTER_HEIGHT, INPUT_HEIGHT, TaskListApp};
use super::state::Mode;

const ACCENT: Color = Color::Indexed(63);
const MUTED: Color = Color::Indexed(241);
const DONE: Color = Color::Indexed(240);
const HIGHLIGHT_SYMBOL: &str = "› ";
const CLOCK_FORMAT: &str = "%a, %b %-d %Y · %H:%M";

const LISTING_KEYS: &str =
    "↑/k up • ↓/j down • / filter • t toggle • d delete • a add • e edit • q quit";
const FILTER_KEYS: &str = "type to filter • enter keep • esc clear";
const INPUT_KEYS: &str = "enter save • esc cancel";

/// Cut `value` to at most `max_chars` chars, marking the cut with `…`.
fn truncate_display(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut output: String = value.chars().take(max_chars - 1).collect();
    output.push('…');
    output
}

fn row_style(task: &Task, highlighted: bool) -> Style {
    match (highlighted, task.done) {
        (true, true) => Style::default()
            .fg(ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::CROSSED_OUT),
        (true, false) => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(DONE),
        (false, false) => Style::default(),
    }
}

/// Checkbox and text on the left, creation date flush right.
fn task_line(task: &Task, width: usize, highlighted: bool) -> Line<'static> {
    let date = task.created_display();
    let date_width = date.chars().count();
    let left_width = width.saturating_sub(date_width + 1).max(1);
    let left = truncate_display(&format!("{} {}", task.checkbox(), task.text), left_width);
    let pad = width.saturating_sub(left.chars().count() + date_width);

    Line::from(vec![
        Span::styled(left, row_style(task, highlighted)),
        Span::raw(" ".repeat(pad)),
        Span::styled(date, Style::default().fg(MUTED)),
    ])
}

fn footer_text(app: &TaskListApp) -> &'static str {
    match app.mode() {
        Mode::Listing if app.filtering => FILTER_KEYS,
        Mode::Listing => LISTING_KEYS,
        Mode::Adding { .. } | Mode::Editing { .. } => INPUT_KEYS,
    }
}

pub fn render(app: &TaskListApp, frame: &mut Frame) {
    let input_height = if app.mode().shows_input() {
        INPUT_HEIGHT
    } else {
        0
    };
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BANNER_HEIGHT - 1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
            Constraint::Length(input_height),
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(BANNER)
            .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
            .centered(),
        outer[0],
    );
    frame.render_widget(
        Paragraph::new(Local::now().format(CLOCK_FORMAT).to_string())
            .style(Style::default().fg(MUTED))
            .right_aligned(),
        outer[1],
    );

    render_list(app, frame, outer[2]);

    let footer = match app.status() {
        Some(status) => Paragraph::new(format!("! {status}"))
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        None => Paragraph::new(footer_text(app)).style(Style::default().fg(MUTED)),
    };
    frame.render_widget(footer.centered(), outer[3]);

    if input_height > 0 {
        render_input(app, frame, outer[4]);
    }
}

fn render_list(app: &TaskListApp, frame: &mut Frame, area: Rect) {
    let area = if app.filtering || !app.query.is_empty() {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);
        let line = Line::from(vec![
            Span::styled(" Filter: ", Style::default().fg(MUTED)),
            Span::raw(app.query.as_str()),
        ]);
        frame.render_widget(Paragraph::new(line), parts[0]);
        if app.filtering {
            let x = parts[0].x + 9 + app.query.chars().count() as u16;
            frame.set_cursor_position((x.min(parts[0].right().saturating_sub(1)), parts[0].y));
        }
        parts[1]
    } else {
        area
    };

    let visible = app.visible_indices();
    if visible.is_empty() {
        let message = if app.query.is_empty() {
            "  No tasks yet. Press a to add one.".to_string()
        } else {
            format!("  No tasks match {:?}", app.query)
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(MUTED)),
            area,
        );
        return;
    }

    let width = area.width.saturating_sub(HIGHLIGHT_SYMBOL.chars().count() as u16) as usize;
    let items = visible
        .iter()
        .enumerate()
        .map(|(row, &idx)| ListItem::new(task_line(&app.tasks[idx], width, row == app.selected)))
        .collect::<Vec<_>>();

    let mut state = ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(
        List::new(items).highlight_symbol(HIGHLIGHT_SYMBOL),
        area,
        &mut state,
    );
}

fn render_input(app: &TaskListApp, frame: &mut Frame, area: Rect) {
    let Some(buffer) = app.mode().buffer() else {
        return;
    };
    let prefix = match app.mode() {
        Mode::Editing { .. } => " Edit: ",
        _ => " New task: ",
    };
    let prefix_width = prefix.chars().count() as u16;

    // Scroll horizontally so the cursor stays on screen.
    let room = area.width.saturating_sub(prefix_width + 1) as usize;
    let before = buffer.before_cursor().chars().count();
    let skip = before.saturating_sub(room);
    let shown: String = buffer.value().chars().skip(skip).collect();

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(prefix, Style::default().fg(MUTED)),
            Span::raw(shown),
        ])),
        area,
    );
    frame.set_cursor_position((area.x + prefix_width + (before - skip) as u16, area.y));
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};
    use crossterm::event::{KeyCode, KeyEvent};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::error::TizumError;

    fn task(id: i64, text: &str, done: bool) -> Task {
        Task {
            id,
            text: text.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).single().unwrap(),
            done,
        }
    }

    fn draw(app: &TaskListApp, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> TaskListApp {
        let mut app = TaskListApp::new(24);
        app.set_tasks(vec![task(1, "buy milk", false), task(2, "call mom", true)]);
        app
    }

    #[test]
    fn truncate_display_marks_cut() {
        assert_eq!(truncate_display("short", 10), "short");
        assert_eq!(truncate_display("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_display("abc", 0), "");
    }

    #[test]
    fn task_line_right_aligns_date() {
        let t = task(1, "buy milk", false);
        let line = task_line(&t, 40, false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text.chars().count(), 40);
        assert!(text.starts_with("[ ] buy milk"));
        assert!(text.ends_with(&t.created_display()));
    }

    #[test]
    fn task_line_truncates_long_text() {
        let t = task(1, &"x".repeat(200), false);
        let line = task_line(&t, 30, false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text.chars().count(), 30);
        assert!(text.contains('…'));
    }

    #[test]
    fn render_shows_tasks_and_keys() {
        let screen = draw(&app(), 100, 24);
        assert!(screen.contains("[ ] buy milk"));
        assert!(screen.contains("[x] call mom"));
        assert!(screen.contains("t toggle"));
        assert!(!screen.contains("New task:"));
    }

    #[test]
    fn render_shows_input_bar_while_adding() {
        let mut app = app();
        app.handle_key(KeyEvent::from(KeyCode::Char('a')));
        for ch in "walk dog".chars() {
            app.handle_key(KeyEvent::from(KeyCode::Char(ch)));
        }
        let screen = draw(&app, 100, 24);
        assert!(screen.contains("New task: walk dog"));
        assert!(screen.contains("enter save"));
    }

    #[test]
    fn render_shows_status_message() {
        let mut app = app();
        app.finish_mutation(
            Err(TizumError::Validation("task text must not be empty".into())),
            Ok(vec![task(1, "buy milk", false)]),
        );
        let screen = draw(&app, 100, 24);
        assert!(screen.contains("! task text must not be empty"));
    }

    #[test]
    fn render_empty_and_filtered_states() {
        let empty = TaskListApp::new(24);
        assert!(draw(&empty, 80, 24).contains("No tasks yet"));

        let mut app = app();
        app.query = "zzz".into();
        let screen = draw(&app, 80, 24);
        assert!(screen.contains("Filter: zzz"));
        assert!(screen.contains("No tasks match"));
    }

    #[test]
    fn render_survives_tiny_terminal() {
        draw(&app(), 10, 5);
    }
}
