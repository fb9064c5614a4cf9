use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::Result;
use crate::model::Task;

use super::input::InputEdit;
use super::state::{Effect, Mode, ModeEvent, transition};

/// Rows taken by the banner (6) and the clock line (1).
pub const BANNER_HEIGHT: u16 = 7;
pub const FOOTER_HEIGHT: u16 = 1;
pub const INPUT_HEIGHT: u16 = 1;
pub const MIN_LIST_HEIGHT: u16 = 4;

/// Visible list rows for a terminal of `total_height` rows.
pub fn list_height(total_height: u16, input_visible: bool) -> u16 {
    let input = if input_visible { INPUT_HEIGHT } else { 0 };
    total_height
        .saturating_sub(BANNER_HEIGHT + FOOTER_HEIGHT + input)
        .max(MIN_LIST_HEIGHT)
}

fn contains_all_tokens(candidate: &str, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }

    let normalized = candidate.to_lowercase();
    tokens.iter().all(|token| normalized.contains(token))
}

#[derive(Debug, Clone)]
pub struct TaskListApp {
    pub(crate) mode: Mode,
    pub(crate) tasks: Vec<Task>,
    pub(crate) query: String,
    pub(crate) filtering: bool,
    pub(crate) selected: usize,
    pub(crate) height: u16,
    pub(crate) list_height: u16,
    pub(crate) status: Option<String>,
}

impl TaskListApp {
    pub fn new(height: u16) -> Self {
        Self {
            mode: Mode::Listing,
            tasks: Vec::new(),
            query: String::new(),
            filtering: false,
            selected: 0,
            height,
            list_height: list_height(height, false),
            status: None,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Track a terminal resize; only the height matters for the list.
    pub fn resize(&mut self, height: u16) {
        self.height = height;
        self.recompute_list_height();
    }

    fn recompute_list_height(&mut self) {
        self.list_height = list_height(self.height, self.mode.shows_input());
    }

    /// Indices into `tasks` that pass the current filter, in list order.
    pub fn visible_indices(&self) -> Vec<usize> {
        let tokens: Vec<String> = self
            .query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| contains_all_tokens(&task.text, &tokens))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_indices()
            .get(self.selected)
            .and_then(|&idx| self.tasks.get(idx))
    }

    fn normalize_selection(&mut self) {
        let len = self.visible_indices().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible_indices().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        if delta.is_negative() {
            self.selected = self.selected.saturating_sub(delta.unsigned_abs());
        } else {
            self.selected = self
                .selected
                .saturating_add(delta as usize)
                .min(len - 1);
        }
    }

    /// Replace the displayed list with a fresh read.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.normalize_selection();
    }

    /// Apply the outcome of a mutation and the reload that followed it.
    ///
    /// A failed reload keeps the previous list; any error becomes the status
    /// line for the next frame.
    pub fn finish_mutation(&mut self, outcome: Result<()>, reload: Result<Vec<Task>>) {
        let mut problems = Vec::new();
        if let Err(err) = outcome {
            problems.push(err.to_string());
        }
        match reload {
            Ok(tasks) => self.set_tasks(tasks),
            Err(err) => problems.push(format!("reload failed: {err}")),
        }
        self.status = (!problems.is_empty()).then(|| problems.join("; "));
    }

    /// Handle one key press. Returns an effect for the caller to run.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        self.status = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.dispatch(ModeEvent::Quit);
        }

        let event = match self.mode {
            Mode::Listing if self.filtering => {
                self.handle_filter_key(key);
                return None;
            }
            Mode::Listing => match key.code {
                KeyCode::Char('q') => ModeEvent::Quit,
                KeyCode::Char('t') => ModeEvent::ToggleSelected,
                KeyCode::Char('d') => ModeEvent::DeleteSelected,
                KeyCode::Char('a') => ModeEvent::BeginAdd,
                KeyCode::Char('e') => ModeEvent::BeginEdit,
                _ => {
                    self.handle_navigation_key(key);
                    return None;
                }
            },
            Mode::Adding { .. } | Mode::Editing { .. } => match key.code {
                KeyCode::Esc => ModeEvent::Cancel,
                KeyCode::Enter => ModeEvent::Confirm,
                KeyCode::Backspace => ModeEvent::Input(InputEdit::Backspace),
                KeyCode::Delete => ModeEvent::Input(InputEdit::Delete),
                KeyCode::Left => ModeEvent::Input(InputEdit::Left),
                KeyCode::Right => ModeEvent::Input(InputEdit::Right),
                KeyCode::Home => ModeEvent::Input(InputEdit::Home),
                KeyCode::End => ModeEvent::Input(InputEdit::End),
                KeyCode::Char(ch)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    ModeEvent::Input(InputEdit::Insert(ch))
                }
                _ => return None,
            },
        };

        self.dispatch(event)
    }

    fn dispatch(&mut self, event: ModeEvent) -> Option<Effect> {
        let mode = std::mem::take(&mut self.mode);
        let (next, effect) = transition(mode, event, self.selected_task());
        self.mode = next;
        self.recompute_list_height();
        effect
    }

    fn handle_navigation_key(&mut self, key: KeyEvent) {
        let page = self.list_height.max(1) as isize;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.visible_indices().len().saturating_sub(1);
            }
            KeyCode::PageUp => self.move_selection(-page),
            KeyCode::PageDown => self.move_selection(page),
            KeyCode::Char('/') => self.filtering = true,
            KeyCode::Esc => {
                self.query.clear();
                self.normalize_selection();
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.filtering = false,
            KeyCode::Esc => {
                self.filtering = false;
                self.query.clear();
            }
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.query.push(ch);
                self.selected = 0;
            }
            _ => {}
        }
        self.normalize_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TizumError;
    use crate::tui::input::CHAR_LIMIT;
    use chrono::Utc;

    fn task(id: i64, text: &str) -> Task {
        Task {
            id,
            text: text.to_string(),
            created_at: Utc::now(),
            done: false,
        }
    }

    fn app_with_tasks() -> TaskListApp {
        let mut app = TaskListApp::new(30);
        app.set_tasks(vec![
            task(1, "Buy milk"),
            task(2, "Write report"),
            task(3, "buy stamps"),
        ]);
        app
    }

    fn press(app: &mut TaskListApp, code: KeyCode) -> Option<Effect> {
        app.handle_key(KeyEvent::from(code))
    }

    fn type_text(app: &mut TaskListApp, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn list_height_subtracts_chrome_and_floors() {
        assert_eq!(list_height(30, false), 22);
        assert_eq!(list_height(30, true), 21);
        assert_eq!(list_height(10, false), MIN_LIST_HEIGHT);
        assert_eq!(list_height(0, true), MIN_LIST_HEIGHT);
    }

    #[test]
    fn entering_add_mode_shrinks_list() {
        let mut app = app_with_tasks();
        assert_eq!(app.list_height, 22);
        press(&mut app, KeyCode::Char('a'));
        assert!(matches!(app.mode(), Mode::Adding { .. }));
        assert_eq!(app.list_height, 21);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.list_height, 22);
    }

    #[test]
    fn resize_recomputes_height() {
        let mut app = app_with_tasks();
        app.resize(12);
        assert_eq!(app.list_height, MIN_LIST_HEIGHT);
        app.resize(50);
        assert_eq!(app.list_height, 42);
    }

    #[test]
    fn navigation_clamps_to_list() {
        let mut app = app_with_tasks();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn toggle_uses_highlighted_task() {
        let mut app = app_with_tasks();
        press(&mut app, KeyCode::Down);
        assert_eq!(
            press(&mut app, KeyCode::Char('t')),
            Some(Effect::Toggle { id: 2, done: true })
        );
    }

    #[test]
    fn filter_narrows_and_retargets_selection() {
        let mut app = app_with_tasks();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "BUY");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.visible_indices(), vec![0, 2]);
        press(&mut app, KeyCode::Down);
        assert_eq!(
            press(&mut app, KeyCode::Char('d')),
            Some(Effect::Delete { id: 3 })
        );

        press(&mut app, KeyCode::Esc);
        assert!(app.query.is_empty());
        assert_eq!(app.visible_indices().len(), 3);
    }

    #[test]
    fn filter_mode_swallows_action_keys() {
        let mut app = app_with_tasks();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(press(&mut app, KeyCode::Char('q')), None);
        assert_eq!(press(&mut app, KeyCode::Char('d')), None);
        assert_eq!(app.query, "qd");
        assert!(app.visible_indices().is_empty());
        assert_eq!(app.selected_task(), None);
    }

    #[test]
    fn add_flow_emits_create() {
        let mut app = app_with_tasks();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "quit smoking");
        assert!(matches!(app.mode(), Mode::Adding { .. }));
        assert_eq!(
            press(&mut app, KeyCode::Enter),
            Some(Effect::Create {
                text: "quit smoking".into()
            })
        );
        assert_eq!(app.mode(), &Mode::Listing);
    }

    #[test]
    fn edit_flow_emits_edit_for_remembered_id() {
        let mut app = app_with_tasks();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "s");
        assert_eq!(
            press(&mut app, KeyCode::Enter),
            Some(Effect::Edit {
                id: 2,
                text: "Write reports".into()
            })
        );
    }

    #[test]
    fn editing_overlong_task_without_changes_keeps_full_text() {
        let long = "x".repeat(CHAR_LIMIT + 100);
        let mut app = TaskListApp::new(30);
        app.set_tasks(vec![task(4, &long)]);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(
            press(&mut app, KeyCode::Enter),
            Some(Effect::Edit { id: 4, text: long })
        );
    }

    #[test]
    fn q_quits_only_from_listing() {
        let mut app = app_with_tasks();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(press(&mut app, KeyCode::Char('q')), None);
        press(&mut app, KeyCode::Esc);
        assert_eq!(press(&mut app, KeyCode::Char('q')), Some(Effect::Quit));
    }

    #[test]
    fn ctrl_c_quits_while_typing() {
        let mut app = app_with_tasks();
        press(&mut app, KeyCode::Char('a'));
        let effect = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(effect, Some(Effect::Quit));
    }

    #[test]
    fn failed_mutation_sets_status_and_reloads() {
        let mut app = app_with_tasks();
        app.finish_mutation(
            Err(TizumError::Validation("task text must not be empty".into())),
            Ok(vec![task(1, "Buy milk")]),
        );
        assert_eq!(app.status(), Some("task text must not be empty"));
        assert_eq!(app.tasks.len(), 1);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.status(), None);
    }

    #[test]
    fn failed_reload_keeps_previous_list() {
        let mut app = app_with_tasks();
        app.finish_mutation(
            Ok(()),
            Err(TizumError::StorageRead(rusqlite::Error::InvalidQuery)),
        );
        assert_eq!(app.tasks.len(), 3);
        assert!(app.status().unwrap().starts_with("reload failed"));
    }

    #[test]
    fn reload_clamps_selection_after_delete() {
        let mut app = app_with_tasks();
        press(&mut app, KeyCode::End);
        app.finish_mutation(Ok(()), Ok(vec![task(1, "Buy milk"), task(2, "Write report")]));
        assert_eq!(app.selected, 1);
        assert_eq!(app.status(), None);
    }
}
