//! Interactive full-screen task list.

pub mod app;
pub mod input;
pub mod state;
mod view;

use std::io;
use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{info, warn};

use crate::error::Result;
use crate::service::TaskService;

use app::TaskListApp;
use state::Effect;

/// Redraw at least this often so the clock stays current.
const TICK_RATE: Duration = Duration::from_secs(1);

pub fn run(service: &TaskService) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (_, height) = terminal::size()?;
    let mut app = TaskListApp::new(height);
    info!("tui started");
    let run_result = run_loop(&mut terminal, &mut app, service);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("tui stopped");

    run_result
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut TaskListApp,
    service: &TaskService,
) -> Result<()> {
    app.finish_mutation(Ok(()), service.list_tasks());

    loop {
        terminal
            .draw(|frame| view::render(app, frame))
            .map_err(|err| io::Error::other(err.to_string()))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }
        let effect = match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Resize(_, height) => {
                app.resize(height);
                None
            }
            _ => None,
        };

        match effect {
            Some(Effect::Quit) => break,
            Some(effect) => {
                let outcome = apply_effect(service, &effect);
                if let Err(err) = &outcome {
                    warn!(?effect, error = %err, "tui action failed");
                }
                app.finish_mutation(outcome, service.list_tasks());
            }
            None => {}
        }
    }

    Ok(())
}

/// Run one storage effect. The list is reloaded by the caller either way.
fn apply_effect(service: &TaskService, effect: &Effect) -> Result<()> {
    match effect {
        Effect::Toggle { id, done } => service.toggle_task(*id, *done),
        Effect::Delete { id } => service.delete_task(*id),
        Effect::Create { text } => service.create_task(text).map(|_| ()),
        Effect::Edit { id, text } => service.edit_task(*id, text),
        Effect::Quit => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;

    fn service() -> TaskService {
        TaskService::new(TaskStore::open_memory().unwrap())
    }

    #[test]
    fn effects_reach_the_store() {
        let service = service();
        apply_effect(&service, &Effect::Create { text: "buy milk".into() }).unwrap();
        let id = service.list_tasks().unwrap()[0].id;

        apply_effect(&service, &Effect::Toggle { id, done: true }).unwrap();
        assert!(service.list_tasks().unwrap()[0].done);

        apply_effect(&service, &Effect::Edit { id, text: "buy oat milk".into() }).unwrap();
        assert_eq!(service.list_tasks().unwrap()[0].text, "buy oat milk");

        apply_effect(&service, &Effect::Delete { id }).unwrap();
        assert!(service.list_tasks().unwrap().is_empty());
    }

    #[test]
    fn blank_create_is_rejected_by_the_service() {
        let service = service();
        let err = apply_effect(&service, &Effect::Create { text: "   ".into() }).unwrap_err();
        assert_eq!(err.code(), "validation_error");
    }
}
