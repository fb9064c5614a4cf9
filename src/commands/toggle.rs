use crate::error::Result;
use crate::output::{self, Entry, Format};
use crate::position;
use crate::service::TaskService;

pub fn run(service: &TaskService, raw_position: &str, format: Format) -> Result<()> {
    let pos = position::parse_position(raw_position)?;
    let tasks = service.list_tasks()?;
    let mut task = position::resolve(&tasks, pos)?.clone();

    service.toggle_task(task.id, !task.done)?;
    task.done = !task.done;

    output::print_entry(
        &Entry {
            // `resolve` succeeded, so `pos` is within 1..=len.
            position: pos as usize,
            task: &task,
        },
        format,
    )
}
