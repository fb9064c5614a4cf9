use serde_json::json;

use crate::error::Result;
use crate::output::{self, Format};
use crate::position;
use crate::service::TaskService;

pub fn run(
    service: &TaskService,
    raw_position: &str,
    words: &[String],
    format: Format,
) -> Result<()> {
    let pos = position::parse_position(raw_position)?;
    let tasks = service.list_tasks()?;
    let task = position::resolve(&tasks, pos)?;

    let text = words.join(" ");
    service.edit_task(task.id, &text)?;
    output::print_message(
        "Task updated",
        json!({ "position": pos, "id": task.id, "text": text }),
        format,
    )
}
