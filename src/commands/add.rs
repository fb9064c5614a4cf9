use serde_json::json;

use crate::error::Result;
use crate::output::{self, Format};
use crate::service::TaskService;

/// Trailing arguments become one task, joined with single spaces.
pub fn run(service: &TaskService, words: &[String], format: Format) -> Result<()> {
    let text = words.join(" ");
    let id = service.create_task(&text)?;
    output::print_message("Task added!", json!({ "id": id, "text": text }), format)
}
