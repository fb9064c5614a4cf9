use serde_json::json;

use crate::error::Result;
use crate::output::{self, Format};
use crate::position;
use crate::service::TaskService;

/// Delete every listed position, resolved against one snapshot taken before
/// the first deletion. Bad positions are reported and skipped.
pub fn run(service: &TaskService, args: &[String], format: Format) -> Result<()> {
    let (positions, parse_errors) = position::parse_position_list(args);
    for err in &parse_errors {
        output::report_error(err, format);
    }

    let snapshot = service.list_tasks()?;
    let mut deleted = 0;
    for pos in positions {
        let task = match position::resolve(&snapshot, pos) {
            Ok(task) => task,
            Err(err) => {
                output::report_error(&err, format);
                continue;
            }
        };
        match service.delete_task(task.id) {
            Ok(()) => deleted += 1,
            Err(err) => output::report_error(&err, format),
        }
    }

    let message = output::deleted_message(deleted);
    if message.is_none() && format == Format::Text {
        return Ok(());
    }
    output::print_message(
        &message.unwrap_or_default(),
        json!({ "deleted": deleted }),
        format,
    )
}
