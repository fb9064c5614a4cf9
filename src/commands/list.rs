use crate::error::Result;
use crate::output::{self, Format};
use crate::service::TaskService;

pub fn run(service: &TaskService, format: Format) -> Result<()> {
    let tasks = service.list_tasks()?;
    output::print_listing(&tasks, format)
}
