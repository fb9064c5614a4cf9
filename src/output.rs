use clap::ValueEnum;
use serde::Serialize;
use serde_json::json;

use crate::error::{Result, TizumError};
use crate::model::Task;

pub const BANNER: &str = "\
████████╗██╗███████╗██╗   ██╗███╗   ███╗
╚══██╔══╝██║╚══███╔╝██║   ██║████╗ ████║
   ██║   ██║  ███╔╝ ██║   ██║██╔████╔██║
   ██║   ██║ ███╔╝  ██║   ██║██║╚██╔╝██║
   ██║   ██║███████╗╚██████╔╝██║ ╚═╝ ██║
   ╚═╝   ╚═╝╚══════╝ ╚═════╝ ╚═╝     ╚═╝";

pub const USAGE: &str = "Usage: tizum <add|list|delete|toggle|edit|tui|doctor>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// A task together with its 1-based display position.
#[derive(Debug, Serialize)]
pub struct Entry<'a> {
    pub position: usize,
    #[serde(flatten)]
    pub task: &'a Task,
}

pub fn entries(tasks: &[Task]) -> Vec<Entry<'_>> {
    tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| Entry {
            position: idx + 1,
            task,
        })
        .collect()
}

pub fn entry_line(entry: &Entry<'_>) -> String {
    format!(
        "{} {}: {}",
        entry.task.checkbox(),
        entry.position,
        entry.task.text
    )
}

pub fn print_entry(entry: &Entry<'_>, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(entry)?),
        Format::Text => println!("{}", entry_line(entry)),
    }
    Ok(())
}

pub fn print_listing(tasks: &[Task], format: Format) -> Result<()> {
    let entries = entries(tasks);
    match format {
        Format::Json => println!("{}", serde_json::to_string(&entries)?),
        Format::Text => {
            for entry in &entries {
                println!("{}", entry_line(entry));
            }
        }
    }
    Ok(())
}

/// Print a confirmation message, or the given JSON value in JSON mode.
pub fn print_message(message: &str, value: serde_json::Value, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(&value)?),
        Format::Text => println!("{message}"),
    }
    Ok(())
}

pub fn deleted_message(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("Task deleted".to_string()),
        n => Some(format!("{n} tasks deleted")),
    }
}

pub fn error_line(err: &TizumError, format: Format) -> String {
    match format {
        Format::Json => json!({
            "error": err.code(),
            "message": err.to_string(),
        })
        .to_string(),
        Format::Text => format!("error: {err}"),
    }
}

/// Report a non-fatal error on stderr.
pub fn report_error(err: &TizumError, format: Format) {
    eprintln!("{}", error_line(err, format));
}

pub fn print_banner() {
    println!("\n{BANNER}\n");
}
