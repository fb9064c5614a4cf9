//! 1-based display positions.
//!
//! The CLI addresses tasks by their place in the current ascending-id
//! listing rather than by stored id, so positions shift after deletions.

use crate::error::{Result, TizumError};
use crate::model::Task;

/// Parse one position. Zero and negative numbers parse; `resolve` rejects
/// them as out of range.
pub fn parse_position(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| TizumError::InvalidPosition(trimmed.to_string()))
}

/// Split arguments on commas and whitespace into positions.
///
/// Empty parts are skipped and repeated positions are kept once, in first-seen
/// order. Unparseable parts come back as errors alongside the valid positions.
pub fn parse_position_list<S: AsRef<str>>(args: &[S]) -> (Vec<i64>, Vec<TizumError>) {
    let mut positions = Vec::new();
    let mut errors = Vec::new();

    let parts = args
        .iter()
        .flat_map(|arg| arg.as_ref().split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|part| !part.is_empty());

    for part in parts {
        match parse_position(part) {
            Ok(pos) if !positions.contains(&pos) => positions.push(pos),
            Ok(_) => {}
            Err(err) => errors.push(err),
        }
    }

    (positions, errors)
}

/// Look up the task at a 1-based position in a listing snapshot.
pub fn resolve(tasks: &[Task], position: i64) -> Result<&Task> {
    usize::try_from(position)
        .ok()
        .and_then(|pos| pos.checked_sub(1))
        .and_then(|idx| tasks.get(idx))
        .ok_or(TizumError::OutOfRange {
            position,
            len: tasks.len(),
        })
}
