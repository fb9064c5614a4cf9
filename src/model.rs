use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Format used for the creation date shown next to each task in the TUI.
pub const CREATED_DISPLAY_FORMAT: &str = "%b %-d %H:%M";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub done: bool,
}

impl Task {
    pub fn checkbox(&self) -> &'static str {
        if self.done { "[x]" } else { "[ ]" }
    }

    /// Creation time rendered in the local timezone.
    pub fn created_display(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format(CREATED_DISPLAY_FORMAT)
            .to_string()
    }
}
