//! Listing / Adding / Editing mode machine.
//!
//! `transition` is pure: it never touches storage. Anything that has to reach
//! the database comes back as an [`Effect`] for the event loop to run.

use crate::model::Task;

use super::input::{InputBuffer, InputEdit};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Listing,
    Adding {
        buffer: InputBuffer,
    },
    Editing {
        buffer: InputBuffer,
        target: i64,
    },
}

impl Mode {
    pub fn buffer(&self) -> Option<&InputBuffer> {
        match self {
            Self::Listing => None,
            Self::Adding { buffer } | Self::Editing { buffer, .. } => Some(buffer),
        }
    }

    pub fn shows_input(&self) -> bool {
        self.buffer().is_some()
    }
}

/// Mode-relevant events, already decoded from raw keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    ToggleSelected,
    DeleteSelected,
    BeginAdd,
    BeginEdit,
    Quit,
    Input(InputEdit),
    Cancel,
    Confirm,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Toggle { id: i64, done: bool },
    Delete { id: i64 },
    Create { text: String },
    Edit { id: i64, text: String },
    Quit,
}

/// Advance the mode machine. `selected` is the highlighted task in the
/// listing, if any.
pub fn transition(mode: Mode, event: ModeEvent, selected: Option<&Task>) -> (Mode, Option<Effect>) {
    if event == ModeEvent::Quit {
        return (Mode::Listing, Some(Effect::Quit));
    }

    match mode {
        Mode::Listing => match (event, selected) {
            (ModeEvent::ToggleSelected, Some(task)) => (
                Mode::Listing,
                Some(Effect::Toggle {
                    id: task.id,
                    done: !task.done,
                }),
            ),
            (ModeEvent::DeleteSelected, Some(task)) => {
                (Mode::Listing, Some(Effect::Delete { id: task.id }))
            }
            (ModeEvent::BeginAdd, _) => (
                Mode::Adding {
                    buffer: InputBuffer::new(),
                },
                None,
            ),
            (ModeEvent::BeginEdit, Some(task)) => (
                Mode::Editing {
                    buffer: InputBuffer::with_value(&task.text),
                    target: task.id,
                },
                None,
            ),
            _ => (Mode::Listing, None),
        },
        Mode::Adding { mut buffer } => match event {
            ModeEvent::Cancel => (Mode::Listing, None),
            ModeEvent::Confirm if buffer.is_blank() => (Mode::Adding { buffer }, None),
            ModeEvent::Confirm => (
                Mode::Listing,
                Some(Effect::Create {
                    text: buffer.value().to_string(),
                }),
            ),
            ModeEvent::Input(edit) => {
                buffer.apply(edit);
                (Mode::Adding { buffer }, None)
            }
            _ => (Mode::Adding { buffer }, None),
        },
        Mode::Editing { mut buffer, target } => match event {
            ModeEvent::Cancel => (Mode::Listing, None),
            ModeEvent::Confirm if buffer.is_blank() => (Mode::Editing { buffer, target }, None),
            ModeEvent::Confirm => (
                Mode::Listing,
                Some(Effect::Edit {
                    id: target,
                    text: buffer.value().to_string(),
                }),
            ),
            ModeEvent::Input(edit) => {
                buffer.apply(edit);
                (Mode::Editing { buffer, target }, None)
            }
            _ => (Mode::Editing { buffer, target }, None),
        },
    }
}
