use tracing::info;

use crate::error::{Result, TizumError};
use crate::model::Task;
use crate::store::TaskStore;

/// Task operations shared by the CLI and the TUI.
///
/// Holds no state besides the store; every read goes back to the database.
pub struct TaskService {
    store: TaskStore,
}

fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(TizumError::Validation(
            "task text must not be empty".to_string(),
        ));
    }
    Ok(())
}

impl TaskService {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    pub fn create_task(&self, text: &str) -> Result<i64> {
        validate_text(text)?;
        let id = self.store.insert(text)?;
        info!(id, "task created");
        Ok(id)
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        self.store.list_all()
    }

    pub fn toggle_task(&self, id: i64, done: bool) -> Result<()> {
        self.store.set_done(id, done)?;
        info!(id, done, "task toggled");
        Ok(())
    }

    pub fn edit_task(&self, id: i64, text: &str) -> Result<()> {
        validate_text(text)?;
        self.store.update_text(id, text)?;
        info!(id, "task edited");
        Ok(())
    }

    pub fn delete_task(&self, id: i64) -> Result<()> {
        self.store.delete(id)?;
        info!(id, "task deleted");
        Ok(())
    }

    pub fn task_count(&self) -> Result<usize> {
        self.store.count()
    }
}
