//! Task handlers for the to-do MCP server

use super::{store_failure, unsaved_failure};
use crate::TodoServerHandler;
use crate::formatting;
use crate::todo::TaskId;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    /// Adds a pending task to the given or selected category.
    pub async fn handle_add_task(
        &self,
        text: String,
        category: Option<String>,
    ) -> McpResult<String> {
        let mut store = self.store();

        let category_id = validation::resolve_category(&store, category.as_deref())?;
        let result = store.add_task(&category_id, &text);

        let name = store
            .find_category(&category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let created = |id: &TaskId| {
            format!(
                "Task created with ID: {} (category: {}, text: {})",
                id,
                name,
                text.trim()
            )
        };
        match result {
            Ok(id) => Ok(formatting::format_reply(&created(&id), &store.snapshot())),
            Err(e) => match e.created_task().map(created) {
                Some(message) => unsaved_failure(message, e),
                None => store_failure(e),
            },
        }
    }

    pub async fn handle_toggle_task(
        &self,
        id: String,
        category: Option<String>,
    ) -> McpResult<String> {
        let mut store = self.store();

        let category_id = validation::resolve_category(&store, category.as_deref())?;
        let task_id = validation::normalize_task_id(&id);
        let done = match store.toggle_task_done(&category_id, &task_id) {
            Ok(done) => done,
            Err(e) => return store_failure(e),
        };

        let message = format!(
            "Task '{}' marked as {}",
            task_id,
            if done { "done" } else { "pending" }
        );
        Ok(formatting::format_reply(&message, &store.snapshot()))
    }

    /// Deletes a task; a task that is already gone is reported the same way.
    pub async fn handle_delete_task(
        &self,
        id: String,
        category: Option<String>,
    ) -> McpResult<String> {
        let mut store = self.store();

        let category_id = validation::resolve_category(&store, category.as_deref())?;
        let task_id = validation::normalize_task_id(&id);
        if let Err(e) = store.delete_task(&category_id, &task_id) {
            return store_failure(e);
        }

        Ok(formatting::format_reply(
            &format!("Task '{}' deleted", task_id),
            &store.snapshot(),
        ))
    }

    /// Removes all tasks from a category, keeping the category itself.
    pub async fn handle_clear_tasks(&self, category: Option<String>) -> McpResult<String> {
        let mut store = self.store();

        let category_id = validation::resolve_category(&store, category.as_deref())?;
        let count = match store.clear_category_tasks(&category_id) {
            Ok(count) => count,
            Err(e) => return store_failure(e),
        };

        let name = store
            .find_category(&category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        Ok(formatting::format_reply(
            &format!("Cleared {} task(s) from '{}'", count, name),
            &store.snapshot(),
        ))
    }
}
