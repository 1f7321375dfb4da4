//! Category handlers for the to-do MCP server

use super::{store_failure, unsaved_failure};
use crate::TodoServerHandler;
use crate::formatting;
use crate::todo::CategoryId;
use crate::validation;
use mcp_attr::Result as McpResult;
use tracing::debug;

fn created_message(id: &CategoryId, name: &str) -> String {
    format!("Category created with ID: {} (name: {})", id, name.trim())
}

impl TodoServerHandler {
    /// Adds a category and selects it.
    pub async fn handle_add_category(&self, name: String) -> McpResult<String> {
        let mut store = self.store();

        let id = match store.add_category(&name) {
            Ok(id) => id,
            Err(e) => {
                let Some(id) = e.created_category().cloned() else {
                    return store_failure(e);
                };
                // Selection is applied in memory even when saving it fails too
                if let Err(select_error) = store.select_category(&id) {
                    debug!(error = %select_error, "selection of unsaved category not saved");
                }
                return unsaved_failure(created_message(&id, &name), e);
            }
        };
        if let Err(e) = store.select_category(&id) {
            return store_failure(e);
        }

        let message = created_message(&id, &name);
        Ok(formatting::format_reply(&message, &store.snapshot()))
    }

    /// Deletes a category and every task in it.
    pub async fn handle_delete_category(&self, category: String) -> McpResult<String> {
        let mut store = self.store();

        let id: CategoryId = validation::resolve_category(&store, Some(category.as_str()))?;
        let name = store
            .find_category(&id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let task_count = store.tasks(&id).map(<[_]>::len).unwrap_or(0);

        if let Err(e) = store.delete_category(&id) {
            return store_failure(e);
        }

        let message = format!(
            "Deleted category '{}' and its {} task(s)",
            name, task_count
        );
        Ok(formatting::format_reply(&message, &store.snapshot()))
    }

    pub async fn handle_select_category(&self, category: String) -> McpResult<String> {
        let mut store = self.store();

        let id = validation::resolve_category(&store, Some(category.as_str()))?;
        if let Err(e) = store.select_category(&id) {
            return store_failure(e);
        }

        let name = store
            .selected_category()
            .map(|c| c.name.clone())
            .unwrap_or_default();
        Ok(formatting::format_reply(
            &format!("Selected category '{}'", name),
            &store.snapshot(),
        ))
    }
}
