//! To-do MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for a personal,
//! category-based to-do list. Tasks live in named categories, can be marked
//! done, filtered by status, and are persisted locally between sessions.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `TodoServerHandler` - translates tool calls into store operations
//!   and renders the store snapshot as text
//! - **Domain Layer**: `todo` module - the `Store` with its invariants and queries
//! - **Persistence Layer**: `storage` module - versioned key-value persistence
//!
//! # Example
//!
//! ```no_run
//! use todo_mcp::TodoServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = TodoServerHandler::new("todo-data")?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod formatting;
mod handlers;
pub mod logging;
pub mod storage;
pub mod todo;
mod validation;

use anyhow::{Result, bail};
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

// Re-export commonly used types
pub use storage::{FileMedium, Medium, MemoryMedium, PersistError, Storage};
pub use todo::{
    Category, CategoryId, CategorySummary, Created, Filter, Snapshot, Store, StoreError, Task,
    TaskId, TodoData,
};

/// MCP Server handler for to-do list management
///
/// Owns the single [`Store`] of the process. The mutex serializes tool calls,
/// so the store always sees one writer at a time.
pub struct TodoServerHandler {
    pub(crate) store: Mutex<Store>,
}

impl TodoServerHandler {
    /// Create a new handler persisting into `data_dir`
    ///
    /// # Arguments
    /// * `data_dir` - Directory holding one file per persisted key
    ///
    /// # Example
    /// ```no_run
    /// # use todo_mcp::TodoServerHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = TodoServerHandler::new("todo-data")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(data_dir: &str) -> Result<Self> {
        if Path::new(data_dir).is_file() {
            bail!("'{}' is a file; expected a data directory", data_dir);
        }
        Ok(Self::with_storage(Storage::open_dir(data_dir)))
    }

    /// Create a handler over any storage, e.g. [`Storage::in_memory`]
    pub fn with_storage(storage: Storage) -> Self {
        Self {
            store: Mutex::new(Store::open(storage)),
        }
    }

    /// Lock the store
    ///
    /// Store operations never leave partial state behind, so a poisoned lock
    /// still guards a valid store.
    pub(crate) fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Extract ID from response message
    ///
    /// Response format: "... created with ID: <id> (...)"
    #[cfg(test)]
    fn extract_id_from_response(response: &str) -> String {
        if let Some(start) = response.find("ID: ") {
            let id_part = &response[start + 4..];
            if let Some(end) = id_part.find(" (") {
                return id_part[..end].trim().to_string();
            }
        }
        String::new()
    }
}

/// Personal to-do list organized by categories.
///
/// Every task belongs to exactly one category (e.g. Inbox, Work, Personal).
/// One category is selected at a time; task tools default to it when no
/// category is given. Categories may be referenced by ID or by name.
///
/// Every tool replies with a short result line followed by the current view:
/// greeting, categories with task counts, and the selected category's tasks
/// (newest first) under the active filter (all, pending, completed).
#[mcp_server]
impl McpServer for TodoServerHandler {
    /// **Add category**: Create a new category and select it. Names are unique, ignoring case.
    #[tool]
    async fn add_category(
        &self,
        /// Category name (e.g., "Groceries")
        name: String,
    ) -> McpResult<String> {
        self.handle_add_category(name).await
    }

    /// **Delete category**: Permanently delete a category and ALL of its tasks. Cannot be undone.
    #[tool]
    async fn delete_category(
        &self,
        /// Category ID or name
        category: String,
    ) -> McpResult<String> {
        self.handle_delete_category(category).await
    }

    /// **Select category**: Make a category the current one for viewing and task tools.
    #[tool]
    async fn select_category(
        &self,
        /// Category ID or name
        category: String,
    ) -> McpResult<String> {
        self.handle_select_category(category).await
    }

    /// **Add task**: Add a pending task to a category.
    #[tool]
    async fn add_task(
        &self,
        /// Task description
        text: String,
        /// Category ID or name; defaults to the selected category (optional)
        category: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_task(text, category).await
    }

    /// **Toggle task**: Mark a pending task done, or a done task pending again.
    #[tool]
    async fn toggle_task(
        &self,
        /// Task ID
        id: String,
        /// Category ID or name; defaults to the selected category (optional)
        category: Option<String>,
    ) -> McpResult<String> {
        self.handle_toggle_task(id, category).await
    }

    /// **Delete task**: Remove a task. Deleting a task that no longer exists is not an error.
    #[tool]
    async fn delete_task(
        &self,
        /// Task ID
        id: String,
        /// Category ID or name; defaults to the selected category (optional)
        category: Option<String>,
    ) -> McpResult<String> {
        self.handle_delete_task(id, category).await
    }

    /// **Clear tasks**: Remove ALL tasks from a category but keep the category. Cannot be undone.
    #[tool]
    async fn clear_tasks(
        &self,
        /// Category ID or name; defaults to the selected category (optional)
        category: Option<String>,
    ) -> McpResult<String> {
        self.handle_clear_tasks(category).await
    }

    /// **Set filter**: Choose which tasks the view lists.
    #[tool]
    async fn set_filter(
        &self,
        /// Filter: all/pending/completed
        filter: String,
    ) -> McpResult<String> {
        self.handle_set_filter(filter).await
    }

    /// **Set name**: Set the name used in the greeting. Empty string clears it.
    #[tool]
    async fn set_name(
        &self,
        /// Display name
        name: String,
    ) -> McpResult<String> {
        self.handle_set_name(name).await
    }

    /// **View**: Show the greeting, categories with counts, and the visible tasks.
    #[tool]
    async fn view(&self) -> McpResult<String> {
        self.handle_view().await
    }
}
