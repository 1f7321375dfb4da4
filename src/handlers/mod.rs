//! MCP tool handlers for the to-do server
//!
//! Each handler locks the store, runs one store operation and replies with a
//! result line plus the re-rendered view.

pub mod category;
pub mod task;
pub mod view;

use crate::todo::StoreError;
use mcp_attr::Result as McpResult;
use mcp_attr::bail_public;
use tracing::warn;

/// Turn a store error into a client-visible tool error
pub(crate) fn store_failure<T>(error: StoreError) -> McpResult<T> {
    if !error.is_rejection() {
        warn!(error = %error, "store change kept in memory but not saved");
    }
    bail_public!(_, "{}", error);
}

/// Report an add whose new item was kept in memory but not saved
pub(crate) fn unsaved_failure<T>(created: String, error: StoreError) -> McpResult<T> {
    warn!(error = %error, "new item kept in memory but not saved");
    bail_public!(_, "{}; {}", created, error);
}
