//! Validation helper functions for the to-do MCP server
//!
//! This module parses tool parameters and resolves category references
//! against the store.

use crate::todo::{CategoryId, Filter, Store, TaskId};
use mcp_attr::Result as McpResult;

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Parse and validate filter parameter
pub fn parse_filter(filter_str: &str) -> McpResult<Filter> {
    filter_str.parse::<Filter>().map_err(invalid_params)
}

/// Resolve a category reference given as ID or name
///
/// IDs take precedence; names match ignoring case. `None` resolves to the
/// selected category.
pub fn resolve_category(store: &Store, category: Option<&str>) -> McpResult<CategoryId> {
    let Some(reference) = category.map(str::trim).filter(|c| !c.is_empty()) else {
        return store
            .selected_category_id()
            .cloned()
            .ok_or_else(|| invalid_params("Please select a category first.".to_string()));
    };

    let id = CategoryId::from(reference);
    if store.find_category(&id).is_some() {
        return Ok(id);
    }
    store
        .find_category_by_name(reference)
        .map(|c| c.id.clone())
        .ok_or_else(|| invalid_params(format_invalid_category_error(reference, store)))
}

/// Format an error message for an unknown category with the available categories
pub fn format_invalid_category_error(reference: &str, store: &Store) -> String {
    let names: Vec<&str> = store.categories().iter().map(|c| c.name.as_str()).collect();
    format!(
        "Category '{}' does not exist.\nAvailable categories: {}",
        reference,
        names.join(", ")
    )
}

/// Normalize task ID by trimming surrounding whitespace
pub fn normalize_task_id(task_id: &str) -> TaskId {
    TaskId::from(task_id.trim())
}
