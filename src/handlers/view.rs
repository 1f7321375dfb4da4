//! View handlers for the to-do MCP server: filter, display name and the plain view

use super::store_failure;
use crate::TodoServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    pub async fn handle_set_filter(&self, filter: String) -> McpResult<String> {
        let filter = validation::parse_filter(&filter)?;

        let mut store = self.store();
        store.set_filter(filter);
        Ok(formatting::format_reply(
            &format!("Filter set to {}", filter),
            &store.snapshot(),
        ))
    }

    pub async fn handle_set_name(&self, name: String) -> McpResult<String> {
        let mut store = self.store();
        if let Err(e) = store.set_display_name(&name) {
            return store_failure(e);
        }

        let message = match store.display_name() {
            Some(name) => format!("Display name set to '{}'", name),
            None => "Display name cleared".to_string(),
        };
        Ok(formatting::format_reply(&message, &store.snapshot()))
    }

    pub async fn handle_view(&self) -> McpResult<String> {
        let store = self.store();
        Ok(formatting::format_snapshot(&store.snapshot()))
    }
}
