//! Formatting helper functions for the to-do MCP server
//!
//! Renders a store [`Snapshot`] as plain text. Every tool reply ends with this
//! view so the client always sees the state after its change.

use crate::todo::{CategoryView, Snapshot, Task};
use chrono::{DateTime, Local};

/// Greeting lines for the optional display name
pub fn format_greeting(display_name: Option<&str>) -> String {
    match display_name {
        Some(name) => format!("Welcome, {}\nReady to complete something today?", name),
        None => "Welcome\nLet's make today productive.".to_string(),
    }
}

/// One line per category: marker, name, ID and counts
pub fn format_category_line(category: &CategoryView) -> String {
    format!(
        "{} {} [{}] ({} tasks • {} done)",
        if category.selected { ">" } else { " " },
        category.name,
        category.id,
        category.summary.task_count,
        category.summary.done_count
    )
}

/// Local calendar date of an epoch-millis timestamp
pub fn format_created_date(created_at: i64) -> String {
    DateTime::from_timestamp_millis(created_at)
        .map(|utc| utc.with_timezone(&Local).date_naive().to_string())
        .unwrap_or_else(|| "unknown date".to_string())
}

pub fn format_task_line(task: &Task) -> String {
    format!(
        "- [{}] {} (id: {}, created: {})",
        if task.done { "x" } else { " " },
        task.text,
        task.id,
        format_created_date(task.created_at)
    )
}

/// Render the full view: greeting, categories, then the selected category's tasks
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut result = format_greeting(snapshot.display_name.as_deref());

    result.push_str("\n\nCategories:\n");
    for category in &snapshot.categories {
        result.push_str(&format_category_line(category));
        result.push('\n');
    }

    let Some(selected) = &snapshot.selected else {
        result.push_str("\nSelect a category\n");
        return result;
    };

    result.push_str(&format!(
        "\n{} (filter: {})\n",
        selected.name, snapshot.filter
    ));
    if snapshot.visible_tasks.is_empty() {
        result.push_str("No tasks here yet.\n");
    } else {
        for task in &snapshot.visible_tasks {
            result.push_str(&format_task_line(task));
            result.push('\n');
        }
    }
    result
}

/// A tool reply: result line followed by the rendered view
pub fn format_reply(message: &str, snapshot: &Snapshot) -> String {
    format!("{}\n\n{}", message, format_snapshot(snapshot))
}
