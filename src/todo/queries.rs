//! Read-only queries over the store
//!
//! Nothing here mutates state, so these may be called freely between
//! operations.

use super::error::StoreError;
use super::model::{Category, CategoryId, CategorySummary, Filter, Task};
use super::store::{Result, Store};

/// A category as the presentation layer sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub id: CategoryId,
    pub name: String,
    pub summary: CategorySummary,
    pub selected: bool,
}

/// Everything needed to render the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub display_name: Option<String>,
    pub categories: Vec<CategoryView>,
    pub selected: Option<CategoryView>,
    pub filter: Filter,
    pub visible_tasks: Vec<Task>,
}

impl Store {
    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    /// Tasks of a category in insertion order
    pub fn tasks(&self, category: &CategoryId) -> Option<&[Task]> {
        self.data.tasks.get(category).map(Vec::as_slice)
    }

    pub fn selected_category_id(&self) -> Option<&CategoryId> {
        self.data.selected.as_ref()
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.data
            .selected
            .as_ref()
            .and_then(|id| self.find_category(id))
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn find_category(&self, id: &CategoryId) -> Option<&Category> {
        self.data.categories.iter().find(|c| &c.id == id)
    }

    /// Case-insensitive lookup by name
    pub fn find_category_by_name(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.data.categories.iter().find(|c| c.has_name(name))
    }

    /// Tasks of the selected category, newest first, restricted by the filter
    ///
    /// Tasks sharing a timestamp are ordered by later insertion first.
    pub fn list_visible_tasks(&self) -> Vec<&Task> {
        let Some(tasks) = self.data.selected.as_ref().and_then(|id| self.tasks(id)) else {
            return Vec::new();
        };

        let mut ordered: Vec<(usize, &Task)> = tasks.iter().enumerate().collect();
        ordered.sort_by(|(ia, a), (ib, b)| b.created_at.cmp(&a.created_at).then(ib.cmp(ia)));
        ordered
            .into_iter()
            .map(|(_, task)| task)
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    pub fn category_summary(&self, id: &CategoryId) -> Result<CategorySummary> {
        self.tasks(id)
            .map(CategorySummary::of)
            .ok_or_else(|| StoreError::CategoryNotFound(id.clone()))
    }

    fn category_view(&self, category: &Category) -> CategoryView {
        CategoryView {
            id: category.id.clone(),
            name: category.name.clone(),
            summary: self.tasks(&category.id).map(CategorySummary::of).unwrap_or_default(),
            selected: self.data.selected.as_ref() == Some(&category.id),
        }
    }

    /// Full render state for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display_name: self.display_name.clone(),
            categories: self
                .data
                .categories
                .iter()
                .map(|c| self.category_view(c))
                .collect(),
            selected: self.selected_category().map(|c| self.category_view(c)),
            filter: self.filter,
            visible_tasks: self.list_visible_tasks().into_iter().cloned().collect(),
        }
    }
}
