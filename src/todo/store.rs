use super::error::{Created, StoreError};
use super::model::{Category, CategoryId, Filter, Task, TaskId, TodoData};
use crate::storage::{PersistError, Storage};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Categories seeded whenever the category list is empty
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Inbox", "Personal", "Work", "Focus"];

pub type Result<T> = std::result::Result<T, StoreError>;

/// Canonical in-memory state of the to-do list
///
/// Every mutating operation validates its input first, applies the change and
/// then saves through [`Storage`]. A failed save is returned as
/// [`StoreError::WriteFailure`] but the in-memory change is kept.
///
/// The store is a single-writer value; hosts that share it across threads
/// must serialize access themselves.
pub struct Store {
    pub(crate) data: TodoData,
    pub(crate) filter: Filter,
    pub(crate) display_name: Option<String>,
    storage: Storage,
}

impl Store {
    /// Load state from `storage` and enforce the store invariants
    ///
    /// Unusable persisted data never fails startup; it is replaced by the
    /// default categories.
    ///
    /// When the medium could not be read at all, nothing is written back so
    /// the unreadable data is left in place.
    pub fn open(storage: Storage) -> Self {
        let (data, readable) = match storage.try_load() {
            Ok(data) => (data, true),
            Err(e) => {
                warn!(error = %e, "persisted state unusable, starting empty");
                let readable = !matches!(e, PersistError::Read { .. });
                (TodoData::new(), readable)
            }
        };
        let display_name = storage.load_display_name();
        let mut store = Self::from_parts(data, storage);
        store.display_name = display_name;

        if store.data.selected.is_none() {
            store.data.selected = store.data.categories.first().map(|c| c.id.clone());
        }
        if !readable {
            warn!("skipping initial save over unreadable state");
        } else if let Err(e) = store.save() {
            warn!(error = %e, "failed to persist state after open");
        }
        info!(categories = store.data.categories.len(), "opened to-do store");
        store
    }

    /// Build a store from already loaded data without touching storage
    ///
    /// Orphan task lists, duplicate names, blank or repeated tasks and a
    /// dangling selection are dropped; an empty category list is seeded with
    /// the defaults.
    pub fn from_parts(data: TodoData, storage: Storage) -> Self {
        let mut store = Self {
            data,
            filter: Filter::default(),
            display_name: None,
            storage,
        };
        store.normalize();
        store
    }

    fn normalize(&mut self) {
        let mut kept: Vec<Category> = Vec::with_capacity(self.data.categories.len());
        for mut category in std::mem::take(&mut self.data.categories) {
            let name = category.name.trim();
            if name.is_empty() || kept.iter().any(|c| c.has_name(name)) {
                warn!(id = %category.id, "dropping invalid or duplicate category");
                continue;
            }
            category.name = name.to_string();
            kept.push(category);
        }
        self.data.categories = kept;

        let categories = &self.data.categories;
        self.data
            .tasks
            .retain(|id, _| categories.iter().any(|c| &c.id == id));

        // Task ids are unique across all categories; the first in category order wins
        let mut seen = HashSet::new();
        for category in &self.data.categories {
            let tasks = self.data.tasks.entry(category.id.clone()).or_default();
            let before = tasks.len();
            tasks.retain(|t| !t.text.trim().is_empty() && seen.insert(t.id.clone()));
            if tasks.len() != before {
                warn!(
                    id = %category.id,
                    dropped = before - tasks.len(),
                    "dropping blank or duplicate tasks"
                );
            }
        }

        let dangling = self
            .data
            .selected
            .as_ref()
            .is_some_and(|id| self.find_category(id).is_none());
        if dangling {
            self.data.selected = None;
        }

        self.ensure_default_categories();
    }

    fn ensure_default_categories(&mut self) {
        if !self.data.categories.is_empty() {
            return;
        }
        for name in DEFAULT_CATEGORIES {
            let category = Category::new(name);
            self.data.tasks.insert(category.id.clone(), Vec::new());
            self.data.categories.push(category);
        }
        info!("seeded default categories");
    }

    fn save(&mut self) -> Result<()> {
        self.storage.save(&self.data)?;
        Ok(())
    }

    /// Add a category and return its id
    ///
    /// The name is trimmed. Selection is left unchanged. When only the save
    /// fails, the error carries the new id (see [`StoreError::created_category`]).
    pub fn add_category(&mut self, name: &str) -> Result<CategoryId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.find_category_by_name(name).is_some() {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let category = Category::new(name);
        let id = category.id.clone();
        self.data.tasks.insert(id.clone(), Vec::new());
        self.data.categories.push(category);
        debug!(%id, name, "added category");

        match self.save() {
            Ok(()) => Ok(id),
            Err(e) => Err(e.with_created(Created::Category(id))),
        }
    }

    /// Delete a category together with all of its tasks
    pub fn delete_category(&mut self, id: &CategoryId) -> Result<()> {
        let Some(pos) = self.data.categories.iter().position(|c| &c.id == id) else {
            return Err(StoreError::CategoryNotFound(id.clone()));
        };

        self.data.categories.remove(pos);
        self.data.tasks.remove(id);
        if self.data.selected.as_ref() == Some(id) {
            self.data.selected = self.data.categories.first().map(|c| c.id.clone());
        }
        self.ensure_default_categories();
        debug!(%id, "deleted category");

        self.save()
    }

    pub fn select_category(&mut self, id: &CategoryId) -> Result<()> {
        if self.find_category(id).is_none() {
            return Err(StoreError::CategoryNotFound(id.clone()));
        }
        self.data.selected = Some(id.clone());
        self.save()
    }

    /// Append a new pending task to a category and return its id
    ///
    /// When only the save fails, the error carries the new id.
    pub fn add_task(&mut self, category: &CategoryId, text: &str) -> Result<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let Some(tasks) = self.data.tasks.get_mut(category) else {
            return Err(StoreError::CategoryNotFound(category.clone()));
        };

        let task = Task::new(text);
        let id = task.id.clone();
        tasks.push(task);
        debug!(%category, %id, "added task");

        match self.save() {
            Ok(()) => Ok(id),
            Err(e) => Err(e.with_created(Created::Task(id))),
        }
    }

    /// Flip the completion flag of a task and return the new value
    pub fn toggle_task_done(&mut self, category: &CategoryId, task: &TaskId) -> Result<bool> {
        let Some(tasks) = self.data.tasks.get_mut(category) else {
            return Err(StoreError::CategoryNotFound(category.clone()));
        };
        let Some(item) = tasks.iter_mut().find(|t| &t.id == task) else {
            return Err(StoreError::TaskNotFound(task.clone()));
        };

        item.done = !item.done;
        let done = item.done;
        debug!(%category, %task, done, "toggled task");

        self.save()?;
        Ok(done)
    }

    /// Remove a task; an unknown category or task is a no-op
    pub fn delete_task(&mut self, category: &CategoryId, task: &TaskId) -> Result<()> {
        let removed = match self.data.tasks.get_mut(category) {
            Some(tasks) => {
                let before = tasks.len();
                tasks.retain(|t| &t.id != task);
                before != tasks.len()
            }
            None => false,
        };
        if !removed {
            return Ok(());
        }
        debug!(%category, %task, "deleted task");
        self.save()
    }

    /// Remove every task in a category and return how many were removed
    pub fn clear_category_tasks(&mut self, category: &CategoryId) -> Result<usize> {
        let Some(tasks) = self.data.tasks.get_mut(category) else {
            return Err(StoreError::CategoryNotFound(category.clone()));
        };

        let count = tasks.len();
        tasks.clear();
        debug!(%category, count, "cleared tasks");

        self.save()?;
        Ok(count)
    }

    /// Change the view filter; not persisted
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Set the display name; blank input unsets it
    pub fn set_display_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        self.display_name = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
        self.storage.save_display_name(self.display_name.as_deref())?;
        Ok(())
    }
}
