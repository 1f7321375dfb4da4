//! Persistence adapter for the to-do store
//!
//! State is written to a [`Medium`] under versioned keys, one key per field.
//! A future format bump gets new keys (`...:v2`) and leaves `v1` data intact.
//!
//! Loading never blocks startup: missing keys read as empty values, and a
//! malformed document resets categories, tasks and selection together.

mod medium;

pub use medium::{FileMedium, Medium, MemoryMedium};

use crate::todo::{Category, CategoryId, Task, TodoData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

pub const KEY_CATEGORIES: &str = "td:categories:v1";
pub const KEY_TASKS: &str = "td:tasks:v1";
pub const KEY_SELECTED: &str = "td:selectedCat:v1";
pub const KEY_DISPLAY_NAME: &str = "td:username:v1";

/// Error raised by the persistence adapter
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to write '{key}': {source}")]
    Write {
        key: &'static str,
        source: io::Error,
    },

    #[error("failed to read '{key}': {source}")]
    Read {
        key: &'static str,
        source: io::Error,
    },

    #[error("malformed persisted state under '{key}': {source}")]
    Malformed {
        key: &'static str,
        source: toml::de::Error,
    },

    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: &'static str,
        source: toml::ser::Error,
    },
}

#[derive(Serialize)]
struct CategoriesDoc<'a> {
    category: &'a [Category],
}

#[derive(Deserialize)]
struct CategoriesFile {
    #[serde(default)]
    category: Vec<Category>,
}

#[derive(Serialize)]
struct TasksDoc<'a> {
    tasks: &'a BTreeMap<CategoryId, Vec<Task>>,
}

#[derive(Deserialize)]
struct TasksFile {
    #[serde(default)]
    tasks: BTreeMap<CategoryId, Vec<Task>>,
}

pub struct Storage {
    medium: Box<dyn Medium>,
}

impl Storage {
    pub fn new(medium: impl Medium + 'static) -> Self {
        Self {
            medium: Box::new(medium),
        }
    }

    /// Storage backed by one file per key inside `dir`
    pub fn open_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(FileMedium::new(dir))
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryMedium::new())
    }

    pub fn medium(&self) -> &dyn Medium {
        self.medium.as_ref()
    }

    /// Load persisted state, falling back to an empty state on any failure
    pub fn load(&self) -> TodoData {
        match self.try_load() {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "persisted state is unusable, starting empty");
                TodoData::new()
            }
        }
    }

    /// Load persisted state, reporting malformed or unreadable data
    pub fn try_load(&self) -> Result<TodoData, PersistError> {
        let categories = match self.read(KEY_CATEGORIES)? {
            Some(content) => {
                let file: CategoriesFile =
                    toml::from_str(&content).map_err(|source| PersistError::Malformed {
                        key: KEY_CATEGORIES,
                        source,
                    })?;
                file.category
            }
            None => Vec::new(),
        };

        let tasks = match self.read(KEY_TASKS)? {
            Some(content) => {
                let file: TasksFile =
                    toml::from_str(&content).map_err(|source| PersistError::Malformed {
                        key: KEY_TASKS,
                        source,
                    })?;
                file.tasks
            }
            None => BTreeMap::new(),
        };

        let selected = self.read(KEY_SELECTED)?.and_then(non_empty).map(CategoryId::from);

        Ok(TodoData {
            categories,
            tasks,
            selected,
        })
    }

    /// Write categories, tasks and selection
    pub fn save(&mut self, data: &TodoData) -> Result<(), PersistError> {
        let categories = toml::to_string_pretty(&CategoriesDoc {
            category: &data.categories,
        })
        .map_err(|source| PersistError::Serialize {
            key: KEY_CATEGORIES,
            source,
        })?;
        let tasks = toml::to_string_pretty(&TasksDoc { tasks: &data.tasks }).map_err(
            |source| PersistError::Serialize {
                key: KEY_TASKS,
                source,
            },
        )?;
        let selected = data.selected.as_ref().map(CategoryId::as_str).unwrap_or("");

        self.write(KEY_CATEGORIES, &categories)?;
        self.write(KEY_TASKS, &tasks)?;
        self.write(KEY_SELECTED, selected)?;
        debug!(categories = data.categories.len(), "saved to-do state");
        Ok(())
    }

    /// Stored display name, `None` when unset or unreadable
    pub fn load_display_name(&self) -> Option<String> {
        match self.read(KEY_DISPLAY_NAME) {
            Ok(value) => value.and_then(non_empty),
            Err(e) => {
                warn!(error = %e, "display name is unreadable");
                None
            }
        }
    }

    pub fn save_display_name(&mut self, name: Option<&str>) -> Result<(), PersistError> {
        self.write(KEY_DISPLAY_NAME, name.unwrap_or(""))
    }

    fn read(&self, key: &'static str) -> Result<Option<String>, PersistError> {
        self.medium
            .read(key)
            .map_err(|source| PersistError::Read { key, source })
    }

    fn write(&mut self, key: &'static str, value: &str) -> Result<(), PersistError> {
        self.medium
            .write(key, value)
            .map_err(|source| PersistError::Write { key, source })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> TodoData {
        let work = Category {
            id: CategoryId::from("work"),
            name: "Work".to_string(),
        };
        let home = Category {
            id: CategoryId::from("home"),
            name: "Home".to_string(),
        };
        let mut tasks = BTreeMap::new();
        tasks.insert(
            work.id.clone(),
            vec![Task {
                id: "t1".into(),
                text: "Write report".to_string(),
                done: true,
                created_at: 1_700_000_000_000,
            }],
        );
        tasks.insert(home.id.clone(), Vec::new());
        TodoData {
            selected: Some(work.id.clone()),
            categories: vec![work, home],
            tasks,
        }
    }

    #[test]
    fn test_fresh_medium_loads_empty() {
        let storage = Storage::in_memory();
        let data = storage.try_load().unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = Storage::in_memory();
        let data = sample_data();
        storage.save(&data).unwrap();
        assert_eq!(storage.load(), data);
    }

    #[test]
    fn test_empty_selection_sentinel() {
        let mut storage = Storage::in_memory();
        let mut data = sample_data();
        data.selected = None;
        storage.save(&data).unwrap();
        assert_eq!(storage.medium().read(KEY_SELECTED).unwrap().as_deref(), Some(""));
        assert_eq!(storage.load().selected, None);
    }

    #[test]
    fn test_task_fields_use_camel_case() {
        let mut storage = Storage::in_memory();
        storage.save(&sample_data()).unwrap();
        let content = storage.medium().read(KEY_TASKS).unwrap().unwrap();
        assert!(content.contains("createdAt"));
        assert!(!content.contains("created_at"));
    }

    #[test]
    fn test_malformed_categories_fall_back_to_empty() {
        let mut medium = MemoryMedium::new();
        medium.insert(KEY_CATEGORIES, "this is [not toml");
        medium.insert(KEY_SELECTED, "work");
        let storage = Storage::new(medium);

        assert!(matches!(
            storage.try_load(),
            Err(PersistError::Malformed {
                key: KEY_CATEGORIES,
                ..
            })
        ));
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_malformed_tasks_reset_everything() {
        let mut storage = Storage::in_memory();
        storage.save(&sample_data()).unwrap();

        let mut medium = MemoryMedium::new();
        for key in [KEY_CATEGORIES, KEY_SELECTED] {
            if let Some(value) = storage.medium().read(key).unwrap() {
                medium.insert(key, value);
            }
        }
        medium.insert(KEY_TASKS, "[tasks]\nwork = 42\n");
        let storage = Storage::new(medium);

        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_display_name_is_independent() {
        let mut storage = Storage::in_memory();
        assert_eq!(storage.load_display_name(), None);

        storage.save_display_name(Some("Ada")).unwrap();
        storage.save(&TodoData::new()).unwrap();
        assert_eq!(storage.load_display_name().as_deref(), Some("Ada"));

        storage.save_display_name(None).unwrap();
        assert_eq!(storage.load_display_name(), None);
    }
}
