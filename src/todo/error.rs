use super::model::{CategoryId, TaskId};
use crate::storage::PersistError;

/// Error returned by store operations
///
/// Validation variants are raised before any mutation. `WriteFailure` is
/// raised after the in-memory change has been applied; the change is kept.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("category name must not be empty")]
    EmptyName,

    #[error("category '{0}' already exists")]
    DuplicateName(String),

    #[error("task text must not be empty")]
    EmptyText,

    #[error("category '{0}' not found")]
    CategoryNotFound(CategoryId),

    #[error("task '{0}' not found")]
    TaskNotFound(TaskId),

    /// `created` names the item an add operation kept in memory
    #[error("failed to save: {source}")]
    WriteFailure {
        source: PersistError,
        created: Option<Created>,
    },
}

/// Item created by an add operation whose save failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Created {
    Category(CategoryId),
    Task(TaskId),
}

impl From<PersistError> for StoreError {
    fn from(source: PersistError) -> Self {
        StoreError::WriteFailure {
            source,
            created: None,
        }
    }
}

impl StoreError {
    /// True for errors that left the store unchanged
    pub fn is_rejection(&self) -> bool {
        !matches!(self, StoreError::WriteFailure { .. })
    }

    /// Id of a category that was added although saving it failed
    pub fn created_category(&self) -> Option<&CategoryId> {
        match self {
            StoreError::WriteFailure {
                created: Some(Created::Category(id)),
                ..
            } => Some(id),
            _ => None,
        }
    }

    /// Id of a task that was added although saving it failed
    pub fn created_task(&self) -> Option<&TaskId> {
        match self {
            StoreError::WriteFailure {
                created: Some(Created::Task(id)),
                ..
            } => Some(id),
            _ => None,
        }
    }

    pub(crate) fn with_created(self, item: Created) -> Self {
        match self {
            StoreError::WriteFailure { source, .. } => StoreError::WriteFailure {
                source,
                created: Some(item),
            },
            other => other,
        }
    }
}
