//! To-do domain model and store
//!
//! - `model`: categories, tasks, identifiers and the view filter
//! - `store`: the `Store` and its mutating operations
//! - `queries`: read-only queries and the render snapshot
//! - `error`: store error kinds

mod error;
mod model;
mod queries;
mod store;

pub use error::{Created, StoreError};
pub use model::{
    Category, CategoryId, CategorySummary, Filter, Task, TaskId, TodoData, now_millis,
};
pub use queries::{CategoryView, Snapshot};
pub use store::{DEFAULT_CATEGORIES, Store};
