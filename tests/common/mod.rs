//! Common test utilities for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use todo_mcp::{Category, CategoryId, Medium, Storage, Store, Task, TodoData};

/// Medium whose writes can be switched to fail, e.g. to simulate a full disk
#[derive(Clone, Default)]
pub struct FlakyMedium {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyMedium {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

impl Medium for FlakyMedium {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::other("quota exceeded"));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store over a fresh in-memory medium (default categories, first selected)
pub fn open_test_store() -> Store {
    Store::open(Storage::in_memory())
}

/// Store holding exactly the given categories, nothing selected
pub fn store_with_categories(names: &[&str]) -> Store {
    let mut data = TodoData::new();
    for name in names {
        let category = Category::new(*name);
        data.tasks.insert(category.id.clone(), Vec::new());
        data.categories.push(category);
    }
    Store::from_parts(data, Storage::in_memory())
}

pub fn create_test_task(id: &str, text: &str, done: bool, created_at: i64) -> Task {
    Task {
        id: id.into(),
        text: text.to_string(),
        done,
        created_at,
    }
}

pub fn category_id(store: &Store, name: &str) -> CategoryId {
    store.find_category_by_name(name).unwrap().id.clone()
}
