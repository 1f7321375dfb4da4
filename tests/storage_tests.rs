//! Persistence round-trip and recovery tests
mod common;

use common::*;
use std::fs;
use tempfile::TempDir;
use todo_mcp::storage::{KEY_CATEGORIES, KEY_DISPLAY_NAME, KEY_SELECTED, KEY_TASKS};
use todo_mcp::todo::DEFAULT_CATEGORIES;
use todo_mcp::*;

fn sample_data() -> TodoData {
    let mut data = TodoData::new();
    for (i, name) in ["Inbox", "Work", "Personal"].iter().enumerate() {
        let category = Category::new(*name);
        let tasks = (0..i)
            .map(|n| {
                create_test_task(
                    &format!("{}-{}", name.to_lowercase(), n),
                    &format!("{} task \"{}\"", name, n),
                    n % 2 == 0,
                    1_700_000_000_000 + n as i64,
                )
            })
            .collect();
        data.tasks.insert(category.id.clone(), tasks);
        data.categories.push(category);
    }
    data.selected = Some(data.categories[1].id.clone());
    data
}

#[test]
fn test_round_trip_through_files() {
    let temp_dir = TempDir::new().unwrap();
    let data = sample_data();

    let mut storage = Storage::open_dir(temp_dir.path());
    storage.save(&data).unwrap();

    let reloaded = Storage::open_dir(temp_dir.path());
    assert_eq!(reloaded.try_load().unwrap(), data);
}

#[test]
fn test_round_trip_without_selection() {
    let temp_dir = TempDir::new().unwrap();
    let mut data = sample_data();
    data.selected = None;

    let mut storage = Storage::open_dir(temp_dir.path());
    storage.save(&data).unwrap();
    assert_eq!(storage.load(), data);
}

#[test]
fn test_one_file_per_versioned_key() {
    let temp_dir = TempDir::new().unwrap();
    let mut storage = Storage::open_dir(temp_dir.path());
    storage.save(&sample_data()).unwrap();
    storage.save_display_name(Some("Ada")).unwrap();

    for key in [KEY_CATEGORIES, KEY_TASKS, KEY_SELECTED, KEY_DISPLAY_NAME] {
        let file = FileMedium::new(temp_dir.path()).path_for(key);
        assert!(file.exists(), "missing {}", file.display());
    }
    assert!(temp_dir.path().join("td.tasks.v1").exists());
}

// A fresh medium opens with the default categories, first one selected
#[test]
fn test_fresh_directory_opens_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open(Storage::open_dir(temp_dir.path().join("todo")));

    let names: Vec<&str> = store.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, DEFAULT_CATEGORIES);
    assert_eq!(
        store.selected_category_id(),
        Some(&store.categories()[0].id)
    );
    assert_eq!(store.display_name(), None);
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let mut storage = Storage::open_dir(temp_dir.path());
    storage.save(&sample_data()).unwrap();
    storage.save_display_name(Some("Ada")).unwrap();
    fs::write(temp_dir.path().join("td.tasks.v1"), "[[[ definitely not toml").unwrap();

    assert!(matches!(
        Storage::open_dir(temp_dir.path()).try_load(),
        Err(PersistError::Malformed { key: KEY_TASKS, .. })
    ));

    let store = Store::open(Storage::open_dir(temp_dir.path()));
    let names: Vec<&str> = store.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, DEFAULT_CATEGORIES);
    assert!(store.categories().iter().all(|c| store.tasks(&c.id).unwrap().is_empty()));
    // The display name lives under its own key and survives the reset
    assert_eq!(store.display_name(), Some("Ada"));
}

#[test]
fn test_non_utf8_file_falls_back_to_empty() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("td.categories.v1"), [0xff, 0xfe, 0x00]).unwrap();

    let storage = Storage::open_dir(temp_dir.path());
    assert!(matches!(
        storage.try_load(),
        Err(PersistError::Read { key: KEY_CATEGORIES, .. })
    ));
    assert!(storage.load().is_empty());
}

// Opening over unreadable data must not overwrite it with defaults
#[test]
fn test_open_leaves_unreadable_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("td.categories.v1");
    fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

    let store = Store::open(Storage::open_dir(temp_dir.path()));

    let names: Vec<&str> = store.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, DEFAULT_CATEGORIES);
    assert_eq!(fs::read(&path).unwrap(), [0xff, 0xfe, 0x00]);
    assert!(!temp_dir.path().join("td.tasks.v1").exists());
}

// Malformed data is replaced on open
#[test]
fn test_open_rewrites_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("td.categories.v1");
    fs::write(&path, "[[[ definitely not toml").unwrap();

    Store::open(Storage::open_dir(temp_dir.path()));

    assert!(Storage::open_dir(temp_dir.path()).try_load().is_ok());
}

#[test]
fn test_hand_written_document_with_legacy_ids() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("td.categories.v1"),
        r#"
[[category]]
id = "lq2k3f9abc12"
name = "Inbox"

[[category]]
id = "lq2k3g0xyz34"
name = "Garden"
"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("td.tasks.v1"),
        r#"
[[tasks.lq2k3g0xyz34]]
id = "lq2k4a1t0001"
text = "Plant tomatoes"
createdAt = 1700000000000

[[tasks.lq2k3g0xyz34]]
id = "lq2k4a1t0002"
text = "Buy soil"
done = true
createdAt = 1700000005000
"#,
    )
    .unwrap();
    fs::write(temp_dir.path().join("td.selectedCat.v1"), "lq2k3g0xyz34").unwrap();

    let store = Store::open(Storage::open_dir(temp_dir.path()));

    let garden = CategoryId::from("lq2k3g0xyz34");
    assert_eq!(store.selected_category_id(), Some(&garden));
    let visible: Vec<&str> = store
        .list_visible_tasks()
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(visible, ["Buy soil", "Plant tomatoes"]);
    // Missing task list for Inbox is created empty
    assert!(store.tasks(&CategoryId::from("lq2k3f9abc12")).unwrap().is_empty());
    let summary = store.category_summary(&garden).unwrap();
    assert_eq!((summary.task_count, summary.done_count), (2, 1));
}

#[test]
fn test_dangling_selection_falls_back_to_first() {
    let temp_dir = TempDir::new().unwrap();
    let data = sample_data();
    let mut storage = Storage::open_dir(temp_dir.path());
    storage.save(&data).unwrap();
    fs::write(temp_dir.path().join("td.selectedCat.v1"), "deleted-long-ago").unwrap();

    let store = Store::open(Storage::open_dir(temp_dir.path()));
    assert_eq!(store.selected_category_id(), Some(&data.categories[0].id));
}

#[test]
fn test_store_changes_reach_disk() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = Store::open(Storage::open_dir(temp_dir.path()));
    let garden = store.add_category("Garden").unwrap();
    let task = store.add_task(&garden, "Water plants").unwrap();
    store.toggle_task_done(&garden, &task).unwrap();
    store.select_category(&garden).unwrap();
    store.set_display_name("Ada").unwrap();

    let data = Storage::open_dir(temp_dir.path()).try_load().unwrap();
    assert_eq!(data.selected.as_ref(), Some(&garden));
    let saved = &data.tasks[&garden];
    assert_eq!(saved.len(), 1);
    assert!(saved[0].done);
    assert_eq!(
        Storage::open_dir(temp_dir.path()).load_display_name().as_deref(),
        Some("Ada")
    );
}
