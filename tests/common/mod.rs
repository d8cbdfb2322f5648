use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const SEED_CATEGORIES: &str = r#"{
    "expense_categories": ["groceries", "rent", "utilities", "transport"],
    "income_categories": ["salary", "bonus", "interest"]
}"#;

/// Creates an isolated data directory seeded with a category registry.
pub fn setup_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    fs::write(base.join("categories.json"), SEED_CATEGORIES).expect("seed categories.json");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates an isolated data directory with no category registry at all.
#[allow(dead_code)]
pub fn setup_bare_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}
