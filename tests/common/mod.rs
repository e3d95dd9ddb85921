//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// The checked-in fixture vault under `tests/fixtures/vault`.
#[allow(dead_code)]
pub fn fixture_vault_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/vault")
}

/// Write `files` (relative path, contents) below a fresh `vault/` directory in `temp_dir`.
///
/// Returns the path to the vault directory.
#[allow(dead_code)]
pub fn create_test_vault(temp_dir: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let vault_path = temp_dir.path().join("vault");
    std::fs::create_dir(&vault_path).unwrap();
    for (rel_path, contents) in files {
        let path = vault_path.join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }
    vault_path
}

/// The four linked notes used for traversal tests.
#[allow(dead_code)]
pub const LINKED_NOTES: &[(&str, &str)] = &[
    (
        "note1.md",
        "This is the first note. It links to [[note2]] and [[note3]].",
    ),
    (
        "note2.md",
        "This is the second note. It links to [[note3]] and [[note4]].",
    ),
    (
        "note3.md",
        "This is the third note. It links to [[phantom-note]].",
    ),
    ("note4.md", "This is the fourth note. No links."),
];
