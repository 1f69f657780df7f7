use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::warn;

/// Durable key to string mapping used to remember the panel width.
pub trait WidthStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl WidthStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON-object file store. Every write rewrites the whole file atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::data_local_dir()?;
        path.push("kanban-panel");
        path.push("panel-state.json");
        Some(path)
    }

    /// Opens the store at `path`. A missing or unreadable file yields an
    /// empty store; it is recreated on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.entries)
            .context("failed to serialize panel state")?;
        write_atomically(&self.path, &contents)
    }
}

impl WidthStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    if !path.exists() {
        return BTreeMap::new();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(
                    "failed to parse panel state '{}': {}; starting empty",
                    path.display(),
                    error
                );
                BTreeMap::new()
            }
        },
        Err(error) => {
            warn!(
                "failed to read panel state '{}': {}; starting empty",
                path.display(),
                error
            );
            BTreeMap::new()
        }
    }
}

/// Writes `contents` to a sibling temp file, then renames it over `path`.
pub(crate) fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow!("invalid path '{}'", path.display()))?;
    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create directory '{}'", parent.display()))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("invalid file name in '{}'", path.display()))?
        .to_string_lossy()
        .to_string();
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&tmp_path, contents)
        .with_context(|| format!("failed to write temporary file '{}'", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "failed to atomically rename '{}' to '{}'",
            tmp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn state_path(dir: &TempDir) -> PathBuf {
        dir.path().join("nested").join("panel-state.json")
    }

    #[test]
    fn memory_store_round_trips_values() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "640").expect("memory set should succeed");
        assert_eq!(store.get("k").as_deref(), Some("640"));

        store.remove("k").expect("memory remove should succeed");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = FileStore::open(state_path(&dir));
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = state_path(&dir);

        let mut store = FileStore::open(&path);
        store.set("task-panel-width", "72").expect("set should succeed");
        assert!(path.exists());

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("task-panel-width").as_deref(), Some("72"));
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = state_path(&dir);

        let mut store = FileStore::open(&path);
        store.set("left", "30").expect("set should succeed");
        store.set("right", "90").expect("set should succeed");
        store.remove("left").expect("remove should succeed");

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("left"), None);
        assert_eq!(reopened.get("right").as_deref(), Some("90"));
    }

    #[test]
    fn file_store_corrupt_file_is_empty() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("panel-state.json");
        fs::write(&path, "{ not json").expect("failed to write corrupt file");

        let store = FileStore::open(&path);
        assert_eq!(store.get("task-panel-width"), None);
    }

    #[test]
    fn file_store_write_failure_is_reported() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").expect("failed to write blocker");

        let mut store = FileStore::open(blocker.join("panel-state.json"));
        assert!(store.set("k", "1").is_err());
        assert_eq!(store.get("k").as_deref(), Some("1"));
    }
}
