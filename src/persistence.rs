use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

/// Where the document survives between sessions.
pub trait PersistenceStore {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, content: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
    fn describe(&self) -> String;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument {
    content: String,
    #[serde(default)]
    saved_at: u64,
}

/// Scratch document kept as JSON in the data directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PersistenceStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let stored: StoredDocument = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a saved document", self.path.display()))?;
        debug!(
            "restored {} bytes saved at {} from {}",
            stored.content.len(),
            stored.saved_at,
            self.path.display()
        );
        Ok(Some(stored.content))
    }

    fn save(&self, content: &str) -> Result<()> {
        let stored = StoredDocument {
            content: content.to_string(),
            saved_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        write_creating_parent(&self.path, &json)
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A regular text file opened from the command line.
pub struct PlainFileStore {
    path: PathBuf,
}

impl PlainFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PersistenceStore for PlainFileStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&self.path)
            .map(Some)
            .with_context(|| format!("failed to read {}", self.path.display()))
    }

    fn save(&self, content: &str) -> Result<()> {
        write_creating_parent(&self.path, content)
    }

    /// Truncates rather than deletes, so the file the user opened stays in place.
    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            write_creating_parent(&self.path, "")?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn write_creating_parent(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("document.json"));

        assert_eq!(store.load().unwrap(), None);

        store.save("line one\nline \"two\"").unwrap();
        assert_eq!(
            store.load().unwrap().as_deref(),
            Some("line one\nline \"two\"")
        );

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn json_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("document.json");
        fs::write(&path, "not json").unwrap();

        assert!(JsonFileStore::new(&path).load().is_err());
    }

    #[test]
    fn json_store_accepts_missing_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("document.json");
        fs::write(&path, r#"{"content":"hi"}"#).unwrap();

        assert_eq!(
            JsonFileStore::new(&path).load().unwrap().as_deref(),
            Some("hi")
        );
    }

    #[test]
    fn plain_store_writes_raw_text_and_truncates_on_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let store = PlainFileStore::new(&path);

        store.save("plain").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "plain");

        store.clear().unwrap();
        assert!(path.exists());
        assert_eq!(store.load().unwrap().as_deref(), Some(""));
    }
}
