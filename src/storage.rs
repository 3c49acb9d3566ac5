use crate::errors::AppError;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::BTreeMap,
    env,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{error, warn};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

/// String-keyed store whose values are JSON text, flushed to a single file.
///
/// Reads never fail: a missing or corrupt file opens as an empty store and a
/// missing or corrupt entry yields the caller's default.
#[derive(Debug)]
pub struct KvStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl KvStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path).await;
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(raw) = self.entries.get(key) else {
            return default;
        };
        match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("ignoring unreadable entry {key:?}: {err}");
                default
            }
        }
    }

    /// Updates the in-memory entry; call [`KvStore::flush`] to persist it.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value).map_err(AppError::internal)?;
        self.entries.insert(key.to_owned(), raw);
        Ok(())
    }

    pub async fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), AppError> {
        self.set(key, value)?;
        self.flush().await
    }

    pub async fn flush(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let payload = serde_json::to_vec_pretty(&self.entries).map_err(AppError::internal)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

async fn read_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse data file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let store = KvStore::open(dir.path().join("state.json")).await;

        assert_eq!(store.load("eventName", "fallback".to_string()), "fallback");
        assert_eq!(store.load("eventDate", 42i64), 42);
    }

    #[tokio::test]
    async fn saved_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/state.json");

        let mut store = KvStore::open(&path).await;
        store.save("eventName", &"Launch").await.unwrap();
        store.save("eventDate", &1_900_000_000_000i64).await.unwrap();

        let reopened = KvStore::open(&path).await;
        assert_eq!(reopened.load("eventName", String::new()), "Launch");
        assert_eq!(reopened.load("eventDate", 0i64), 1_900_000_000_000);
    }

    #[tokio::test]
    async fn set_without_flush_is_not_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let mut store = KvStore::open(&path).await;
        store.set("eventName", &"Draft").unwrap();
        assert_eq!(store.load("eventName", String::new()), "Draft");

        let reopened = KvStore::open(&path).await;
        assert_eq!(reopened.load("eventName", "none".to_string()), "none");
    }

    #[tokio::test]
    async fn corrupt_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = KvStore::open(&path).await;
        assert_eq!(store.load("eventDate", 7i64), 7);
    }

    #[tokio::test]
    async fn corrupt_entry_uses_default_without_touching_others() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            br#"{"eventName": "\"Party\"", "eventDate": "soon-ish"}"#,
        )
        .unwrap();

        let store = KvStore::open(&path).await;
        assert_eq!(store.load("eventName", String::new()), "Party");
        assert_eq!(store.load("eventDate", 99i64), 99);
    }

    #[tokio::test]
    async fn values_are_stored_as_json_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let mut store = KvStore::open(&path).await;
        store.save("eventName", &"Year 2030").await.unwrap();

        let raw: BTreeMap<String, String> =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw.get("eventName").map(String::as_str), Some("\"Year 2030\""));
    }
}
