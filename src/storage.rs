use crate::errors::AppError;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{error, warn};

pub const PROGRESS_KEY: &str = "progress-state";
pub const REMINDERS_KEY: &str = "reminders-list";
pub const DARK_MODE_KEY: &str = "dark-mode-flag";

#[derive(Debug, Default)]
pub struct KvStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl KvStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub async fn open(path: &Path) -> Self {
        let entries = match fs::read(path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("failed to parse data file, starting empty: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!("failed to read data file: {err}");
                BTreeMap::new()
            }
        };

        Self {
            path: Some(path.to_path_buf()),
            entries,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub async fn set(&mut self, key: &str, value: String) -> Result<(), AppError> {
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(err) = self.persist().await {
            match previous {
                Some(previous) => self.entries.insert(key.to_string(), previous),
                None => self.entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    async fn persist(&self) -> Result<(), AppError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let payload = serde_json::to_vec_pretty(&self.entries).map_err(AppError::internal)?;
        fs::write(path, payload).await.map_err(AppError::internal)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_path() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("study_tracker_kv_{}_{}.json", std::process::id(), nanos))
    }

    #[tokio::test]
    async fn set_is_visible_after_reopen() {
        let path = unique_path();
        let mut store = KvStore::open(&path).await;
        store.set(DARK_MODE_KEY, "1".to_string()).await.unwrap();

        let reopened = KvStore::open(&path).await;
        assert_eq!(reopened.get(DARK_MODE_KEY), Some("1"));
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn unreadable_file_opens_empty() {
        let path = unique_path();
        std::fs::write(&path, "not a map").unwrap();

        let store = KvStore::open(&path).await;
        assert_eq!(store.get(PROGRESS_KEY), None);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn failed_write_is_rolled_back() {
        let path = std::env::temp_dir()
            .join("study_tracker_missing_dir")
            .join("state.json");
        let mut store = KvStore::open(&path).await;

        assert!(store.set(DARK_MODE_KEY, "1".to_string()).await.is_err());
        assert_eq!(store.get(DARK_MODE_KEY), None);
    }
}
