//! Implements HistoryPort using a JSON file.
//!
//! Newest scan first, capped at `limit` entries.

use crate::domain::{DomainError, ScanHistoryEntry};
use crate::ports::HistoryPort;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Default number of scans kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// JSON file-based scan history.
pub struct HistoryJson {
    path: PathBuf,
    limit: usize,
    cache: tokio::sync::RwLock<Vec<ScanHistoryEntry>>,
}

impl HistoryJson {
    pub fn new(path: impl AsRef<Path>, limit: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            limit: limit.max(1),
            cache: tokio::sync::RwLock::new(Vec::new()),
        }
    }

    /// Load history from disk. A missing or unreadable file starts empty.
    pub async fn load(&self) -> Result<(), DomainError> {
        let entries: Vec<ScanHistoryEntry> = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "history file corrupt, starting empty");
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };
        let mut cache = self.cache.write().await;
        *cache = entries;
        cache.truncate(self.limit);
        debug!(count = cache.len(), "loaded scan history");
        Ok(())
    }

    /// Write-replace: temp file, sync_all, atomic rename.
    async fn save(&self) -> Result<(), DomainError> {
        let data = self.cache.read().await;
        let json =
            serde_json::to_string_pretty(&*data).map_err(|e| DomainError::History(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::History(format!("create data dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::History(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::History(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::History(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::History(format!("atomic rename failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl HistoryPort for HistoryJson {
    async fn record(&self, entry: ScanHistoryEntry) -> Result<(), DomainError> {
        {
            let mut cache = self.cache.write().await;
            cache.insert(0, entry);
            cache.truncate(self.limit);
        }
        self.save().await
    }

    async fn list(&self) -> Result<Vec<ScanHistoryEntry>, DomainError> {
        Ok(self.cache.read().await.clone())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.cache.write().await.clear();
        self.save().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Verdict;
    use chrono::{TimeZone, Utc};

    fn entry(barcode: &str) -> ScanHistoryEntry {
        ScanHistoryEntry {
            barcode: barcode.into(),
            product_name: format!("Product {}", barcode),
            verdict: Verdict::Safe,
            scanned_at: Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_record_persists_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let store = HistoryJson::new(&path, DEFAULT_HISTORY_LIMIT);
        store.load().await.unwrap();
        store.record(entry("1")).await.unwrap();
        store.record(entry("2")).await.unwrap();

        let reopened = HistoryJson::new(&path, DEFAULT_HISTORY_LIMIT);
        reopened.load().await.unwrap();
        let entries = reopened.list().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].barcode, "2");
        assert_eq!(entries[1], entry("1"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_truncates_to_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryJson::new(dir.path().join("history.json"), 3);
        for i in 0..5 {
            store.record(entry(&i.to_string())).await.unwrap();
        }
        let barcodes: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.barcode)
            .collect();
        assert_eq!(barcodes, vec!["4", "3", "2"]);
    }

    #[tokio::test]
    async fn test_missing_or_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let store = HistoryJson::new(&path, DEFAULT_HISTORY_LIMIT);
        store.load().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());

        tokio::fs::write(&path, "{not json").await.unwrap();
        store.load().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");
        let store = HistoryJson::new(&path, DEFAULT_HISTORY_LIMIT);
        store.record(entry("1")).await.unwrap();
        store.clear().await.unwrap();

        let reopened = HistoryJson::new(&path, DEFAULT_HISTORY_LIMIT);
        reopened.load().await.unwrap();
        assert!(reopened.list().await.unwrap().is_empty());
    }
}
