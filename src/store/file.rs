// ABOUTME: Single-file JSON store implementation mirroring the original browser storage
// ABOUTME: Loads the full map on open and rewrites atomically on every mutation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::StoreProvider;
use crate::errors::{AppError, AppResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// File-backed store holding one JSON object of key/value strings
///
/// The whole map lives in memory; every mutation rewrites the file through a
/// temp-file-then-rename sequence so readers never observe a half-written
/// store. A missing file opens as an empty store; a corrupt file is a storage
/// error rather than silent data loss.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: Arc<PathBuf>,
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl FileStore {
    /// Open a file store, loading existing entries if the file is present
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// existing file holds invalid JSON
    pub async fn new(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let entries = match fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str::<BTreeMap<String, String>>(&raw).map_err(|e| {
                AppError::storage(format!(
                    "store file '{}' holds invalid JSON",
                    path.display()
                ))
                .with_source(e)
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Store file not found, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        debug!(
            path = %path.display(),
            entries = entries.len(),
            "File store opened"
        );

        Ok(Self {
            path: Arc::new(path),
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the backing file from the given snapshot
    async fn persist(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("tmp");

        fs::write(&tmp_path, raw).await?;
        if let Err(e) = fs::rename(&tmp_path, self.path.as_ref()).await {
            warn!(path = %self.path.display(), error = %e, "Failed to replace store file");
            return Err(e.into());
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl StoreProvider for FileStore {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put_raw(&self, key: &str, value: String) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_owned(), value);
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        let mut entries = self.entries.write().await;
        let existed = entries.remove(key).is_some();
        if existed {
            self.persist(&entries).await?;
        }
        Ok(existed)
    }

    async fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn clear_all(&self) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        entries.clear();
        self.persist(&entries).await
    }

    async fn health_check(&self) -> AppResult<()> {
        let entries = self.entries.read().await;
        self.persist(&entries).await
    }
}
