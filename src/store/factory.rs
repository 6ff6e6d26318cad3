// ABOUTME: Store factory and provider abstraction for multi-backend support
// ABOUTME: Provides unified interface for memory and file stores with runtime selection
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Store factory for creating store providers
//!
//! This module provides automatic backend detection and creation based on
//! store URLs (`memory://` or `file:<path>`).

use super::{FileStore, MemoryStore, StoreProvider};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use tracing::{debug, info};

/// Supported store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    Memory,
    File,
}

/// Store instance wrapper that delegates to the appropriate implementation
#[derive(Clone)]
pub enum Store {
    Memory(MemoryStore),
    File(FileStore),
}

impl Store {
    /// Get a descriptive string for the current store backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "Memory (Ephemeral)",
            Self::File(_) => "JSON File (Local Persistence)",
        }
    }

    /// Get the store type enum
    #[must_use]
    pub const fn store_type(&self) -> StoreType {
        match self {
            Self::Memory(_) => StoreType::Memory,
            Self::File(_) => StoreType::File,
        }
    }

    /// Create a new store instance based on the store URL
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the URL format is unsupported or invalid
    /// - an existing store file cannot be read or parsed
    pub async fn new(store_url: &str) -> AppResult<Self> {
        debug!("Detecting store type from URL: {}", store_url);
        let store_type = detect_store_type(store_url)?;
        info!("Detected store type: {:?}", store_type);

        match store_type {
            StoreType::Memory => Ok(Self::Memory(MemoryStore::new())),
            StoreType::File => {
                let path = store_url.strip_prefix("file:").unwrap_or(store_url);
                let store = FileStore::new(path).await?;
                info!("File store initialized at {}", path);
                Ok(Self::File(store))
            }
        }
    }
}

/// Automatically detect store type from a store URL
///
/// # Errors
///
/// Returns an error if the URL format is not recognized (must start with
/// `memory://` or `file:`)
pub fn detect_store_type(store_url: &str) -> AppResult<StoreType> {
    if store_url == "memory" || store_url.starts_with("memory://") {
        Ok(StoreType::Memory)
    } else if store_url.starts_with("file:") {
        Ok(StoreType::File)
    } else {
        Err(AppError::config(format!(
            "Unsupported store URL format: {store_url}. \
             Supported formats: memory://, file:path/to/store.json"
        )))
    }
}

// Implement StoreProvider for the enum by delegating to the appropriate implementation
#[async_trait]
impl StoreProvider for Store {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        match self {
            Self::Memory(store) => store.get_raw(key).await,
            Self::File(store) => store.get_raw(key).await,
        }
    }

    async fn put_raw(&self, key: &str, value: String) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.put_raw(key, value).await,
            Self::File(store) => store.put_raw(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        match self {
            Self::Memory(store) => store.remove(key).await,
            Self::File(store) => store.remove(key).await,
        }
    }

    async fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        match self {
            Self::Memory(store) => store.keys_with_prefix(prefix).await,
            Self::File(store) => store.keys_with_prefix(prefix).await,
        }
    }

    async fn clear_all(&self) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.clear_all().await,
            Self::File(store) => store.clear_all().await,
        }
    }

    async fn health_check(&self) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.health_check().await,
            Self::File(store) => store.health_check().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_store_type() {
        assert_eq!(detect_store_type("memory://").unwrap(), StoreType::Memory);
        assert_eq!(detect_store_type("memory").unwrap(), StoreType::Memory);
        assert_eq!(
            detect_store_type("file:fitbridge.json").unwrap(),
            StoreType::File
        );
        assert!(detect_store_type("redis://localhost").is_err());
    }

    #[tokio::test]
    async fn test_memory_factory_round_trip() {
        let store = Store::new("memory://").await.unwrap();
        assert_eq!(store.store_type(), StoreType::Memory);
        store.put_raw("k", "v".into()).await.unwrap();
        assert_eq!(store.get_raw("k").await.unwrap().as_deref(), Some("v"));
    }
}
