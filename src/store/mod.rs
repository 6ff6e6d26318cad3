// ABOUTME: Key-value store abstraction standing in for the original browser storage
// ABOUTME: Pluggable backend support (in-memory, JSON file) following a provider pattern
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Store factory for creating store providers
pub mod factory;
/// Single-file JSON store implementation
pub mod file;
/// In-memory store implementation
pub mod memory;

use crate::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use factory::{detect_store_type, Store, StoreType};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Key-value store trait for pluggable backend implementations
///
/// Every record is stored as a JSON string under a schema key from
/// [`crate::constants::storage_keys`]. Backends only move strings; the typed
/// helpers layer serde on top.
///
/// # Examples
///
/// ```rust
/// use fitbridge::store::{MemoryStore, StoreProvider};
/// use serde::{Deserialize, Serialize};
/// # async fn example() -> Result<(), fitbridge::errors::AppError> {
///
/// #[derive(Serialize, Deserialize)]
/// struct Preferences {
///     theme: String,
/// }
///
/// let store = MemoryStore::new();
///
/// let prefs = Preferences { theme: "dark".to_owned() };
/// store.put_json("prefs_42", &prefs).await?;
///
/// let cached: Option<Preferences> = store.get_json("prefs_42").await?;
/// assert_eq!(cached.map(|p| p.theme).as_deref(), Some("dark"));
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait StoreProvider: Send + Sync {
    /// Retrieve the raw string stored under a key
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a raw string under a key, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails
    async fn put_raw(&self, key: &str, value: String) -> AppResult<()>;

    /// Remove a key, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails
    async fn remove(&self, key: &str) -> AppResult<bool>;

    /// List all keys starting with the given prefix
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails
    async fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>>;

    /// Remove every entry (for tests and reseeding)
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails
    async fn clear_all(&self) -> AppResult<()>;

    /// Verify the backend is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the health check fails
    async fn health_check(&self) -> AppResult<()>;

    /// Retrieve and deserialize a JSON value
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the stored string is not valid
    /// JSON for `T`
    async fn get_json<T: DeserializeOwned + Send>(&self, key: &str) -> AppResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(raw) => {
                let value = serde_json::from_str(&raw).map_err(|e| {
                    AppError::storage(format!("corrupt record under key '{key}'")).with_source(e)
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serialize and store a JSON value
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails
    async fn put_json<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.put_raw(key, raw).await
    }
}
