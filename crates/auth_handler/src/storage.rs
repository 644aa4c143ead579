//! Host storage contract.
//!
//! The host owns durable persistence. The backend only needs hierarchical string
//! keys (`config`, `map/teams/<name>`) holding JSON bytes, with read-after-write
//! consistency per key.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::RwLock;

use crate::{AuthError, AuthResult};

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;

/// Key/value storage supplied by the host.
#[async_trait]
pub trait Storage: Send + Sync + Debug {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> AuthResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: Vec<u8>) -> AuthResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> AuthResult<()>;

    /// List the keys directly under `prefix`, with the prefix stripped, sorted.
    async fn list(&self, prefix: &str) -> AuthResult<Vec<String>>;
}

/// Read and decode a JSON entry.
pub async fn get_json<T>(storage: &dyn Storage, key: &str) -> AuthResult<Option<T>>
where
    T: DeserializeOwned,
{
    match storage.get(key).await? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

/// Encode and store a JSON entry.
pub async fn put_json<T>(storage: &dyn Storage, key: &str, value: &T) -> AuthResult<()>
where
    T: Serialize + Sync,
{
    let bytes = serde_json::to_vec(value)
        .map_err(|e| AuthError::Storage(format!("failed to encode entry '{}': {}", key, e)))?;
    storage.put(key, bytes).await
}

/// Thread-safe in-memory storage implementation
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get(&self, key: &str) -> AuthResult<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| AuthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> AuthResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| AuthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AuthResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| AuthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> AuthResult<Vec<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| AuthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries
            .range(prefix.to_string()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(prefix))
            .filter_map(|key| {
                let rest = &key[prefix.len()..];
                (!rest.is_empty() && !rest.contains('/')).then(|| rest.to_string())
            })
            .collect())
    }
}
