//! Key-value storage boundary and the leaderboard wire codec.
//!
//! The host platform provides a [`KeyValueStore`]. The leaderboard is
//! read and written whole under one key.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use super::entry::LeaderboardEntry;
use crate::core::StorageEncoding;

/// Failure reported by a storage backend.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("failed to read key '{key}': {message}")]
    Read { key: String, message: String },

    #[error("failed to write key '{key}': {message}")]
    Write { key: String, message: String },
}

/// External get/put storage.
///
/// Implementations take `&self`; a backend that needs mutation uses
/// interior mutability, as [`MemoryStore`] does.
pub trait KeyValueStore {
    /// Read the value under `key`. `Ok(None)` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the value under `key`.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        (**self).put(key, value)
    }
}

/// In-process store.
///
/// Clones share the same data. Reads and writes can be made to fail,
/// which is how tests exercise the degraded paths.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<FxHashMap<String, Vec<u8>>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw bytes under `key`, bypassing failure injection.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.data.lock().ok()?.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let read_error = |message: &str| StorageError::Read {
            key: key.to_string(),
            message: message.to_string(),
        };
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(read_error("store unavailable"));
        }
        let data = self.data.lock().map_err(|_| read_error("lock poisoned"))?;
        Ok(data.get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let write_error = |message: &str| StorageError::Write {
            key: key.to_string(),
            message: message.to_string(),
        };
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(write_error("store unavailable"));
        }
        let mut data = self.data.lock().map_err(|_| write_error("lock poisoned"))?;
        debug!(key, bytes = value.len(), "Stored value");
        data.insert(key.to_string(), value);
        Ok(())
    }
}

/// Failure to encode or decode the stored leaderboard.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode: {0}")]
    Bincode(#[from] bincode::Error),
}

/// Serialize a leaderboard for storage.
///
/// # Errors
///
/// Returns [`CodecError`] if the serializer fails.
pub fn encode(
    entries: &[LeaderboardEntry],
    encoding: StorageEncoding,
) -> Result<Vec<u8>, CodecError> {
    Ok(match encoding {
        StorageEncoding::Json => serde_json::to_vec(entries)?,
        StorageEncoding::Bincode => bincode::serialize(entries)?,
    })
}

/// Deserialize a stored leaderboard.
///
/// # Errors
///
/// Returns [`CodecError`] if the bytes are not a valid leaderboard.
pub fn decode(
    bytes: &[u8],
    encoding: StorageEncoding,
) -> Result<Vec<LeaderboardEntry>, CodecError> {
    Ok(match encoding {
        StorageEncoding::Json => serde_json::from_slice(bytes)?,
        StorageEncoding::Bincode => bincode::deserialize(bytes)?,
    })
}
