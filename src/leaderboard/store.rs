//! Persisted top-N leaderboard.

use thiserror::Error;
use tracing::{info, warn};

use super::entry::LeaderboardEntry;
use super::ranking::insert_ranked;
use super::storage::{decode, encode, CodecError, KeyValueStore, StorageError};
use crate::core::LeaderboardConfig;

/// A submission that could not be persisted.
///
/// Every variant carries the ranked list as it would have been stored,
/// so the caller can still show it for the current session.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The existing leaderboard could not be read; nothing was written.
    #[error("could not read leaderboard before saving: {source}")]
    Read {
        source: StorageError,
        ranked: Vec<LeaderboardEntry>,
    },

    #[error("could not encode leaderboard: {source}")]
    Encode {
        source: CodecError,
        ranked: Vec<LeaderboardEntry>,
    },

    #[error("could not write leaderboard: {source}")]
    Write {
        source: StorageError,
        ranked: Vec<LeaderboardEntry>,
    },
}

impl PersistenceError {
    /// The in-memory ranking that failed to persist.
    #[must_use]
    pub fn ranked(&self) -> &[LeaderboardEntry] {
        match self {
            PersistenceError::Read { ranked, .. }
            | PersistenceError::Encode { ranked, .. }
            | PersistenceError::Write { ranked, .. } => ranked,
        }
    }

    /// Take the in-memory ranking.
    #[must_use]
    pub fn into_ranked(self) -> Vec<LeaderboardEntry> {
        match self {
            PersistenceError::Read { ranked, .. }
            | PersistenceError::Encode { ranked, .. }
            | PersistenceError::Write { ranked, .. } => ranked,
        }
    }
}

/// Ranked best runs over a [`KeyValueStore`].
///
/// ## Usage
///
/// ```
/// use emoji_pair::core::LeaderboardConfig;
/// use emoji_pair::leaderboard::{LeaderboardEntry, LeaderboardStore, MemoryStore};
///
/// let store = LeaderboardStore::new(MemoryStore::new(), LeaderboardConfig::default());
/// assert!(store.load().is_empty());
///
/// store.submit(LeaderboardEntry::new("alice", 5000)).unwrap();
/// let board = store.submit(LeaderboardEntry::new("bob", 3000)).unwrap();
///
/// assert_eq!(board[0].name, "bob");
/// assert_eq!(store.load(), board);
/// ```
#[derive(Clone, Debug)]
pub struct LeaderboardStore<S> {
    backend: S,
    config: LeaderboardConfig,
}

impl<S: KeyValueStore> LeaderboardStore<S> {
    /// Wrap a backend.
    pub fn new(backend: S, config: LeaderboardConfig) -> Self {
        Self { backend, config }
    }

    /// The storage settings.
    #[must_use]
    pub fn config(&self) -> &LeaderboardConfig {
        &self.config
    }

    /// The wrapped backend.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read the stored leaderboard.
    ///
    /// Absent, unreadable or undecodable data all read as empty.
    #[must_use]
    pub fn load(&self) -> Vec<LeaderboardEntry> {
        match self.try_load() {
            Ok(entries) => entries,
            Err(err) => {
                warn!(key = %self.config.key, error = %err, "Failed to load leaderboard");
                Vec::new()
            }
        }
    }

    /// Read the stored leaderboard, distinguishing a failed read from an empty one.
    ///
    /// Undecodable data still reads as empty; the next submission overwrites it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend read fails.
    pub fn try_load(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
        let Some(bytes) = self.backend.get(&self.config.key)? else {
            return Ok(Vec::new());
        };
        match decode(&bytes, self.config.encoding) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(key = %self.config.key, error = %err, "Stored leaderboard is corrupt, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Insert `entry`, re-rank, truncate to capacity and write back.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the existing list cannot be read or
    /// the new one cannot be written. The error carries the ranked list.
    pub fn submit(&self, entry: LeaderboardEntry) -> Result<Vec<LeaderboardEntry>, PersistenceError> {
        let existing = match self.try_load() {
            Ok(existing) => existing,
            Err(source) => {
                // Writing now would replace the stored list with this entry alone
                warn!(key = %self.config.key, error = %source, "Refusing to save over unreadable leaderboard");
                let ranked = insert_ranked(&[], entry, self.config.capacity);
                return Err(PersistenceError::Read { source, ranked });
            }
        };

        let ranked = insert_ranked(&existing, entry, self.config.capacity);

        let bytes = match encode(&ranked, self.config.encoding) {
            Ok(bytes) => bytes,
            Err(source) => {
                warn!(key = %self.config.key, error = %source, "Failed to encode leaderboard");
                return Err(PersistenceError::Encode { source, ranked });
            }
        };

        if let Err(source) = self.backend.put(&self.config.key, bytes) {
            warn!(key = %self.config.key, error = %source, "Failed to save leaderboard");
            return Err(PersistenceError::Write { source, ranked });
        }

        info!(key = %self.config.key, entries = ranked.len(), "Leaderboard saved");
        Ok(ranked)
    }
}
