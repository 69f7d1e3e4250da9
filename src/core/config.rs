//! Game configuration types.
//!
//! Hosts configure the engine at startup by providing:
//! - `BoardConfig`: Grid shape, flip-back delay, display tick, deal seed
//! - `LeaderboardConfig`: Storage key, capacity, wire encoding
//! - `SessionConfig`: Combines both with the anonymous-player label

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Board layout and timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Cards per row when the deck is laid out as a grid.
    pub columns: usize,

    /// Delay before a mismatched pair turns face-down again.
    /// `None` keeps it face-up until the next flip.
    pub flip_back_delay_ms: Option<u64>,

    /// Period of the elapsed-time display refresh.
    /// `None` disables the ticker; elapsed time is still derived on demand.
    pub tick_period_ms: Option<u64>,

    /// Fixed deal seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: 6,
            flip_back_delay_ms: Some(1_000),
            tick_period_ms: Some(100),
            seed: None,
        }
    }
}

impl BoardConfig {
    /// Set the number of columns.
    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Set or disable the flip-back delay.
    #[must_use]
    pub fn with_flip_back_delay(mut self, delay_ms: Option<u64>) -> Self {
        self.flip_back_delay_ms = delay_ms;
        self
    }

    /// Set or disable the display ticker.
    #[must_use]
    pub fn with_tick_period(mut self, period_ms: Option<u64>) -> Self {
        self.tick_period_ms = period_ms;
        self
    }

    /// Deal every game from a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Flip-back delay as a [`Duration`].
    #[must_use]
    pub fn flip_back_delay(&self) -> Option<Duration> {
        self.flip_back_delay_ms.map(Duration::from_millis)
    }

    /// Ticker period as a [`Duration`].
    #[must_use]
    pub fn tick_period(&self) -> Option<Duration> {
        self.tick_period_ms.map(Duration::from_millis)
    }

    /// Check the values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for zero columns or a zero-length period.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.tick_period_ms == Some(0) {
            return Err(ConfigError::ZeroPeriod { field: "tick_period_ms" });
        }
        Ok(())
    }
}

/// How the leaderboard is encoded in the key-value store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageEncoding {
    /// `[{"name": "...", "time": 1234}]`
    #[default]
    Json,
    /// Compact binary via `bincode`.
    Bincode,
}

/// Leaderboard persistence settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Key the whole leaderboard is stored under.
    pub key: String,

    /// Maximum number of entries kept.
    pub capacity: usize,

    /// Wire encoding of the stored value.
    pub encoding: StorageEncoding,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            key: "leaderboard".to_string(),
            capacity: 10,
            encoding: StorageEncoding::Json,
        }
    }
}

impl LeaderboardConfig {
    /// Set the storage key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the maximum number of kept entries.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the wire encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: StorageEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Check the values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a zero capacity or an empty key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.key.is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        Ok(())
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub board: BoardConfig,
    pub leaderboard: LeaderboardConfig,

    /// Name recorded when the identity provider has no user.
    pub fallback_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            leaderboard: LeaderboardConfig::default(),
            fallback_name: "anon".to_string(),
        }
    }
}

impl SessionConfig {
    /// Replace the board settings.
    #[must_use]
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Replace the leaderboard settings.
    #[must_use]
    pub fn with_leaderboard(mut self, leaderboard: LeaderboardConfig) -> Self {
        self.leaderboard = leaderboard;
        self
    }

    /// Set the anonymous-player label.
    #[must_use]
    pub fn with_fallback_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_name = name.into();
        self
    }

    /// Validate every nested section.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()?;
        self.leaderboard.validate()
    }
}
