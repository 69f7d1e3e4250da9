//! # emoji-pair
//!
//! A memory matching game engine with a persisted top-10 leaderboard.
//!
//! ## Design Principles
//!
//! 1. **Immutable State**: A single `GameState` value transformed by pure
//!    functions (`new_game`, `flip`, `reset`). No state cells to drift apart.
//!
//! 2. **Host-Agnostic**: Rendering, storage, identity and notifications are
//!    traits the host implements. The engine never sleeps or spawns.
//!
//! 3. **Time as Input**: Elapsed time is derived from timestamps taken at
//!    events, never from a background counter.
//!
//! ## Modules
//!
//! - `core`: Symbols, RNG, clocks, configuration, errors
//! - `board`: Deck dealing, flip/match transitions, completion
//! - `leaderboard`: Ranked, capped, persisted completion times
//! - `session`: Event routing, timers and the view snapshot
//!
//! ## Example
//!
//! ```
//! use emoji_pair::core::{ManualClock, SessionConfig};
//! use emoji_pair::leaderboard::MemoryStore;
//! use emoji_pair::session::{GameSession, SessionEvent};
//! use emoji_pair::board::Phase;
//!
//! let clock = ManualClock::new(0);
//! let mut session = GameSession::new(SessionConfig::default(), MemoryStore::new(), clock.clone())
//!     .unwrap();
//!
//! session.handle(SessionEvent::StartGame);
//! assert_eq!(session.view().phase, Phase::Playing);
//! assert_eq!(session.view().cards.len(), 24);
//! ```

pub mod board;
pub mod core;
pub mod leaderboard;
pub mod session;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, BoardError, Clock, ConfigError, GameRng, LeaderboardConfig, ManualClock, PairSet,
    SessionConfig, StorageEncoding, Symbol, SystemClock, Timestamp,
};

pub use crate::board::{Deck, FlipOutcome, GameState, IgnoreReason, Phase};

pub use crate::leaderboard::{
    KeyValueStore, LeaderboardEntry, LeaderboardStore, MemoryStore, PersistenceError, StorageError,
};

pub use crate::session::{
    GameSession, IdentityProvider, Notifier, SessionEvent, SessionUpdate, SessionView,
};
