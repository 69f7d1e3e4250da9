//! Core building blocks: symbols, RNG, clocks, configuration, errors.
//!
//! Everything here is independent of the board rules and the leaderboard.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;
pub mod symbol;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::{BoardConfig, LeaderboardConfig, SessionConfig, StorageEncoding};
pub use error::{BoardError, ConfigError};
pub use rng::GameRng;
pub use symbol::{PairSet, Symbol, DEFAULT_EMOJIS};
