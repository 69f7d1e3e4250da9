//! Leaderboard: ranked, capped, persisted completion times.
//!
//! - `entry`: the `(name, elapsed)` record
//! - `ranking`: pure insert/rank rules
//! - `storage`: key-value boundary and wire codec
//! - `store`: load/submit over a backend

pub mod entry;
pub mod ranking;
pub mod storage;
pub mod store;

pub use entry::LeaderboardEntry;
pub use ranking::{insert_ranked, is_ranked, qualifies, rank_of};
pub use storage::{decode, encode, CodecError, KeyValueStore, MemoryStore, StorageError};
pub use store::{LeaderboardStore, PersistenceError};
