//! A single completed run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A player's completion time.
///
/// Serialized as `{"name": ..., "time": ...}`, the shape the stored
/// leaderboard has always used.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    #[serde(rename = "time")]
    pub elapsed_millis: u64,
}

impl LeaderboardEntry {
    /// Create an entry from a name and a time in milliseconds.
    pub fn new(name: impl Into<String>, elapsed_millis: u64) -> Self {
        Self {
            name: name.into(),
            elapsed_millis,
        }
    }

    /// Create an entry from a [`Duration`], saturating at `u64::MAX` ms.
    pub fn from_duration(name: impl Into<String>, elapsed: Duration) -> Self {
        Self::new(name, u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }

    /// The time as a [`Duration`].
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let entry = LeaderboardEntry::new("alice", 5000);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"name":"alice","time":5000}"#);
    }

    #[test]
    fn test_from_duration() {
        let entry = LeaderboardEntry::from_duration("bob", Duration::from_millis(3_250));
        assert_eq!(entry.elapsed_millis, 3_250);
        assert_eq!(entry.elapsed(), Duration::from_millis(3_250));
    }
}
