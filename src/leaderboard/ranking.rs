//! Pure ranking rules.
//!
//! Ascending by time, ties kept in insertion order, capped length.

use super::entry::LeaderboardEntry;

/// Insert `entry` and return the re-ranked, truncated list.
///
/// The sort is stable, so an entry tying an existing time ranks after it.
///
/// ```
/// use emoji_pair::leaderboard::{insert_ranked, LeaderboardEntry};
///
/// let board = vec![LeaderboardEntry::new("alice", 5000)];
/// let board = insert_ranked(&board, LeaderboardEntry::new("bob", 3000), 10);
///
/// assert_eq!(board[0].name, "bob");
/// assert_eq!(board[1].name, "alice");
/// ```
#[must_use]
pub fn insert_ranked(
    entries: &[LeaderboardEntry],
    entry: LeaderboardEntry,
    capacity: usize,
) -> Vec<LeaderboardEntry> {
    let mut ranked = Vec::with_capacity(entries.len() + 1);
    ranked.extend_from_slice(entries);
    ranked.push(entry);
    ranked.sort_by_key(|e| e.elapsed_millis);
    ranked.truncate(capacity);
    ranked
}

/// Zero-based position of the first entry equal to `entry`.
///
/// Matches on name and time together, so two identical submissions
/// resolve to the earlier row.
#[must_use]
pub fn rank_of(entries: &[LeaderboardEntry], entry: &LeaderboardEntry) -> Option<usize> {
    entries.iter().position(|e| e == entry)
}

/// Would a run of `elapsed_millis` make the list?
#[must_use]
pub fn qualifies(entries: &[LeaderboardEntry], elapsed_millis: u64, capacity: usize) -> bool {
    if capacity == 0 {
        return false;
    }
    entries.len() < capacity
        || entries
            .get(capacity - 1)
            .is_some_and(|last| elapsed_millis < last.elapsed_millis)
}

/// Is `entries` in ranked order?
#[must_use]
pub fn is_ranked(entries: &[LeaderboardEntry]) -> bool {
    entries
        .windows(2)
        .all(|w| w[0].elapsed_millis <= w[1].elapsed_millis)
}
