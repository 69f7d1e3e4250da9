//! Leaderboard integration tests.
//!
//! These tests verify ranking and persistence through the public API:
//! - Ordering and the top-10 cap
//! - Survival across store instances (process restarts)
//! - Degraded reads and writes

use std::io;
use std::sync::{Arc, Mutex};

use emoji_pair::core::{LeaderboardConfig, StorageEncoding};
use emoji_pair::leaderboard::{
    is_ranked, rank_of, KeyValueStore, LeaderboardEntry, LeaderboardStore, MemoryStore,
    PersistenceError,
};

fn entry(name: &str, ms: u64) -> LeaderboardEntry {
    LeaderboardEntry::new(name, ms)
}

/// Log sink shared with a `tracing_subscriber` writer.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber writing to the returned logs.
fn with_captured_logs(f: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    logs.text()
}

// =============================================================================
// Ranking
// =============================================================================

/// Test a faster run ranks above an existing slower one.
#[test]
fn test_faster_run_ranks_first() {
    let store = LeaderboardStore::new(MemoryStore::new(), LeaderboardConfig::default());
    store.submit(entry("alice", 5000)).unwrap();

    let board = store.submit(entry("bob", 3000)).unwrap();
    assert_eq!(board, vec![entry("bob", 3000), entry("alice", 5000)]);
}

/// Test eleven increasing times keep only the ten fastest.
#[test]
fn test_eleven_submissions_keep_ten_fastest() {
    let store = LeaderboardStore::new(MemoryStore::new(), LeaderboardConfig::default());

    for i in 1..=11u64 {
        store.submit(entry(&format!("p{i}"), i * 1_000)).unwrap();
    }

    let board = store.load();
    assert_eq!(board.len(), 10);
    assert!(is_ranked(&board));
    assert_eq!(board.first(), Some(&entry("p1", 1_000)));
    assert_eq!(board.last(), Some(&entry("p10", 10_000)));
    assert!(rank_of(&board, &entry("p11", 11_000)).is_none());
}

/// Test a slow run against a full board is not stored.
#[test]
fn test_slow_run_does_not_displace() {
    let store = LeaderboardStore::new(MemoryStore::new(), LeaderboardConfig::default());
    for i in 0..10u64 {
        store.submit(entry("fast", i)).unwrap();
    }

    let board = store.submit(entry("slow", 60_000)).unwrap();
    assert_eq!(board.len(), 10);
    assert!(board.iter().all(|e| e.name == "fast"));
}

/// Test identical submissions highlight the first matching row.
#[test]
fn test_identical_submissions_rank_first_row() {
    let store = LeaderboardStore::new(MemoryStore::new(), LeaderboardConfig::default());
    store.submit(entry("anon", 4_000)).unwrap();
    let board = store.submit(entry("anon", 4_000)).unwrap();

    assert_eq!(board.len(), 2);
    assert_eq!(rank_of(&board, &entry("anon", 4_000)), Some(0));
}

// =============================================================================
// Persistence
// =============================================================================

/// Test the leaderboard survives a new store over the same backend.
#[test]
fn test_survives_restart() {
    let backend = MemoryStore::new();
    {
        let store = LeaderboardStore::new(backend.clone(), LeaderboardConfig::default());
        store.submit(entry("alice", 5000)).unwrap();
    }

    let reopened = LeaderboardStore::new(backend, LeaderboardConfig::default());
    assert_eq!(reopened.load(), vec![entry("alice", 5000)]);
}

/// Test data written by another writer in the `{name, time}` shape loads.
#[test]
fn test_loads_existing_json() {
    let backend = MemoryStore::new();
    backend
        .put(
            "leaderboard",
            br#"[{"name":"carol","time":2500},{"name":"dave","time":7000}]"#.to_vec(),
        )
        .unwrap();

    let store = LeaderboardStore::new(backend, LeaderboardConfig::default());
    let board = store.submit(entry("erin", 4000)).unwrap();
    assert_eq!(
        board,
        vec![entry("carol", 2500), entry("erin", 4000), entry("dave", 7000)]
    );
}

/// Test bincode encoding persists and reloads.
#[test]
fn test_bincode_store() {
    let config = LeaderboardConfig::default().with_encoding(StorageEncoding::Bincode);
    let store = LeaderboardStore::new(MemoryStore::new(), config);
    store.submit(entry("zed", 900)).unwrap();
    assert_eq!(store.load(), vec![entry("zed", 900)]);
}

/// Test a failed write reports the ranked list and leaves storage alone.
#[test]
fn test_write_failure() {
    let backend = MemoryStore::new();
    let store = LeaderboardStore::new(backend.clone(), LeaderboardConfig::default());
    store.submit(entry("alice", 5000)).unwrap();

    backend.set_fail_writes(true);
    match store.submit(entry("bob", 3000)) {
        Err(err @ PersistenceError::Write { .. }) => {
            assert_eq!(err.ranked(), &[entry("bob", 3000), entry("alice", 5000)]);
            assert!(err.to_string().starts_with("could not write leaderboard"));
        }
        other => panic!("expected write failure, got {other:?}"),
    }

    backend.set_fail_writes(false);
    assert_eq!(store.load(), vec![entry("alice", 5000)]);
}

/// Test a failed read loads as empty.
#[test]
fn test_read_failure_loads_empty() {
    let backend = MemoryStore::new();
    let store = LeaderboardStore::new(backend.clone(), LeaderboardConfig::default());
    store.submit(entry("alice", 5000)).unwrap();

    backend.set_fail_reads(true);
    assert!(store.load().is_empty());
}

/// Test every failed submit path logs a warning naming the key.
#[test]
fn test_failed_submits_warn() {
    let backend = MemoryStore::new();
    let store = LeaderboardStore::new(backend.clone(), LeaderboardConfig::default().with_key("scores"));

    backend.set_fail_writes(true);
    let logs = with_captured_logs(|| {
        assert!(store.submit(entry("a", 1)).is_err());
    });
    assert!(logs.contains("WARN"));
    assert!(logs.contains("Failed to save leaderboard"));
    assert!(logs.contains("key=scores"));

    backend.set_fail_writes(false);
    backend.set_fail_reads(true);
    let logs = with_captured_logs(|| {
        assert!(store.submit(entry("a", 1)).is_err());
    });
    assert!(logs.contains("Refusing to save over unreadable leaderboard"));
    assert!(logs.contains("key=scores"));

    backend.set_fail_reads(false);
    let logs = with_captured_logs(|| {
        store.submit(entry("a", 1)).unwrap();
    });
    assert!(!logs.contains("WARN"));
}
