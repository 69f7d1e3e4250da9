//! Board transitions.
//!
//! Each operation is a pure function from one [`GameState`] to the next:
//!
//! ```text
//! NotStarted --new_game--> Playing --(all matched)--> Completed
//! Completed  --reset-----> NotStarted
//! Playing    --reset-----> NotStarted
//! Playing | Completed --new_game--> Playing
//! ```
//!
//! ## Example
//!
//! ```
//! use emoji_pair::board::{self, Deck, Phase};
//! use emoji_pair::core::Timestamp;
//!
//! let deck = Deck::from_cards(["A", "B", "A", "B"]).unwrap();
//! let t = Timestamp::from_millis(0);
//!
//! let state = board::start_with_deck(deck, t);
//! let state = board::flip(&state, 0, t);
//! let state = board::flip(&state, 2, t);
//! let state = board::flip(&state, 1, t);
//! let state = board::flip(&state, 3, Timestamp::from_millis(4_000));
//!
//! assert_eq!(state.phase(), Phase::Completed);
//! assert_eq!(
//!     board::current_elapsed(&state, Timestamp::from_millis(9_000)).as_millis(),
//!     4_000
//! );
//! ```

use std::time::Duration;

use tracing::{debug, info};

use super::deck::Deck;
use super::state::{GameState, Phase};
use crate::core::{GameRng, PairSet, Timestamp};

/// Why a flip was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Phase is not `Playing`.
    NotPlaying,
    /// Index is past the end of the deck.
    OutOfRange,
    /// Card is already matched.
    AlreadyMatched,
    /// Card is already face-up and pending.
    AlreadyPending,
}

/// What a flip did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// State unchanged.
    Ignored(IgnoreReason),
    /// First card of a turn turned face-up.
    ///
    /// `concealed` holds the mismatched pair this flip turned face-down.
    Revealed {
        index: usize,
        concealed: Option<[usize; 2]>,
    },
    /// Two equal faces; both moved to the matched set.
    Matched { pair: [usize; 2] },
    /// Two different faces; both stay face-up until the next flip.
    Mismatched { pair: [usize; 2] },
    /// The last pair was found.
    Completed { pair: [usize; 2], elapsed: Duration },
}

impl FlipOutcome {
    /// Did the flip change the state?
    #[must_use]
    pub fn changed(&self) -> bool {
        !matches!(self, FlipOutcome::Ignored(_))
    }
}

/// Deal a fresh deck from `pairs` and start playing.
///
/// Valid from any phase; an unfinished game is abandoned.
#[must_use]
pub fn new_game(pairs: &PairSet, rng: &mut GameRng, now: Timestamp) -> GameState {
    start_with_deck(Deck::deal(pairs, rng), now)
}

/// Start playing with an already dealt deck.
#[must_use]
pub fn start_with_deck(deck: Deck, now: Timestamp) -> GameState {
    info!(cards = deck.len(), started_at = now.as_millis(), "Game started");
    GameState {
        phase: Phase::Playing,
        deck,
        started_at: Some(now),
        ..GameState::default()
    }
}

/// Flip the card at `index`.
///
/// Invalid flips return the state unchanged. See [`apply_flip`] for the
/// transition rules.
#[must_use]
pub fn flip(state: &GameState, index: usize, now: Timestamp) -> GameState {
    apply_flip(state, index, now).0
}

/// Flip the card at `index` and report what happened.
///
/// - Ignored when not `Playing`, out of range, matched, or pending.
/// - With an unresolved pair face-up, the pair turns face-down and
///   `index` becomes the only pending card.
/// - Otherwise `index` joins the pending set; a second card resolves the
///   turn as a match or a mismatch.
/// - Matching the last pair moves to `Completed` at `now`.
#[must_use]
pub fn apply_flip(state: &GameState, index: usize, now: Timestamp) -> (GameState, FlipOutcome) {
    if let Some(reason) = ignore_reason(state, index) {
        debug!(index, ?reason, "Flip ignored");
        return (state.clone(), FlipOutcome::Ignored(reason));
    }

    let mut next = state.clone();

    let concealed = next.unresolved_pair();
    if concealed.is_some() {
        next.pending.clear();
    }
    next.pending.push(index);

    let Some(pair) = next.unresolved_pair() else {
        return (next, FlipOutcome::Revealed { index, concealed });
    };
    next.moves += 1;

    let [first, second] = pair;
    if next.deck.get(first) != next.deck.get(second) {
        return (next, FlipOutcome::Mismatched { pair });
    }

    next.pending.clear();
    next.matched.insert(first);
    next.matched.insert(second);

    if next.matched.len() < next.deck.len() {
        return (next, FlipOutcome::Matched { pair });
    }

    // A clock that stepped backwards must not produce finished < started
    let started_at = next.started_at.unwrap_or(now);
    let finished_at = now.max(started_at);
    next.phase = Phase::Completed;
    next.finished_at = Some(finished_at);

    let elapsed = finished_at.saturating_since(started_at);
    info!(
        elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        moves = next.moves,
        "Game completed"
    );
    (next, FlipOutcome::Completed { pair, elapsed })
}

fn ignore_reason(state: &GameState, index: usize) -> Option<IgnoreReason> {
    if state.phase != Phase::Playing {
        Some(IgnoreReason::NotPlaying)
    } else if index >= state.deck.len() {
        Some(IgnoreReason::OutOfRange)
    } else if state.is_matched(index) {
        Some(IgnoreReason::AlreadyMatched)
    } else if state.is_pending(index) {
        Some(IgnoreReason::AlreadyPending)
    } else {
        None
    }
}

/// Turn the unresolved pair face-down, but only if it is still `expected`.
///
/// A delayed flip-back carries the pair it was scheduled for; if the
/// player has since moved on, the state is returned unchanged.
#[must_use]
pub fn conceal_pending(state: &GameState, expected: [usize; 2]) -> GameState {
    if state.phase != Phase::Playing || state.unresolved_pair() != Some(expected) {
        debug!(?expected, "Stale flip-back ignored");
        return state.clone();
    }
    let mut next = state.clone();
    next.pending.clear();
    next
}

/// Elapsed play time as of `now`.
///
/// Zero before a game starts, frozen once completed.
#[must_use]
pub fn current_elapsed(state: &GameState, now: Timestamp) -> Duration {
    match (state.phase, state.started_at, state.finished_at) {
        (Phase::Playing, Some(started), _) => now.saturating_since(started),
        (Phase::Completed, Some(started), Some(finished)) => finished.saturating_since(started),
        _ => Duration::ZERO,
    }
}

/// Abandon or finish the current game and return to `NotStarted`.
#[must_use]
pub fn reset(state: &GameState) -> GameState {
    if state.phase == Phase::Playing {
        debug!(pairs_found = state.pairs_found(), "Game abandoned");
    }
    GameState::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Symbol;

    fn t(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    fn abab() -> GameState {
        start_with_deck(Deck::from_cards(["A", "B", "A", "B"]).unwrap(), t(1_000))
    }

    #[test]
    fn test_new_game_deals_pairs() {
        let pairs = PairSet::emojis();
        let mut rng = GameRng::new(1);
        let state = new_game(&pairs, &mut rng, t(5));

        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.deck().len(), 24);
        assert_eq!(state.started_at(), Some(t(5)));
        assert!(state.pending().is_empty());
        assert!(state.matched().is_empty());
    }

    #[test]
    fn test_abab_scenario() {
        let s = abab();

        let s = flip(&s, 0, t(1_100));
        assert_eq!(s.pending(), &[0]);

        let s = flip(&s, 2, t(1_200));
        assert!(s.pending().is_empty());
        assert!(s.is_matched(0) && s.is_matched(2));
        assert_eq!(s.phase(), Phase::Playing);

        let s = flip(&s, 1, t(1_300));
        assert_eq!(s.pending(), &[1]);

        let (s, outcome) = apply_flip(&s, 3, t(3_000));
        assert_eq!(s.matched().len(), 4);
        assert_eq!(s.phase(), Phase::Completed);
        assert_eq!(s.finished_at(), Some(t(3_000)));
        assert_eq!(
            outcome,
            FlipOutcome::Completed {
                pair: [1, 3],
                elapsed: Duration::from_millis(2_000)
            }
        );
        assert_eq!(s.moves(), 2);
    }

    #[test]
    fn test_mismatch_stays_until_third_flip() {
        let s = abab();
        let s = flip(&s, 0, t(0));
        let (s, outcome) = apply_flip(&s, 1, t(0));

        assert_eq!(outcome, FlipOutcome::Mismatched { pair: [0, 1] });
        assert_eq!(s.pending(), &[0, 1]);

        let (s, outcome) = apply_flip(&s, 2, t(0));
        assert_eq!(
            outcome,
            FlipOutcome::Revealed {
                index: 2,
                concealed: Some([0, 1])
            }
        );
        assert_eq!(s.pending(), &[2]);
        assert!(s.matched().is_empty());
    }

    #[test]
    fn test_flip_on_pending_of_unresolved_pair_ignored() {
        let s = abab();
        let s = flip(&s, 0, t(0));
        let s = flip(&s, 1, t(0));

        let (next, outcome) = apply_flip(&s, 1, t(0));
        assert_eq!(outcome, FlipOutcome::Ignored(IgnoreReason::AlreadyPending));
        assert_eq!(next, s);
    }

    #[test]
    fn test_ignored_flips() {
        let idle = GameState::new();
        assert_eq!(
            apply_flip(&idle, 0, t(0)).1,
            FlipOutcome::Ignored(IgnoreReason::NotPlaying)
        );

        let s = abab();
        assert_eq!(
            apply_flip(&s, 4, t(0)).1,
            FlipOutcome::Ignored(IgnoreReason::OutOfRange)
        );

        let s = flip(&flip(&s, 0, t(0)), 2, t(0));
        let (next, outcome) = apply_flip(&s, 2, t(0));
        assert_eq!(outcome, FlipOutcome::Ignored(IgnoreReason::AlreadyMatched));
        assert_eq!(next, s);
        assert!(!outcome.changed());
    }

    #[test]
    fn test_completed_ignores_flips() {
        let s = abab();
        let s = [0, 2, 1, 3].iter().fold(s, |s, &i| flip(&s, i, t(2_000)));
        assert_eq!(s.phase(), Phase::Completed);

        let (next, outcome) = apply_flip(&s, 0, t(2_500));
        assert_eq!(outcome, FlipOutcome::Ignored(IgnoreReason::NotPlaying));
        assert_eq!(next, s);
    }

    #[test]
    fn test_finished_never_before_started() {
        let s = abab();
        let s = [0, 2, 1].iter().fold(s, |s, &i| flip(&s, i, t(1_000)));
        let s = flip(&s, 3, t(500));

        assert_eq!(s.phase(), Phase::Completed);
        assert!(s.finished_at() >= s.started_at());
        assert_eq!(current_elapsed(&s, t(10_000)), Duration::ZERO);
    }

    #[test]
    fn test_current_elapsed_by_phase() {
        assert_eq!(current_elapsed(&GameState::new(), t(99)), Duration::ZERO);

        let s = abab();
        assert_eq!(current_elapsed(&s, t(1_750)), Duration::from_millis(750));
        assert_eq!(current_elapsed(&s, t(900)), Duration::ZERO);

        let s = [0, 2, 1, 3].iter().fold(s, |s, &i| flip(&s, i, t(6_000)));
        assert_eq!(current_elapsed(&s, t(60_000)), Duration::from_millis(5_000));
    }

    #[test]
    fn test_conceal_pending_checks_pair() {
        let s = abab();
        let s = flip(&flip(&s, 0, t(0)), 1, t(0));

        let stale = conceal_pending(&s, [2, 3]);
        assert_eq!(stale, s);

        let hidden = conceal_pending(&s, [0, 1]);
        assert!(hidden.pending().is_empty());
        assert_eq!(hidden.moves(), s.moves());
    }

    #[test]
    fn test_reset_clears_everything() {
        let s = abab();
        let s = flip(&s, 0, t(0));
        let s = reset(&s);

        assert_eq!(s, GameState::new());
        assert_eq!(s.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_restart_from_completed() {
        let s = abab();
        let s = [0, 2, 1, 3].iter().fold(s, |s, &i| flip(&s, i, t(2_000)));

        let pairs = PairSet::new(["A", "B"]).unwrap();
        let restarted = new_game(&pairs, &mut GameRng::new(0), t(9_000));
        assert_eq!(restarted.phase(), Phase::Playing);
        assert!(restarted.matched().is_empty());
        assert_eq!(restarted.finished_at(), None);
        assert_eq!(restarted.started_at(), Some(t(9_000)));
        assert!(restarted.deck().iter().all(|c| *c == Symbol::new("A") || *c == Symbol::new("B")));
        assert_eq!(s.phase(), Phase::Completed);
    }
}
