//! Game state: phase, deck, round state and timing.
//!
//! `GameState` is an immutable value. The functions in
//! [`engine`](super::engine) take a state by reference and return the
//! next one; nothing mutates a state in place from outside this module.
//!
//! ## Round state
//!
//! - **Pending**: indices face-up awaiting resolution (0, 1 or 2)
//! - **Matched**: indices permanently revealed, growing within a game
//!
//! An index is never both pending and matched.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::deck::Deck;
use crate::core::{Symbol, Timestamp};

/// Coarse game lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    Playing,
    Completed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::NotStarted => "not started",
            Phase::Playing => "playing",
            Phase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Face-up indices awaiting resolution, in flip order.
pub type PendingSet = SmallVec<[usize; 2]>;

/// One game of Emoji Pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) phase: Phase,
    pub(crate) deck: Deck,
    pub(crate) pending: PendingSet,
    pub(crate) matched: OrdSet<usize>,
    pub(crate) started_at: Option<Timestamp>,
    pub(crate) finished_at: Option<Timestamp>,
    /// Two-card turns taken so far.
    pub(crate) moves: u32,
}

impl GameState {
    /// A fresh `NotStarted` state with no deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The dealt deck. Empty before the first game.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Face-up indices awaiting resolution, in flip order.
    #[must_use]
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    /// Permanently revealed indices.
    #[must_use]
    pub fn matched(&self) -> &OrdSet<usize> {
        &self.matched
    }

    /// When the current game entered `Playing`.
    #[must_use]
    pub fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    /// When the current game entered `Completed`.
    #[must_use]
    pub fn finished_at(&self) -> Option<Timestamp> {
        self.finished_at
    }

    /// Number of two-card turns taken.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Number of pairs found.
    #[must_use]
    pub fn pairs_found(&self) -> usize {
        self.matched.len() / 2
    }

    /// Is `index` matched?
    #[must_use]
    pub fn is_matched(&self, index: usize) -> bool {
        self.matched.contains(&index)
    }

    /// Is `index` face-up and pending?
    #[must_use]
    pub fn is_pending(&self, index: usize) -> bool {
        self.pending.contains(&index)
    }

    /// Is the card at `index` showing its face?
    #[must_use]
    pub fn is_face_up(&self, index: usize) -> bool {
        self.is_pending(index) || self.is_matched(index)
    }

    /// The face at `index` if it is showing, `None` if face-down or out of range.
    #[must_use]
    pub fn visible_face(&self, index: usize) -> Option<&Symbol> {
        if self.is_face_up(index) {
            self.deck.get(index)
        } else {
            None
        }
    }

    /// True when a mismatched pair is still face-up.
    #[must_use]
    pub fn has_unresolved_pair(&self) -> bool {
        self.pending.len() == 2
    }

    /// The unresolved pair, if any.
    #[must_use]
    pub fn unresolved_pair(&self) -> Option<[usize; 2]> {
        match self.pending.as_slice() {
            [first, second] => Some([*first, *second]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_not_started() {
        let state = GameState::new();

        assert_eq!(state.phase(), Phase::NotStarted);
        assert!(state.deck().is_empty());
        assert!(state.pending().is_empty());
        assert!(state.matched().is_empty());
        assert_eq!(state.started_at(), None);
        assert_eq!(state.finished_at(), None);
        assert_eq!(state.moves(), 0);
    }

    #[test]
    fn test_face_visibility() {
        let mut state = GameState::new();
        state.deck = Deck::from_cards(["A", "B", "A", "B"]).unwrap();
        state.phase = Phase::Playing;
        state.pending.push(1);
        state.matched.insert(0);
        state.matched.insert(2);

        assert_eq!(state.visible_face(0), Some(&Symbol::new("A")));
        assert_eq!(state.visible_face(1), Some(&Symbol::new("B")));
        assert_eq!(state.visible_face(3), None);
        assert_eq!(state.visible_face(99), None);
        assert_eq!(state.pairs_found(), 1);
        assert!(!state.has_unresolved_pair());
        assert_eq!(state.unresolved_pair(), None);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::NotStarted.to_string(), "not started");
        assert_eq!(Phase::Completed.to_string(), "completed");
    }

    #[test]
    fn test_state_serde() {
        let mut state = GameState::new();
        state.deck = Deck::from_cards(["A", "A"]).unwrap();
        state.phase = Phase::Playing;
        state.pending.push(0);
        state.started_at = Some(Timestamp::from_millis(10));

        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
