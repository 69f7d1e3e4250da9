//! Read-only snapshot handed to the presentation layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::format::format_elapsed;
use crate::board::{current_elapsed, GameState, GridPosition, Phase};
use crate::core::{Symbol, Timestamp};
use crate::leaderboard::{qualifies, LeaderboardEntry};

/// How a card is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    Pending,
    Matched,
}

/// One card as the player sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub index: usize,
    pub position: GridPosition,
    pub face: CardFace,
    /// The symbol, only when face-up.
    pub symbol: Option<Symbol>,
}

/// Everything needed to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: Phase,
    pub columns: usize,
    pub cards: Vec<CardView>,
    pub elapsed: Duration,
    pub elapsed_label: String,
    pub moves: u32,
    pub pairs_found: usize,
    pub total_pairs: usize,
    pub leaderboard: Vec<LeaderboardEntry>,
    /// Zero-based leaderboard row of this session's last saved score.
    pub highlighted_rank: Option<usize>,
    /// A completed run that has not been submitted yet.
    pub can_submit: bool,
    /// The unsubmitted run would make the leaderboard.
    pub would_rank: bool,
}

impl SessionView {
    pub(crate) fn build(
        state: &GameState,
        columns: usize,
        now: Timestamp,
        leaderboard: &[LeaderboardEntry],
        highlighted_rank: Option<usize>,
        can_submit: bool,
        capacity: usize,
    ) -> Self {
        let columns = columns.max(1);
        let cards = (0..state.deck().len())
            .map(|index| {
                let face = if state.is_matched(index) {
                    CardFace::Matched
                } else if state.is_pending(index) {
                    CardFace::Pending
                } else {
                    CardFace::Hidden
                };
                CardView {
                    index,
                    position: GridPosition::of(index, columns).unwrap_or_default(),
                    face,
                    symbol: state.visible_face(index).cloned(),
                }
            })
            .collect();

        let elapsed = current_elapsed(state, now);
        let elapsed_millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        Self {
            phase: state.phase(),
            columns,
            cards,
            elapsed,
            elapsed_label: format_elapsed(elapsed),
            moves: state.moves(),
            pairs_found: state.pairs_found(),
            total_pairs: state.deck().pair_count(),
            leaderboard: leaderboard.to_vec(),
            highlighted_rank,
            can_submit,
            would_rank: can_submit && qualifies(leaderboard, elapsed_millis, capacity),
        }
    }

    /// Number of grid rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.cards.len().div_ceil(self.columns)
    }
}
