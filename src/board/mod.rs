//! Board engine: deck dealing, flip/match transitions, completion.
//!
//! The board is a leaf component. It knows nothing about players,
//! storage or timers; callers pass in the current time.

pub mod deck;
pub mod engine;
pub mod state;

pub use deck::{Deck, GridPosition};
pub use engine::{
    apply_flip, conceal_pending, current_elapsed, flip, new_game, reset, start_with_deck,
    FlipOutcome, IgnoreReason,
};
pub use state::{GameState, PendingSet, Phase};
