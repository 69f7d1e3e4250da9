//! Session: the presentation boundary.
//!
//! Composes the board and the leaderboard with the host's collaborators
//! (clock, storage, identity, notifications) and the two timers:
//! the mismatch flip-back and the optional elapsed-time ticker.

pub mod collaborators;
pub mod controller;
pub mod format;
pub mod timer;
pub mod view;

pub use collaborators::{
    resolve_player_name, IdentityError, IdentityProvider, NoopNotifier, Notifier, RecordingNotifier,
    StaticIdentity, ToastKind,
};
pub use controller::{
    GameSession, SessionEvent, SessionUpdate, TickResult, SAVED_MESSAGE, SAVE_FAILED_MESSAGE,
};
pub use format::format_elapsed;
pub use timer::{Ticker, TimerHandle, TimerSlot};
pub use view::{CardFace, CardView, SessionView};
