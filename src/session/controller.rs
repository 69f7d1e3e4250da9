//! The game session: one board, one leaderboard, and their timers.
//!
//! Events arrive one at a time and each runs to completion:
//!
//! - `StartGame`: deal and start (also restarts)
//! - `Flip(index)`: flip a card
//! - `SubmitScore(name)`: save a completed run
//! - `ReturnToStart`: back to the start screen
//!
//! Scheduled wake-ups arrive through [`GameSession::tick`] or
//! [`GameSession::fire_flip_back`].

use tracing::{debug, info};

use super::collaborators::{resolve_player_name, IdentityProvider, Notifier, NoopNotifier, ToastKind};
use super::timer::{Ticker, TimerHandle, TimerSlot};
use super::view::SessionView;
use crate::board::{self, FlipOutcome, GameState, Phase};
use crate::core::{Clock, ConfigError, GameRng, PairSet, SessionConfig, Timestamp};
use crate::leaderboard::{
    insert_ranked, rank_of, KeyValueStore, LeaderboardEntry, LeaderboardStore, PersistenceError,
};

pub const SAVED_MESSAGE: &str = "Score saved!";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save score";

/// Input from the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    StartGame,
    Flip(usize),
    /// Save the completed run. `None` or a blank name asks the identity provider.
    SubmitScore(Option<String>),
    ReturnToStart,
}

/// What handling an event did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionUpdate {
    Started,
    Flipped(FlipOutcome),
    Submitted {
        entry: LeaderboardEntry,
        rank: Option<usize>,
        persisted: bool,
    },
    ReturnedToStart,
    /// The event does not apply in the current phase.
    Ignored,
}

/// Result of a scheduled wake-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickResult {
    /// A mismatched pair turned face-down.
    pub flipped_back: bool,
    /// The elapsed-time display should redraw.
    pub refresh: bool,
}

/// A player's session with the game.
pub struct GameSession<S, C> {
    config: SessionConfig,
    pairs: PairSet,
    rng: GameRng,
    clock: C,
    leaderboard: LeaderboardStore<S>,
    identity: Option<Box<dyn IdentityProvider + Send>>,
    notifier: Box<dyn Notifier + Send>,

    state: GameState,
    entries: Vec<LeaderboardEntry>,
    last_submission: Option<LeaderboardEntry>,
    submitted: bool,

    flip_back: TimerSlot<[usize; 2]>,
    ticker: Option<Ticker>,
}

impl<S: KeyValueStore, C: Clock> GameSession<S, C> {
    /// Create a session and load the stored leaderboard.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` is invalid.
    pub fn new(config: SessionConfig, store: S, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.board.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let leaderboard = LeaderboardStore::new(store, config.leaderboard.clone());
        let entries = leaderboard.load();
        let ticker = config.board.tick_period().map(Ticker::new);

        debug!(seed = rng.seed(), entries = entries.len(), "Session created");
        Ok(Self {
            config,
            pairs: PairSet::default(),
            rng,
            clock,
            leaderboard,
            identity: None,
            notifier: Box::new(NoopNotifier),
            state: GameState::new(),
            entries,
            last_submission: None,
            submitted: false,
            flip_back: TimerSlot::new(),
            ticker,
        })
    }

    /// Deal from `pairs` instead of the default emoji set.
    #[must_use]
    pub fn with_pairs(mut self, pairs: PairSet) -> Self {
        self.pairs = pairs;
        self
    }

    /// Attach an identity provider.
    #[must_use]
    pub fn with_identity(mut self, identity: impl IdentityProvider + Send + 'static) -> Self {
        self.identity = Some(Box::new(identity));
        self
    }

    /// Attach a notification sink.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + Send + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    // === Events ===

    /// Route one presentation event.
    pub fn handle(&mut self, event: SessionEvent) -> SessionUpdate {
        match event {
            SessionEvent::StartGame => self.start_game(),
            SessionEvent::Flip(index) => SessionUpdate::Flipped(self.flip(index)),
            SessionEvent::SubmitScore(name) => self.submit_score(name.as_deref()),
            SessionEvent::ReturnToStart => self.return_to_start(),
        }
    }

    /// Deal a new deck and start playing. Restarts a game in progress.
    pub fn start_game(&mut self) -> SessionUpdate {
        let now = self.clock.now();
        self.cancel_flip_back();

        self.state = board::new_game(&self.pairs, &mut self.rng, now);
        self.submitted = false;
        self.last_submission = None;

        if let Some(ticker) = &mut self.ticker {
            ticker.start(now);
        }
        SessionUpdate::Started
    }

    /// Flip the card at `index`.
    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        let now = self.clock.now();
        let (next, outcome) = board::apply_flip(&self.state, index, now);
        self.state = next;

        match outcome {
            FlipOutcome::Revealed {
                concealed: Some(_), ..
            } => self.cancel_flip_back(),
            FlipOutcome::Mismatched { pair } => {
                if let Some(delay) = self.config.board.flip_back_delay() {
                    let handle = self.flip_back.schedule(now.after(delay), pair);
                    debug!(?pair, ?handle, "Flip-back scheduled");
                }
            }
            FlipOutcome::Completed { .. } => {
                self.cancel_flip_back();
                self.stop_ticker();
            }
            _ => {}
        }
        outcome
    }

    /// Save the completed run under `name`, the signed-in user, or the
    /// fallback label.
    ///
    /// Each completed game can be submitted once.
    pub fn submit_score(&mut self, name: Option<&str>) -> SessionUpdate {
        if self.state.phase() != Phase::Completed || self.submitted {
            debug!(phase = %self.state.phase(), submitted = self.submitted, "Submit ignored");
            return SessionUpdate::Ignored;
        }

        let name = resolve_player_name(
            name,
            self.identity.as_deref().map(|id| id as &dyn IdentityProvider),
            &self.config.fallback_name,
        );
        let elapsed = board::current_elapsed(&self.state, self.clock.now());
        let entry = LeaderboardEntry::from_duration(name, elapsed);

        let (ranked, persisted) = match self.leaderboard.submit(entry.clone()) {
            Ok(ranked) => {
                self.notifier.toast(ToastKind::Success, SAVED_MESSAGE);
                (ranked, true)
            }
            Err(err) => {
                self.notifier.toast(ToastKind::Failure, SAVE_FAILED_MESSAGE);
                let ranked = match err {
                    PersistenceError::Read { .. } => {
                        insert_ranked(&self.entries, entry.clone(), self.config.leaderboard.capacity)
                    }
                    other => other.into_ranked(),
                };
                (ranked, false)
            }
        };

        self.entries = ranked;
        self.submitted = true;
        let rank = rank_of(&self.entries, &entry);
        info!(name = %entry.name, elapsed_ms = entry.elapsed_millis, ?rank, persisted, "Score submitted");
        self.last_submission = Some(entry.clone());

        SessionUpdate::Submitted {
            entry,
            rank,
            persisted,
        }
    }

    /// Abandon or leave the current game.
    pub fn return_to_start(&mut self) -> SessionUpdate {
        self.cancel_flip_back();
        self.stop_ticker();
        self.state = board::reset(&self.state);
        self.submitted = false;
        SessionUpdate::ReturnedToStart
    }

    // === Scheduled wake-ups ===

    /// Run whatever is due at the current time.
    pub fn tick(&mut self) -> TickResult {
        let now = self.clock.now();
        let mut result = TickResult::default();

        if let Some(pair) = self.flip_back.take_due(now) {
            result.flipped_back = self.conceal(pair);
        }

        if self.state.phase() == Phase::Playing {
            if let Some(ticker) = &mut self.ticker {
                result.refresh = ticker.poll(now);
            }
        } else {
            self.stop_ticker();
        }
        result
    }

    /// Fire the flip-back callback identified by `handle`.
    ///
    /// Returns false for a cancelled or superseded handle.
    pub fn fire_flip_back(&mut self, handle: TimerHandle) -> bool {
        match self.flip_back.fire(handle) {
            Some(pair) => self.conceal(pair),
            None => {
                debug!(?handle, "Stale flip-back handle");
                false
            }
        }
    }

    /// The outstanding flip-back callback, if any.
    #[must_use]
    pub fn pending_flip_back(&self) -> Option<(TimerHandle, Timestamp)> {
        self.flip_back.pending()
    }

    /// Earliest time the host should call [`tick`](Self::tick).
    #[must_use]
    pub fn next_wakeup(&self) -> Option<Timestamp> {
        let tick = self.ticker.as_ref().and_then(Ticker::next_due);
        match (self.flip_back.due(), tick) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn conceal(&mut self, pair: [usize; 2]) -> bool {
        if !self.state.has_unresolved_pair() {
            return false;
        }
        self.state = board::conceal_pending(&self.state, pair);
        !self.state.has_unresolved_pair()
    }

    fn cancel_flip_back(&mut self) {
        if let Some(handle) = self.flip_back.cancel() {
            debug!(?handle, "Flip-back cancelled");
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = &mut self.ticker {
            ticker.stop();
        }
    }

    // === Queries ===

    /// Snapshot for drawing, as of now.
    #[must_use]
    pub fn view(&self) -> SessionView {
        let highlighted = self
            .last_submission
            .as_ref()
            .and_then(|entry| rank_of(&self.entries, entry));
        SessionView::build(
            &self.state,
            self.config.board.columns,
            self.clock.now(),
            &self.entries,
            highlighted,
            self.state.phase() == Phase::Completed && !self.submitted,
            self.config.leaderboard.capacity,
        )
    }

    /// Current board state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Leaderboard as shown this session.
    #[must_use]
    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Re-read the stored leaderboard, dropping any unsaved rows.
    pub fn refresh_leaderboard(&mut self) {
        self.entries = self.leaderboard.load();
    }

    /// Is the display ticker running?
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(Ticker::is_running)
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The storage backend.
    #[must_use]
    pub fn store(&self) -> &S {
        self.leaderboard.backend()
    }
}
