//! Session bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::board::FlipOutcome;
use crate::core::{BoardConfig, SessionConfig, SystemClock};
use crate::leaderboard::MemoryStore;
use crate::session::{GameSession, SessionUpdate, StaticIdentity};

use super::py_core::PyLeaderboardEntry;

/// Python wrapper for GameSession.
///
/// Backed by an in-process store and the system clock.
#[pyclass(name = "GameSession")]
pub struct PyGameSession {
    inner: GameSession<MemoryStore, SystemClock>,
}

#[pymethods]
impl PyGameSession {
    /// Create a new session.
    ///
    /// # Arguments
    /// - seed: Deal seed; random when omitted
    /// - player: Signed-in username; scores fall back to "anon" when omitted
    /// - flip_back_delay_ms: Mismatch flip-back delay; None waits for the next flip
    #[new]
    #[pyo3(signature = (seed = None, player = None, flip_back_delay_ms = Some(1000)))]
    fn new(seed: Option<u64>, player: Option<String>, flip_back_delay_ms: Option<u64>) -> PyResult<Self> {
        let mut board = BoardConfig::default().with_flip_back_delay(flip_back_delay_ms);
        board.seed = seed;
        let config = SessionConfig::default().with_board(board);

        let inner = GameSession::new(config, MemoryStore::new(), SystemClock)
            .map_err(|e| PyValueError::new_err(e.to_string()))?
            .with_identity(StaticIdentity(player));
        Ok(Self { inner })
    }

    /// Deal a new deck and start (or restart) the game.
    fn start_game(&mut self) {
        self.inner.start_game();
    }

    /// Flip a card. Returns "ignored", "revealed", "matched", "mismatched" or "completed".
    fn flip(&mut self, index: usize) -> &'static str {
        match self.inner.flip(index) {
            FlipOutcome::Ignored(_) => "ignored",
            FlipOutcome::Revealed { .. } => "revealed",
            FlipOutcome::Matched { .. } => "matched",
            FlipOutcome::Mismatched { .. } => "mismatched",
            FlipOutcome::Completed { .. } => "completed",
        }
    }

    /// Save the completed run. Returns the zero-based rank, or None.
    #[pyo3(signature = (name = None))]
    fn submit_score(&mut self, name: Option<&str>) -> Option<usize> {
        match self.inner.submit_score(name) {
            SessionUpdate::Submitted { rank, .. } => rank,
            _ => None,
        }
    }

    /// Back to the start screen.
    fn return_to_start(&mut self) {
        self.inner.return_to_start();
    }

    /// Run due timers. Returns (flipped_back, refresh).
    fn tick(&mut self) -> (bool, bool) {
        let result = self.inner.tick();
        (result.flipped_back, result.refresh)
    }

    /// Visible faces in deck order; None for face-down cards.
    fn cards(&self) -> Vec<Option<String>> {
        self.inner
            .view()
            .cards
            .into_iter()
            .map(|card| card.symbol.map(|s| s.to_string()))
            .collect()
    }

    /// Leaderboard rows as shown this session.
    fn leaderboard(&self) -> Vec<PyLeaderboardEntry> {
        self.inner
            .leaderboard()
            .iter()
            .cloned()
            .map(PyLeaderboardEntry)
            .collect()
    }

    /// The full view as JSON.
    fn view_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner.view()).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Current phase name.
    #[getter]
    fn phase(&self) -> String {
        self.inner.state().phase().to_string()
    }

    /// Elapsed time as `mm:ss.cc`.
    #[getter]
    fn elapsed_label(&self) -> String {
        self.inner.view().elapsed_label
    }

    /// Two-card turns taken.
    #[getter]
    fn moves(&self) -> u32 {
        self.inner.state().moves()
    }

    fn __repr__(&self) -> String {
        let state = self.inner.state();
        format!(
            "GameSession(phase={}, pairs={}/{}, moves={})",
            state.phase(),
            state.pairs_found(),
            state.deck().pair_count(),
            state.moves()
        )
    }
}
