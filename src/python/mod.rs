//! Python bindings for the emoji-pair engine.
//!
//! Lets a Python host (a scripted bot, a desktop front end) drive a
//! session without reimplementing the rules.
//!
//! # Quick Start
//!
//! ```python
//! import emoji_pair as ep
//!
//! session = ep.GameSession(seed=42, player="alice")
//! session.start_game()
//! session.flip(0)
//! session.flip(1)
//! print(session.elapsed_label, session.cards())
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_session;

pub use py_core::*;
pub use py_session::*;

/// emoji_pair: memory matching game engine with a persisted leaderboard.
#[pymodule]
fn emoji_pair(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLeaderboardEntry>()?;
    m.add_class::<PyGameSession>()?;
    m.add_function(wrap_pyfunction!(format_elapsed_ms, m)?)?;
    Ok(())
}
