//! Core type bindings for Python.

use std::time::Duration;

use pyo3::prelude::*;

use crate::leaderboard::LeaderboardEntry;
use crate::session::format_elapsed;

/// Python wrapper for LeaderboardEntry.
#[pyclass(name = "LeaderboardEntry")]
#[derive(Clone, Debug)]
pub struct PyLeaderboardEntry(pub LeaderboardEntry);

#[pymethods]
impl PyLeaderboardEntry {
    #[new]
    fn new(name: String, elapsed_ms: u64) -> Self {
        Self(LeaderboardEntry::new(name, elapsed_ms))
    }

    #[getter]
    fn name(&self) -> String {
        self.0.name.clone()
    }

    #[getter]
    fn elapsed_ms(&self) -> u64 {
        self.0.elapsed_millis
    }

    fn __repr__(&self) -> String {
        format!(
            "LeaderboardEntry(name={:?}, time={})",
            self.0.name,
            format_elapsed(self.0.elapsed())
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// Format milliseconds as `mm:ss.cc`.
#[pyfunction]
pub fn format_elapsed_ms(elapsed_ms: u64) -> String {
    format_elapsed(Duration::from_millis(elapsed_ms))
}
