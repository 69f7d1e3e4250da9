//! Error types for board setup and configuration.

use thiserror::Error;

use super::symbol::Symbol;

/// Invalid input when building a board.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A pair set needs at least one symbol.
    #[error("pair set must contain at least one symbol")]
    EmptyPairSet,

    /// Every symbol in a pair set must be distinct.
    #[error("symbol {0} appears more than once in the pair set")]
    DuplicateSymbol(Symbol),

    /// A hand-built deck must hold every symbol exactly twice.
    #[error("symbol {symbol} appears {count} times in the deck, expected 2")]
    UnpairedSymbol { symbol: Symbol, count: usize },
}

/// Invalid configuration value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must have at least one column")]
    ZeroColumns,

    #[error("leaderboard capacity must be at least 1")]
    ZeroCapacity,

    #[error("leaderboard storage key must not be empty")]
    EmptyKey,

    #[error("{field} must be greater than zero when set")]
    ZeroPeriod { field: &'static str },
}
