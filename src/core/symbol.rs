//! Card face symbols and validated pair sets.
//!
//! ## Symbol
//!
//! Opaque face value printed on a card. The engine only compares symbols
//! for equality; it never interprets them.
//!
//! ## PairSet
//!
//! The distinct symbols a deck is dealt from. Each symbol ends up on
//! exactly two cards.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::BoardError;

/// The twelve animal faces used by the classic board.
pub const DEFAULT_EMOJIS: [&str; 12] = [
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮",
];

/// A card face value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from any string-like value.
    pub fn new(face: impl Into<String>) -> Self {
        Self(face.into())
    }

    /// The face as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(face: &str) -> Self {
        Self::new(face)
    }
}

impl From<String> for Symbol {
    fn from(face: String) -> Self {
        Self(face)
    }
}

/// A non-empty set of distinct symbols.
///
/// Construction rejects duplicates, so a deck dealt from a `PairSet`
/// always holds every symbol exactly twice.
///
/// ```
/// use emoji_pair::core::PairSet;
///
/// let pairs = PairSet::new(["A", "B", "C"]).unwrap();
/// assert_eq!(pairs.len(), 3);
/// assert_eq!(pairs.deck_len(), 6);
///
/// assert!(PairSet::new(["A", "A"]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct PairSet {
    symbols: Vec<Symbol>,
}

impl PairSet {
    /// Validate and build a pair set.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyPairSet`] for no symbols and
    /// [`BoardError::DuplicateSymbol`] if any symbol repeats.
    pub fn new<I, S>(symbols: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let symbols: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(BoardError::EmptyPairSet);
        }

        let mut seen = FxHashSet::default();
        if let Some(dup) = symbols.iter().find(|symbol| !seen.insert(*symbol)) {
            return Err(BoardError::DuplicateSymbol(dup.clone()));
        }

        Ok(Self { symbols })
    }

    /// The classic twelve-animal set.
    #[must_use]
    pub fn emojis() -> Self {
        Self {
            symbols: DEFAULT_EMOJIS.iter().copied().map(Symbol::new).collect(),
        }
    }

    /// Number of distinct symbols (P).
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Never true for a validated set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of cards a deck dealt from this set holds (2P).
    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.symbols.len() * 2
    }

    /// The symbols in declaration order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl Default for PairSet {
    fn default() -> Self {
        Self::emojis()
    }
}

impl TryFrom<Vec<Symbol>> for PairSet {
    type Error = BoardError;

    fn try_from(symbols: Vec<Symbol>) -> Result<Self, Self::Error> {
        Self::new(symbols)
    }
}

impl From<PairSet> for Vec<Symbol> {
    fn from(pairs: PairSet) -> Self {
        pairs.symbols
    }
}
