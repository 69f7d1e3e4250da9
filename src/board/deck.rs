//! The dealt deck and its grid layout.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{BoardError, GameRng, PairSet, Symbol};

/// Ordered card faces for one game.
///
/// Every symbol appears exactly twice. Backed by an `im::Vector` so
/// cloning a `GameState` shares the deck instead of copying it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Symbol>,
}

impl Deck {
    /// Duplicate `pairs` and shuffle uniformly.
    #[must_use]
    pub fn deal(pairs: &PairSet, rng: &mut GameRng) -> Self {
        let mut cards: Vec<Symbol> = pairs
            .symbols()
            .iter()
            .chain(pairs.symbols().iter())
            .cloned()
            .collect();
        rng.shuffle(&mut cards);
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Build a deck in a fixed order.
    ///
    /// Useful for scripted games and tests.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyPairSet`] for no cards and
    /// [`BoardError::UnpairedSymbol`] if any symbol does not appear
    /// exactly twice.
    pub fn from_cards<I, S>(cards: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let cards: Vector<Symbol> = cards.into_iter().map(Into::into).collect();
        if cards.is_empty() {
            return Err(BoardError::EmptyPairSet);
        }

        let unpaired = {
            let mut counts: FxHashMap<&Symbol, usize> = FxHashMap::default();
            for card in &cards {
                *counts.entry(card).or_insert(0) += 1;
            }
            // Report in deck order so the error is deterministic
            cards
                .iter()
                .find(|card| counts[card] != 2)
                .map(|card| (card.clone(), counts[card]))
        };
        if let Some((symbol, count)) = unpaired {
            return Err(BoardError::UnpairedSymbol { symbol, count });
        }

        Ok(Self { cards })
    }

    /// Number of cards (2P).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True for the empty deck of a game that has not started.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Face at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.cards.get(index)
    }

    /// Iterate over faces in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.cards.iter()
    }

    /// Number of distinct pairs (P).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }
}

/// Row and column of a card when the deck is laid out `columns` wide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub column: usize,
}

impl GridPosition {
    /// Position of `index` in a grid `columns` wide.
    ///
    /// Returns `None` when `columns` is zero.
    #[must_use]
    pub fn of(index: usize, columns: usize) -> Option<Self> {
        if columns == 0 {
            return None;
        }
        Some(Self {
            row: index / columns,
            column: index % columns,
        })
    }

    /// Deck index of this position in a grid `columns` wide.
    #[must_use]
    pub fn index(self, columns: usize) -> usize {
        self.row * columns + self.column
    }
}
