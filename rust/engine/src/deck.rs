use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// One or more standard 52-card sets drawn front to back.
///
/// A deck is single-use: the table builds a fresh one for every round, so
/// there is no reshuffle or shoe carry-over.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    pub fn new(deck_count: u32, shuffle: bool) -> Result<Self, GameError> {
        Self::with_rng(deck_count, shuffle, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        deck_count: u32,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if deck_count == 0 {
            return Err(GameError::InvalidDeckCount);
        }
        let mut cards = Vec::with_capacity(52 * deck_count as usize);
        for _ in 0..deck_count {
            cards.extend(full_deck());
        }
        if shuffle {
            cards.shuffle(rng);
        }
        Ok(Self { cards, position: 0 })
    }

    /// Pre-arranged deck; the first element is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards, position: 0 }
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let c = *self.cards.get(self.position).ok_or(GameError::EmptyDeck)?;
        self.position += 1;
        Ok(c)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}
