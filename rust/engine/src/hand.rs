use std::fmt;

use crate::cards::{Card, Rank};

/// Cards held by one party during one round, with derived blackjack scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, card: Card) -> Card {
        self.cards.push(card);
        card
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Total with every Ace counted as 1.
    pub fn low_value(&self) -> u32 {
        self.cards.iter().map(|c| c.rank.low_value() as u32).sum()
    }

    /// Largest total not exceeding 21 when one exists, otherwise the
    /// all-low total. Aces are promoted from 1 to 11 one at a time.
    pub fn best_value(&self) -> u32 {
        let mut total = self.low_value();
        let mut aces = self.cards.iter().filter(|c| c.rank == Rank::Ace).count();
        while aces > 0 && total + 10 <= 21 {
            total += 10;
            aces -= 1;
        }
        total
    }

    pub fn is_soft(&self) -> bool {
        self.cards.iter().any(|c| c.rank == Rank::Ace) && self.best_value() != self.low_value()
    }

    pub fn is_bust(&self) -> bool {
        self.best_value() > 21
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.best_value() == 21
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cards.is_empty() {
            return write!(f, "(empty)");
        }
        let cards = self
            .cards
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        if self.is_blackjack() {
            write!(f, "{} (Blackjack)", cards)
        } else if self.is_bust() {
            write!(f, "{} (BUST {})", cards, self.best_value())
        } else if self.is_soft() {
            write!(f, "{} ({} soft)", cards, self.best_value())
        } else {
            write!(f, "{} ({})", cards, self.best_value())
        }
    }
}
