use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::hand::Hand;
use crate::player::PlayerAction;

/// Per-table configuration applied to every round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRules {
    /// Number of 52-card sets combined into each round's deck
    pub deck_count: u32,
    /// Shuffle each fresh deck before dealing
    pub shuffle: bool,
    /// Table minimum; players below it are eliminated between rounds
    pub min_bet: u64,
    /// Dealer draws on soft 17
    pub hit_soft_17: bool,
    /// Round cap for `Table::play_until_one_remaining`
    pub max_rounds: u32,
    /// Balance given to players seated with `Table::add_player`
    pub starting_balance: u64,
    /// Upper bound on a single provider call; `None` waits indefinitely
    pub decision_timeout: Option<Duration>,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            deck_count: 2,
            shuffle: true,
            min_bet: 5,
            hit_soft_17: true,
            max_rounds: 100,
            starting_balance: 500,
            decision_timeout: None,
        }
    }
}

impl TableRules {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.deck_count == 0 {
            return Err(GameError::InvalidDeckCount);
        }
        if self.min_bet == 0 {
            return Err(GameError::InvalidMinimumBet);
        }
        if self.max_rounds == 0 {
            return Err(GameError::InvalidRoundCap);
        }
        if self.starting_balance < self.min_bet {
            return Err(GameError::StartingBalanceTooLow {
                balance: self.starting_balance,
                minimum: self.min_bet,
            });
        }
        Ok(())
    }
}

/// Settlement result for one player against the dealer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    Push,
    BlackjackWin,
}

/// Compares a finished player hand with the finished dealer hand.
///
/// Naturals are resolved first, then busts, then totals.
///
/// # Examples
///
/// ```
/// use tablemind_engine::cards::{Card, Rank, Suit};
/// use tablemind_engine::hand::Hand;
/// use tablemind_engine::rules::{evaluate_outcome, Outcome};
///
/// let mut player = Hand::new();
/// player.add(Card::new(Rank::Ace, Suit::Spades));
/// player.add(Card::new(Rank::King, Suit::Hearts));
///
/// let mut dealer = Hand::new();
/// dealer.add(Card::new(Rank::Ten, Suit::Clubs));
/// dealer.add(Card::new(Rank::Nine, Suit::Clubs));
///
/// assert_eq!(evaluate_outcome(&player, &dealer), Outcome::BlackjackWin);
/// ```
pub fn evaluate_outcome(player: &Hand, dealer: &Hand) -> Outcome {
    match (player.is_blackjack(), dealer.is_blackjack()) {
        (true, true) => return Outcome::Push,
        (true, false) => return Outcome::BlackjackWin,
        (false, true) => return Outcome::Lose,
        (false, false) => {}
    }
    if player.is_bust() {
        return Outcome::Lose;
    }
    if dealer.is_bust() {
        return Outcome::Win;
    }
    let p = player.best_value();
    let d = dealer.best_value();
    if p > d {
        Outcome::Win
    } else if p < d {
        Outcome::Lose
    } else {
        Outcome::Push
    }
}

pub fn dealer_should_hit(hand: &Hand, hit_soft_17: bool) -> bool {
    let value = hand.best_value();
    value < 17 || (hit_soft_17 && value == 17 && hand.is_soft())
}

/// Forces a provider's bet into `[min_bet, balance]`.
pub fn clamp_bet(amount: u64, min_bet: u64, balance: u64) -> u64 {
    amount.max(min_bet).min(balance)
}

/// Downgrades a double-down the player cannot afford or is no longer allowed to make.
pub fn sanitize_action(action: PlayerAction, can_double_down: bool) -> PlayerAction {
    match action {
        PlayerAction::DoubleDown if !can_double_down => PlayerAction::Hit,
        other => other,
    }
}
