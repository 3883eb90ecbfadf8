//! Immutable snapshots handed to decision providers.
//!
//! A context only carries what the seat could see at the table: its own
//! cards and history, the dealer's up card, and other players' public
//! state. The dealer hole card and undealt cards never appear here.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::{Player, PlayerAction};

/// Another seat's bankroll as seen during bet collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentInfo {
    pub name: String,
    /// Balance plus any wager already placed this round
    pub balance: u64,
    /// Zero when the opponent has not bet yet
    pub current_bet: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetContext {
    pub player_name: String,
    pub balance: u64,
    pub min_bet: u64,
    pub opponents: Vec<OpponentInfo>,
}

/// Another active seat's face-up hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentHand {
    pub name: String,
    pub hand: String,
    pub value: u32,
    pub is_bust: bool,
}

/// One decision taken earlier in the current hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionHistoryEntry {
    /// Hand as it looked when the decision was requested
    pub hand: String,
    pub value: u32,
    pub action: PlayerAction,
    pub card_received: Option<Card>,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionContext {
    pub player_name: String,
    pub hand: String,
    pub hand_value: u32,
    pub is_soft: bool,
    pub dealer_up_card: Card,
    pub current_bet: u64,
    pub balance: u64,
    pub can_double_down: bool,
    pub other_hands: Vec<OpponentHand>,
    pub history: Vec<ActionHistoryEntry>,
}

/// Builds the bet snapshot for `players[seat]` from the roster's current state.
pub fn bet_context(players: &[Player], seat: usize, min_bet: u64) -> BetContext {
    let me = &players[seat];
    let opponents = players
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != seat)
        .map(|(_, p)| OpponentInfo {
            name: p.name().to_string(),
            balance: p.balance() + p.wager(),
            current_bet: p.wager(),
        })
        .collect();
    BetContext {
        player_name: me.name().to_string(),
        balance: me.balance(),
        min_bet,
        opponents,
    }
}

/// Builds the action snapshot for `players[seat]`. `active` lists the seats
/// dealt into this round; only those hands are visible.
pub fn action_context(
    players: &[Player],
    active: &[usize],
    seat: usize,
    dealer_up_card: Card,
) -> ActionContext {
    let me = &players[seat];
    let other_hands = active
        .iter()
        .copied()
        .filter(|&i| i != seat)
        .map(|i| {
            let p = &players[i];
            OpponentHand {
                name: p.name().to_string(),
                hand: p.hand().to_string(),
                value: p.hand().best_value(),
                is_bust: p.hand().is_bust(),
            }
        })
        .collect();
    ActionContext {
        player_name: me.name().to_string(),
        hand: me.hand().to_string(),
        hand_value: me.hand().best_value(),
        is_soft: me.hand().is_soft() && !me.hand().is_blackjack(),
        dealer_up_card,
        current_bet: me.wager(),
        balance: me.balance(),
        can_double_down: me.can_double_down(),
        other_hands,
        history: me.history().to_vec(),
    }
}
