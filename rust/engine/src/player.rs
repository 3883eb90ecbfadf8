use std::fmt;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::context::{ActionContext, ActionHistoryEntry, BetContext};
use crate::errors::GameError;
use crate::hand::Hand;
use crate::provider::{
    bounded, fallback_action, fallback_bet, ActionDecision, BetDecision, DecisionProvider,
    DecisionSource,
};
use crate::rules::{self, Outcome};

/// An in-hand choice.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Draw one card and decide again
    Hit,
    /// Keep the hand as is
    Stand,
    /// Double the wager, draw exactly one card, and stop
    DoubleDown,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerAction::Hit => "Hit",
            PlayerAction::Stand => "Stand",
            PlayerAction::DoubleDown => "DoubleDown",
        };
        f.write_str(s)
    }
}

/// A seated player: bankroll ledger, current wager, hand, and the provider
/// that makes its decisions.
pub struct Player {
    name: String,
    balance: u64,
    /// Wager for the active round (0 when not betting)
    wager: u64,
    hand: Hand,
    /// `None` falls back to the engine's built-in policy
    provider: Option<Box<dyn DecisionProvider>>,
    history: Vec<ActionHistoryEntry>,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("balance", &self.balance)
            .field("wager", &self.wager)
            .field("hand", &self.hand)
            .field("provider", &self.provider_id())
            .finish()
    }
}

impl Player {
    pub fn new(name: impl Into<String>, balance: u64) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            "Player".to_string()
        } else {
            name
        };
        Self {
            name,
            balance,
            wager: 0,
            hand: Hand::new(),
            provider: None,
            history: Vec::new(),
        }
    }

    pub fn with_provider(
        name: impl Into<String>,
        balance: u64,
        provider: Box<dyn DecisionProvider>,
    ) -> Self {
        let mut p = Self::new(name, balance);
        p.provider = Some(provider);
        p
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn balance(&self) -> u64 {
        self.balance
    }
    pub fn wager(&self) -> u64 {
        self.wager
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn history(&self) -> &[ActionHistoryEntry] {
        &self.history
    }

    pub fn provider_id(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.id())
    }

    pub fn set_provider(&mut self, provider: Option<Box<dyn DecisionProvider>>) {
        self.provider = provider;
    }

    pub fn receive(&mut self, card: Card) -> Card {
        self.hand.add(card)
    }

    /// Empties the hand, wager, and this-hand history.
    pub fn clear_for_round(&mut self) {
        self.hand.clear();
        self.wager = 0;
        self.history.clear();
    }

    pub fn place_bet(&mut self, amount: u64) -> Result<(), GameError> {
        if amount == 0 || amount > self.balance {
            return Err(GameError::InvalidBet {
                amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        self.wager = amount;
        Ok(())
    }

    pub fn can_double_down(&self) -> bool {
        self.wager > 0 && self.balance >= self.wager && self.hand.len() == 2
    }

    /// Doubles the wager when eligible. Leaves state untouched otherwise.
    pub fn try_double_down(&mut self) -> bool {
        if !self.can_double_down() {
            return false;
        }
        self.balance -= self.wager;
        self.wager = self.wager.saturating_mul(2);
        true
    }

    /// Stake back plus even money.
    pub fn win_plain(&mut self) {
        self.credit(self.wager.saturating_mul(2));
    }

    /// Stake back plus 3:2, with the half unit truncated on odd wagers.
    pub fn win_blackjack(&mut self) {
        let bonus = (self.wager / 2)
            .saturating_mul(3)
            .saturating_add((self.wager % 2) * 3 / 2);
        self.credit(self.wager.saturating_add(bonus));
    }

    pub fn push(&mut self) {
        self.credit(self.wager);
    }

    pub fn lose(&mut self) {
        self.wager = 0;
    }

    fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        self.wager = 0;
    }

    pub fn settle(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.win_plain(),
            Outcome::BlackjackWin => self.win_blackjack(),
            Outcome::Push => self.push(),
            Outcome::Lose => self.lose(),
        }
    }

    /// Asks the bound provider for a bet. The amount is clamped into
    /// `[min_bet, balance]` before it is returned.
    pub async fn decide_bet<R: Rng + ?Sized>(
        &self,
        ctx: &BetContext,
        rng: &mut R,
        timeout: Option<Duration>,
    ) -> (BetDecision, DecisionSource) {
        let (mut decision, source) = match self.provider.as_deref() {
            None => (fallback_bet(ctx, rng), DecisionSource::Engine),
            Some(provider) => match bounded(provider.decide_bet(ctx), timeout).await {
                Some(d) => (d, DecisionSource::Provider),
                None => {
                    tracing::warn!(player = %self.name, provider = provider.id(), "bet decision timed out");
                    (
                        BetDecision {
                            amount: ctx.min_bet,
                            rationale: "[engine fallback: provider timed out, minimum bet]"
                                .to_string(),
                        },
                        DecisionSource::Engine,
                    )
                }
            },
        };
        decision.amount = rules::clamp_bet(decision.amount, ctx.min_bet, ctx.balance);
        tracing::debug!(player = %self.name, source = %source, amount = decision.amount, "bet decided");
        (decision, source)
    }

    /// Asks the bound provider for an action. An unaffordable double-down
    /// comes back as a Hit.
    pub async fn decide_action(
        &self,
        ctx: &ActionContext,
        timeout: Option<Duration>,
    ) -> (ActionDecision, DecisionSource) {
        let (mut decision, source) = match self.provider.as_deref() {
            None => (fallback_action(ctx), DecisionSource::Engine),
            Some(provider) => match bounded(provider.decide_action(ctx), timeout).await {
                Some(d) => (d, DecisionSource::Provider),
                None => {
                    tracing::warn!(player = %self.name, provider = provider.id(), "action decision timed out");
                    (
                        ActionDecision {
                            action: PlayerAction::Stand,
                            rationale: "[engine fallback: provider timed out, standing]"
                                .to_string(),
                        },
                        DecisionSource::Engine,
                    )
                }
            },
        };
        decision.action = rules::sanitize_action(decision.action, ctx.can_double_down);
        tracing::debug!(
            player = %self.name,
            source = %source,
            action = %decision.action,
            value = ctx.hand_value,
            "action decided"
        );
        (decision, source)
    }

    /// Appends to this hand's decision history. Must be called before the
    /// drawn card is added so the entry shows the hand as it was decided on.
    pub fn record_action(
        &mut self,
        action: PlayerAction,
        rationale: impl Into<String>,
        card_received: Option<Card>,
    ) {
        self.history.push(ActionHistoryEntry {
            hand: self.hand.to_string(),
            value: self.hand.best_value(),
            action,
            card_received,
            rationale: rationale.into(),
        });
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.hand)
    }
}

/// The house seat: a hand and a fixed drawing rule, no bankroll.
#[derive(Debug, Clone)]
pub struct Dealer {
    name: String,
    hand: Hand,
}

impl Default for Dealer {
    fn default() -> Self {
        Self::new()
    }
}

impl Dealer {
    pub fn new() -> Self {
        Self {
            name: "Dealer".to_string(),
            hand: Hand::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn receive(&mut self, card: Card) -> Card {
        self.hand.add(card)
    }

    pub fn clear_for_round(&mut self) {
        self.hand.clear();
    }

    /// First card dealt; the only one players see during their turns.
    pub fn up_card(&self) -> Option<Card> {
        self.hand.cards().first().copied()
    }

    pub fn should_hit(&self, hit_soft_17: bool) -> bool {
        rules::dealer_should_hit(&self.hand, hit_soft_17)
    }
}
