//! Basic-strategy provider for blackjack seats.
//!
//! Plays the textbook chart for a multi-deck shoe with no splitting and
//! bets conservatively. Fully deterministic, so it doubles as a reference
//! opponent when comparing model-driven seats.

use async_trait::async_trait;
use tablemind_engine::cards::{Card, Rank};
use tablemind_engine::context::{ActionContext, BetContext};
use tablemind_engine::player::PlayerAction;
use tablemind_engine::provider::{ActionDecision, BetDecision, DecisionProvider};

/// Deterministic basic-strategy player.
///
/// # Strategy
///
/// **Betting:** two minimum units while the balance is above twenty units,
/// otherwise one unit, never more than the balance.
///
/// **Doubling (when allowed):** hard or soft 11 always; 10 against a
/// dealer 2-9; 9 against a dealer 3-6.
///
/// **Soft totals:** stand on 19+, stand on 18 unless the dealer shows 9,
/// 10 or an Ace, otherwise hit.
///
/// **Hard totals:** stand on 17+, hit on 11 or less, and on 12-16 stand
/// only against a dealer 2-6.
#[derive(Debug, Clone)]
pub struct BasicStrategy {
    id: String,
}

impl Default for BasicStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicStrategy {
    pub fn new() -> Self {
        Self {
            id: "basic".to_string(),
        }
    }

    fn dealer_value(card: Card) -> u32 {
        match card.rank {
            Rank::Ace => 11,
            r => u32::from(r.low_value()),
        }
    }

    fn choose_bet(ctx: &BetContext) -> (u64, &'static str) {
        let units = if ctx.balance > ctx.min_bet.saturating_mul(20) {
            2
        } else {
            1
        };
        let amount = (ctx.min_bet * units).min(ctx.balance);
        let why = if units == 2 {
            "comfortable bankroll, two units"
        } else {
            "short bankroll, table minimum"
        };
        (amount, why)
    }

    fn choose_action(ctx: &ActionContext) -> (PlayerAction, String) {
        let v = ctx.hand_value;
        let d = Self::dealer_value(ctx.dealer_up_card);

        if v >= 21 {
            return (PlayerAction::Stand, format!("{} cannot improve", v));
        }

        if ctx.can_double_down {
            let double = match v {
                11 => true,
                10 => d <= 9,
                9 => (3..=6).contains(&d),
                _ => false,
            };
            if double {
                return (PlayerAction::DoubleDown, format!("double {} against {}", v, d));
            }
        }

        if ctx.is_soft {
            return match v {
                19.. => (PlayerAction::Stand, format!("stand on soft {}", v)),
                18 if d >= 9 => (PlayerAction::Hit, format!("hit soft 18 against {}", d)),
                18 => (PlayerAction::Stand, format!("stand on soft 18 against {}", d)),
                _ => (PlayerAction::Hit, format!("hit soft {}", v)),
            };
        }

        match v {
            17.. => (PlayerAction::Stand, format!("stand on hard {}", v)),
            ..=11 => (PlayerAction::Hit, format!("hit hard {}, no bust risk", v)),
            _ if (2..=6).contains(&d) => {
                (PlayerAction::Stand, format!("stand on {} against weak {}", v, d))
            }
            _ => (PlayerAction::Hit, format!("hit {} against strong {}", v, d)),
        }
    }
}

#[async_trait]
impl DecisionProvider for BasicStrategy {
    fn id(&self) -> &str {
        &self.id
    }

    async fn decide_bet(&self, ctx: &BetContext) -> BetDecision {
        let (amount, why) = Self::choose_bet(ctx);
        BetDecision {
            amount,
            rationale: format!("Basic strategy: {}", why),
        }
    }

    async fn decide_action(&self, ctx: &ActionContext) -> ActionDecision {
        let (action, why) = Self::choose_action(ctx);
        ActionDecision {
            action,
            rationale: format!("Basic strategy: {}", why),
        }
    }
}
