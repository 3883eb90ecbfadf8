//! The decision-delegation boundary.
//!
//! A [`DecisionProvider`] answers two questions for a seat: how much to
//! bet, and what to do with the current hand. The engine never inspects
//! which implementation it is talking to.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::context::{ActionContext, BetContext};
use crate::player::PlayerAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetDecision {
    pub amount: u64,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDecision {
    pub action: PlayerAction,
    pub rationale: String,
}

/// Who actually produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionSource {
    /// The seat's bound provider answered in time
    Provider,
    /// The engine's built-in policy (no provider bound, or the call timed out)
    Engine,
}

impl fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionSource::Provider => write!(f, "[provider]"),
            DecisionSource::Engine => write!(f, "[engine]"),
        }
    }
}

/// Trait implemented by anything that can drive a seat's bets and actions.
///
/// Implementations must always return a decision. Malformed upstream
/// replies and transport failures are resolved inside the provider to its
/// own documented fallback (minimum bet, Stand), with the offending raw
/// response kept in the rationale.
///
/// # Example Implementation
///
/// ```rust
/// use async_trait::async_trait;
/// use tablemind_engine::context::{ActionContext, BetContext};
/// use tablemind_engine::player::PlayerAction;
/// use tablemind_engine::provider::{ActionDecision, BetDecision, DecisionProvider};
///
/// struct AlwaysStand;
///
/// #[async_trait]
/// impl DecisionProvider for AlwaysStand {
///     fn id(&self) -> &str {
///         "always-stand"
///     }
///
///     async fn decide_bet(&self, ctx: &BetContext) -> BetDecision {
///         BetDecision { amount: ctx.min_bet, rationale: "table minimum".into() }
///     }
///
///     async fn decide_action(&self, _ctx: &ActionContext) -> ActionDecision {
///         ActionDecision { action: PlayerAction::Stand, rationale: "never draw".into() }
///     }
/// }
/// ```
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Stable identifier, used as the usage-metering key.
    fn id(&self) -> &str;

    async fn decide_bet(&self, ctx: &BetContext) -> BetDecision;

    async fn decide_action(&self, ctx: &ActionContext) -> ActionDecision;
}

/// Built-in bet policy: a random whole number of minimum-bet units that the
/// balance can cover.
pub fn fallback_bet<R: Rng + ?Sized>(ctx: &BetContext, rng: &mut R) -> BetDecision {
    let max_units = (ctx.balance / ctx.min_bet.max(1)).max(1);
    let units = rng.random_range(1..=max_units);
    BetDecision {
        amount: units * ctx.min_bet,
        rationale: format!("Engine policy: random {} unit(s) of the minimum", units),
    }
}

/// Built-in action policy: double on 9-11 when allowed, hit below 17, else stand.
pub fn fallback_action(ctx: &ActionContext) -> ActionDecision {
    let v = ctx.hand_value;
    let (action, rationale) = if ctx.can_double_down && (9..=11).contains(&v) {
        (PlayerAction::DoubleDown, format!("Engine policy: double on {}", v))
    } else if v < 17 {
        (PlayerAction::Hit, format!("Engine policy: hit below 17 ({})", v))
    } else {
        (PlayerAction::Stand, format!("Engine policy: stand on {}", v))
    };
    ActionDecision { action, rationale }
}

/// Awaits `fut`, giving up after `limit` when one is set.
pub(crate) async fn bounded<F: Future>(fut: F, limit: Option<Duration>) -> Option<F::Output> {
    match limit {
        Some(d) => tokio::time::timeout(d, fut).await.ok(),
        None => Some(fut.await),
    }
}
