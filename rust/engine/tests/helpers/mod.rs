//! Shared fixtures for engine integration tests: stacked decks and a
//! provider that replays a fixed script while recording what it was shown.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tablemind_engine::cards::{Card, Rank, Suit};
use tablemind_engine::context::{ActionContext, BetContext};
use tablemind_engine::deck::Deck;
use tablemind_engine::player::PlayerAction;
use tablemind_engine::provider::{ActionDecision, BetDecision, DecisionProvider};

pub fn c(rank: Rank) -> Card {
    Card::new(rank, Suit::Clubs)
}

pub fn stacked(ranks: &[Rank]) -> Deck {
    Deck::from_cards(ranks.iter().map(|&r| c(r)).collect())
}

#[derive(Default)]
pub struct ScriptState {
    pub bet: u64,
    pub actions: Mutex<VecDeque<PlayerAction>>,
    pub bet_contexts: Mutex<Vec<BetContext>>,
    pub action_contexts: Mutex<Vec<ActionContext>>,
}

impl ScriptState {
    pub fn bet_calls(&self) -> usize {
        self.bet_contexts.lock().unwrap().len()
    }

    pub fn action_calls(&self) -> usize {
        self.action_contexts.lock().unwrap().len()
    }
}

/// Bets a fixed amount and plays a queue of actions, standing once empty.
pub struct Scripted {
    pub state: Arc<ScriptState>,
}

impl Scripted {
    pub fn new(bet: u64, actions: &[PlayerAction]) -> (Box<dyn DecisionProvider>, Arc<ScriptState>) {
        let state = Arc::new(ScriptState {
            bet,
            actions: Mutex::new(actions.iter().copied().collect()),
            ..ScriptState::default()
        });
        (
            Box::new(Scripted {
                state: Arc::clone(&state),
            }),
            state,
        )
    }
}

#[async_trait]
impl DecisionProvider for Scripted {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn decide_bet(&self, ctx: &BetContext) -> BetDecision {
        self.state.bet_contexts.lock().unwrap().push(ctx.clone());
        BetDecision {
            amount: self.state.bet,
            rationale: "scripted bet".to_string(),
        }
    }

    async fn decide_action(&self, ctx: &ActionContext) -> ActionDecision {
        self.state.action_contexts.lock().unwrap().push(ctx.clone());
        let action = self
            .state
            .actions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(PlayerAction::Stand);
        ActionDecision {
            action,
            rationale: format!("scripted {}", action),
        }
    }
}

/// Never answers.
pub struct Silent;

#[async_trait]
impl DecisionProvider for Silent {
    fn id(&self) -> &str {
        "silent"
    }

    async fn decide_bet(&self, _ctx: &BetContext) -> BetDecision {
        std::future::pending().await
    }

    async fn decide_action(&self, _ctx: &ActionContext) -> ActionDecision {
        std::future::pending().await
    }
}
