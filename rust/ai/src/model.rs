//! Decision provider backed by a chat-completion model.

use std::sync::Arc;

use async_trait::async_trait;
use tablemind_engine::context::{ActionContext, BetContext};
use tablemind_engine::player::PlayerAction;
use tablemind_engine::provider::{ActionDecision, BetDecision, DecisionProvider};
use tablemind_engine::usage::UsageTracker;

use crate::client::{ChatClient, ChatError};
use crate::parse::{parse_action, parse_bet};
use crate::prompt::{action_prompt, bet_prompt, SYSTEM_PROMPT};

/// Sends each decision to a model and parses its JSON reply.
///
/// Transport failures and unreadable replies never escape: they resolve to
/// the minimum bet or Stand, with the cause in the rationale.
pub struct ModelProvider {
    model: String,
    client: Box<dyn ChatClient>,
    usage: Arc<UsageTracker>,
}

impl ModelProvider {
    pub fn new(model: impl Into<String>, client: Box<dyn ChatClient>, usage: Arc<UsageTracker>) -> Self {
        Self {
            model: model.into(),
            client,
            usage,
        }
    }

    async fn ask(&self, prompt: &str) -> Result<String, ChatError> {
        let completion = self.client.complete(SYSTEM_PROMPT, prompt).await?;
        if let Some(u) = completion.usage {
            self.usage.add(&self.model, u.input, u.output, u.total);
        }
        Ok(completion.text)
    }
}

#[async_trait]
impl DecisionProvider for ModelProvider {
    fn id(&self) -> &str {
        &self.model
    }

    async fn decide_bet(&self, ctx: &BetContext) -> BetDecision {
        match self.ask(&bet_prompt(ctx)).await {
            Ok(text) => parse_bet(&text, ctx),
            Err(e) => {
                tracing::warn!(model = %self.model, player = %ctx.player_name, error = %e, "bet request failed");
                BetDecision {
                    amount: ctx.min_bet.min(ctx.balance),
                    rationale: format!("[Provider error, defaulting to min bet] {}", e),
                }
            }
        }
    }

    async fn decide_action(&self, ctx: &ActionContext) -> ActionDecision {
        match self.ask(&action_prompt(ctx)).await {
            Ok(text) => parse_action(&text, ctx),
            Err(e) => {
                tracing::warn!(model = %self.model, player = %ctx.player_name, error = %e, "action request failed");
                ActionDecision {
                    action: PlayerAction::Stand,
                    rationale: format!("[Provider error, defaulting to stand] {}", e),
                }
            }
        }
    }
}
