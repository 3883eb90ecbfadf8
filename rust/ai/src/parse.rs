//! Turns free-form model replies into engine decisions.
//!
//! Never fails: anything that cannot be read becomes the documented
//! fallback (minimum bet, Stand) with the raw reply kept in the rationale.

use serde_json::Value;
use tablemind_engine::context::{ActionContext, BetContext};
use tablemind_engine::player::PlayerAction;
use tablemind_engine::provider::{ActionDecision, BetDecision};
use tablemind_engine::rules::{clamp_bet, sanitize_action};

const NO_REASONING: &str = "No reasoning provided.";

/// Trims whitespace and one layer of Markdown code fences.
pub fn strip_fences(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

fn reasoning(json: &Value) -> String {
    json.get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or(NO_REASONING)
        .to_string()
}

pub fn parse_bet(raw: &str, ctx: &BetContext) -> BetDecision {
    let cleaned = strip_fences(raw);
    let parsed = serde_json::from_str::<Value>(cleaned).ok().and_then(|json| {
        let amount = json.get("amount")?.as_i64()?;
        Some((amount, reasoning(&json)))
    });

    match parsed {
        Some((amount, rationale)) => {
            let amount = u64::try_from(amount).unwrap_or(0);
            BetDecision {
                amount: clamp_bet(amount, ctx.min_bet, ctx.balance),
                rationale,
            }
        }
        None => BetDecision {
            amount: ctx.min_bet.min(ctx.balance),
            rationale: format!("[Parse error, defaulting to min bet] Raw: {}", cleaned),
        },
    }
}

fn action_from_str(s: &str) -> PlayerAction {
    match s.trim().to_ascii_lowercase().as_str() {
        "hit" => PlayerAction::Hit,
        "doubledown" | "double_down" | "double down" => PlayerAction::DoubleDown,
        _ => PlayerAction::Stand,
    }
}

pub fn parse_action(raw: &str, ctx: &ActionContext) -> ActionDecision {
    let cleaned = strip_fences(raw);
    let parsed = serde_json::from_str::<Value>(cleaned).ok().and_then(|json| {
        let action = json.get("action")?.as_str()?.to_string();
        Some((action, reasoning(&json)))
    });

    match parsed {
        Some((action, rationale)) => ActionDecision {
            action: sanitize_action(action_from_str(&action), ctx.can_double_down),
            rationale,
        },
        None => ActionDecision {
            action: PlayerAction::Stand,
            rationale: format!("[Parse error, defaulting to stand] Raw: {}", cleaned),
        },
    }
}
