//! Prompt text sent to chat-completion models.

use std::fmt::Write as _;

use tablemind_engine::context::{ActionContext, ActionHistoryEntry, BetContext, OpponentHand};

pub const SYSTEM_PROMPT: &str = "You are a professional and strategic blackjack player. \
Be concise. Always respond with valid JSON only, no markdown.";

pub fn bet_prompt(ctx: &BetContext) -> String {
    let opponents = if ctx.opponents.is_empty() {
        "  (none)".to_string()
    } else {
        ctx.opponents
            .iter()
            .map(|o| {
                if o.current_bet > 0 {
                    format!("  - {}: Balance ${}, Bet ${}", o.name, o.balance, o.current_bet)
                } else {
                    format!("  - {}: Balance ${} (not yet bet)", o.name, o.balance)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are seated at a blackjack table. Your name is {name}.\n\
         \n\
         YOUR STATUS:\n\
         - Balance: ${balance}\n\
         - Minimum bet: ${min}\n\
         \n\
         OTHER PLAYERS AT THE TABLE:\n\
         {opponents}\n\
         \n\
         Choose a bet between ${min} and ${balance}. Weigh your standing against \
         the other players and how much risk you are willing to take.\n\
         \n\
         Respond with ONLY valid JSON in exactly this shape:\n\
         {{\"amount\": <number>, \"reasoning\": \"<one or two sentences>\"}}",
        name = ctx.player_name,
        balance = ctx.balance,
        min = ctx.min_bet,
        opponents = opponents,
    )
}

pub fn action_prompt(ctx: &ActionContext) -> String {
    let actions = if ctx.can_double_down {
        "Hit, Stand, or DoubleDown"
    } else {
        "Hit or Stand"
    };
    let double_note = if ctx.can_double_down {
        "\nDoubleDown doubles your bet and deals you exactly one more card."
    } else {
        ""
    };
    let soft = if ctx.is_soft { " (soft)" } else { "" };

    format!(
        "You are playing blackjack. Your name is {name}.\n\
         Decide using your hand, the dealer's up card, and the other visible hands.\n\
         \n\
         DEALER SHOWS: {up}\n\
         \n\
         {history}\n\
         \n\
         YOUR CURRENT HAND: {hand}\n\
         - Value: {value}{soft}\n\
         - Current bet: ${bet}\n\
         - Remaining balance: ${balance}\n\
         \n\
         {others}\n\
         \n\
         AVAILABLE ACTIONS: {actions}{double_note}\n\
         \n\
         Respond with ONLY valid JSON in exactly this shape:\n\
         {{\"action\": \"Hit\" or \"Stand\" or \"DoubleDown\", \"reasoning\": \"<one or two sentences>\"}}",
        name = ctx.player_name,
        up = ctx.dealer_up_card,
        history = history_section(&ctx.history),
        hand = ctx.hand,
        value = ctx.hand_value,
        soft = soft,
        bet = ctx.current_bet,
        balance = ctx.balance,
        others = others_section(&ctx.other_hands),
        actions = actions,
        double_note = double_note,
    )
}

fn history_section(history: &[ActionHistoryEntry]) -> String {
    if history.is_empty() {
        return "THIS IS YOUR FIRST DECISION THIS HAND.".to_string();
    }
    let mut out = String::from("YOUR DECISIONS THIS HAND:");
    for entry in history {
        let _ = write!(
            out,
            "\n  - Hand was {} (value {})\n    You chose: {}\n    Reasoning: \"{}\"",
            entry.hand, entry.value, entry.action, entry.rationale
        );
        if let Some(card) = entry.card_received {
            let _ = write!(out, "\n    Card received: {}", card);
        }
    }
    out
}

fn others_section(others: &[OpponentHand]) -> String {
    if others.is_empty() {
        return "OTHER PLAYERS: (none)".to_string();
    }
    let lines: Vec<String> = others
        .iter()
        .map(|o| {
            format!(
                "  - {}: {} (value {}){}",
                o.name,
                o.hand,
                o.value,
                if o.is_bust { " BUST" } else { "" }
            )
        })
        .collect();
    format!("OTHER PLAYERS' VISIBLE HANDS:\n{}", lines.join("\n"))
}
