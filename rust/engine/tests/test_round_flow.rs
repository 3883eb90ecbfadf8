mod helpers;

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use helpers::{c, stacked, Scripted, Silent};
use tablemind_engine::cards::Rank::*;
use tablemind_engine::deck::Deck;
use tablemind_engine::player::{Dealer, Player, PlayerAction};
use tablemind_engine::round::Round;
use tablemind_engine::rules::{Outcome, TableRules};
use tablemind_engine::transcript::{MemoryTranscript, RoundReport};

async fn run(
    players: &mut [Player],
    deck: Deck,
    rules: &TableRules,
) -> (RoundReport, Dealer, MemoryTranscript) {
    let mut dealer = Dealer::new();
    let mut transcript = MemoryTranscript::new();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let report = Round::new(1, deck, &mut dealer, players, rules, &mut transcript)
        .play(&mut rng)
        .await
        .expect("round completes");
    (report, dealer, transcript)
}

#[tokio::test]
async fn player_below_minimum_sits_out_while_other_plays() {
    let (provider, state) = Scripted::new(10, &[PlayerAction::Stand]);
    let mut players = vec![
        Player::with_provider("Ann", 100, provider),
        Player::new("Bob", 3),
    ];
    let rules = TableRules::default();

    let (report, _dealer, transcript) =
        run(&mut players, stacked(&[King, Nine, Ten, Eight]), &rules).await;

    assert_eq!(report.sat_out, vec!["Bob".to_string()]);
    assert_eq!(report.seats.len(), 1);
    assert_eq!(report.seats[0].outcome, Outcome::Win);
    assert_eq!(players[0].balance(), 110);
    assert_eq!(players[1].balance(), 3);
    assert!(players[1].hand().is_empty());
    assert_eq!(state.bet_calls(), 1);
    assert!(transcript.contains("Bob cannot meet the minimum bet and sits out."));
}

#[tokio::test]
async fn dealer_hard_seventeen_never_draws() {
    let (provider, _) = Scripted::new(10, &[PlayerAction::Stand]);
    let mut players = vec![Player::with_provider("Ann", 100, provider)];
    let rules = TableRules {
        hit_soft_17: true,
        ..TableRules::default()
    };

    let (report, dealer, _) =
        run(&mut players, stacked(&[Ten, Nine, King, Seven, Five]), &rules).await;

    assert_eq!(dealer.hand().len(), 2);
    assert_eq!(dealer.hand().best_value(), 17);
    assert_eq!(report.seats[0].outcome, Outcome::Win);
}

#[tokio::test]
async fn dealer_soft_seventeen_draws_exactly_once_when_rule_enabled() {
    let (provider, _) = Scripted::new(10, &[PlayerAction::Stand]);
    let mut players = vec![Player::with_provider("Ann", 100, provider)];
    let rules = TableRules {
        hit_soft_17: true,
        ..TableRules::default()
    };

    let (report, dealer, transcript) =
        run(&mut players, stacked(&[Ten, Nine, Ace, Six, Four, Two, Two]), &rules).await;

    assert_eq!(dealer.hand().len(), 3);
    assert_eq!(dealer.hand().best_value(), 21);
    assert_eq!(report.seats[0].outcome, Outcome::Lose);
    assert_eq!(players[0].balance(), 90);
    assert!(transcript.contains("Dealer hits, draws 4♣"));
}

#[tokio::test]
async fn dealer_stands_on_soft_seventeen_when_rule_disabled() {
    let (provider, _) = Scripted::new(10, &[PlayerAction::Stand]);
    let mut players = vec![Player::with_provider("Ann", 100, provider)];
    let rules = TableRules {
        hit_soft_17: false,
        ..TableRules::default()
    };

    let (report, dealer, _) =
        run(&mut players, stacked(&[Ten, Nine, Ace, Six, Four]), &rules).await;

    assert_eq!(dealer.hand().len(), 2);
    assert_eq!(report.seats[0].outcome, Outcome::Win);
}

#[tokio::test]
async fn natural_blackjack_is_never_asked_for_an_action() {
    let (provider, state) = Scripted::new(10, &[PlayerAction::Hit]);
    let mut players = vec![Player::with_provider("Ann", 100, provider)];

    let (report, _, transcript) = run(
        &mut players,
        stacked(&[Ace, King, Ten, Nine]),
        &TableRules::default(),
    )
    .await;

    assert_eq!(state.action_calls(), 0);
    assert_eq!(report.seats[0].outcome, Outcome::BlackjackWin);
    assert_eq!(players[0].balance(), 115);
    assert!(transcript.contains("Ann has Blackjack."));
}

#[tokio::test]
async fn dealer_blackjack_beats_player_twenty_one() {
    let (provider, _) = Scripted::new(10, &[PlayerAction::Hit, PlayerAction::Stand]);
    let mut players = vec![Player::with_provider("Ann", 100, provider)];

    let (report, dealer, transcript) = run(
        &mut players,
        stacked(&[Five, Six, Ace, Queen, Ten]),
        &TableRules::default(),
    )
    .await;

    assert_eq!(players[0].hand().best_value(), 21);
    assert!(dealer.hand().is_blackjack());
    assert_eq!(report.seats[0].outcome, Outcome::Lose);
    assert!(transcript.contains("Dealer has Blackjack."));
}

#[tokio::test]
async fn hit_history_flows_into_the_next_context() {
    let (provider, state) = Scripted::new(10, &[PlayerAction::Hit, PlayerAction::Stand]);
    let mut players = vec![Player::with_provider("Ann", 100, provider)];

    let (report, _, _) = run(
        &mut players,
        stacked(&[Five, Six, Ten, Seven, Two]),
        &TableRules::default(),
    )
    .await;

    let contexts = state.action_contexts.lock().unwrap().clone();
    assert_eq!(contexts.len(), 2);

    let first = &contexts[0];
    assert_eq!(first.hand_value, 11);
    assert!(first.can_double_down);
    assert_eq!(first.dealer_up_card, c(Ten));
    assert!(first.history.is_empty());

    let second = &contexts[1];
    assert_eq!(second.hand_value, 13);
    assert!(!second.can_double_down);
    assert_eq!(second.history.len(), 1);
    assert_eq!(second.history[0].action, PlayerAction::Hit);
    assert_eq!(second.history[0].value, 11);
    assert_eq!(second.history[0].card_received, Some(c(Two)));

    assert_eq!(players[0].history().len(), 2);
    assert_eq!(players[0].history()[1].action, PlayerAction::Stand);
    assert_eq!(report.seats[0].outcome, Outcome::Lose);
}

#[tokio::test]
async fn double_down_draws_one_card_and_doubles_payout() {
    let (provider, state) = Scripted::new(10, &[PlayerAction::DoubleDown, PlayerAction::Hit]);
    let mut players = vec![Player::with_provider("Ann", 100, provider)];

    let (report, _, transcript) = run(
        &mut players,
        stacked(&[Five, Six, Ten, Eight, Ten, Two]),
        &TableRules::default(),
    )
    .await;

    assert_eq!(state.action_calls(), 1);
    assert_eq!(players[0].hand().len(), 3);
    assert_eq!(report.seats[0].wager, 20);
    assert_eq!(report.seats[0].outcome, Outcome::Win);
    assert_eq!(players[0].balance(), 120);
    assert!(transcript.contains("doubles down, draws 10♣"));
}

#[tokio::test]
async fn unaffordable_double_down_is_played_as_a_hit() {
    let (provider, state) = Scripted::new(10, &[PlayerAction::DoubleDown, PlayerAction::Stand]);
    let mut players = vec![Player::with_provider("Ann", 10, provider)];

    let (report, _, _) = run(
        &mut players,
        stacked(&[Five, Six, Ten, Eight, Two]),
        &TableRules::default(),
    )
    .await;

    assert_eq!(state.action_calls(), 2);
    assert_eq!(players[0].history()[0].action, PlayerAction::Hit);
    assert_eq!(players[0].hand().len(), 3);
    assert_eq!(report.seats[0].wager, 10);
    assert_eq!(report.seats[0].outcome, Outcome::Lose);
    assert_eq!(players[0].balance(), 0);
}

#[tokio::test]
async fn bust_ends_the_turn_without_further_decisions() {
    let (provider, state) = Scripted::new(
        10,
        &[PlayerAction::Hit, PlayerAction::Hit, PlayerAction::Hit],
    );
    let mut players = vec![Player::with_provider("Ann", 100, provider)];

    let (report, dealer, transcript) = run(
        &mut players,
        stacked(&[Ten, Six, Ten, Six, King, Nine]),
        &TableRules::default(),
    )
    .await;

    assert_eq!(state.action_calls(), 1);
    assert!(players[0].hand().is_bust());
    assert_eq!(report.seats[0].outcome, Outcome::Lose);
    assert!(transcript.contains("Ann busts"));
    // dealer still plays out and draws to 25
    assert!(dealer.hand().is_bust());
}

#[tokio::test]
async fn provider_bets_are_clamped_to_table_limits() {
    let (big, _) = Scripted::new(1_000, &[]);
    let (small, _) = Scripted::new(1, &[]);
    let mut players = vec![
        Player::with_provider("Ann", 100, big),
        Player::with_provider("Bob", 100, small),
    ];

    let (report, _, _) = run(
        &mut players,
        stacked(&[Ten, Nine, Ten, Nine, Ten, Nine]),
        &TableRules::default(),
    )
    .await;

    assert_eq!(report.seats[0].wager, 100);
    assert_eq!(report.seats[1].wager, 5);
    assert_eq!(report.seats[0].outcome, Outcome::Push);
    assert_eq!(players[0].balance(), 100);
    assert_eq!(players[1].balance(), 100);
}

#[tokio::test]
async fn later_bettors_see_earlier_bets() {
    let (a, a_state) = Scripted::new(10, &[]);
    let (b, b_state) = Scripted::new(20, &[]);
    let mut players = vec![
        Player::with_provider("Ann", 100, a),
        Player::with_provider("Bob", 100, b),
    ];

    run(
        &mut players,
        stacked(&[Ten, Nine, Ten, Eight, Ten, Seven]),
        &TableRules::default(),
    )
    .await;

    let ann_ctx = a_state.bet_contexts.lock().unwrap()[0].clone();
    assert_eq!(ann_ctx.opponents[0].name, "Bob");
    assert_eq!(ann_ctx.opponents[0].current_bet, 0);

    let bob_ctx = b_state.bet_contexts.lock().unwrap()[0].clone();
    assert_eq!(bob_ctx.opponents[0].name, "Ann");
    assert_eq!(bob_ctx.opponents[0].current_bet, 10);
    assert_eq!(bob_ctx.opponents[0].balance, 100);

    let bob_action = b_state.action_contexts.lock().unwrap()[0].clone();
    assert_eq!(bob_action.other_hands.len(), 1);
    assert_eq!(bob_action.other_hands[0].name, "Ann");
    assert_eq!(bob_action.other_hands[0].value, 19);
}

#[tokio::test]
async fn nobody_qualifies_so_nothing_is_dealt() {
    let mut players = vec![Player::new("Ann", 4), Player::new("Bob", 0)];

    let (report, dealer, transcript) =
        run(&mut players, Deck::from_cards(vec![]), &TableRules::default()).await;

    assert!(report.seats.is_empty());
    assert_eq!(report.sat_out.len(), 2);
    assert!(dealer.hand().is_empty());
    assert!(transcript.contains("No active players with valid bets."));
}

#[tokio::test(start_paused = true)]
async fn silent_provider_times_out_to_engine_fallbacks() {
    let mut players = vec![Player::with_provider("Ann", 100, Box::new(Silent))];
    let rules = TableRules {
        decision_timeout: Some(Duration::from_secs(5)),
        ..TableRules::default()
    };

    let (report, dealer, transcript) =
        run(&mut players, stacked(&[Ten, Nine, Ten, Eight]), &rules).await;

    assert_eq!(report.seats[0].wager, 5);
    assert_eq!(players[0].history()[0].action, PlayerAction::Stand);
    assert_eq!(dealer.hand().len(), 2);
    assert_eq!(players[0].balance(), 105);
    assert!(transcript.contains("Ann [engine] bets $5"));
    assert!(transcript.contains("provider timed out"));
}

#[tokio::test]
async fn unbound_seats_use_the_engine_policy() {
    let mut players = vec![Player::new("Ann", 100)];

    let (report, _, transcript) = run(
        &mut players,
        stacked(&[Five, Four, Ten, Eight, Ten]),
        &TableRules::default(),
    )
    .await;

    // 9 doubles when affordable, otherwise hits; either way the ten lands
    let first = players[0].history()[0].action;
    assert_ne!(first, PlayerAction::Stand);
    assert_eq!(players[0].hand().best_value(), 19);
    assert_eq!(report.seats[0].wager % 5, 0);
    assert_eq!(report.seats[0].outcome, Outcome::Win);
    assert!(transcript.contains("Ann [engine] bets $"));
}

#[tokio::test]
async fn running_out_of_cards_is_an_error() {
    let (provider, _) = Scripted::new(10, &[PlayerAction::Hit]);
    let mut players = vec![Player::with_provider("Ann", 100, provider)];
    let mut dealer = Dealer::new();
    let mut transcript = MemoryTranscript::new();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let rules = TableRules::default();

    let err = Round::new(
        1,
        stacked(&[Two, Three, Ten, Six]),
        &mut dealer,
        &mut players,
        &rules,
        &mut transcript,
    )
    .play(&mut rng)
    .await
    .unwrap_err();

    assert_eq!(err, tablemind_engine::errors::GameError::EmptyDeck);
}
