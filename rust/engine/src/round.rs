use rand::Rng;

use crate::context::{action_context, bet_context};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::{Dealer, Player, PlayerAction};
use crate::rules::{evaluate_outcome, TableRules};
use crate::transcript::{RoundReport, SeatResult, Transcript};

/// One hand of blackjack from bet collection through settlement.
///
/// A round borrows the table's dealer and roster, owns its deck, and is
/// consumed by [`Round::play`]. Phases run strictly in order: reset, bets,
/// deal, player turns, dealer turn, settlement.
///
/// # Examples
///
/// ```
/// use tablemind_engine::cards::{Card, Rank, Suit};
/// use tablemind_engine::deck::Deck;
/// use tablemind_engine::player::{Dealer, Player};
/// use tablemind_engine::round::Round;
/// use tablemind_engine::rules::TableRules;
/// use tablemind_engine::transcript::MemoryTranscript;
/// use rand::SeedableRng;
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let rules = TableRules::default();
/// let mut dealer = Dealer::new();
/// let mut players = vec![Player::new("Ann", 100)];
/// let mut transcript = MemoryTranscript::new();
/// let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(1);
///
/// let deck = Deck::with_rng(1, true, &mut rng).unwrap();
/// let round = Round::new(1, deck, &mut dealer, &mut players, &rules, &mut transcript);
/// let report = round.play(&mut rng).await.unwrap();
/// assert_eq!(report.seats.len(), 1);
/// # });
/// ```
pub struct Round<'a> {
    number: u32,
    deck: Deck,
    dealer: &'a mut Dealer,
    players: &'a mut [Player],
    rules: &'a TableRules,
    transcript: &'a mut dyn Transcript,
}

impl<'a> Round<'a> {
    pub fn new(
        number: u32,
        deck: Deck,
        dealer: &'a mut Dealer,
        players: &'a mut [Player],
        rules: &'a TableRules,
        transcript: &'a mut dyn Transcript,
    ) -> Self {
        Self {
            number,
            deck,
            dealer,
            players,
            rules,
            transcript,
        }
    }

    /// Runs the round to completion.
    ///
    /// # Errors
    ///
    /// [`GameError::EmptyDeck`] if the deck runs out, and
    /// [`GameError::InvalidBet`] if the rules allow a zero bet. Both indicate
    /// a misconfigured table rather than a game event.
    pub async fn play<R: Rng + ?Sized>(mut self, rng: &mut R) -> Result<RoundReport, GameError> {
        self.transcript.blank();
        self.transcript
            .line(&format!("=== New Round #{} ===", self.number));
        tracing::debug!(round = self.number, seats = self.players.len(), "round start");

        self.dealer.clear_for_round();
        for p in self.players.iter_mut() {
            p.clear_for_round();
        }

        let (active, sat_out) = self.collect_bets(rng).await?;
        if active.is_empty() {
            self.transcript.line("No active players with valid bets.");
            return Ok(RoundReport {
                number: self.number,
                sat_out,
                dealer_hand: self.dealer.hand().to_string(),
                seats: Vec::new(),
            });
        }

        self.deal(&active)?;
        self.play_turns(&active).await?;
        self.dealer_turn()?;
        let seats = self.settle(&active);

        Ok(RoundReport {
            number: self.number,
            sat_out,
            dealer_hand: self.dealer.hand().to_string(),
            seats,
        })
    }

    async fn collect_bets<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(Vec<usize>, Vec<String>), GameError> {
        let min_bet = self.rules.min_bet;
        let timeout = self.rules.decision_timeout;
        let mut active = Vec::with_capacity(self.players.len());
        let mut sat_out = Vec::new();

        for seat in 0..self.players.len() {
            if self.players[seat].balance() < min_bet {
                let name = self.players[seat].name().to_string();
                self.transcript.line(&format!(
                    "{} cannot meet the minimum bet and sits out.",
                    name
                ));
                sat_out.push(name);
                continue;
            }

            let ctx = bet_context(self.players, seat, min_bet);
            let (decision, source) = self.players[seat].decide_bet(&ctx, rng, timeout).await;
            let player = &mut self.players[seat];
            player.place_bet(decision.amount)?;
            self.transcript.line(&format!(
                "{} {} bets ${} (Remaining Balance: ${}) | Reasoning: {}",
                player.name(),
                source,
                decision.amount,
                player.balance(),
                decision.rationale
            ));
            active.push(seat);
        }
        Ok((active, sat_out))
    }

    fn deal(&mut self, active: &[usize]) -> Result<(), GameError> {
        for &seat in active {
            let first = self.deck.draw()?;
            let second = self.deck.draw()?;
            self.players[seat].receive(first);
            self.players[seat].receive(second);
        }
        let up = self.deck.draw()?;
        let hole = self.deck.draw()?;
        self.dealer.receive(up);
        self.dealer.receive(hole);

        self.transcript.line(&format!("Dealer shows: {} ??", up));
        for &seat in active {
            let line = self.players[seat].to_string();
            self.transcript.line(&line);
        }
        Ok(())
    }

    async fn play_turns(&mut self, active: &[usize]) -> Result<(), GameError> {
        let timeout = self.rules.decision_timeout;
        let Some(up_card) = self.dealer.up_card() else {
            return Ok(());
        };

        for &seat in active {
            if self.players[seat].hand().is_blackjack() {
                let line = format!("{} has Blackjack.", self.players[seat].name());
                self.transcript.line(&line);
                continue;
            }

            while !self.players[seat].hand().is_bust() {
                let ctx = action_context(self.players, active, seat, up_card);
                let (decision, source) = self.players[seat].decide_action(&ctx, timeout).await;
                let player = &mut self.players[seat];

                match decision.action {
                    PlayerAction::Hit => {
                        let drawn = self.deck.draw()?;
                        player.record_action(PlayerAction::Hit, &decision.rationale, Some(drawn));
                        player.receive(drawn);
                        self.transcript.line(&format!(
                            "{} {} hits, draws {} -> {} | Reasoning: {}",
                            player.name(),
                            source,
                            drawn,
                            player.hand(),
                            decision.rationale
                        ));
                    }
                    PlayerAction::DoubleDown => {
                        let doubled = player.try_double_down();
                        let drawn = self.deck.draw()?;
                        if doubled {
                            player.record_action(
                                PlayerAction::DoubleDown,
                                &decision.rationale,
                                Some(drawn),
                            );
                            player.receive(drawn);
                            self.transcript.line(&format!(
                                "{} {} doubles down, draws {} -> {} (Total Bet: ${}) | Reasoning: {}",
                                player.name(),
                                source,
                                drawn,
                                player.hand(),
                                player.wager(),
                                decision.rationale
                            ));
                        } else {
                            // eligibility changed between context and execution
                            player.record_action(PlayerAction::Hit, &decision.rationale, Some(drawn));
                            player.receive(drawn);
                            self.transcript.line(&format!(
                                "{} {} hits, draws {} -> {} | Reasoning: {}",
                                player.name(),
                                source,
                                drawn,
                                player.hand(),
                                decision.rationale
                            ));
                        }
                        break;
                    }
                    PlayerAction::Stand => {
                        player.record_action(PlayerAction::Stand, &decision.rationale, None);
                        self.transcript.line(&format!(
                            "{} {} stands -> {} | Reasoning: {}",
                            player.name(),
                            source,
                            player.hand(),
                            decision.rationale
                        ));
                        break;
                    }
                }
            }

            if self.players[seat].hand().is_bust() {
                let line = format!("{} busts -> {}", self.players[seat].name(), self.players[seat].hand());
                self.transcript.line(&line);
            }
        }
        Ok(())
    }

    fn dealer_turn(&mut self) -> Result<(), GameError> {
        self.transcript
            .line(&format!("Dealer reveals: {}", self.dealer.hand()));

        if self.dealer.hand().is_blackjack() {
            self.transcript.line("Dealer has Blackjack.");
            return Ok(());
        }

        while self.dealer.should_hit(self.rules.hit_soft_17) {
            let drawn = self.deck.draw()?;
            self.dealer.receive(drawn);
            self.transcript.line(&format!(
                "Dealer hits, draws {} -> {}",
                drawn,
                self.dealer.hand()
            ));
            if self.dealer.hand().is_bust() {
                self.transcript
                    .line(&format!("Dealer busts -> {}", self.dealer.hand()));
                break;
            }
        }
        Ok(())
    }

    fn settle(&mut self, active: &[usize]) -> Vec<SeatResult> {
        self.transcript.blank();
        self.transcript.line("Results:");

        let mut seats = Vec::with_capacity(active.len());
        for &seat in active {
            let player = &mut self.players[seat];
            let outcome = evaluate_outcome(player.hand(), self.dealer.hand());
            let wager = player.wager();
            player.settle(outcome);
            self.transcript.line(&format!(
                "{}: {} vs Dealer {} => {:?} (Balance: ${})",
                player.name(),
                player.hand(),
                self.dealer.hand(),
                outcome,
                player.balance()
            ));
            seats.push(SeatResult {
                name: player.name().to_string(),
                hand: player.hand().to_string(),
                outcome,
                wager,
                balance: player.balance(),
            });
        }
        seats
    }
}
