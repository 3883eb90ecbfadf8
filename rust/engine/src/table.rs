use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::{Dealer, Player};
use crate::provider::DecisionProvider;
use crate::round::Round;
use crate::rules::TableRules;
use crate::transcript::{HistoryWriter, RoundRecord, RoundReport, Transcript};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub balance: u64,
}

/// How a multi-round game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Everyone else was eliminated
    SingleWinner(Standing),
    /// Round cap reached with several players left; `leader` has the
    /// highest balance, earliest seat first on ties
    RoundCap {
        rounds_played: u32,
        leader: Standing,
        standings: Vec<Standing>,
    },
    /// Every player fell below the minimum in the same round
    NoPlayersLeft,
}

/// Long-lived aggregate: dealer, roster, rules, and event sinks.
///
/// Each round gets a freshly built deck drawn from the table RNG. The
/// roster only changes between rounds, when players who can no longer
/// cover the minimum bet are eliminated.
pub struct Table<'t> {
    dealer: Dealer,
    players: Vec<Player>,
    rules: TableRules,
    transcript: Box<dyn Transcript + 't>,
    history: Option<HistoryWriter>,
    rng: ChaCha20Rng,
    seed: Option<u64>,
}

impl<'t> Table<'t> {
    pub fn new(rules: TableRules, transcript: Box<dyn Transcript + 't>) -> Result<Self, GameError> {
        rules.validate()?;
        Ok(Self {
            dealer: Dealer::new(),
            players: Vec::new(),
            rules,
            transcript,
            history: None,
            rng: ChaCha20Rng::from_os_rng(),
            seed: None,
        })
    }

    /// Same as [`Table::new`] but with reproducible shuffles and fallback bets.
    pub fn with_seed(
        rules: TableRules,
        transcript: Box<dyn Transcript + 't>,
        seed: u64,
    ) -> Result<Self, GameError> {
        let mut table = Self::new(rules, transcript)?;
        table.rng = ChaCha20Rng::seed_from_u64(seed);
        table.seed = Some(seed);
        Ok(table)
    }

    pub fn with_history(mut self, history: HistoryWriter) -> Self {
        self.history = Some(history);
        self
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }
    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    /// For lines written after the game, such as usage summaries.
    pub fn transcript_mut(&mut self) -> &mut dyn Transcript {
        self.transcript.as_mut()
    }

    /// Seats a new player with the table's starting balance.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        provider: Option<Box<dyn DecisionProvider>>,
    ) -> Result<&mut Player, GameError> {
        let mut player = Player::new(name, self.rules.starting_balance);
        player.set_provider(provider);
        self.seat(player)
    }

    pub fn seat(&mut self, player: Player) -> Result<&mut Player, GameError> {
        if self.players.iter().any(|p| p.name() == player.name()) {
            return Err(GameError::DuplicatePlayer(player.name().to_string()));
        }
        self.players.push(player);
        let last = self.players.len() - 1;
        Ok(&mut self.players[last])
    }

    /// Plays one round with a fresh deck.
    pub async fn play_round(&mut self, number: u32) -> Result<RoundReport, GameError> {
        let deck = Deck::with_rng(self.rules.deck_count, self.rules.shuffle, &mut self.rng)?;
        self.play_round_with_deck(number, deck).await
    }

    /// Plays one round from a caller-supplied deck.
    pub async fn play_round_with_deck(
        &mut self,
        number: u32,
        deck: Deck,
    ) -> Result<RoundReport, GameError> {
        let round = Round::new(
            number,
            deck,
            &mut self.dealer,
            &mut self.players,
            &self.rules,
            self.transcript.as_mut(),
        );
        let report = round.play(&mut self.rng).await?;

        if let Some(history) = &mut self.history {
            let record = RoundRecord {
                round_id: history.next_id(),
                seed: self.seed,
                report: report.clone(),
                ts: None,
            };
            if let Err(e) = history.write(&record) {
                tracing::warn!(error = %e, round = number, "failed to write round history");
            }
        }
        Ok(report)
    }

    /// Plays rounds until one player remains, nobody can bet, or the round
    /// cap is reached.
    pub async fn play_until_one_remaining(&mut self) -> Result<GameOutcome, GameError> {
        self.transcript.line("=== Game Start ===");
        for p in &self.players {
            let line = format!("{} joins the game with balance: ${}", p.name(), p.balance());
            self.transcript.line(&line);
        }

        let mut round = 1;
        loop {
            self.remove_bankrupt_players();

            match self.players.len() {
                0 => {
                    self.transcript.blank();
                    self.transcript
                        .line("No players left with sufficient balance.");
                    return Ok(GameOutcome::NoPlayersLeft);
                }
                1 => {
                    let winner = standing(&self.players[0]);
                    self.transcript.blank();
                    self.transcript.line(&format!(
                        "Winner: {} (Balance: ${})",
                        winner.name, winner.balance
                    ));
                    tracing::info!(winner = %winner.name, balance = winner.balance, "game over");
                    return Ok(GameOutcome::SingleWinner(winner));
                }
                _ => {}
            }

            if round > self.rules.max_rounds {
                let standings: Vec<Standing> = self.players.iter().map(standing).collect();
                let leader = leader(&standings);
                self.transcript.blank();
                self.transcript.line(&format!(
                    "Maximum rounds ({}) reached. Leader: {} (Balance: ${})",
                    self.rules.max_rounds, leader.name, leader.balance
                ));
                for s in &standings {
                    self.transcript
                        .line(&format!("  {}: ${}", s.name, s.balance));
                }
                tracing::info!(leader = %leader.name, rounds = self.rules.max_rounds, "round cap reached");
                return Ok(GameOutcome::RoundCap {
                    rounds_played: self.rules.max_rounds,
                    leader,
                    standings,
                });
            }

            self.play_round(round).await?;
            round += 1;
        }
    }

    fn remove_bankrupt_players(&mut self) {
        let min_bet = self.rules.min_bet;
        let transcript = &mut self.transcript;
        self.players.retain(|p| {
            if p.balance() >= min_bet {
                return true;
            }
            transcript.line(&format!(
                "{} is eliminated (Balance: ${}).",
                p.name(),
                p.balance()
            ));
            tracing::info!(player = p.name(), balance = p.balance(), "player eliminated");
            false
        });
    }
}

fn standing(p: &Player) -> Standing {
    Standing {
        name: p.name().to_string(),
        balance: p.balance(),
    }
}

fn leader(standings: &[Standing]) -> Standing {
    let mut best = &standings[0];
    for s in &standings[1..] {
        if s.balance > best.balance {
            best = s;
        }
    }
    best.clone()
}
