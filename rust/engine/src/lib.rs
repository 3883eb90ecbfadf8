//! # tablemind-engine: Multi-player Blackjack Table Engine
//!
//! A blackjack round/table engine in which every seat's bets and in-hand
//! choices are delegated to a pluggable [`provider::DecisionProvider`]. The
//! engine owns the rules and the money; providers only answer questions.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and blackjack point values
//! - [`deck`] - Single-use shuffled deck of one or more 52-card sets
//! - [`hand`] - Hand accumulation and scoring (best total, soft, bust, blackjack)
//! - [`player`] - Player ledger and settlement, dealer seat, player actions
//! - [`context`] - Snapshots handed to decision providers
//! - [`provider`] - Decision provider trait and the engine's fallback policy
//! - [`round`] - Per-hand state machine
//! - [`table`] - Roster, elimination, and the multi-round lifecycle
//! - [`rules`] - Table configuration, outcome evaluation, dealer policy
//! - [`transcript`] - Transcript sinks and JSONL round history
//! - [`usage`] - Provider usage aggregation
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use tablemind_engine::cards::{Card, Rank, Suit};
//! use tablemind_engine::hand::Hand;
//!
//! let mut hand = Hand::new();
//! hand.add(Card::new(Rank::Ace, Suit::Hearts));
//! hand.add(Card::new(Rank::Six, Suit::Clubs));
//!
//! assert_eq!(hand.best_value(), 17);
//! assert!(hand.is_soft());
//! ```
//!
//! ## Running a Game
//!
//! ```rust
//! use tablemind_engine::rules::TableRules;
//! use tablemind_engine::table::{GameOutcome, Table};
//! use tablemind_engine::transcript::MemoryTranscript;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let rules = TableRules { max_rounds: 5, ..TableRules::default() };
//! let mut table = Table::with_seed(rules, Box::new(MemoryTranscript::new()), 42).unwrap();
//! table.add_player("Ann", None).unwrap();
//! table.add_player("Bob", None).unwrap();
//!
//! match table.play_until_one_remaining().await.unwrap() {
//!     GameOutcome::SingleWinner(winner) => println!("{} wins", winner.name),
//!     GameOutcome::RoundCap { leader, .. } => println!("{} leads", leader.name),
//!     GameOutcome::NoPlayersLeft => println!("the house wins"),
//! }
//! assert!(table.players().len() <= 2);
//! # });
//! ```

pub mod cards;
pub mod context;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod player;
pub mod provider;
pub mod round;
pub mod rules;
pub mod table;
pub mod transcript;
pub mod usage;
