use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet amount: {amount}, balance: {balance}")]
    InvalidBet { amount: u64, balance: u64 },
    #[error("Deck is empty")]
    EmptyDeck,
    #[error("Deck count must be at least 1")]
    InvalidDeckCount,
    #[error("Minimum bet must be positive")]
    InvalidMinimumBet,
    #[error("Round cap must be at least 1")]
    InvalidRoundCap,
    #[error("Starting balance {balance} is below the minimum bet {minimum}")]
    StartingBalanceTooLow { balance: u64, minimum: u64 },
    #[error("Player {0} already seated")]
    DuplicatePlayer(String),
}
