use thiserror::Error;

use crate::cards::Card;

/// Failures raised by the card model, evaluator, and showdown resolver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Deck exhausted: requested {requested} fresh cards, {remaining} remain")]
    ExhaustedDeck { requested: usize, remaining: usize },
    #[error("Invalid hand: expected 5 to 7 cards, got {count}")]
    InvalidHand { count: usize },
    #[error("Duplicate card in hand: {0}")]
    DuplicateCard(Card),
    #[error("Unknown rank token: {0:?}")]
    UnknownRank(String),
    #[error("Unknown suit token: {0:?}")]
    UnknownSuit(String),
    #[error("No active players at showdown")]
    NoActivePlayers,
    #[error("Player {0} reached showdown without a score")]
    MissingScore(usize),
}

/// Failures raised while driving a hand through its streets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid seat count: {0} (expected 2 to 4)")]
    InvalidSeatCount(usize),
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Cannot deal the {requested} before the {expected}")]
    OutOfOrderDeal {
        requested: &'static str,
        expected: &'static str,
    },
    #[error("Showdown before the river with {active} players still active")]
    HandNotComplete { active: usize },
    #[error("Player {0} already folded")]
    PlayerAlreadyFolded(usize),
    #[error("Unknown player {0}")]
    UnknownPlayer(usize),
    #[error("Player {0} is the last one in the hand and cannot fold")]
    LastActivePlayer(usize),
    #[error("Chip total overflows: {0}")]
    ChipOverflow(String),
    #[error("Insufficient chips for player {player}: stack {stack}, wanted {amount}")]
    InsufficientChips { player: usize, stack: u32, amount: u32 },
    #[error(transparent)]
    Engine(#[from] EngineError),
}
