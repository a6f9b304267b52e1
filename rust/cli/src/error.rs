//! Error types for the CLI application.
//!
//! Library errors from the engine and advisor convert into [`CliError`] so
//! command handlers can propagate them with `?`.

use std::fmt;

use holdem_advisor::errors::AdvisorError;
use holdem_engine::errors::{EngineError, GameError};

use crate::config::ConfigError;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine or advisor error
    Engine(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<EngineError> for CliError {
    fn from(error: EngineError) -> Self {
        match error {
            // bad card tokens come straight from the command line
            EngineError::UnknownRank(_)
            | EngineError::UnknownSuit(_)
            | EngineError::DuplicateCard(_)
            | EngineError::InvalidHand { .. } => CliError::InvalidInput(error.to_string()),
            other => CliError::Engine(other.to_string()),
        }
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        match error {
            GameError::Engine(e) => e.into(),
            other => CliError::Engine(other.to_string()),
        }
    }
}

impl From<AdvisorError> for CliError {
    fn from(error: AdvisorError) -> Self {
        match error {
            AdvisorError::Io(e) => CliError::Io(e),
            AdvisorError::Engine(e) => e.into(),
            AdvisorError::UnknownAction(_) | AdvisorError::NoLegalAction => {
                CliError::InvalidInput(error.to_string())
            }
            other => CliError::Engine(other.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::parse_cards;

    #[test]
    fn bad_card_token_is_invalid_input() {
        let err: CliError = parse_cards("Zz").unwrap_err().into();
        assert!(matches!(err, CliError::InvalidInput(_)));
        assert!(err.to_string().starts_with("Invalid input:"));
    }

    #[test]
    fn wrapped_engine_errors_are_unwrapped() {
        let err: CliError = GameError::Engine(EngineError::InvalidHand { count: 3 }).into();
        assert!(matches!(err, CliError::InvalidInput(_)));
        let err: CliError = GameError::InvalidSeatCount(9).into();
        assert!(matches!(err, CliError::Engine(_)));
    }
}
